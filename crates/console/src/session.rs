//! Session and theme handles handed to the console by its host.
//!
//! Both are owned elsewhere (the auth provider and the theme switcher); the
//! console only reads them and forwards changes to whoever subscribed.

use std::sync::Arc;

use catalog::Role;
use common::EntityId;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Identity supplied by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: EntityId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Shared handle on the current session, `None` when signed out.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    current: Arc<watch::Sender<Option<SessionUser>>>,
}

impl SessionHandle {
    pub fn anonymous() -> Self {
        Self::from_user(None)
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self::from_user(Some(user))
    }

    fn from_user(user: Option<SessionUser>) -> Self {
        let (current, _) = watch::channel(user);
        Self {
            current: Arc::new(current),
        }
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current.borrow().clone()
    }

    pub fn is_admin(&self) -> bool {
        self.current.borrow().as_ref().is_some_and(SessionUser::is_admin)
    }

    pub fn sign_in(&self, user: SessionUser) {
        tracing::debug!(user_id = %user.id, role = %user.role, "session started");
        self.current.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        tracing::debug!("session ended");
        self.current.send_replace(None);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.current.subscribe()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Next theme for the header toggle. `System` toggles to `Dark`.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared handle on the theme preference.
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    current: Arc<watch::Sender<Theme>>,
}

impl ThemeHandle {
    pub fn new(theme: Theme) -> Self {
        let (current, _) = watch::channel(theme);
        Self {
            current: Arc::new(current),
        }
    }

    pub fn get(&self) -> Theme {
        *self.current.borrow()
    }

    pub fn set(&self, theme: Theme) {
        self.current.send_replace(theme);
    }

    /// Flips between light and dark, returning the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.current.subscribe()
    }
}

impl Default for ThemeHandle {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
