//! Storefront header: navigation, account menu, cart badge and theme.

use console::{SessionUser, Theme};
use serde::Serialize;

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/catalog", "Catalog"),
    ("/about", "About Us"),
    ("/contact", "Contact"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    /// The current path is exactly this link.
    pub active: bool,
}

/// One line of the account dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEntry {
    /// Non-clickable line showing who is signed in.
    Email { email: String },
    Link {
        label: &'static str,
        href: &'static str,
    },
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccountMenu {
    SignedIn {
        /// Letter shown in the avatar.
        initial: String,
        entries: Vec<MenuEntry>,
    },
    SignedOut {
        entries: Vec<MenuEntry>,
    },
}

impl AccountMenu {
    fn for_session(user: Option<&SessionUser>) -> Self {
        let Some(user) = user else {
            return AccountMenu::SignedOut {
                entries: vec![
                    MenuEntry::Link {
                        label: "Login",
                        href: "/login",
                    },
                    MenuEntry::Link {
                        label: "Register",
                        href: "/register",
                    },
                ],
            };
        };

        let mut entries = Vec::with_capacity(3);
        if let Some(email) = &user.email {
            entries.push(MenuEntry::Email {
                email: email.clone(),
            });
        }
        if user.is_admin() {
            entries.push(MenuEntry::Link {
                label: "Admin Dashboard",
                href: "/admin",
            });
        }
        entries.push(MenuEntry::Logout);

        AccountMenu::SignedIn {
            initial: avatar_initial(user),
            entries,
        }
    }
}

/// First letter of the name, else of the email, uppercased; `U` if neither.
pub fn avatar_initial(user: &SessionUser) -> String {
    [user.name.as_deref(), user.email.as_deref()]
        .into_iter()
        .flatten()
        .find_map(|s| s.chars().next())
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
}

/// Everything the header renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub nav: Vec<NavLink>,
    pub account: AccountMenu,
    /// Units in the cart; `None` hides the badge.
    pub cart_badge: Option<u32>,
    pub theme: Theme,
}

impl HeaderView {
    pub fn project(
        session: Option<&SessionUser>,
        pathname: &str,
        cart_count: u32,
        theme: Theme,
    ) -> Self {
        let nav = NAV_LINKS
            .iter()
            .map(|&(href, label)| NavLink {
                href,
                label,
                active: pathname == href,
            })
            .collect();

        Self {
            nav,
            account: AccountMenu::for_session(session),
            cart_badge: (cart_count > 0).then_some(cart_count),
            theme,
        }
    }

    /// Returns true if the account menu links to the admin dashboard.
    pub fn shows_admin_link(&self) -> bool {
        let AccountMenu::SignedIn { entries, .. } = &self.account else {
            return false;
        };
        entries
            .iter()
            .any(|e| matches!(e, MenuEntry::Link { href: "/admin", .. }))
    }
}
