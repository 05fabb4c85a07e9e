//! Entity management console for the storefront admin dashboard.
//!
//! Keeps a local view of server-owned records in sync with the backend:
//!
//! 1. [`EntityCache`] holds the last confirmed value of every record plus at
//!    most one optimistic patch per record
//! 2. [`MutationController`] applies the patch, calls the gateway, then
//!    commits or rolls back and refetches
//! 3. [`AdminConsole`] wires the controller to the product form and to the
//!    explicitly passed session and theme handles
//!
//! Rendering lives in the `projections` crate, which only reads
//! [`CacheSnapshot`]s.

pub mod cache;
pub mod config;
pub mod confirm;
pub mod console;
pub mod controller;
pub mod error;
pub mod pending;
pub mod session;
pub mod state;

pub use cache::{CacheEntry, CacheSnapshot, EntityCache};
pub use config::ConsoleConfig;
pub use confirm::{AlwaysConfirm, Confirm};
pub use console::AdminConsole;
pub use controller::MutationController;
pub use error::{ConsoleError, Result};
pub use pending::{EntityPatch, MutationKind, PendingMutation};
pub use session::{SessionHandle, SessionUser, Theme, ThemeHandle};
pub use state::MutationState;
