//! Identifiers shared by every crate in the console workspace.

mod types;

pub use types::{EntityId, EntityKind};
