//! Remote gateway to the storefront admin API.
//!
//! - [`RemoteGateway`] issues create/update/patch/delete requests and lists
//!   collections for the page-level refetch
//! - [`CartQuery`] reads a user's cart lines for the header badge
//! - [`HttpGateway`] talks to the real backend over HTTP
//! - [`InMemoryGateway`] simulates the backend in-process

pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod request;

pub use common::{EntityId, EntityKind};
pub use error::{GatewayError, Result};
pub use gateway::{CartQuery, RemoteGateway};
pub use http::HttpGateway;
pub use memory::{GatewayCall, InMemoryGateway};
pub use request::{GatewayRequest, Operation};
