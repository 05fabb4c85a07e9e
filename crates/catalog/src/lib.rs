//! Domain records for the Vivigro storefront.
//!
//! This crate provides:
//! - [`Product`], [`Order`] and [`User`] as the backend serves them
//! - [`Entity`], the tagged union the console caches
//! - [`Money`] with dollar-based wire encoding
//! - [`ProductForm`], the admin "Add New Product" form state
//! - [`CartItem`] and the header badge count

pub mod cart;
pub mod entity;
pub mod error;
pub mod form;
pub mod money;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, badge_count};
pub use common::{EntityId, EntityKind};
pub use entity::Entity;
pub use error::{CatalogError, Result};
pub use form::ProductForm;
pub use money::Money;
pub use order::{Order, OrderCustomer, OrderStatus, StatusUpdate};
pub use product::{Category, Product, ProductImage};
pub use user::{Role, User, UserCounts};
