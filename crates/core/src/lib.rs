//! `shopfront-core`: storefront foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP, no upstream client).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CollectionHandle, Cursor, ProductId};
pub use value_object::ValueObject;
