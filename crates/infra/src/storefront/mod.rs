//! Client for the hosted commerce Storefront GraphQL API.

mod client;
pub mod queries;
pub mod wire;

pub use client::{StorefrontClient, StorefrontConfig, decode_response};
