//! Infrastructure layer: upstream commerce API clients and adapters.

pub mod backend;
pub mod error;
pub mod in_memory;
pub mod page_fetcher;
pub mod storefront;

pub use backend::{CollectionRequest, CollectionResult, CommerceBackend};
pub use error::{GraphQlError, UpstreamError};
pub use in_memory::InMemoryCatalog;
pub use page_fetcher::{BackendPageFetcher, HttpPageFetcher};
pub use storefront::{StorefrontClient, StorefrontConfig};
