//! Catalog browsing domain: collection filters, sorting and incremental paging.
//!
//! This crate turns storefront query strings into upstream filter inputs and
//! keeps the client-side product grid state. It performs no HTTP itself; page
//! fetching goes through the [`loader::PageFetcher`] seam.

pub mod facets;
pub mod filter;
pub mod loader;
pub mod page;
pub mod product;
pub mod query;
pub mod sort;
pub mod translator;
pub mod view;

pub use filter::{AppliedFilter, FilterParam, PriceCoercion, PriceRange, UrlParam, VariantOptionFilter};
pub use loader::{LoadError, LoadOutcome, LoaderPhase, PageFetcher, ProductLoader};
pub use page::{Page, PageState};
pub use product::{
    Collection, CollectionLink, FeaturedCollection, FilterFacet, FilterValue, Image, Money, Nodes,
    PageInfo, Product, ProductConnection, ProductVariant, SelectedOption, Shop,
};
pub use query::QueryParams;
pub use sort::{SortKey, SortOption, SortSpec};
pub use translator::{CollectionQuery, selection_params, translate};
pub use view::{Analytics, CollectionView};

/// Default number of products per page in a collection grid.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
