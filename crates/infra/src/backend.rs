//! Seam between the HTTP layer and whatever serves catalog data.

use async_trait::async_trait;
use serde::Serialize;

use shopfront_catalog::{
    Collection, CollectionLink, CollectionQuery, FeaturedCollection, FilterParam, Shop, SortKey, SortSpec,
};
use shopfront_core::{CollectionHandle, Cursor};

/// Variables of one collection products query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRequest {
    pub handle: CollectionHandle,
    pub cursor: Option<Cursor>,
    pub filters: Vec<FilterParam>,
    pub sort_key: SortKey,
    pub reverse: bool,
    #[serde(rename = "pageBy")]
    pub page_size: u32,
}

impl CollectionRequest {
    pub fn new(handle: CollectionHandle, query: &CollectionQuery, page_size: u32) -> Self {
        Self {
            handle,
            cursor: query.cursor.clone(),
            filters: query.filters.clone(),
            sort_key: query.sort.sort_key,
            reverse: query.sort.reverse,
            page_size,
        }
    }

    pub fn sort(&self) -> SortSpec {
        SortSpec {
            sort_key: self.sort_key,
            reverse: self.reverse,
        }
    }

    /// Same request positioned after `cursor`.
    pub fn after(&self, cursor: &Cursor) -> Self {
        Self {
            cursor: Some(cursor.clone()),
            ..self.clone()
        }
    }
}

/// A resolved collection plus the sidebar list of all collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionResult {
    pub collection: Collection,
    pub collections: Vec<CollectionLink>,
}

/// Source of catalog data (the hosted commerce API, or an in-memory catalog).
#[async_trait]
pub trait CommerceBackend: Send + Sync {
    /// One page of a collection's products. A missing collection is
    /// `UpstreamError::NotFound`.
    async fn collection(&self, request: &CollectionRequest) -> Result<CollectionResult, crate::UpstreamError>;

    /// Featured (smart) collections for the home page.
    async fn featured_collections(&self) -> Result<Vec<FeaturedCollection>, crate::UpstreamError>;

    /// Shop name and description for the layout.
    async fn shop(&self) -> Result<Shop, crate::UpstreamError>;
}
