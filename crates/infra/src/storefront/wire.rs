//! GraphQL response envelopes.

use serde::Deserialize;

use shopfront_catalog::{Collection, CollectionLink, FeaturedCollection, Nodes, Shop};

use crate::error::GraphQlError;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionData {
    pub collection: Option<Collection>,
    #[serde(default)]
    pub collections: Nodes<CollectionLink>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedCollectionsData {
    pub collections: Nodes<FeaturedCollection>,
}

#[derive(Debug, Deserialize)]
pub struct LayoutData {
    pub shop: Shop,
}
