//! Collection view payload served to storefront clients.
//!
//! The same document is returned for the first page and for every
//! `?cursor=` follow-up, so the incremental loader can read its next page from
//! `collection.products`.

use serde::{Deserialize, Serialize};

use shopfront_core::{CollectionHandle, Entity};

use crate::facets::drawer_facets;
use crate::filter::AppliedFilter;
use crate::page::Page;
use crate::product::{Collection, CollectionLink, FilterFacet};
use crate::sort::{SortOption, SortSpec};
use crate::translator::CollectionQuery;

pub const COLLECTION_PAGE_TYPE: &str = "collection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub page_type: String,
    pub handle: CollectionHandle,
    pub resource_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionView {
    pub collection: Collection,
    pub applied_filters: Vec<AppliedFilter>,
    pub sort: SortSpec,
    pub sort_options: Vec<SortOption>,
    pub collections: Vec<CollectionLink>,
    pub drawer_filters: Vec<FilterFacet>,
    pub analytics: Analytics,
    pub is_empty: bool,
}

impl CollectionView {
    pub fn new(collection: Collection, collections: Vec<CollectionLink>, query: CollectionQuery) -> Self {
        let analytics = Analytics {
            page_type: COLLECTION_PAGE_TYPE.to_string(),
            handle: collection.id().clone(),
            resource_id: collection.id.clone(),
        };
        Self {
            drawer_filters: drawer_facets(&collection.products.filters),
            is_empty: collection.products.nodes.is_empty(),
            sort_options: SortOption::menu(&query.sort),
            sort: query.sort,
            applied_filters: query.applied_filters,
            collections,
            analytics,
            collection,
        }
    }

    /// The products page carried by this view.
    pub fn page(&self) -> Page {
        self.collection.products.clone().into()
    }

    pub fn into_page(self) -> Page {
        self.collection.products.into()
    }
}
