//! Upstream-owned catalog records.
//!
//! These mirror the commerce API's JSON shape (camelCase, `nodes` connections)
//! so the same types deserialize upstream responses and serialize the
//! collection view served to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{CollectionHandle, Cursor, Entity, ProductId, ValueObject};

/// A `{ nodes: [...] }` connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Monetary amount as returned upstream (decimal string + ISO currency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

impl ValueObject for Money {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl ValueObject for Image {}

/// A `{name, value}` option pair such as `Color: Red`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub image: Option<Image>,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// Product summary shown in a collection grid (first variant only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub variants: Nodes<ProductVariant>,
}

impl Product {
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.nodes.first()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<Cursor>,
}

impl PageInfo {
    pub fn last_page() -> Self {
        Self {
            has_next_page: false,
            end_cursor: None,
        }
    }
}

/// One selectable value of a facet. `input` is the upstream filter input as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub id: String,
    pub label: String,
    pub count: u32,
    pub input: String,
}

/// Upstream description of a filter dimension and its counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFacet {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub values: Vec<FilterValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub nodes: Vec<Product>,
    pub page_info: PageInfo,
    #[serde(default)]
    pub filters: Vec<FilterFacet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub handle: CollectionHandle,
    pub products: ProductConnection,
}

impl Entity for Collection {
    type Id = CollectionHandle;

    fn id(&self) -> &Self::Id {
        &self.handle
    }
}

/// Sidebar entry linking to another collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLink {
    pub title: String,
    pub handle: CollectionHandle,
}

/// Home page tile for a featured collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedCollection {
    pub id: String,
    pub title: String,
    pub handle: CollectionHandle,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
