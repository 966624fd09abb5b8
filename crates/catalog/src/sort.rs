//! Collection sort options.

use serde::{Deserialize, Serialize};

use shopfront_core::ValueObject;

/// Upstream `ProductCollectionSortKeys` subset exposed by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    Relevance,
    Price,
    BestSelling,
    Created,
    Manual,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "RELEVANCE",
            SortKey::Price => "PRICE",
            SortKey::BestSelling => "BEST_SELLING",
            SortKey::Created => "CREATED",
            SortKey::Manual => "MANUAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_key: SortKey,
    pub reverse: bool,
}

impl ValueObject for SortSpec {}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Relevance,
            reverse: false,
        }
    }
}

/// `(token, label, spec)` for every selectable sort, in menu order.
const SORT_TABLE: [(&str, &str, SortSpec); 5] = [
    ("featured", "Featured", SortSpec { sort_key: SortKey::Manual, reverse: false }),
    ("price-low-high", "Price: Low - High", SortSpec { sort_key: SortKey::Price, reverse: false }),
    ("price-high-low", "Price: High - Low", SortSpec { sort_key: SortKey::Price, reverse: true }),
    ("best-selling", "Best Selling", SortSpec { sort_key: SortKey::BestSelling, reverse: false }),
    ("newest", "Newest", SortSpec { sort_key: SortKey::Created, reverse: true }),
];

impl SortSpec {
    /// Map a `sort` query token; absent or unknown tokens fall back to relevance.
    pub fn from_token(token: Option<&str>) -> Self {
        token
            .and_then(|t| SORT_TABLE.iter().find(|(tok, _, _)| *tok == t))
            .map(|(_, _, spec)| *spec)
            .unwrap_or_default()
    }

    /// Query token selecting this spec, if any (relevance has none).
    pub fn token(&self) -> Option<&'static str> {
        SORT_TABLE
            .iter()
            .find(|(_, _, spec)| spec == self)
            .map(|(tok, _, _)| *tok)
    }
}

/// Sort menu entry rendered next to the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub token: String,
    pub label: String,
    pub selected: bool,
}

impl SortOption {
    pub fn menu(current: &SortSpec) -> Vec<SortOption> {
        SORT_TABLE
            .iter()
            .map(|(token, label, spec)| SortOption {
                token: token.to_string(),
                label: label.to_string(),
                selected: spec == current,
            })
            .collect()
    }
}
