//! Facets surfaced in the collection filter drawer.

use crate::product::FilterFacet;

/// Facet ids shown in the drawer, in upstream order.
pub const DRAWER_FACET_IDS: [&str; 3] = ["filter.v.price", "filter.p.product_type", "filter.v.option.color"];

/// Keep only the facets the drawer renders.
pub fn drawer_facets(facets: &[FilterFacet]) -> Vec<FilterFacet> {
    facets
        .iter()
        .filter(|f| DRAWER_FACET_IDS.contains(&f.id.as_str()))
        .cloned()
        .collect()
}
