//! Product filter inputs and their applied-filter chips.

use serde::{Deserialize, Serialize};

use shopfront_core::ValueObject;

use crate::query::QueryParams;

/// Query key for the stock-status filter.
pub const AVAILABLE_KEY: &str = "available";
/// Query key for the vendor filter.
pub const PRODUCT_VENDOR_KEY: &str = "productVendor";
/// Query key for the product-type filter.
pub const PRODUCT_TYPE_KEY: &str = "productType";
/// Marker matched anywhere in a key (`variantOption`, `variantOption.color`, ...).
pub const VARIANT_OPTION_MARKER: &str = "variantOption";
pub const MIN_PRICE_KEY: &str = "minPrice";
pub const MAX_PRICE_KEY: &str = "maxPrice";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptionFilter {
    pub name: String,
    pub value: String,
}

impl VariantOptionFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, value) = raw.split_once(':')?;
        Some(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One upstream `ProductFilter` input.
///
/// Serializes to the single-key object shape the commerce API expects, e.g.
/// `{"productVendor": "Acme"}` or `{"price": {"min": 10.0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterParam {
    Available(bool),
    ProductVendor(String),
    ProductType(String),
    VariantOption(VariantOptionFilter),
    Price(PriceRange),
}

impl ValueObject for FilterParam {}

impl FilterParam {
    /// Build a scalar filter for an allow-listed key.
    pub fn scalar(key: &str, value: &str) -> Option<Self> {
        match key {
            PRODUCT_VENDOR_KEY => Some(Self::ProductVendor(value.to_string())),
            PRODUCT_TYPE_KEY => Some(Self::ProductType(value.to_string())),
            _ => None,
        }
    }

    /// Parse a `name:value` variant option, splitting on the first `:`.
    ///
    /// Returns `None` when the separator is missing.
    pub fn variant_option(raw: &str) -> Option<Self> {
        VariantOptionFilter::parse(raw).map(Self::VariantOption)
    }

    pub fn is_price(&self) -> bool {
        matches!(self, Self::Price(_))
    }
}

/// The `{key, value}` pair whose removal from the query string undoes a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParam {
    pub key: String,
    pub value: String,
}

/// A filter currently in effect, as displayed (and removable) in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilter {
    pub label: String,
    pub url_param: UrlParam,
}

impl AppliedFilter {
    pub fn new(label: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url_param: UrlParam {
                key: key.into(),
                value: value.into(),
            },
        }
    }

    /// Parameters with this filter removed; the result of clicking the chip.
    ///
    /// Price bounds are single-valued, so every occurrence of the bound's key
    /// goes; other filters lose only their first exact pair.
    pub fn removal_params(&self, current: &QueryParams) -> QueryParams {
        let key = self.url_param.key.as_str();
        if key == MIN_PRICE_KEY || key == MAX_PRICE_KEY {
            current.without_key(key)
        } else {
            current.without(key, &self.url_param.value)
        }
    }

    /// Query string (no leading `?`) with this filter removed.
    pub fn removal_query(&self, current: &QueryParams) -> String {
        self.removal_params(current).to_query_string()
    }
}

/// How non-numeric price bounds are coerced.
///
/// Price bounds never reject input: anything that does not parse to a finite
/// number becomes `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceCoercion;

impl PriceCoercion {
    pub fn coerce(&self, raw: &str) -> f64 {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }
}

pub fn availability_label(in_stock: bool) -> &'static str {
    if in_stock { "In stock" } else { "Out of stock" }
}

pub fn min_price_label(min: f64) -> String {
    format!("Min: ${min}")
}

pub fn max_price_label(max: f64) -> String {
    format!("Max: ${max}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_serialize_to_upstream_input_objects() {
        let filters = vec![
            FilterParam::Available(true),
            FilterParam::ProductVendor("Acme".into()),
            FilterParam::ProductType("Boards".into()),
            FilterParam::VariantOption(VariantOptionFilter { name: "Color".into(), value: "Red".into() }),
            FilterParam::Price(PriceRange { min: Some(10.0), max: None }),
        ];

        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "available": true },
                { "productVendor": "Acme" },
                { "productType": "Boards" },
                { "variantOption": { "name": "Color", "value": "Red" } },
                { "price": { "min": 10.0 } },
            ])
        );
    }

    #[test]
    fn variant_option_splits_on_first_separator() {
        assert_eq!(
            FilterParam::variant_option("Size:10:Wide"),
            Some(FilterParam::VariantOption(VariantOptionFilter {
                name: "Size".into(),
                value: "10:Wide".into()
            }))
        );
        assert_eq!(FilterParam::variant_option("Red"), None);
        assert_eq!(
            FilterParam::variant_option("Color:"),
            Some(FilterParam::VariantOption(VariantOptionFilter { name: "Color".into(), value: String::new() }))
        );
    }

    #[test]
    fn price_coercion_defaults_to_zero() {
        let c = PriceCoercion;
        assert_eq!(c.coerce("10"), 10.0);
        assert_eq!(c.coerce(" 12.5 "), 12.5);
        assert_eq!(c.coerce("-3"), -3.0);
        assert_eq!(c.coerce("abc"), 0.0);
        assert_eq!(c.coerce(""), 0.0);
        assert_eq!(c.coerce("NaN"), 0.0);
        assert_eq!(c.coerce("inf"), 0.0);
    }

    #[test]
    fn price_labels_drop_trailing_zero_fraction() {
        assert_eq!(min_price_label(10.0), "Min: $10");
        assert_eq!(max_price_label(49.5), "Max: $49.5");
    }

    #[test]
    fn removing_a_price_chip_drops_repeated_bounds() {
        let params = QueryParams::parse("minPrice=10&productType=Boards&minPrice=20");
        let chip = AppliedFilter::new(min_price_label(10.0), MIN_PRICE_KEY, "10");
        assert_eq!(chip.removal_query(&params), "productType=Boards");
    }

    #[test]
    fn removal_query_strips_exactly_one_pair() {
        let params = QueryParams::from_pairs([("available", "true"), ("productVendor", "Acme")]);
        let chip = AppliedFilter::new("Acme", "productVendor", "Acme");
        assert_eq!(chip.removal_query(&params), "available=true");
    }
}
