//! Query string -> upstream collection query.
//!
//! Malformed input never fails the request: unknown keys are ignored, bad
//! price bounds coerce to zero and variant options without a `name:value`
//! separator are dropped.

use serde::Serialize;

use shopfront_core::Cursor;

use crate::filter::{
    AVAILABLE_KEY, AppliedFilter, FilterParam, MAX_PRICE_KEY, MIN_PRICE_KEY, PriceCoercion, PriceRange,
    VARIANT_OPTION_MARKER, VariantOptionFilter, availability_label, max_price_label, min_price_label,
};
use crate::query::QueryParams;
use crate::sort::SortSpec;

pub const SORT_KEY: &str = "sort";
pub const CURSOR_KEY: &str = "cursor";

/// Everything a collection request derives from its query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    pub filters: Vec<FilterParam>,
    pub applied_filters: Vec<AppliedFilter>,
    pub sort: SortSpec,
    pub cursor: Option<Cursor>,
}

/// Translate query parameters using the default [`PriceCoercion`].
pub fn translate(params: &QueryParams) -> CollectionQuery {
    translate_with(params, PriceCoercion)
}

pub fn translate_with(params: &QueryParams, coercion: PriceCoercion) -> CollectionQuery {
    let mut filters = Vec::new();
    let mut applied_filters = Vec::new();

    for (key, value) in params.iter() {
        if key == AVAILABLE_KEY {
            let in_stock = value == "true";
            filters.push(FilterParam::Available(in_stock));
            applied_filters.push(AppliedFilter::new(availability_label(in_stock), key, value));
        } else if let Some(filter) = FilterParam::scalar(key, value) {
            filters.push(filter);
            applied_filters.push(AppliedFilter::new(value, key, value));
        } else if key.contains(VARIANT_OPTION_MARKER) {
            match VariantOptionFilter::parse(value) {
                Some(option) => {
                    applied_filters.push(AppliedFilter::new(option.value.clone(), key, value));
                    filters.push(FilterParam::VariantOption(option));
                }
                None => {
                    tracing::debug!(key, value, "dropping variant option without name:value separator");
                }
            }
        }
    }

    let min = params.get(MIN_PRICE_KEY);
    let max = params.get(MAX_PRICE_KEY);
    if min.is_some() || max.is_some() {
        let mut price = PriceRange::default();
        if let Some(raw) = min {
            let bound = coercion.coerce(raw);
            price.min = Some(bound);
            applied_filters.push(AppliedFilter::new(min_price_label(bound), MIN_PRICE_KEY, raw));
        }
        if let Some(raw) = max {
            let bound = coercion.coerce(raw);
            price.max = Some(bound);
            applied_filters.push(AppliedFilter::new(max_price_label(bound), MAX_PRICE_KEY, raw));
        }
        filters.push(FilterParam::Price(price));
    }

    CollectionQuery {
        filters,
        applied_filters,
        sort: SortSpec::from_token(params.get(SORT_KEY)),
        cursor: params.get(CURSOR_KEY).and_then(Cursor::from_param),
    }
}

/// Parameters that select the result set (filters and sort), i.e. everything
/// except the pagination cursor.
pub fn selection_params(params: &QueryParams) -> QueryParams {
    params.without_key(CURSOR_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::UrlParam;
    use crate::sort::SortKey;
    use proptest::prelude::*;

    fn labels(q: &CollectionQuery) -> Vec<&str> {
        q.applied_filters.iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn in_stock_vendor_and_min_price_example() {
        let q = translate(&QueryParams::parse("available=true&productVendor=Acme&minPrice=10"));

        assert_eq!(
            q.filters,
            vec![
                FilterParam::Available(true),
                FilterParam::ProductVendor("Acme".into()),
                FilterParam::Price(PriceRange { min: Some(10.0), max: None }),
            ]
        );
        assert_eq!(labels(&q), vec!["In stock", "Acme", "Min: $10"]);
        assert_eq!(
            q.applied_filters[2].url_param,
            UrlParam { key: "minPrice".into(), value: "10".into() }
        );
        assert_eq!(q.sort, SortSpec::default());
        assert_eq!(q.cursor, None);
    }

    #[test]
    fn availability_other_than_true_is_out_of_stock() {
        let q = translate(&QueryParams::parse("available=false&available=yes"));
        assert_eq!(q.filters, vec![FilterParam::Available(false), FilterParam::Available(false)]);
        assert_eq!(labels(&q), vec!["Out of stock", "Out of stock"]);
        assert_eq!(q.applied_filters[1].url_param.value, "yes");
    }

    #[test]
    fn variant_option_keys_are_prefix_matched() {
        let q = translate(&QueryParams::parse(
            "variantOption=Color%3ARed&variantOption.size=Size%3A10&variantOption=NoSeparator",
        ));
        assert_eq!(
            q.filters,
            vec![
                FilterParam::VariantOption(VariantOptionFilter { name: "Color".into(), value: "Red".into() }),
                FilterParam::VariantOption(VariantOptionFilter { name: "Size".into(), value: "10".into() }),
            ]
        );
        assert_eq!(labels(&q), vec!["Red", "10"]);
        assert_eq!(q.applied_filters[1].url_param.key, "variantOption.size");
        assert_eq!(q.applied_filters[1].url_param.value, "Size:10");
    }

    #[test]
    fn price_bounds_collapse_into_one_filter_with_two_chips() {
        let q = translate(&QueryParams::parse("maxPrice=50&productType=Boards&minPrice=abc"));
        assert_eq!(
            q.filters,
            vec![
                FilterParam::ProductType("Boards".into()),
                FilterParam::Price(PriceRange { min: Some(0.0), max: Some(50.0) }),
            ]
        );
        assert_eq!(labels(&q), vec!["Boards", "Min: $0", "Max: $50"]);
        assert_eq!(q.applied_filters[1].url_param.value, "abc");
    }

    #[test]
    fn sort_and_cursor_are_not_filters() {
        let q = translate(&QueryParams::parse("sort=price-high-low&cursor=abc&unknown=1"));
        assert!(q.filters.is_empty());
        assert!(q.applied_filters.is_empty());
        assert_eq!(q.sort, SortSpec { sort_key: SortKey::Price, reverse: true });
        assert_eq!(q.cursor.as_ref().map(|c| c.as_str()), Some("abc"));

        let q = translate(&QueryParams::parse("sort=bogus&cursor="));
        assert_eq!(q.sort, SortSpec { sort_key: SortKey::Relevance, reverse: false });
        assert_eq!(q.cursor, None);
    }

    #[test]
    fn selection_params_drop_only_the_cursor() {
        let params = QueryParams::parse("productVendor=Acme&cursor=abc&sort=newest");
        assert_eq!(selection_params(&params).to_query_string(), "productVendor=Acme&sort=newest");
    }

    fn same_items<T: PartialEq>(a: &[T], b: &[T]) -> bool {
        let count = |xs: &[T], x: &T| xs.iter().filter(|y| *y == x).count();
        a.len() == b.len() && a.iter().all(|x| count(a, x) == count(b, x))
    }

    #[test]
    fn duplicate_pair_removal_keeps_the_same_filter_set() {
        let params = QueryParams::parse("productVendor=a&available=false&productVendor=a");
        let q = translate(&params);
        let after = translate(&q.applied_filters[2].removal_params(&params));

        assert_eq!(labels(&after), vec!["Out of stock", "a"]);
        assert!(same_items(&after.filters, &q.filters[..2]));
    }

    fn filter_pair() -> impl Strategy<Value = (String, String)> {
        let word = "[A-Za-z0-9]{1,8}";
        prop_oneof![
            prop_oneof![Just("true".to_string()), Just("false".to_string())]
                .prop_map(|v| ("available".to_string(), v)),
            word.prop_map(|v| ("productVendor".to_string(), v)),
            word.prop_map(|v| ("productType".to_string(), v)),
            (word, word).prop_map(|(n, v)| ("variantOption".to_string(), format!("{n}:{v}"))),
        ]
    }

    fn recognized_params() -> impl Strategy<Value = QueryParams> {
        (
            proptest::collection::vec(filter_pair(), 0..8),
            proptest::option::of("[0-9]{1,4}|[a-z]{1,3}"),
            proptest::option::of("[0-9]{1,4}"),
            0usize..9,
        )
            .prop_map(|(mut pairs, min, max, at)| {
                if let Some(min) = min {
                    let at = at.min(pairs.len());
                    pairs.insert(at, ("minPrice".to_string(), min));
                }
                if let Some(max) = max {
                    pairs.push(("maxPrice".to_string(), max));
                }
                QueryParams::from_pairs(pairs)
            })
    }

    proptest! {
        #[test]
        fn applied_filters_match_filters_with_price_collapse(params in recognized_params()) {
            let q = translate(&params);
            let bounds = usize::from(params.has("minPrice")) + usize::from(params.has("maxPrice"));
            let non_price = q.filters.iter().filter(|f| !f.is_price()).count();
            let price_filters = q.filters.iter().filter(|f| f.is_price()).count();

            prop_assert_eq!(q.applied_filters.len(), non_price + bounds);
            prop_assert_eq!(price_filters, usize::from(bounds > 0));
            prop_assert_eq!(q.applied_filters.len(), params.len());
        }

        #[test]
        fn removing_a_chip_removes_exactly_that_filter(params in recognized_params(), pick in any::<prop::sample::Index>()) {
            let q = translate(&params);
            prop_assume!(!q.applied_filters.is_empty());

            let idx = pick.index(q.applied_filters.len());
            let chip = &q.applied_filters[idx];
            let after = translate(&chip.removal_params(&params));

            // Chip order follows parameter order, which removal may shift when
            // a pair is duplicated; compare as multisets.
            let mut expected = q.applied_filters.clone();
            expected.remove(idx);
            prop_assert!(
                same_items(&after.applied_filters, &expected),
                "{:?} vs {:?}", after.applied_filters, expected
            );

            let removed_price_bound = chip.url_param.key == "minPrice" || chip.url_param.key == "maxPrice";
            if removed_price_bound {
                let non_price = |f: &&FilterParam| !f.is_price();
                let after_non_price: Vec<_> = after.filters.iter().filter(non_price).cloned().collect();
                let before_non_price: Vec<_> = q.filters.iter().filter(non_price).cloned().collect();
                prop_assert!(same_items(&after_non_price, &before_non_price));
            } else {
                let mut expected_filters = q.filters.clone();
                expected_filters.remove(idx);
                prop_assert!(
                    same_items(&after.filters, &expected_filters),
                    "{:?} vs {:?}", after.filters, expected_filters
                );
            }
        }
    }
}
