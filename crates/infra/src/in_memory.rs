//! In-memory catalog backend (dev/test).
//!
//! Mirrors the upstream query semantics closely enough for local development
//! and black-box tests. Filters of the same kind are OR-ed and different kinds
//! AND-ed; cursors are opaque offsets.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use shopfront_catalog::{
    Collection, CollectionLink, FeaturedCollection, FilterFacet, FilterParam, FilterValue, Image, Money, Nodes,
    PageInfo, PriceRange, Product, ProductConnection, ProductVariant, SelectedOption, Shop, SortKey,
};
use shopfront_core::{CollectionHandle, Cursor, DomainResult, ProductId};

use crate::backend::{CollectionRequest, CollectionResult, CommerceBackend};
use crate::error::{GraphQlError, UpstreamError};

const CURSOR_PREFIX: &str = "offset:";
const FEATURED_LIMIT: usize = 3;
const SIDEBAR_LIMIT: usize = 100;

/// A product plus the attributes the upstream filters on.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub product: Product,
    pub vendor: String,
    pub product_type: String,
    pub available: bool,
    /// Lower sells better.
    pub sales_rank: u32,
}

impl CatalogProduct {
    fn price(&self) -> f64 {
        self.product
            .first_variant()
            .and_then(|v| v.price.amount.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    fn options(&self) -> &[SelectedOption] {
        self.product
            .first_variant()
            .map(|v| v.selected_options.as_slice())
            .unwrap_or(&[])
    }

    fn matches(&self, filter: &FilterParam) -> bool {
        match filter {
            FilterParam::Available(available) => self.available == *available,
            FilterParam::ProductVendor(vendor) => self.vendor == *vendor,
            FilterParam::ProductType(product_type) => self.product_type == *product_type,
            FilterParam::VariantOption(option) => self
                .options()
                .iter()
                .any(|o| o.name.eq_ignore_ascii_case(&option.name) && o.value == option.value),
            FilterParam::Price(PriceRange { min, max }) => {
                let price = self.price();
                min.is_none_or(|min| price >= min) && max.is_none_or(|max| price <= max)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogCollection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub handle: CollectionHandle,
    pub image: Option<Image>,
    /// Smart (rule-based) collections are the ones featured on the home page.
    pub smart: bool,
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    shop: Shop,
    collections: Vec<CatalogCollection>,
}

impl InMemoryCatalog {
    pub fn new(shop: Shop, collections: Vec<CatalogCollection>) -> Self {
        Self { shop, collections }
    }

    fn find(&self, handle: &CollectionHandle) -> Option<&CatalogCollection> {
        self.collections.iter().find(|c| c.handle == *handle)
    }

    fn select(&self, collection: &CatalogCollection, request: &CollectionRequest) -> Result<ProductConnection, UpstreamError> {
        let mut matching: Vec<&CatalogProduct> = collection
            .products
            .iter()
            .filter(|p| matches_all(p, &request.filters))
            .collect();

        sort_products(&mut matching, request.sort_key);
        if request.reverse {
            matching.reverse();
        }

        let start = match &request.cursor {
            Some(cursor) => decode_cursor(cursor)?,
            None => 0,
        };
        let page_size = request.page_size.max(1) as usize;
        let start = start.min(matching.len());
        let end = start.saturating_add(page_size).min(matching.len());
        let nodes: Vec<Product> = matching
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|p| p.product.clone())
            .collect();

        let has_next_page = end < matching.len();
        let end_cursor = (!nodes.is_empty()).then(|| encode_cursor(end));

        Ok(ProductConnection {
            nodes,
            page_info: PageInfo {
                has_next_page,
                end_cursor,
            },
            filters: facets(&collection.products),
        })
    }
}

fn matches_all(product: &CatalogProduct, filters: &[FilterParam]) -> bool {
    // Same-kind filters are alternatives (multi-select); kinds combine with AND.
    let kinds = filters.iter().map(std::mem::discriminant);
    let mut seen = Vec::new();
    for kind in kinds {
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);
        let any = filters
            .iter()
            .filter(|f| std::mem::discriminant(*f) == kind)
            .any(|f| product.matches(f));
        if !any {
            return false;
        }
    }
    true
}

fn sort_products(products: &mut [&CatalogProduct], key: SortKey) {
    match key {
        SortKey::Relevance | SortKey::Manual => {}
        SortKey::Price => products.sort_by(|a, b| a.price().partial_cmp(&b.price()).unwrap_or(Ordering::Equal)),
        SortKey::BestSelling => products.sort_by_key(|p| p.sales_rank),
        SortKey::Created => products.sort_by_key(|p| p.product.published_at),
    }
}

fn encode_cursor(offset: usize) -> Cursor {
    Cursor::new(format!("{CURSOR_PREFIX}{offset}"))
}

fn decode_cursor(cursor: &Cursor) -> Result<usize, UpstreamError> {
    cursor
        .as_str()
        .strip_prefix(CURSOR_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| UpstreamError::GraphQl(vec![GraphQlError::new(format!("Invalid cursor: {cursor}"))]))
}

fn facet_value(facet_id: &str, label: &str, count: u32, input: &FilterParam) -> FilterValue {
    FilterValue {
        id: format!("{facet_id}.{}", label.to_lowercase().replace(' ', "-")),
        label: label.to_string(),
        count,
        input: serde_json::to_string(input).unwrap_or_default(),
    }
}

/// Build a LIST facet from `(label, filter)` observations, counting repeats.
fn list_facet(id: &str, label: &str, observed: impl Iterator<Item = (String, FilterParam)>) -> FilterFacet {
    let mut values: Vec<(String, FilterParam, u32)> = Vec::new();
    for (value_label, input) in observed {
        match values.iter_mut().find(|(l, _, _)| *l == value_label) {
            Some((_, _, count)) => *count += 1,
            None => values.push((value_label, input, 1)),
        }
    }
    FilterFacet {
        id: id.to_string(),
        label: label.to_string(),
        kind: "LIST".to_string(),
        values: values
            .iter()
            .map(|(value_label, input, count)| facet_value(id, value_label, *count, input))
            .collect(),
    }
}

fn facets(products: &[CatalogProduct]) -> Vec<FilterFacet> {
    let mut out = vec![list_facet(
        "filter.v.availability",
        "Availability",
        products.iter().map(|p| {
            let label = if p.available { "In stock" } else { "Out of stock" };
            (label.to_string(), FilterParam::Available(p.available))
        }),
    )];

    let max_price = products.iter().map(CatalogProduct::price).fold(0.0_f64, f64::max);
    let price_input = FilterParam::Price(PriceRange {
        min: Some(0.0),
        max: Some(max_price),
    });
    out.push(FilterFacet {
        id: "filter.v.price".to_string(),
        label: "Price".to_string(),
        kind: "PRICE_RANGE".to_string(),
        values: vec![FilterValue {
            id: "filter.v.price".to_string(),
            label: "Price".to_string(),
            count: 0,
            input: serde_json::to_string(&price_input).unwrap_or_default(),
        }],
    });

    out.push(list_facet(
        "filter.p.vendor",
        "Brand",
        products
            .iter()
            .map(|p| (p.vendor.clone(), FilterParam::ProductVendor(p.vendor.clone()))),
    ));
    out.push(list_facet(
        "filter.p.product_type",
        "Product type",
        products
            .iter()
            .map(|p| (p.product_type.clone(), FilterParam::ProductType(p.product_type.clone()))),
    ));

    let mut option_names: Vec<String> = Vec::new();
    for p in products {
        for o in p.options() {
            if !option_names.contains(&o.name) {
                option_names.push(o.name.clone());
            }
        }
    }
    for name in option_names {
        let id = format!("filter.v.option.{}", name.to_lowercase());
        out.push(list_facet(
            &id,
            &name,
            products.iter().flat_map(|p| {
                p.options()
                    .iter()
                    .filter(|o| o.name == name)
                    .map(|o| {
                        let input = FilterParam::VariantOption(shopfront_catalog::VariantOptionFilter {
                            name: o.name.clone(),
                            value: o.value.clone(),
                        });
                        (o.value.clone(), input)
                    })
                    .collect::<Vec<_>>()
            }),
        ));
    }

    out
}

#[async_trait]
impl CommerceBackend for InMemoryCatalog {
    async fn collection(&self, request: &CollectionRequest) -> Result<CollectionResult, UpstreamError> {
        let stored = self
            .find(&request.handle)
            .ok_or_else(|| UpstreamError::NotFound(request.handle.clone()))?;
        let products = self.select(stored, request)?;

        Ok(CollectionResult {
            collection: Collection {
                id: stored.id.clone(),
                title: stored.title.clone(),
                description: stored.description.clone(),
                handle: stored.handle.clone(),
                products,
            },
            collections: self
                .collections
                .iter()
                .take(SIDEBAR_LIMIT)
                .map(|c| CollectionLink {
                    title: c.title.clone(),
                    handle: c.handle.clone(),
                })
                .collect(),
        })
    }

    async fn featured_collections(&self) -> Result<Vec<FeaturedCollection>, UpstreamError> {
        Ok(self
            .collections
            .iter()
            .filter(|c| c.smart)
            .take(FEATURED_LIMIT)
            .map(|c| FeaturedCollection {
                id: c.id.clone(),
                title: c.title.clone(),
                handle: c.handle.clone(),
                image: c.image.clone(),
            })
            .collect())
    }

    async fn shop(&self) -> Result<Shop, UpstreamError> {
        Ok(self.shop.clone())
    }
}

// -------------------------
// Demo catalog
// -------------------------

struct DemoProduct<'a> {
    title: &'a str,
    vendor: &'a str,
    product_type: &'a str,
    color: &'a str,
    price: &'a str,
    available: bool,
}

fn demo_product(collection: &str, index: usize, seed: &DemoProduct<'_>, published_at: DateTime<Utc>) -> CatalogProduct {
    let handle = format!("{collection}-{}", seed.title.to_lowercase().replace(' ', "-"));
    let id = format!("gid://shopify/Product/{collection}-{index}");
    CatalogProduct {
        product: Product {
            id: ProductId::new(id.clone()),
            title: seed.title.to_string(),
            handle: handle.clone(),
            published_at: Some(published_at),
            variants: Nodes {
                nodes: vec![ProductVariant {
                    id: format!("{id}/variant"),
                    image: Some(Image {
                        url: format!("https://cdn.example.com/{handle}.png"),
                        alt_text: Some(seed.title.to_string()),
                        width: Some(800),
                        height: Some(800),
                    }),
                    price: Money {
                        amount: seed.price.to_string(),
                        currency_code: "USD".to_string(),
                    },
                    compare_at_price: None,
                    selected_options: vec![SelectedOption {
                        name: "Color".to_string(),
                        value: seed.color.to_string(),
                    }],
                }],
            },
        },
        vendor: seed.vendor.to_string(),
        product_type: seed.product_type.to_string(),
        available: seed.available,
        sales_rank: ((index * 7) % 23) as u32,
    }
}

fn demo_collection(
    handle: &str,
    title: &str,
    description: &str,
    smart: bool,
    products: &[DemoProduct<'_>],
) -> DomainResult<CatalogCollection> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_default();
    Ok(CatalogCollection {
        id: format!("gid://shopify/Collection/{handle}"),
        title: title.to_string(),
        description: description.to_string(),
        handle: CollectionHandle::parse(handle)?,
        image: Some(Image {
            url: format!("https://cdn.example.com/collections/{handle}.png"),
            alt_text: Some(title.to_string()),
            width: Some(1200),
            height: Some(800),
        }),
        smart,
        products: products
            .iter()
            .enumerate()
            .map(|(i, seed)| demo_product(handle, i, seed, base + chrono::Duration::days(i as i64)))
            .collect(),
    })
}

impl InMemoryCatalog {
    /// Seeded catalog used when no upstream API is configured.
    pub fn demo() -> DomainResult<Self> {
        const VENDORS: [&str; 3] = ["Hydrogen Boards", "Snowdevil", "Polar"];
        const COLORS: [&str; 4] = ["Red", "Blue", "Green", "Black"];
        const TITLES: [&str; 14] = [
            "Alpine Carver", "Backcountry Split", "Cloud Rider", "Drift Pro", "Edge Master", "Freestyle Kid",
            "Glacier Cruiser", "Half Pipe", "Ice Runner", "Jib Park", "Kicker", "Lunar Powder", "Mogul King",
            "Night Glide",
        ];

        let boards: Vec<DemoProduct<'static>> = TITLES
            .iter()
            .copied()
            .enumerate()
            .map(|(i, title)| DemoProduct {
                title,
                vendor: VENDORS[i % VENDORS.len()],
                product_type: "Snowboard",
                color: COLORS[i % COLORS.len()],
                price: ["349.95", "499.00", "629.95", "729.00", "885.95"][i % 5],
                available: i % 4 != 3,
            })
            .collect();

        let accessories = [
            DemoProduct { title: "Wax Kit", vendor: "Snowdevil", product_type: "Accessory", color: "Black", price: "19.99", available: true },
            DemoProduct { title: "Board Leash", vendor: "Polar", product_type: "Accessory", color: "Red", price: "12.50", available: true },
            DemoProduct { title: "Goggles", vendor: "Polar", product_type: "Eyewear", color: "Blue", price: "89.00", available: false },
        ];

        Ok(Self::new(
            Shop {
                name: "Snowdevil".to_string(),
                description: Some("Boards and gear for every slope".to_string()),
            },
            vec![
                demo_collection("snowboards", "Snowboards", "Every board we carry.", true, &boards)?,
                demo_collection("accessories", "Accessories", "Wax, leashes and eyewear.", true, &accessories)?,
                demo_collection("frontpage", "Home page", "", false, &boards[..4])?,
                demo_collection("clearance", "Clearance", "Nothing here right now.", true, &[])?,
            ],
        ))
    }
}
