//! GraphQL documents sent to the Storefront API.

/// Collection details, one page of its products with facets, and the
/// sidebar list of collections.
pub const COLLECTION_QUERY: &str = r#"
query CollectionDetails(
  $handle: String!
  $cursor: String
  $filters: [ProductFilter!]
  $sortKey: ProductCollectionSortKeys!
  $reverse: Boolean
  $pageBy: Int!
) {
  collection(handle: $handle) {
    id
    title
    description
    handle
    products(
      first: $pageBy
      after: $cursor
      filters: $filters
      sortKey: $sortKey
      reverse: $reverse
    ) {
      filters {
        id
        label
        type
        values {
          id
          label
          count
          input
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        id
        title
        publishedAt
        handle
        variants(first: 1) {
          nodes {
            id
            image {
              url
              altText
              width
              height
            }
            price {
              amount
              currencyCode
            }
            compareAtPrice {
              amount
              currencyCode
            }
            selectedOptions {
              name
              value
            }
          }
        }
      }
    }
  }
  collections(first: 100) {
    nodes {
      title
      handle
    }
  }
}
"#;

/// Smart collections shown on the home page.
pub const FEATURED_COLLECTIONS_QUERY: &str = r#"
query FeaturedCollections {
  collections(first: 3, query: "collection_type:smart") {
    nodes {
      id
      title
      handle
      image {
        altText
        width
        height
        url
      }
    }
  }
}
"#;

pub const LAYOUT_QUERY: &str = r#"
query Layout {
  shop {
    name
    description
  }
}
"#;
