use serde::{Deserialize, Serialize};

use shopfront_catalog::{FeaturedCollection, Shop};

// -------------------------
// Response DTOs
// -------------------------

/// Home page payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub shop: Shop,
    pub featured_collections: Vec<FeaturedCollection>,
}

/// Layout payload shared by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub shop: Shop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_response_uses_camel_case_keys() {
        let body = HomeResponse {
            shop: Shop {
                name: "Snowdevil".to_string(),
                description: None,
            },
            featured_collections: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["shop"]["name"], "Snowdevil");
        assert!(json["featuredCollections"].as_array().unwrap().is_empty());
    }
}
