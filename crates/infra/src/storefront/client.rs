use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use shopfront_catalog::{FeaturedCollection, Shop};

use crate::backend::{CollectionRequest, CollectionResult, CommerceBackend};
use crate::error::UpstreamError;
use crate::storefront::queries::{COLLECTION_QUERY, FEATURED_COLLECTIONS_QUERY, LAYOUT_QUERY};
use crate::storefront::wire::{CollectionData, FeaturedCollectionsData, GraphQlResponse, LayoutData};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop origin, e.g. `https://example.myshopify.com`.
    pub shop_url: String,
    pub api_version: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl StorefrontConfig {
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "{}/api/{}/graphql.json",
            self.shop_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// Storefront API client. Cheap to clone (shares the connection pool).
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl StorefrontClient {
    pub fn new(config: &StorefrontConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.graphql_endpoint(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one GraphQL operation and decode its `data`.
    pub async fn execute<T, V>(&self, query: &str, variables: V) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let mut req = self.http.post(&self.endpoint).json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.access_token {
            req = req.header(ACCESS_TOKEN_HEADER, token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "storefront API returned an error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        decode_response(&bytes)
    }
}

/// Decode a GraphQL response body: GraphQL errors win over partial data.
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, UpstreamError> {
    let envelope: GraphQlResponse<T> = serde_json::from_slice(body)?;
    if !envelope.errors.is_empty() {
        return Err(UpstreamError::GraphQl(envelope.errors));
    }
    envelope.data.ok_or(UpstreamError::MissingData)
}

#[async_trait]
impl CommerceBackend for StorefrontClient {
    async fn collection(&self, request: &CollectionRequest) -> Result<CollectionResult, UpstreamError> {
        tracing::debug!(
            handle = %request.handle,
            filters = request.filters.len(),
            cursor = request.cursor.as_ref().map(|c| c.as_str()),
            "querying collection"
        );
        let data: CollectionData = self.execute(COLLECTION_QUERY, request).await?;
        let collection = data
            .collection
            .ok_or_else(|| UpstreamError::NotFound(request.handle.clone()))?;
        Ok(CollectionResult {
            collection,
            collections: data.collections.nodes,
        })
    }

    async fn featured_collections(&self) -> Result<Vec<FeaturedCollection>, UpstreamError> {
        let data: FeaturedCollectionsData = self.execute(FEATURED_COLLECTIONS_QUERY, serde_json::json!({})).await?;
        Ok(data.collections.nodes)
    }

    async fn shop(&self) -> Result<Shop, UpstreamError> {
        let data: LayoutData = self.execute(LAYOUT_QUERY, serde_json::json!({})).await?;
        Ok(data.shop)
    }
}
