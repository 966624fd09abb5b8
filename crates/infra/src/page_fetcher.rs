//! `PageFetcher` adapters for the incremental product loader.

use std::sync::Arc;

use async_trait::async_trait;

use shopfront_catalog::{CollectionView, Page, PageFetcher, QueryParams, selection_params};
use shopfront_core::Cursor;

use crate::backend::{CollectionRequest, CommerceBackend};
use crate::error::UpstreamError;

/// Fetches follow-up pages straight from a backend, reusing the first page's
/// filters, sort and page size.
#[derive(Clone)]
pub struct BackendPageFetcher {
    backend: Arc<dyn CommerceBackend>,
    request: CollectionRequest,
}

impl BackendPageFetcher {
    pub fn new(backend: Arc<dyn CommerceBackend>, request: CollectionRequest) -> Self {
        Self { backend, request }
    }
}

#[async_trait]
impl PageFetcher for BackendPageFetcher {
    type Error = UpstreamError;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page, Self::Error> {
        let result = self.backend.collection(&self.request.after(cursor)).await?;
        Ok(result.collection.products.into())
    }
}

/// Fetches follow-up pages from the storefront's own collection endpoint
/// (`GET /collections/{handle}?...&cursor=...`).
///
/// `selection` carries the active filter and sort parameters; only the cursor
/// changes between requests.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
    url: String,
    selection: QueryParams,
}

impl HttpPageFetcher {
    pub fn new(http: reqwest::Client, url: impl Into<String>, selection: QueryParams) -> Self {
        Self {
            http,
            url: url.into(),
            selection: selection_params(&selection),
        }
    }

    fn page_url(&self, cursor: &Cursor) -> String {
        let query = self.selection.with("cursor", cursor.as_str()).to_query_string();
        format!("{}?{}", self.url, query)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    type Error = UpstreamError;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page, Self::Error> {
        let url = self.page_url(cursor);
        tracing::debug!(%url, "fetching next product page");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let view: CollectionView = serde_json::from_slice(&resp.bytes().await?)?;
        Ok(view.into_page())
    }
}
