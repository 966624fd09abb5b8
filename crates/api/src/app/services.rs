use std::sync::Arc;

use shopfront_infra::{CommerceBackend, InMemoryCatalog, StorefrontClient};

use crate::config::ApiConfig;

/// Shared handler dependencies, injected as an `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub backend: Arc<dyn CommerceBackend>,
    pub page_size: u32,
}

impl AppServices {
    pub fn new(backend: Arc<dyn CommerceBackend>, page_size: u32) -> Self {
        Self { backend, page_size }
    }
}

pub fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let backend: Arc<dyn CommerceBackend> = match &config.storefront {
        Some(storefront) => {
            let client = StorefrontClient::new(storefront)?;
            tracing::info!(endpoint = client.endpoint(), "using storefront API backend");
            Arc::new(client)
        }
        None => {
            // In-memory catalog wiring (dev/test).
            tracing::info!("using in-memory catalog backend");
            Arc::new(InMemoryCatalog::demo()?)
        }
    };

    Ok(AppServices::new(backend, config.page_size))
}
