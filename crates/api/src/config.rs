//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use shopfront_catalog::DEFAULT_PAGE_SIZE;
use shopfront_infra::StorefrontConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_API_VERSION: &str = "2024-01";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Upstream commerce API; `None` selects the seeded in-memory catalog.
    pub storefront: Option<StorefrontConfig>,
    pub page_size: u32,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr: SocketAddr = parse_var(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;
        let page_size: u32 = parse_var(&lookup, "PAGE_SIZE", Some(DEFAULT_PAGE_SIZE))?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                var: "PAGE_SIZE",
                value: "0".to_string(),
            });
        }
        let timeout_secs: u64 = parse_var(&lookup, "UPSTREAM_TIMEOUT_SECS", Some(DEFAULT_TIMEOUT_SECS))?;
        let use_in_memory: bool = parse_var(&lookup, "USE_IN_MEMORY_CATALOG", Some(false))?;

        let storefront = match lookup("STOREFRONT_API_URL").filter(|url| !url.trim().is_empty()) {
            Some(_) if use_in_memory => None,
            Some(shop_url) => Some(StorefrontConfig {
                shop_url,
                api_version: lookup("STOREFRONT_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                access_token: lookup("STOREFRONT_ACCESS_TOKEN"),
                timeout: Duration::from_secs(timeout_secs),
            }),
            None => {
                if !use_in_memory {
                    tracing::warn!("STOREFRONT_API_URL not set; serving the in-memory demo catalog");
                }
                None
            }
        };

        Ok(Self {
            bind_addr,
            storefront,
            page_size,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { var, value })
        }
        None => default.ok_or(ConfigError::Invalid {
            var,
            value: String::new(),
        }),
    }
}
