//! Upstream (commerce API) error model.

use serde::Deserialize;
use thiserror::Error;

use shopfront_core::{CollectionHandle, DomainError};

/// Errors talking to the commerce API.
///
/// No retries happen at this layer; callers decide whether to surface or retry.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The query executed but returned GraphQL errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQl(Vec<GraphQlError>),

    /// The response body did not have the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried neither `data` nor `errors`.
    #[error("response contained no data")]
    MissingData,

    /// No collection exists for the handle.
    #[error("collection not found: {0}")]
    NotFound(CollectionHandle),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Domain(DomainError::NotFound))
    }
}

/// A GraphQL error returned by the commerce API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
