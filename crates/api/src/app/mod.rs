//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: backend selection (upstream API or in-memory catalog)
//! - `routes/`: HTTP routes + handlers (one file per page)
//! - `dto.rs`: response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config)?;
    Ok(build_app_with_services(services))
}

/// Router over already-built services (tests inject their own backend).
pub fn build_app_with_services(services: services::AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(Extension(Arc::new(services))),
        )
}
