use axum::{Router, routing::get};

pub mod collections;
pub mod home;
pub mod system;

/// Router for all storefront pages.
pub fn router() -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/layout", get(system::layout))
        .nest("/collections", collections::router())
}
