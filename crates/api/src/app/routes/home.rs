use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::dto::HomeResponse;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn home(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let backend = &services.backend;
    match tokio::try_join!(backend.shop(), backend.featured_collections()) {
        Ok((shop, featured_collections)) => Json(HomeResponse {
            shop,
            featured_collections,
        })
        .into_response(),
        Err(e) => errors::upstream_error_to_response(e),
    }
}
