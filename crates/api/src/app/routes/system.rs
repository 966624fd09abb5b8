use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto::LayoutResponse;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn layout(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.backend.shop().await {
        Ok(shop) => Json(LayoutResponse { shop }).into_response(),
        Err(e) => errors::upstream_error_to_response(e),
    }
}
