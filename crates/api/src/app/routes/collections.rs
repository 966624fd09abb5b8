use std::sync::Arc;

use axum::{
    extract::{Extension, Path, RawQuery},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopfront_catalog::{CollectionView, QueryParams, translate};
use shopfront_core::CollectionHandle;
use shopfront_infra::CollectionRequest;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/:handle", get(get_collection))
}

/// Collection page, and with `cursor` the follow-up page endpoint used by
/// the incremental loader.
pub async fn get_collection(
    Extension(services): Extension<Arc<AppServices>>,
    Path(handle): Path<String>,
    RawQuery(raw): RawQuery,
) -> axum::response::Response {
    let handle = match CollectionHandle::parse(handle) {
        Ok(h) => h,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let params = QueryParams::parse(raw.as_deref().unwrap_or_default());
    let query = translate(&params);
    let request = CollectionRequest::new(handle, &query, services.page_size);

    tracing::info!(
        handle = %request.handle,
        filters = request.filters.len(),
        sort_key = request.sort_key.as_str(),
        reverse = request.reverse,
        paged = request.cursor.is_some(),
        "collection requested"
    );

    let result = match services.backend.collection(&request).await {
        Ok(r) => r,
        Err(e) => return errors::upstream_error_to_response(e),
    };

    Json(CollectionView::new(result.collection, result.collections, query)).into_response()
}
