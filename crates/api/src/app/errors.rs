use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopfront_core::DomainError;
use shopfront_infra::UpstreamError;

pub fn upstream_error_to_response(err: UpstreamError) -> axum::response::Response {
    match err {
        UpstreamError::NotFound(handle) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("collection {handle} not found"),
        ),
        UpstreamError::Domain(e) => domain_error_to_response(e),
        other => {
            tracing::error!(error = %other, "upstream request failed");
            json_error(StatusCode::BAD_GATEWAY, "upstream_error", other.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_handle", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
