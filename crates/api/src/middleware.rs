use axum::{
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use shopfront_observability::{REQUEST_ID_HEADER, RequestId};

/// Run the request inside a span carrying its correlation id and echo the id
/// back in `x-request-id`.
pub async fn request_id_middleware(req: Request<axum::body::Body>, next: Next) -> Response {
    let inbound = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let request_id = RequestId::from_header(inbound);
    let span = request_id.span(req.method().as_str(), req.uri().path());

    let mut resp = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| tracing::debug!(status = resp.status().as_u16(), "request finished"));
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}
