//! Shared ingress middleware

use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

/// Middleware to stamp a request id on every response.
///
/// Honors an incoming `x-request-id` header when present so upstream
/// proxies can correlate, otherwise generates one.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(req).await;

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
