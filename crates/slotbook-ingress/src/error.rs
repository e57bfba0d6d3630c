//! Core error to HTTP response mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use slotbook_core::Error;

/// Wrapper turning `slotbook_core::Error` into an HTTP response.
///
/// The JSON envelope is `{"error": CODE, "message": ...}`; CODE is a stable
/// machine-readable string, the message is for humans. A 409 tells the
/// client to re-resolve availability and pick again, never to retry the
/// same slot.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            Error::InvalidRequest(_) | Error::InvalidTenant(_) | Error::Serialization(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
            }
            Error::TenantNotFound(_) => (StatusCode::NOT_FOUND, "TENANT_NOT_FOUND"),
            Error::Conflict { .. } => (StatusCode::CONFLICT, "SLOT_TAKEN"),
            Error::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            Error::Internal(_) | Error::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self.0 {
            Error::Conflict { .. } => {
                "That slot was just taken. Please pick another time.".to_string()
            }
            Error::TenantNotFound(tenant) => {
                format!("Tenant '{}' is not configured.", tenant)
            }
            // Hide storage internals from clients.
            Error::Internal(_) | Error::Io(_) => {
                error!(err = %self.0, "internal error");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}
