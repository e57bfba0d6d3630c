//! Tenant identification from request headers
//!
//! Every API request must name its tenant explicitly via the
//! `x-slotbook-tenant` header. A missing or blank header is rejected up
//! front; handlers never fall back to an implicit default tenant.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use slotbook_core::{Error, TenantId};

/// Header carrying the tenant id, supplied out-of-band by the embedding
/// client (storefront widget, admin console).
pub const TENANT_HEADER: &str = "x-slotbook-tenant";

/// Extractor for the tenant id header.
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantId);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(TENANT_HEADER)
            .ok_or_else(|| {
                ApiError(Error::InvalidTenant(format!(
                    "Missing {} header",
                    TENANT_HEADER
                )))
            })?
            .to_str()
            .map_err(|_| {
                ApiError(Error::InvalidTenant(format!(
                    "Malformed {} header",
                    TENANT_HEADER
                )))
            })?;

        Ok(Tenant(TenantId::parse(value).map_err(ApiError)?))
    }
}
