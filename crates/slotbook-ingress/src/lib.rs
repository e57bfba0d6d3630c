//! HTTP ingress for slotbook
//!
//! axum router and handlers for the scheduling API: availability queries,
//! booking submission, and weekly-template settings. Every request is scoped
//! to a tenant via the `x-slotbook-tenant` header; there is no default
//! tenant.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod tenant_header;

pub use error::ApiError;
pub use routes::{AppState, router};
pub use tenant_header::{TENANT_HEADER, Tenant};
