//! API routes and handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, middleware};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::middleware::request_id_middleware;
use crate::tenant_header::Tenant;
use slotbook_core::{
    AvailabilityResolver, Booking, BookingCoordinator, BookingLedger, BookingRequest, Error,
    NotificationRelay, Slot, TenantDirectory, WeeklyTemplate,
};

/// Shared handler state: the stores plus the resolver and coordinator built
/// over them.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<dyn TenantDirectory>,
    ledger: Arc<dyn BookingLedger>,
    resolver: AvailabilityResolver,
    coordinator: Arc<BookingCoordinator>,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn TenantDirectory>,
        ledger: Arc<dyn BookingLedger>,
        relay: Arc<dyn NotificationRelay>,
    ) -> Self {
        let resolver = AvailabilityResolver::new(directory.clone(), ledger.clone());
        let coordinator = Arc::new(BookingCoordinator::new(
            directory.clone(),
            ledger.clone(),
            relay,
        ));
        Self {
            directory,
            ledger,
            resolver,
            coordinator,
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/availability", get(get_availability))
        .route("/api/bookings", get(list_occupied).post(create_booking))
        .route(
            "/api/settings",
            get(get_settings).put(update_settings).post(update_settings),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct DateQuery {
    date: NaiveDate,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/availability?date=YYYY-MM-DD`
///
/// The full tagged slot sequence in template order. An empty array means the
/// tenant is closed that day; an unknown tenant is a 404, never a blank
/// calendar.
async fn get_availability(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Slot>>, ApiError> {
    let slots = state.resolver.resolve(&tenant, query.date).await?;
    debug!(%tenant, date = %query.date, slots = slots.len(), "availability resolved");
    Ok(Json(slots))
}

/// `GET /api/bookings?date=YYYY-MM-DD`
///
/// The loose external variant: just the occupied time labels, an empty array
/// when nothing is booked (including for a tenant with no records at all).
/// Storage trouble still surfaces as 503; it is never reported as "all
/// open".
async fn list_occupied(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let occupied = state.ledger.list_occupied(&tenant, query.date).await?;
    Ok(Json(occupied))
}

/// `POST /api/bookings`
///
/// Body: `{date, time, customerName, service}`. 201 with the committed
/// booking; 409 when the slot was just taken (the client should re-resolve
/// and offer another pick); 400 for malformed input.
async fn create_booking(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let request: BookingRequest = serde_json::from_value(body)
        .map_err(|e| Error::InvalidRequest(format!("Malformed booking request: {}", e)))?;

    let booking = state.coordinator.book(&tenant, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `GET /api/settings`
async fn get_settings(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
) -> Result<Json<WeeklyTemplate>, ApiError> {
    let template = state.directory.get_template(&tenant).await?;
    Ok(Json(template))
}

/// `PUT /api/settings` (POST also accepted for older clients)
///
/// Replaces the weekly template wholesale; there is no partial merge.
async fn update_settings(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, ApiError> {
    let template: WeeklyTemplate = serde_json::from_value(body)
        .map_err(|e| Error::InvalidRequest(format!("Malformed template: {}", e)))?;

    state.directory.set_template(&tenant, template).await?;
    Ok(StatusCode::NO_CONTENT)
}
