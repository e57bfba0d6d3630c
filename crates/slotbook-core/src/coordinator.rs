//! Booking coordination
//!
//! The coordinator accepts a booking request, fast-fails obviously bad
//! input, and commits through the ledger's atomic `reserve`. The reserve
//! call is the correctness boundary: a client may have resolved availability
//! seconds ago, so the coordinator's own pre-checks are a convenience, not
//! the guarantee.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    BookingLedger, BookingRequest, Error, NewBooking, NotificationRelay, Result, TenantDirectory,
    TenantId, Weekday,
};

pub struct BookingCoordinator {
    directory: Arc<dyn TenantDirectory>,
    ledger: Arc<dyn BookingLedger>,
    relay: Arc<dyn NotificationRelay>,
}

impl BookingCoordinator {
    pub fn new(
        directory: Arc<dyn TenantDirectory>,
        ledger: Arc<dyn BookingLedger>,
        relay: Arc<dyn NotificationRelay>,
    ) -> Self {
        Self {
            directory,
            ledger,
            relay,
        }
    }

    /// Book a slot for a tenant.
    ///
    /// Sequence: validate input (no I/O), check the label against the
    /// tenant's template for that weekday (fast fail), then call the
    /// ledger's atomic `reserve`. Under concurrent requests for the same
    /// (tenant, date, time) triple, exactly one call wins.
    ///
    /// On success the relay is notified; a delivery failure is logged and
    /// never rolls back the committed booking.
    ///
    /// # Errors
    /// - `Error::InvalidRequest` for malformed input or a label the
    ///   tenant's template never offers on that weekday
    /// - `Error::TenantNotFound` for an unknown tenant
    /// - `Error::Conflict` when the slot is already taken; the caller
    ///   should re-resolve availability, not retry the same slot
    /// - `Error::Unavailable` when storage cannot be reached
    pub async fn book(&self, tenant: &TenantId, request: BookingRequest) -> Result<crate::Booking> {
        request.validate()?;

        let template = self.directory.get_template(tenant).await?;
        let weekday = Weekday::from_date(request.date);
        if !template
            .slots_for(weekday)
            .iter()
            .any(|label| label == &request.time)
        {
            return Err(Error::InvalidRequest(format!(
                "Time '{}' is not offered on {:?}",
                request.time, weekday
            )));
        }

        let payload = NewBooking {
            customer_name: request.customer_name,
            service: request.service,
        };
        let booking = self
            .ledger
            .reserve(tenant, request.date, &request.time, payload)
            .await?;

        info!(
            %tenant,
            date = %booking.date,
            time = %booking.time,
            booking_id = %booking.id,
            "booking committed"
        );

        // Best-effort: the booking is the durable source of truth.
        if let Err(err) = self.relay.booking_confirmed(&booking).await {
            warn!(%tenant, booking_id = %booking.id, %err, "notification relay failed");
        }

        Ok(booking)
    }
}
