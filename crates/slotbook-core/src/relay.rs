//! Notification relay trait
//!
//! Successful bookings are announced to an external sink (webhook, intake
//! queue, CRM). Delivery is best-effort with at-least-once intent: the
//! committed booking is the durable source of truth, and a relay failure
//! never rolls it back.

use async_trait::async_trait;

use crate::{Booking, Result};

/// Outbound notification sink for confirmed bookings.
#[async_trait]
pub trait NotificationRelay: Send + Sync {
    /// Announce a committed booking.
    ///
    /// # Errors
    /// - `Error::Unavailable` if the sink cannot be reached. The caller logs
    ///   and moves on; the booking stands either way.
    async fn booking_confirmed(&self, booking: &Booking) -> Result<()>;
}
