//! Notification relay implementations
//!
//! Successful bookings are announced to an external sink. The webhook relay
//! POSTs a JSON summary to a configured URL (the original hub pushed the
//! same summary into its intake pipeline); the noop relay is for
//! deployments without a sink and for tests.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use slotbook_core::{Booking, Error, NotificationRelay, Result};

/// POSTs booking confirmations to a webhook URL.
pub struct WebhookRelay {
    client: reqwest::Client,
    url: String,
}

impl WebhookRelay {
    /// Create a relay targeting `url`.
    ///
    /// # Errors
    /// - `Error::Internal` if the HTTP client cannot be built
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl NotificationRelay for WebhookRelay {
    async fn booking_confirmed(&self, booking: &Booking) -> Result<()> {
        let summary = serde_json::json!({
            "tenant": booking.tenant,
            "customerName": booking.customer_name,
            "service": booking.service,
            "date": booking.date,
            "time": booking.time,
            "bookingId": booking.id,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&summary)
            .send()
            .await
            .map_err(|e| Error::Unavailable(format!("Webhook unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Unavailable(format!(
                "Webhook returned {}",
                response.status()
            )));
        }

        info!(booking_id = %booking.id, "booking notification delivered");
        Ok(())
    }
}

/// Relay that drops every notification.
#[derive(Debug, Default)]
pub struct NoopRelay;

impl NoopRelay {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationRelay for NoopRelay {
    async fn booking_confirmed(&self, booking: &Booking) -> Result<()> {
        debug!(booking_id = %booking.id, "notification dropped (noop relay)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use slotbook_core::TenantId;
    use uuid::Uuid;

    fn booking() -> Booking {
        Booking {
            id: Uuid::new_v4(),
            tenant: TenantId::parse("shop").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            time: "09:00".to_string(),
            customer_name: "Ada".to_string(),
            service: "Trim".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_noop_relay_accepts_everything() {
        let relay = NoopRelay::new();
        assert!(relay.booking_confirmed(&booking()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_unavailable() {
        // Port 1 on loopback refuses immediately.
        let relay = WebhookRelay::new("http://127.0.0.1:1/hook").unwrap();
        let err = relay.booking_confirmed(&booking()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
