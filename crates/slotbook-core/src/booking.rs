//! Booking records and request payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, TenantId};

/// A committed appointment.
///
/// Identity for conflict purposes is the (tenant, date, time) triple: at most
/// one committed booking may exist per triple. Bookings are immutable once
/// committed and are never silently overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub tenant: TenantId,
    pub date: NaiveDate,
    pub time: String,
    pub customer_name: String,
    pub service: String,
    pub created_at: DateTime<Utc>,
}

/// Payload handed to the ledger when reserving a slot.
///
/// The ledger combines this with the (tenant, date, time) triple it is
/// claiming to mint the full `Booking` on success.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_name: String,
    pub service: String,
}

impl NewBooking {
    /// Mint the committed booking for a successfully claimed triple.
    pub fn into_booking(self, tenant: TenantId, date: NaiveDate, time: String) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            tenant,
            date,
            time,
            customer_name: self.customer_name,
            service: self.service,
            created_at: Utc::now(),
        }
    }
}

/// A booking request as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub service: String,
}

impl BookingRequest {
    /// Fast-fail input validation. No network or storage access.
    ///
    /// # Errors
    /// - `Error::InvalidRequest` for blank customer name, time, or service
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Customer name must be non-empty".to_string(),
            ));
        }
        if self.time.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Time label must be non-empty".to_string(),
            ));
        }
        if self.service.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Service label must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            time: "09:00".to_string(),
            customer_name: "Ada".to_string(),
            service: "Standard Haircut".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_customer_name_rejected() {
        let mut req = request();
        req.customer_name = "  ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_time_rejected() {
        let mut req = request();
        req.time = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{"date":"2025-03-03","time":"09:00","customerName":"Ada","service":"Trim"}"#;
        let req: BookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.customer_name, "Ada");
    }

    #[test]
    fn test_into_booking_carries_triple() {
        let tenant = TenantId::parse("barbershop-01").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let booking = NewBooking {
            customer_name: "Ada".to_string(),
            service: "Trim".to_string(),
        }
        .into_booking(tenant.clone(), date, "09:00".to_string());

        assert_eq!(booking.tenant, tenant);
        assert_eq!(booking.date, date);
        assert_eq!(booking.time, "09:00");
    }
}
