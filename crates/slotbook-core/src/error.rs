//! Error types for Slotbook Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Multi-tenancy errors
    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    // Booking errors
    #[error("Slot already booked: {date} {time}")]
    Conflict { date: String, time: String },

    // Storage errors
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True if this is a booking conflict (slot genuinely taken).
    ///
    /// Conflicts must never be retried with the same parameters; the caller
    /// should re-resolve availability and pick another slot.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// True if the operation is safe to retry with backoff.
    ///
    /// Only transient storage trouble qualifies. A `Conflict` means the slot
    /// is taken, and an `InvalidRequest` will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_classification() {
        let err = Error::Conflict {
            date: "2025-03-03".to_string(),
            time: "09:00".to_string(),
        };
        assert!(err.is_conflict());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unavailable_is_retryable() {
        let err = Error::Unavailable("connection refused".to_string());
        assert!(err.is_retryable());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_invalid_request_not_retryable() {
        let err = Error::InvalidRequest("missing customer name".to_string());
        assert!(!err.is_retryable());
    }
}
