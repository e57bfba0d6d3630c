//! Booking ledger trait
//!
//! The ledger is the durable set of committed bookings, partitioned by tenant
//! and bucketed by date. `reserve` is the only mutating operation in the
//! scheduling core and carries the single-winner guarantee.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{Booking, NewBooking, Result, TenantId};

/// Booking ledger trait
///
/// Implementations:
/// - `MemoryLedger`: DashMap day-buckets with per-bucket check-then-insert
/// - `SqliteStore`: UNIQUE(tenant_id, date, time_label) index as the
///   insert-if-absent primitive
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// Time labels already committed for a tenant on a date.
    ///
    /// "No bookings yet" is an empty vec, not an error; only genuine storage
    /// trouble is surfaced, and it must never be coerced into an empty set
    /// (a transient failure read as "all open" would let two callers book
    /// the same slot).
    ///
    /// # Errors
    /// - `Error::Unavailable` if the backing store cannot be reached
    async fn list_occupied(&self, tenant: &TenantId, date: NaiveDate) -> Result<Vec<String>>;

    /// Atomically claim the (tenant, date, time) triple.
    ///
    /// Under N simultaneous calls for the identical triple, exactly one
    /// returns the committed `Booking`; the rest get `Error::Conflict`.
    /// Exclusion is scoped to the triple (or its day bucket), never a global
    /// lock across tenants.
    ///
    /// # Errors
    /// - `Error::Conflict` if the triple is already committed. Callers must
    ///   re-resolve availability rather than retry the same slot.
    /// - `Error::Unavailable` if the backing store cannot be reached
    async fn reserve(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
        time: &str,
        payload: NewBooking,
    ) -> Result<Booking>;
}
