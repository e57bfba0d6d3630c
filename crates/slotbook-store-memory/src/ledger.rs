//! DashMap-backed BookingLedger

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use tracing::debug;

use slotbook_core::{Booking, BookingLedger, Error, NewBooking, Result, TenantId};

/// In-memory booking ledger.
///
/// Bookings are bucketed by (tenant, date). `reserve` holds the DashMap
/// entry guard for the bucket across its check-then-insert, so concurrent
/// reserves of the same triple serialize on that bucket only; unrelated
/// tenants and dates never contend.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    days: DashMap<(TenantId, NaiveDate), Vec<Booking>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingLedger for MemoryLedger {
    async fn list_occupied(&self, tenant: &TenantId, date: NaiveDate) -> Result<Vec<String>> {
        // No bucket yet means no bookings yet, not an error.
        Ok(self
            .days
            .get(&(tenant.clone(), date))
            .map(|bucket| bucket.iter().map(|b| b.time.clone()).collect())
            .unwrap_or_default())
    }

    async fn reserve(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
        time: &str,
        payload: NewBooking,
    ) -> Result<Booking> {
        let mut bucket = self.days.entry((tenant.clone(), date)).or_default();

        if bucket.iter().any(|b| b.time == time) {
            return Err(Error::Conflict {
                date: date.to_string(),
                time: time.to_string(),
            });
        }

        let booking = payload.into_booking(tenant.clone(), date, time.to_string());
        bucket.push(booking.clone());
        debug!(%tenant, %date, time, booking_id = %booking.id, "slot reserved");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn shop() -> TenantId {
        TenantId::parse("shop").unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn payload(name: &str) -> NewBooking {
        NewBooking {
            customer_name: name.to_string(),
            service: "Trim".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_ledger_lists_nothing() {
        let ledger = MemoryLedger::new();
        let occupied = ledger.list_occupied(&shop(), monday()).await.unwrap();
        assert!(occupied.is_empty());
    }

    #[tokio::test]
    async fn test_reserve_then_list() {
        let ledger = MemoryLedger::new();
        ledger
            .reserve(&shop(), monday(), "09:00", payload("Ada"))
            .await
            .unwrap();

        let occupied = ledger.list_occupied(&shop(), monday()).await.unwrap();
        assert_eq!(occupied, vec!["09:00".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_reserve_conflicts() {
        let ledger = MemoryLedger::new();
        ledger
            .reserve(&shop(), monday(), "09:00", payload("Ada"))
            .await
            .unwrap();
        let err = ledger
            .reserve(&shop(), monday(), "09:00", payload("Grace"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_same_time_different_date_is_free() {
        let ledger = MemoryLedger::new();
        let tuesday = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        ledger
            .reserve(&shop(), monday(), "09:00", payload("Ada"))
            .await
            .unwrap();
        assert!(
            ledger
                .reserve(&shop(), tuesday, "09:00", payload("Ada"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_same_slot_different_tenant_is_free() {
        let ledger = MemoryLedger::new();
        let other = TenantId::parse("studio").unwrap();
        ledger
            .reserve(&shop(), monday(), "09:00", payload("Ada"))
            .await
            .unwrap();
        assert!(
            ledger
                .reserve(&other, monday(), "09:00", payload("Ada"))
                .await
                .is_ok()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_reserves_single_winner() {
        let ledger = Arc::new(MemoryLedger::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .reserve(&shop(), monday(), "09:00", payload(&format!("caller-{i}")))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(err) => assert!(err.is_conflict()),
            }
        }
        assert_eq!(wins, 1);

        // Storage never shows two bookings for the triple.
        let occupied = ledger.list_occupied(&shop(), monday()).await.unwrap();
        assert_eq!(occupied, vec!["09:00".to_string()]);
    }
}
