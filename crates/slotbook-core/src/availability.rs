//! Availability resolution
//!
//! Given a tenant and a calendar date, compute the offerable slot set:
//! the weekly template's labels for that weekday, each tagged open or
//! occupied against the booking ledger. Results are recomputed on every
//! query and never cached, because the ledger can change between requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::{BookingLedger, Result, TenantDirectory, TenantId, Weekday};

/// Whether a template slot is currently offerable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Open,
    Occupied,
}

/// One entry of an availability query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub status: SlotStatus,
}

/// Read-only resolver over the tenant directory and booking ledger.
#[derive(Clone)]
pub struct AvailabilityResolver {
    directory: Arc<dyn TenantDirectory>,
    ledger: Arc<dyn BookingLedger>,
}

impl AvailabilityResolver {
    pub fn new(directory: Arc<dyn TenantDirectory>, ledger: Arc<dyn BookingLedger>) -> Self {
        Self { directory, ledger }
    }

    /// Compute the tagged slot sequence for a tenant and date.
    ///
    /// Template order is preserved: it drives deterministic UI layout and
    /// downstream tie-breaks. An empty result means the tenant is closed
    /// that weekday, which is valid.
    ///
    /// # Errors
    /// - `Error::TenantNotFound` for an unknown tenant (never an empty
    ///   schedule masquerading as success)
    /// - `Error::Unavailable` if either store cannot be reached; a failed
    ///   occupied lookup is never treated as "all open"
    pub async fn resolve(&self, tenant: &TenantId, date: NaiveDate) -> Result<Vec<Slot>> {
        let template = self.directory.get_template(tenant).await?;
        let weekday = Weekday::from_date(date);
        let candidates = template.slots_for(weekday);

        if candidates.is_empty() {
            debug!(%tenant, %date, ?weekday, "no slots configured, closed that day");
            return Ok(Vec::new());
        }

        let occupied: HashSet<String> = self
            .ledger
            .list_occupied(tenant, date)
            .await?
            .into_iter()
            .collect();

        let slots = candidates
            .iter()
            .map(|time| Slot {
                time: time.clone(),
                status: if occupied.contains(time) {
                    SlotStatus::Occupied
                } else {
                    SlotStatus::Open
                },
            })
            .collect();

        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Booking, Error, NewBooking, WeeklyTemplate};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeDirectory {
        templates: HashMap<String, WeeklyTemplate>,
    }

    #[async_trait]
    impl TenantDirectory for FakeDirectory {
        async fn get_template(&self, tenant: &TenantId) -> Result<WeeklyTemplate> {
            self.templates
                .get(tenant.as_str())
                .cloned()
                .ok_or_else(|| Error::TenantNotFound(tenant.to_string()))
        }

        async fn set_template(&self, _: &TenantId, _: WeeklyTemplate) -> Result<()> {
            unimplemented!("read-only fake")
        }
    }

    struct FakeLedger {
        occupied: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl BookingLedger for FakeLedger {
        async fn list_occupied(&self, _: &TenantId, _: NaiveDate) -> Result<Vec<String>> {
            if self.fail {
                return Err(Error::Unavailable("ledger down".to_string()));
            }
            Ok(self.occupied.lock().unwrap().clone())
        }

        async fn reserve(
            &self,
            _: &TenantId,
            _: NaiveDate,
            _: &str,
            _: NewBooking,
        ) -> Result<Booking> {
            unimplemented!("read-only fake")
        }
    }

    fn resolver(
        template: WeeklyTemplate,
        occupied: Vec<&str>,
        ledger_fails: bool,
    ) -> AvailabilityResolver {
        let mut templates = HashMap::new();
        templates.insert("shop".to_string(), template);
        AvailabilityResolver::new(
            Arc::new(FakeDirectory { templates }),
            Arc::new(FakeLedger {
                occupied: Mutex::new(occupied.iter().map(|s| s.to_string()).collect()),
                fail: ledger_fails,
            }),
        )
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn shop() -> TenantId {
        TenantId::parse("shop").unwrap()
    }

    #[tokio::test]
    async fn test_all_open_in_template_order() {
        let template = WeeklyTemplate::from_days([(
            Weekday::Monday,
            vec!["09:00".to_string(), "10:00".to_string()],
        )]);
        let slots = resolver(template, vec![], false)
            .resolve(&shop(), monday())
            .await
            .unwrap();

        assert_eq!(
            slots,
            vec![
                Slot {
                    time: "09:00".to_string(),
                    status: SlotStatus::Open
                },
                Slot {
                    time: "10:00".to_string(),
                    status: SlotStatus::Open
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_occupied_slot_is_tagged() {
        let template = WeeklyTemplate::from_days([(
            Weekday::Monday,
            vec!["09:00".to_string(), "10:00".to_string()],
        )]);
        let slots = resolver(template, vec!["09:00"], false)
            .resolve(&shop(), monday())
            .await
            .unwrap();

        assert_eq!(slots[0].status, SlotStatus::Occupied);
        assert_eq!(slots[1].status, SlotStatus::Open);
    }

    #[tokio::test]
    async fn test_closed_day_is_empty_not_error() {
        // Template only covers Monday; 2025-03-09 is a Sunday.
        let template =
            WeeklyTemplate::from_days([(Weekday::Monday, vec!["09:00".to_string()])]);
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let slots = resolver(template, vec![], false)
            .resolve(&shop(), sunday)
            .await
            .unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_not_found() {
        let template = WeeklyTemplate::new();
        let resolver = resolver(template, vec![], false);
        let ghost = TenantId::parse("ghost-tenant").unwrap();
        let err = resolver.resolve(&ghost, monday()).await.unwrap_err();
        assert!(matches!(err, Error::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn test_ledger_failure_is_not_all_open() {
        let template =
            WeeklyTemplate::from_days([(Weekday::Monday, vec!["09:00".to_string()])]);
        let err = resolver(template, vec![], true)
            .resolve(&shop(), monday())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
