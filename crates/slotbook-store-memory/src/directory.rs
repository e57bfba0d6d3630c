//! DashMap-backed TenantDirectory

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use slotbook_core::{Error, Result, TenantDirectory, TenantId, WeeklyTemplate};

/// In-memory tenant directory.
///
/// Template replacement is atomic per tenant: `DashMap::insert` swaps the
/// whole value, so concurrent readers see either the old template or the new
/// one.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    templates: DashMap<TenantId, WeeklyTemplate>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant at construction time (dev mode, tests).
    pub fn with_tenant(self, tenant: TenantId, template: WeeklyTemplate) -> Self {
        self.templates.insert(tenant, template);
        self
    }
}

#[async_trait]
impl TenantDirectory for MemoryDirectory {
    async fn get_template(&self, tenant: &TenantId) -> Result<WeeklyTemplate> {
        self.templates
            .get(tenant)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::TenantNotFound(tenant.to_string()))
    }

    async fn set_template(&self, tenant: &TenantId, template: WeeklyTemplate) -> Result<()> {
        template.validate()?;
        self.templates.insert(tenant.clone(), template);
        debug!(%tenant, "template replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbook_core::Weekday;

    fn shop() -> TenantId {
        TenantId::parse("shop").unwrap()
    }

    #[tokio::test]
    async fn test_unknown_tenant() {
        let directory = MemoryDirectory::new();
        let err = directory.get_template(&shop()).await.unwrap_err();
        assert!(matches!(err, Error::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let directory = MemoryDirectory::new();
        let template =
            WeeklyTemplate::from_days([(Weekday::Monday, vec!["09:00".to_string()])]);

        directory.set_template(&shop(), template.clone()).await.unwrap();
        let fetched = directory.get_template(&shop()).await.unwrap();
        assert_eq!(fetched, template);
    }

    #[tokio::test]
    async fn test_replace_leaves_no_residue() {
        let directory = MemoryDirectory::new();
        let first = WeeklyTemplate::from_days([
            (Weekday::Monday, vec!["09:00".to_string()]),
            (Weekday::Tuesday, vec!["11:00".to_string()]),
        ]);
        let second =
            WeeklyTemplate::from_days([(Weekday::Friday, vec!["14:00".to_string()])]);

        directory.set_template(&shop(), first).await.unwrap();
        directory.set_template(&shop(), second.clone()).await.unwrap();

        let fetched = directory.get_template(&shop()).await.unwrap();
        assert_eq!(fetched, second);
        assert!(fetched.slots_for(Weekday::Monday).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_template_rejected() {
        let directory = MemoryDirectory::new();
        let template = WeeklyTemplate::from_days([(
            Weekday::Monday,
            vec!["09:00".to_string(), "09:00".to_string()],
        )]);
        let err = directory.set_template(&shop(), template).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
