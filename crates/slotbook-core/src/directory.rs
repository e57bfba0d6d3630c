//! Tenant directory trait
//!
//! The `TenantDirectory` trait resolves a tenant id to its recurring weekly
//! availability template, and stores template replacements. Implementations
//! range from an in-process map (dev, tests) to a database-backed store.

use async_trait::async_trait;

use crate::{Result, TenantId, WeeklyTemplate};

/// Tenant directory trait
///
/// The directory is read-mostly: templates change only on explicit,
/// operator-driven settings updates, and every update replaces the template
/// wholesale (no partial merge).
///
/// Implementations:
/// - `MemoryDirectory`: DashMap-backed (dev, tests, single node)
/// - `SqliteStore`: one row per tenant in SQLite
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Fetch a tenant's weekly template.
    ///
    /// # Errors
    /// - `Error::TenantNotFound` if the tenant id is unknown. A missing
    ///   tenant is a configuration error, never "no availability".
    /// - `Error::Unavailable` if the backing store cannot be reached
    async fn get_template(&self, tenant: &TenantId) -> Result<WeeklyTemplate>;

    /// Replace a tenant's weekly template wholesale.
    ///
    /// Validates the template before storing it. The replace must be atomic:
    /// concurrent readers see either the old template or the new one, never
    /// a mix.
    ///
    /// # Errors
    /// - `Error::InvalidRequest` if the template fails validation
    /// - `Error::Unavailable` if the backing store cannot be reached
    async fn set_template(&self, tenant: &TenantId, template: WeeklyTemplate) -> Result<()>;
}
