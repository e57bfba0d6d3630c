//! Store and relay construction from server configuration

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use slotbook_core::{
    BookingLedger, NotificationRelay, TenantDirectory, TenantId, Weekday, WeeklyTemplate,
};
use slotbook_notify::{NoopRelay, WebhookRelay};
use slotbook_store_memory::{MemoryDirectory, MemoryLedger};
use slotbook_store_sqlite::SqliteStore;

use crate::config::{ServerConfig, StorageBackend};

/// Build the tenant directory and booking ledger for the configured backend.
///
/// The sqlite backend shares one store for both traits so templates and
/// bookings live in the same database file.
pub async fn build_stores(
    config: &ServerConfig,
) -> anyhow::Result<(Arc<dyn TenantDirectory>, Arc<dyn BookingLedger>)> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory stores (no durability)");
            Ok((
                Arc::new(MemoryDirectory::new()),
                Arc::new(MemoryLedger::new()),
            ))
        }
        StorageBackend::Sqlite => {
            let store = SqliteStore::new(Path::new(&config.storage.path))
                .await
                .with_context(|| format!("opening sqlite store at {}", config.storage.path))?;
            let store = Arc::new(store);
            Ok((store.clone(), store))
        }
    }
}

/// Build the notification relay: a webhook when configured, noop otherwise.
pub fn build_relay(config: &ServerConfig) -> anyhow::Result<Arc<dyn NotificationRelay>> {
    match &config.notifications.webhook_url {
        Some(url) => {
            info!(url, "Booking notifications via webhook");
            Ok(Arc::new(WebhookRelay::new(url.clone())?))
        }
        None => {
            info!("Booking notifications disabled");
            Ok(Arc::new(NoopRelay::new()))
        }
    }
}

/// Seed a development tenant with a standard weekday template.
///
/// Weekdays offer six slots, Saturday a short morning, Sunday closed.
pub async fn seed_tenant(
    directory: &Arc<dyn TenantDirectory>,
    tenant: &TenantId,
) -> anyhow::Result<()> {
    let weekday_slots: Vec<String> = ["09:00", "10:00", "11:00", "13:00", "14:00", "15:00"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let saturday_slots: Vec<String> =
        ["09:00", "10:00", "11:00"].iter().map(|s| s.to_string()).collect();

    let mut template = WeeklyTemplate::uniform(weekday_slots);
    template.set_day(Weekday::Saturday, saturday_slots);
    template.set_day(Weekday::Sunday, Vec::new());

    directory.set_template(tenant, template).await?;
    info!(%tenant, "seeded development tenant");
    Ok(())
}
