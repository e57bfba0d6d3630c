//! SQLite-backed TenantDirectory and BookingLedger

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use tracing::{debug, info};

use slotbook_core::{
    Booking, BookingLedger, Error, NewBooking, Result, TenantDirectory, TenantId, WeeklyTemplate,
};

/// SQLite store for tenants and bookings.
///
/// The `UNIQUE(tenant_id, date, time_label)` index on the bookings table is
/// the insert-if-absent primitive: a losing concurrent reserve fails the
/// insert with a unique violation, which maps to `Error::Conflict`. No
/// application-level locks are needed.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and initialize the schema.
    ///
    /// # Errors
    /// - `Error::Unavailable` if the database cannot be opened or migrated
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::Io)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(db_path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal),
            )
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to open database: {}", e)))?;

        Self::initialize_schema(&pool).await?;
        info!("Initialized SqliteStore at {:?}", db_path);

        Ok(Self { pool })
    }

    /// In-memory database for tests.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::new().in_memory(true))
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to open database: {}", e)))?;

        Self::initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(db_err)?;

        sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (1)")
            .execute(pool)
            .await
            .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tenants (
                tenant_id TEXT PRIMARY KEY,
                template_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL,
                date TEXT NOT NULL,
                time_label TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                service TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(tenant_id, date, time_label)
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(db_err)?;

        // Occupied-slot lookups are bucketed by (tenant, date).
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bookings_tenant_date ON bookings(tenant_id, date)",
        )
        .execute(pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> Error {
    Error::Unavailable(format!("Database error: {}", e))
}

#[async_trait]
impl TenantDirectory for SqliteStore {
    async fn get_template(&self, tenant: &TenantId) -> Result<WeeklyTemplate> {
        let row = sqlx::query("SELECT template_json FROM tenants WHERE tenant_id = ?")
            .bind(tenant.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        let row = row.ok_or_else(|| Error::TenantNotFound(tenant.to_string()))?;
        let json: String = row.get("template_json");
        let template = serde_json::from_str(&json)
            .map_err(|e| Error::Internal(format!("Corrupt template for {}: {}", tenant, e)))?;
        Ok(template)
    }

    async fn set_template(&self, tenant: &TenantId, template: WeeklyTemplate) -> Result<()> {
        template.validate()?;
        let json = serde_json::to_string(&template)?;

        sqlx::query(
            r#"
            INSERT INTO tenants (tenant_id, template_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(tenant_id) DO UPDATE SET
                template_json = excluded.template_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(tenant.as_str())
        .bind(&json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        debug!(%tenant, "template replaced");
        Ok(())
    }
}

#[async_trait]
impl BookingLedger for SqliteStore {
    async fn list_occupied(&self, tenant: &TenantId, date: NaiveDate) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT time_label FROM bookings WHERE tenant_id = ? AND date = ? ORDER BY time_label",
        )
        .bind(tenant.as_str())
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.iter().map(|row| row.get("time_label")).collect())
    }

    async fn reserve(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
        time: &str,
        payload: NewBooking,
    ) -> Result<Booking> {
        let booking = payload.into_booking(tenant.clone(), date, time.to_string());

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (id, tenant_id, date, time_label, customer_name, service, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id.to_string())
        .bind(tenant.as_str())
        .bind(date.to_string())
        .bind(time)
        .bind(&booking.customer_name)
        .bind(&booking.service)
        .bind(booking.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(%tenant, %date, time, booking_id = %booking.id, "slot reserved");
                Ok(booking)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(Error::Conflict {
                date: date.to_string(),
                time: time.to_string(),
            }),
            Err(e) => Err(db_err(e)),
        }
    }
}
