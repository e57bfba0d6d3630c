//! SQLite store backends for slotbook
//!
//! One `SqliteStore` implements both `TenantDirectory` and `BookingLedger`
//! over a shared connection pool, for durable single-node deployments.

mod store;

pub use store::SqliteStore;
