//! In-process store backends for slotbook
//!
//! DashMap-backed implementations of `TenantDirectory` and `BookingLedger`
//! for development, tests, and single-node deployments that don't need
//! durability.

mod directory;
mod ledger;

pub use directory::MemoryDirectory;
pub use ledger::MemoryLedger;
