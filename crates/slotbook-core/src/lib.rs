//! Slotbook Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout slotbook:
//! - Tenant identifiers and weekly availability templates
//! - Booking records and the store traits that persist them
//! - The availability resolver and booking coordinator
//! - Core error types

pub mod availability;
pub mod booking;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod relay;
pub mod template;
pub mod tenant;

pub use availability::{AvailabilityResolver, Slot, SlotStatus};
pub use booking::{Booking, BookingRequest, NewBooking};
pub use coordinator::BookingCoordinator;
pub use directory::TenantDirectory;
pub use error::{Error, Result};
pub use ledger::BookingLedger;
pub use relay::NotificationRelay;
pub use template::{Weekday, WeeklyTemplate};
pub use tenant::TenantId;
