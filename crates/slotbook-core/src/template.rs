//! Weekly availability templates
//!
//! A tenant's recurring schedule is a map from weekday to an ordered list of
//! offerable time labels. Labels are opaque strings ("09:00", "01:00 PM");
//! the core compares them by equality and never parses them as clock times.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::{Error, Result};

/// Day of the week, ISO-8601 numbering (Monday = 1 .. Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in ISO order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Derive the weekday from a calendar date.
    ///
    /// Dates are treated as pure Gregorian calendar dates with no
    /// time-of-day or timezone component, so the derivation is deterministic
    /// everywhere.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    /// ISO-8601 weekday number (Monday = 1 .. Sunday = 7).
    pub fn iso_number(&self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }
}

/// Recurring weekly availability template.
///
/// Maps each weekday to the ordered time labels offerable on that day. A
/// weekday with no entry (or an empty list) means "closed that day", which is
/// a valid schedule, not an error. Templates are replaced wholesale on every
/// settings update; there is no partial merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyTemplate {
    days: BTreeMap<Weekday, Vec<String>>,
}

impl WeeklyTemplate {
    /// Create an empty template (closed every day).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a template from explicit (weekday, labels) pairs.
    pub fn from_days(days: impl IntoIterator<Item = (Weekday, Vec<String>)>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Build a template offering the same labels every day of the week.
    ///
    /// This is the legacy fixed-list mode: earlier storefront variants had a
    /// single slot list applied to all days identically.
    pub fn uniform(labels: Vec<String>) -> Self {
        Self {
            days: Weekday::ALL
                .iter()
                .map(|day| (*day, labels.clone()))
                .collect(),
        }
    }

    /// Time labels for one weekday, in template order. Empty means closed.
    pub fn slots_for(&self, day: Weekday) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Set the labels for one weekday (builder-style helper for tests/seeds).
    pub fn set_day(&mut self, day: Weekday, labels: Vec<String>) {
        self.days.insert(day, labels);
    }

    /// Iterate over configured days in ISO weekday order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[String])> {
        self.days.iter().map(|(day, labels)| (*day, labels.as_slice()))
    }

    /// Validate the template.
    ///
    /// # Errors
    /// - `Error::InvalidRequest` if any label is blank or repeated within a
    ///   single weekday's list
    pub fn validate(&self) -> Result<()> {
        for (day, labels) in &self.days {
            let mut seen = HashSet::new();
            for label in labels {
                if label.trim().is_empty() {
                    return Err(Error::InvalidRequest(format!(
                        "Blank time label on {:?}",
                        day
                    )));
                }
                if !seen.insert(label.as_str()) {
                    return Err(Error::InvalidRequest(format!(
                        "Duplicate time label '{}' on {:?}",
                        label, day
                    )));
                }
            }
        }
        Ok(())
    }
}
