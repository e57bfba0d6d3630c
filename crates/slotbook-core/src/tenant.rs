//! Tenant identifiers for multi-tenancy support

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Unique identifier for a tenant.
///
/// Tenant ids are opaque strings assigned during onboarding (for example the
/// client id a storefront embeds in its widgets). Every request into the
/// scheduling core must carry one; there is deliberately no default tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Parse a tenant id, rejecting empty or whitespace-only input.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidTenant(
                "Tenant id must be non-empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the tenant id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
