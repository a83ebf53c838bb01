//! External employee identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A normalized employee identifier: uppercase with all whitespace removed.
///
/// This is the key of the allow-list and the secondary key of onboarding
/// records. The only way to build one is [`EmployeeId::normalize`], so any
/// value of this type is already in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Normalizes raw user input into an employee identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if nothing remains after stripping
    /// whitespace.
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        if normalized.is_empty() {
            return Err(DomainError::Validation("employee id is required".into()));
        }
        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
