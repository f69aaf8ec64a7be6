//! Stop identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Identifier of a TfNSW stop (e.g. `"209516"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Create a stop id, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStopId` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStopId(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow as `&str`
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl AsRef<str> for StopId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_id() {
        let id = StopId::new("209516").unwrap();
        assert_eq!(id.as_str(), "209516");
        assert_eq!(id.to_string(), "209516");
    }

    #[test]
    fn trims_whitespace() {
        let id = StopId::new("  2000338 ").unwrap();
        assert_eq!(id.as_str(), "2000338");
    }

    #[test]
    fn rejects_empty() {
        assert!(StopId::new("").is_err());
        assert!(StopId::new("   ").is_err());
    }

    #[test]
    fn keeps_inner_whitespace() {
        let id = StopId::new(" Central Station ").unwrap();
        assert_eq!(id.as_str(), "Central Station");
    }

    #[test]
    fn accepts_non_numeric_ids() {
        assert_eq!(StopId::new("G10101").unwrap().as_str(), "G10101");
        assert_eq!(StopId::new("2000338:1").unwrap().as_str(), "2000338:1");
    }

    #[test]
    fn serde_is_transparent() {
        let id = StopId::new("209516").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"209516\"");

        let back: StopId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<StopId>("\"\"").is_err());
    }
}
