//! Identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a row (line item or payment) inside one invoice document.
///
/// Rows loaded from older records may carry arbitrary strings (e.g. `"1"`),
/// so this is an opaque string rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Create a new, unique row identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer [`RowId::from_static`] in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn from_static(s: &'static str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RowId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RowId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("RowId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Server-assigned identifier of a persisted invoice record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("RecordId: {e}")))?;
        if value == 0 {
            return Err(DomainError::invalid_id("RecordId: must be positive"));
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_row_ids_are_unique() {
        let a = RowId::generate();
        let b = RowId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn row_id_rejects_blank_input() {
        let err = "   ".parse::<RowId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert_eq!("7".parse::<RowId>().unwrap(), RowId::from_static("7"));
    }

    #[test]
    fn record_id_parses_positive_integers_only() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::new(42));
        assert!("0".parse::<RecordId>().is_err());
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&RowId::from_static("1")).unwrap();
        assert_eq!(json, "\"1\"");
        let id: RecordId = serde_json::from_str("9").unwrap();
        assert_eq!(id.get(), 9);
    }
}
