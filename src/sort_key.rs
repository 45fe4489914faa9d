//! Three-tier ordering key for detection records.

use serde_json::Value;

use crate::timestamp::parse_instant;

/// Ordering key derived from a record's timestamp field.
///
/// Variants are declared in tier order, so the derived [`Ord`] compares the
/// tier first and the payload only within a tier:
/// - [`Instant`](Self::Instant): parseable timestamps, chronological
/// - [`Text`](Self::Text): other strings, lexicographic
/// - [`Missing`](Self::Missing): absent or non-string values, all equal
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    Instant(jiff::Timestamp),
    Text(String),
    Missing,
}

impl SortKey {
    /// Build the key for a timestamp field value.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => match parse_instant(s) {
                Some(ts) => Self::Instant(ts),
                None => Self::Text(s.clone()),
            },
            _ => Self::Missing,
        }
    }

    /// Build the key for `record[field]`. Non-object records have no field.
    pub fn for_record(record: &Value, field: &str) -> Self {
        Self::from_value(record.get(field))
    }

    /// Tier number: 0 for instants, 1 for text, 2 for missing.
    pub const fn tier(&self) -> u8 {
        match self {
            Self::Instant(_) => 0,
            Self::Text(_) => 1,
            Self::Missing => 2,
        }
    }
}
