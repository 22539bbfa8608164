//! Comparable field values extracted from entity snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fixed rendering format for timestamp-valued fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single observable field value.
///
/// `Absent` is the defined sentinel for a field the entity does not carry;
/// extraction substitutes it instead of failing, and the diff engine treats
/// it as one representation of "empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    /// A collection normalized for order-independent comparison.
    List(Vec<String>),
    Url(String),
    Absent,
}

impl FieldValue {
    /// Wraps an optional string, substituting `Absent` for `None`.
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(s) => Self::Text(s.to_string()),
            None => Self::Absent,
        }
    }

    /// Wraps an optional URL, substituting `Absent` for `None`.
    pub fn opt_url(value: Option<&str>) -> Self {
        match value {
            Some(s) => Self::Url(s.to_string()),
            None => Self::Absent,
        }
    }

    /// Wraps an optional timestamp, substituting `Absent` for `None`.
    pub fn opt_timestamp(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(t) => Self::Timestamp(t),
            None => Self::Absent,
        }
    }

    /// Whether this value belongs to the vacant class.
    ///
    /// `Absent`, an empty list, and empty text all represent "nothing
    /// there"; transitions between them are never reported as changes.
    pub fn is_vacant(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::List(items) => items.is_empty(),
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Order-independent equality for list values; plain equality otherwise.
    pub fn set_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => {
                a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
            }
            _ => self == other,
        }
    }

    /// Renders the value as display text.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Bool(true) => "Yes".to_string(),
            Self::Bool(false) => "No".to_string(),
            Self::Timestamp(t) => t.format(TIMESTAMP_FORMAT).to_string(),
            Self::List(items) => items.join(", "),
            Self::Url(u) => u.clone(),
            Self::Absent => "None".to_string(),
        }
    }

    /// Returns the list items, treating any non-list value as empty.
    pub(crate) fn items(&self) -> &[String] {
        match self {
            Self::List(items) => items,
            _ => &[],
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
