//! Declared per-kind field schemas and the snapshot field map.
//!
//! Each entity kind declares an ordered list of [`FieldSpec`]s naming its
//! observable fields together with their comparison and rendering rules.
//! The declared order is the report order; nothing outside the schema is
//! ever compared or reported.

use crate::value::FieldValue;

/// Comparison rule applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    /// Plain value equality.
    Value,
    /// Order-independent set equality, for collection fields.
    SetEquality,
}

/// Rendering rule for the two sides of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// `'previous' → 'current'`.
    Plain,
    /// Both sides joined with commas, `Before: ... → After: ...`.
    JoinedList,
    /// `Removed: ...; Added: ...` computed from the set difference.
    SetDelta,
    /// Markdown link pair, `[Before](url) → [After](url)`.
    UrlPair,
    /// Fixed `YYYY-MM-DD HH:MM:SS` timestamps.
    Timestamp,
}

/// One declared observable field: name plus comparison and rendering rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub compare: Compare,
    pub render: Render,
}

impl FieldSpec {
    /// A field compared and rendered as a plain value.
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            compare: Compare::Value,
            render: Render::Plain,
        }
    }

    /// A timestamp field.
    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            compare: Compare::Value,
            render: Render::Timestamp,
        }
    }

    /// A URL field rendered as a before/after link pair.
    pub const fn url(name: &'static str) -> Self {
        Self {
            name,
            compare: Compare::Value,
            render: Render::UrlPair,
        }
    }

    /// A collection field compared by set equality, rendered joined.
    pub const fn set(name: &'static str) -> Self {
        Self {
            name,
            compare: Compare::SetEquality,
            render: Render::JoinedList,
        }
    }

    /// A collection field compared by set equality, rendered as the
    /// removed/added delta.
    pub const fn set_delta(name: &'static str) -> Self {
        Self {
            name,
            compare: Compare::SetEquality,
            render: Render::SetDelta,
        }
    }
}

static ABSENT: FieldValue = FieldValue::Absent;

/// An insertion-ordered mapping from field name to extracted value.
///
/// Lookup never fails: a name with no entry yields [`FieldValue::Absent`].
/// Report ordering is governed by the schema, not by insertion order, so
/// extractors are free to populate the map in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous entry for the same name.
    pub fn insert(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value for `name`, or `Absent` if the field is missing.
    pub fn get(&self, name: &str) -> &FieldValue {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .unwrap_or(&ABSENT)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extraction contract implemented once per tracked entity kind.
///
/// `snapshot` enumerates exactly the fields named by `schema`, as a pure
/// function of the entity with no fallible path. A field the entity cannot
/// supply becomes [`FieldValue::Absent`].
pub trait Observe {
    /// The declared, ordered field schema for this kind.
    fn schema() -> &'static [FieldSpec];

    /// Extracts the observable fields into a [`FieldMap`].
    fn snapshot(&self) -> FieldMap;
}
