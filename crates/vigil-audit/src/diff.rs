//! The change diff engine.
//!
//! Walks a kind's declared schema in order, compares the before/after
//! values under each field's comparison rule, and renders both sides of
//! every detected change. Never fails: missing fields are `Absent`, and
//! vacant-to-vacant transitions are filtered out before comparison.

use crate::schema::{Compare, FieldMap, FieldSpec, Render};
use crate::value::FieldValue;

/// One detected field-level difference between two snapshots.
///
/// Both sides are already rendered; `render` is kept as a hint so the
/// formatter can compose the two sides appropriately.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub field: &'static str,
    pub previous: String,
    pub current: String,
    pub render: Render,
}

/// Diffs two snapshots of the same entity kind against its declared schema.
///
/// Records come back in schema order regardless of how either map was
/// populated. A field present on only one side is treated as `Absent` on
/// the other and reported as an addition or removal.
pub fn diff(before: &FieldMap, after: &FieldMap, schema: &[FieldSpec]) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for spec in schema {
        let prev = before.get(spec.name);
        let curr = after.get(spec.name);

        // Two representations of "empty" (null vs empty collection vs empty
        // text) are equal, not a change.
        if prev.is_vacant() && curr.is_vacant() {
            continue;
        }

        let equal = match spec.compare {
            Compare::Value => prev == curr,
            Compare::SetEquality => prev.set_eq(curr),
        };
        if equal {
            continue;
        }

        let (previous, current) = match spec.render {
            Render::SetDelta => set_delta(prev, curr),
            _ => (prev.render(), curr.render()),
        };

        records.push(ChangeRecord {
            field: spec.name,
            previous,
            current,
            render: spec.render,
        });
    }

    records
}

/// Splits a collection change into (removed, added), each comma-joined.
/// Source-side ordering is preserved within each half.
fn set_delta(prev: &FieldValue, curr: &FieldValue) -> (String, String) {
    let before = prev.items();
    let after = curr.items();

    let removed: Vec<&str> = before
        .iter()
        .filter(|item| !after.contains(item))
        .map(String::as_str)
        .collect();
    let added: Vec<&str> = after
        .iter()
        .filter(|item| !before.contains(item))
        .map(String::as_str)
        .collect();

    (removed.join(", "), added.join(", "))
}
