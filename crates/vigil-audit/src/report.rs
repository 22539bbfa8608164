//! Rendering of change records into deliverable reports.
//!
//! A [`Report`] is a pure value: building one performs no I/O, and the same
//! inputs always produce the same report. Delivery belongs entirely to the
//! dispatcher on the other side of the `vigil-handlers` boundary.

use crate::diff::ChangeRecord;
use crate::schema::Render;
use vigil_types::{Classification, EntityKind};

/// Accent color attached to a report, mirroring the platform's embed
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Green,
    Red,
    Orange,
    Blue,
}

impl Accent {
    /// Returns the packed RGB value for this accent.
    pub fn rgb(self) -> u32 {
        match self {
            Self::Green => 0x2ECC71,
            Self::Red => 0xE74C3C,
            Self::Orange => 0xE67E22,
            Self::Blue => 0x3498DB,
        }
    }

    /// The conventional accent for a classification: green for created,
    /// red for deleted, orange for updated.
    pub fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::Created => Self::Green,
            Classification::Deleted => Self::Red,
            Classification::Updated => Self::Orange,
        }
    }
}

/// Identity of the entity a report describes. `name` may be a mention
/// string when the entity still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRef {
    pub name: String,
    pub id: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>, id: impl ToString) -> Self {
        Self {
            name: name.into(),
            id: id.to_string(),
        }
    }
}

/// One titled entry in a report body.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    pub value: String,
}

/// A rendered, deliverable summary of a create/delete/update event.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub classification: Classification,
    pub kind: EntityKind,
    pub title: String,
    pub description: String,
    pub accent: Accent,
    pub entity: EntityRef,
    pub entries: Vec<ReportEntry>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<String>,
}

impl Report {
    /// A report for a newly created entity. Handlers append the
    /// kind-specific fields afterwards.
    pub fn created(kind: EntityKind, entity: EntityRef) -> Self {
        Self::base(
            Classification::Created,
            kind,
            format!("{kind} Created"),
            format!("{kind} **{}** was created.", entity.name),
            entity,
        )
    }

    /// A report for a deleted entity.
    pub fn deleted(kind: EntityKind, entity: EntityRef) -> Self {
        Self::base(
            Classification::Deleted,
            kind,
            format!("{kind} Deleted"),
            format!("{kind} **{}** was deleted.", entity.name),
            entity,
        )
    }

    /// A report for an updated entity, with one entry per change record in
    /// the order the diff engine produced them.
    ///
    /// The entry count always equals the record count; an empty diff yields
    /// an empty-bodied report whose identity is still present, so the
    /// caller decides whether it is worth delivering.
    pub fn update(kind: EntityKind, entity: EntityRef, records: Vec<ChangeRecord>) -> Self {
        let mut report = Self::base(
            Classification::Updated,
            kind,
            format!("{kind} Updated"),
            format!("{kind} **{}** was updated.", entity.name),
            entity,
        );
        report.entries = records.iter().map(change_entry).collect();
        report
    }

    /// A report with a bespoke title and description for single-purpose
    /// notifications (welcomes, bans, reactions, invites).
    pub fn notice(
        classification: Classification,
        kind: EntityKind,
        title: impl Into<String>,
        description: impl Into<String>,
        entity: EntityRef,
    ) -> Self {
        Self::base(classification, kind, title.into(), description.into(), entity)
    }

    fn base(
        classification: Classification,
        kind: EntityKind,
        title: String,
        description: String,
        entity: EntityRef,
    ) -> Self {
        Self {
            classification,
            kind,
            title,
            description,
            accent: Accent::for_classification(classification),
            entity,
            entries: Vec::new(),
            thumbnail_url: None,
            footer: None,
        }
    }

    /// Appends a named field entry.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(ReportEntry {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Overrides the accent color.
    pub fn with_accent(mut self, accent: Accent) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Composes the entry for one change record according to its rendering
/// hint.
fn change_entry(record: &ChangeRecord) -> ReportEntry {
    let value = match record.render {
        Render::Plain | Render::Timestamp => {
            format!("'{}' → '{}'", record.previous, record.current)
        }
        Render::JoinedList => {
            format!("Before: {} → After: {}", record.previous, record.current)
        }
        Render::SetDelta => {
            let mut parts = Vec::new();
            if !record.previous.is_empty() {
                parts.push(format!("Removed: {}", record.previous));
            }
            if !record.current.is_empty() {
                parts.push(format!("Added: {}", record.current));
            }
            parts.join("; ")
        }
        Render::UrlPair => {
            format!(
                "[Before]({}) → [After]({})",
                record.previous, record.current
            )
        }
    };

    ReportEntry {
        name: humanize(record.field),
        value,
    }
}

/// Turns a snake_case field name into a title-cased entry name.
fn humanize(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
