//! Generic entity change-report engine for the Vigil relay.
//!
//! Given two snapshots of the same logical entity, this crate produces an
//! ordered list of human-readable change descriptions and renders them
//! into a deliverable [`Report`]. Several independent event handlers
//! (channel, role, member, user profile) share it; each declares its own
//! ordered field schema instead of reflecting over whatever attributes an
//! entity happens to expose.
//!
//! # Pipeline
//!
//! ```rust,ignore
//! use vigil_audit::{diff, Observe, Report};
//!
//! let records = diff(&before.snapshot(), &after.snapshot(), ChannelState::schema());
//! if !records.is_empty() {
//!     let report = Report::update(EntityKind::Channel, identity, records);
//!     dispatcher.deliver(destination, &report).await?;
//! }
//! ```
//!
//! Everything here is pure and infallible: extraction substitutes
//! [`FieldValue::Absent`] for missing fields, the diff engine never errors
//! on mismatched keys, and formatting the same inputs twice yields
//! identical reports.

mod diff;
mod kinds;
mod report;
mod schema;
mod value;

pub use diff::{diff, ChangeRecord};
pub use report::{Accent, EntityRef, Report, ReportEntry};
pub use schema::{Compare, FieldMap, FieldSpec, Observe, Render};
pub use value::{FieldValue, TIMESTAMP_FORMAT};

#[cfg(test)]
mod tests;
