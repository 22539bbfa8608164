//! Unit tests for the diff engine and report formatter.

use chrono::{TimeZone, Utc};
use vigil_types::{ChannelState, Classification, EntityKind, MemberState, RoleState, UserState};

use crate::diff::diff;
use crate::report::{Accent, EntityRef, Report};
use crate::schema::{FieldMap, FieldSpec, Observe, Render};
use crate::value::FieldValue;

/// Schema used across the diff tests: one field per rule combination.
const SCHEMA: &[FieldSpec] = &[
    FieldSpec::value("name"),
    FieldSpec::value("topic"),
    FieldSpec::value("position"),
    FieldSpec::set_delta("roles"),
    FieldSpec::set("flags"),
    FieldSpec::url("avatar"),
    FieldSpec::timestamp("timeout_until"),
];

fn base_map() -> FieldMap {
    let mut map = FieldMap::new();
    map.insert("name", "general");
    map.insert("topic", FieldValue::Absent);
    map.insert("position", 3i64);
    map.insert("roles", vec!["Member".to_string(), "Helper".to_string()]);
    map.insert("flags", vec!["verified".to_string()]);
    map.insert("avatar", FieldValue::Url("https://cdn.example/a.png".to_string()));
    map.insert(
        "timeout_until",
        FieldValue::Timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
    );
    map
}

// ── Diff engine ──────────────────────────────────────────────────────

#[test]
fn identical_snapshots_produce_no_records() {
    let before = base_map();
    let after = base_map();
    assert!(diff(&before, &after, SCHEMA).is_empty());
}

#[test]
fn single_changed_field_produces_single_record() {
    let before = base_map();
    let mut after = base_map();
    after.insert("name", "announcements");

    let records = diff(&before, &after, SCHEMA);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field, "name");
    assert_eq!(records[0].previous, "general");
    assert_eq!(records[0].current, "announcements");
}

#[test]
fn record_order_follows_schema_not_insertion_order() {
    // Populate `after` in reverse field order; the diff must still come
    // back in schema order.
    let before = base_map();
    let mut after = FieldMap::new();
    after.insert("timeout_until", FieldValue::Absent);
    after.insert("avatar", FieldValue::Url("https://cdn.example/a.png".to_string()));
    after.insert("flags", vec!["verified".to_string()]);
    after.insert("roles", vec!["Member".to_string(), "Helper".to_string()]);
    after.insert("position", 7i64);
    after.insert("topic", FieldValue::Absent);
    after.insert("name", "renamed");

    let records = diff(&before, &after, SCHEMA);
    let fields: Vec<&str> = records.iter().map(|r| r.field).collect();
    assert_eq!(fields, vec!["name", "position", "timeout_until"]);
}

#[test]
fn null_and_empty_collection_are_equivalent() {
    let mut before = base_map();
    before.insert("flags", FieldValue::Absent);
    let mut after = base_map();
    after.insert("flags", Vec::<String>::new());

    assert!(diff(&before, &after, SCHEMA).is_empty());
}

#[test]
fn null_and_empty_text_are_equivalent() {
    let mut before = base_map();
    before.insert("topic", FieldValue::Absent);
    let mut after = base_map();
    after.insert("topic", "");

    assert!(diff(&before, &after, SCHEMA).is_empty());
}

#[test]
fn vacant_to_present_is_still_reported() {
    let before = base_map();
    let mut after = base_map();
    after.insert("topic", "rules and welcome");

    let records = diff(&before, &after, SCHEMA);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field, "topic");
    assert_eq!(records[0].previous, "None");
    assert_eq!(records[0].current, "rules and welcome");
}

#[test]
fn reordered_collection_is_not_a_change() {
    let before = base_map();
    let mut after = base_map();
    after.insert("roles", vec!["Helper".to_string(), "Member".to_string()]);

    assert!(diff(&before, &after, SCHEMA).is_empty());
}

#[test]
fn collection_membership_change_renders_set_delta() {
    let before = base_map();
    let mut after = base_map();
    after.insert("roles", vec!["Member".to_string(), "Moderator".to_string()]);

    let records = diff(&before, &after, SCHEMA);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field, "roles");
    assert_eq!(records[0].previous, "Helper");
    assert_eq!(records[0].current, "Moderator");
    assert_eq!(records[0].render, Render::SetDelta);
}

#[test]
fn missing_key_is_treated_as_absent() {
    // "topic" never inserted on either side; "name" missing from before.
    let mut before = FieldMap::new();
    before.insert("position", 1i64);
    let mut after = FieldMap::new();
    after.insert("position", 1i64);
    after.insert("name", "fresh");

    let records = diff(&before, &after, SCHEMA);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field, "name");
    assert_eq!(records[0].previous, "None");
    assert_eq!(records[0].current, "fresh");
}

#[test]
fn timestamps_render_in_fixed_format() {
    let before = base_map();
    let mut after = base_map();
    after.insert(
        "timeout_until",
        FieldValue::Timestamp(Utc.with_ymd_and_hms(2024, 5, 2, 8, 5, 9).unwrap()),
    );

    let records = diff(&before, &after, SCHEMA);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].previous, "2024-05-01 12:30:00");
    assert_eq!(records[0].current, "2024-05-02 08:05:09");
}

#[test]
fn keys_outside_the_schema_are_ignored() {
    let mut before = base_map();
    before.insert("undeclared", "a");
    let mut after = base_map();
    after.insert("undeclared", "b");

    assert!(diff(&before, &after, SCHEMA).is_empty());
}

// ── Field map ────────────────────────────────────────────────────────

#[test]
fn field_map_lookup_defaults_to_absent() {
    let map = FieldMap::new();
    assert_eq!(*map.get("anything"), FieldValue::Absent);
}

#[test]
fn field_map_insert_replaces_existing_entry() {
    let mut map = FieldMap::new();
    map.insert("name", "first");
    map.insert("name", "second");
    assert_eq!(map.len(), 1);
    assert_eq!(*map.get("name"), FieldValue::Text("second".to_string()));
}

// ── Report formatter ─────────────────────────────────────────────────

#[test]
fn update_report_entry_count_equals_record_count() {
    let before = base_map();
    let mut after = base_map();
    after.insert("name", "renamed");
    after.insert("position", 9i64);

    let records = diff(&before, &after, SCHEMA);
    let count = records.len();
    let report = Report::update(
        EntityKind::Channel,
        EntityRef::new("<#1>", 1u64),
        records,
    );
    assert_eq!(report.entries.len(), count);
}

#[test]
fn empty_update_report_still_carries_identity() {
    let report = Report::update(
        EntityKind::Channel,
        EntityRef::new("<#1>", 1u64),
        Vec::new(),
    );
    assert_eq!(report.classification, Classification::Updated);
    assert_eq!(report.entity.name, "<#1>");
    assert_eq!(report.entity.id, "1");
    assert!(report.entries.is_empty());
}

#[test]
fn formatting_is_deterministic() {
    let before = base_map();
    let mut after = base_map();
    after.insert("name", "renamed");

    let first = Report::update(
        EntityKind::Channel,
        EntityRef::new("<#1>", 1u64),
        diff(&before, &after, SCHEMA),
    );
    let second = Report::update(
        EntityKind::Channel,
        EntityRef::new("<#1>", 1u64),
        diff(&before, &after, SCHEMA),
    );
    assert_eq!(first, second);
}

#[test]
fn update_report_derives_title_and_accent() {
    let report = Report::update(
        EntityKind::Role,
        EntityRef::new("Moderator", 5u64),
        Vec::new(),
    );
    assert_eq!(report.title, "Role Updated");
    assert_eq!(report.description, "Role **Moderator** was updated.");
    assert_eq!(report.accent, Accent::Orange);
}

#[test]
fn created_and_deleted_reports_derive_titles() {
    let created = Report::created(EntityKind::Channel, EntityRef::new("<#9>", 9u64));
    assert_eq!(created.title, "Channel Created");
    assert_eq!(created.accent, Accent::Green);

    let deleted = Report::deleted(EntityKind::Role, EntityRef::new("Helper", 2u64));
    assert_eq!(deleted.title, "Role Deleted");
    assert_eq!(deleted.accent, Accent::Red);
}

#[test]
fn set_delta_entry_names_removed_and_added() {
    let before = base_map();
    let mut after = base_map();
    after.insert("roles", vec!["Member".to_string(), "Moderator".to_string()]);

    let report = Report::update(
        EntityKind::Member,
        EntityRef::new("<@3>", 3u64),
        diff(&before, &after, SCHEMA),
    );
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].name, "Roles");
    assert_eq!(report.entries[0].value, "Removed: Helper; Added: Moderator");
}

#[test]
fn url_pair_entry_renders_markdown_links() {
    let before = base_map();
    let mut after = base_map();
    after.insert("avatar", FieldValue::Url("https://cdn.example/b.png".to_string()));

    let report = Report::update(
        EntityKind::User,
        EntityRef::new("<@3>", 3u64),
        diff(&before, &after, SCHEMA),
    );
    assert_eq!(report.entries.len(), 1);
    assert_eq!(
        report.entries[0].value,
        "[Before](https://cdn.example/a.png) → [After](https://cdn.example/b.png)"
    );
}

#[test]
fn snake_case_fields_humanize_in_entry_names() {
    let before = base_map();
    let mut after = base_map();
    after.insert("timeout_until", FieldValue::Absent);

    let report = Report::update(
        EntityKind::Member,
        EntityRef::new("<@3>", 3u64),
        diff(&before, &after, SCHEMA),
    );
    assert_eq!(report.entries[0].name, "Timeout Until");
}

#[test]
fn notice_reports_keep_bespoke_titles() {
    let report = Report::notice(
        Classification::Deleted,
        EntityKind::Member,
        "Member Banned",
        "user has been banned from the guild.",
        EntityRef::new("user", 4u64),
    )
    .field("User ID", "4")
    .with_accent(Accent::Red);

    assert_eq!(report.title, "Member Banned");
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.accent, Accent::Red);
}

// ── Kind schemas ─────────────────────────────────────────────────────

fn sample_channel() -> ChannelState {
    ChannelState {
        id: 1,
        name: "general".to_string(),
        category: Some("Text Channels".to_string()),
        topic: None,
        position: 0,
        nsfw: false,
        slowmode_seconds: 0,
    }
}

#[test]
fn kind_snapshots_enumerate_exactly_their_schemas() {
    assert_eq!(
        sample_channel().snapshot().len(),
        ChannelState::schema().len()
    );

    let role = RoleState {
        id: 2,
        name: "Member".to_string(),
        permissions: vec!["send_messages".to_string()],
        color: 0x99AAB5,
        hoist: false,
        mentionable: false,
        position: 1,
    };
    assert_eq!(role.snapshot().len(), RoleState::schema().len());

    let member = MemberState {
        id: 3,
        username: "casey".to_string(),
        nickname: None,
        roles: Vec::new(),
        pending: false,
        timeout_until: None,
        guild_avatar_url: None,
        flags: Vec::new(),
        avatar_url: None,
        joined_at: None,
        bot: false,
        guild_name: "Test Guild".to_string(),
    };
    assert_eq!(member.snapshot().len(), MemberState::schema().len());

    let user = UserState {
        id: 4,
        username: "casey".to_string(),
        discriminator: "0001".to_string(),
        global_name: None,
        avatar_url: None,
        bot: false,
    };
    assert_eq!(user.snapshot().len(), UserState::schema().len());
}

#[test]
fn channel_snapshot_diff_detects_topic_change() {
    let before = sample_channel();
    let mut after = before.clone();
    after.topic = Some("welcome and rules".to_string());

    let records = diff(&before.snapshot(), &after.snapshot(), ChannelState::schema());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field, "topic");
    assert_eq!(records[0].previous, "None");
    assert_eq!(records[0].current, "welcome and rules");
}

#[test]
fn role_permission_change_renders_delta() {
    let before = RoleState {
        id: 2,
        name: "Moderator".to_string(),
        permissions: vec!["kick_members".to_string(), "ban_members".to_string()],
        color: 0x3498DB,
        hoist: true,
        mentionable: false,
        position: 5,
    };
    let mut after = before.clone();
    after.permissions = vec!["kick_members".to_string(), "manage_messages".to_string()];

    let records = diff(&before.snapshot(), &after.snapshot(), RoleState::schema());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field, "permissions");
    assert_eq!(records[0].previous, "ban_members");
    assert_eq!(records[0].current, "manage_messages");
}

// ── Field values ─────────────────────────────────────────────────────

#[test]
fn bool_values_render_yes_no() {
    assert_eq!(FieldValue::Bool(true).render(), "Yes");
    assert_eq!(FieldValue::Bool(false).render(), "No");
}

#[test]
fn absent_renders_none() {
    assert_eq!(FieldValue::Absent.render(), "None");
}

#[test]
fn optional_constructors_substitute_absent() {
    assert_eq!(FieldValue::opt_text(None), FieldValue::Absent);
    assert_eq!(FieldValue::opt_url(None), FieldValue::Absent);
    assert_eq!(FieldValue::opt_timestamp(None), FieldValue::Absent);
    assert_eq!(
        FieldValue::opt_text(Some("x")),
        FieldValue::Text("x".to_string())
    );
}
