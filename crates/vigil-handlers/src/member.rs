//! Member lifecycle and profile notifications.
//!
//! Covers guild-scoped member events (join, leave, update, ban, unban) and
//! global user profile updates. Ban and unban arrive with a bare user
//! because the account is no longer (or not yet) a member.

use vigil_audit::{diff, Accent, EntityRef, Observe, Report, TIMESTAMP_FORMAT};
use vigil_types::{user_mention, Category, Classification, EntityKind, MemberState, UserState};

use crate::dispatch::{deliver_report, Dispatch, HandlerOutcome, RelayContext};

pub async fn joined<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    member: &MemberState,
) -> HandlerOutcome {
    tracing::info!(member = %member.username, id = member.id, guild = %member.guild_name, "member joined");

    let mut report = Report::notice(
        Classification::Created,
        EntityKind::Member,
        "Welcome!",
        format!(
            "Welcome to {}, {}! We're glad to have you here.",
            member.guild_name,
            user_mention(member.id)
        ),
        EntityRef::new(user_mention(member.id), member.id),
    );
    if let Some(url) = &member.avatar_url {
        report = report.with_thumbnail(url.clone());
    }

    deliver_report(ctx, dispatcher, Category::Members, report).await
}

pub async fn left<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    member: &MemberState,
) -> HandlerOutcome {
    tracing::info!(member = %member.username, id = member.id, guild = %member.guild_name, "member left");

    let joined_at = member
        .joined_at
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut report = Report::notice(
        Classification::Deleted,
        EntityKind::Member,
        "Member Left",
        format!("{} has left the server.", user_mention(member.id)),
        EntityRef::new(user_mention(member.id), member.id),
    )
    .field("User ID", member.id.to_string())
    .field("Joined", joined_at)
    .with_footer(format!("Member left | {}", member.guild_name));
    if let Some(url) = &member.avatar_url {
        report = report.with_thumbnail(url.clone());
    }

    deliver_report(ctx, dispatcher, Category::Members, report).await
}

pub async fn updated<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    before: &MemberState,
    after: &MemberState,
) -> HandlerOutcome {
    let records = diff(&before.snapshot(), &after.snapshot(), MemberState::schema());
    if records.is_empty() {
        tracing::info!(member = %before.username, id = before.id, "member updated with no observable changes");
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(member = %after.username, id = after.id, changes = records.len(), "member updated");

    let mut report = Report::update(
        EntityKind::Member,
        EntityRef::new(user_mention(after.id), after.id),
        records,
    )
    .with_accent(Accent::Blue)
    .with_footer(format!("Member update | {}", after.guild_name));
    if let Some(url) = after.avatar_url.as_ref().or(after.guild_avatar_url.as_ref()) {
        report = report.with_thumbnail(url.clone());
    }

    deliver_report(ctx, dispatcher, Category::Members, report).await
}

pub async fn banned<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    guild_name: &str,
    user: &UserState,
) -> HandlerOutcome {
    tracing::info!(user = %user.username, id = user.id, guild = %guild_name, "member banned");

    let mut report = Report::notice(
        Classification::Deleted,
        EntityKind::Member,
        "Member Banned",
        format!("{} has been banned from {}.", user.username, guild_name),
        EntityRef::new(user.username.clone(), user.id),
    )
    .field("User ID", user.id.to_string());
    if let Some(url) = &user.avatar_url {
        report = report.with_thumbnail(url.clone());
    }

    deliver_report(ctx, dispatcher, Category::Members, report).await
}

pub async fn unbanned<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    guild_name: &str,
    user: &UserState,
) -> HandlerOutcome {
    tracing::info!(user = %user.username, id = user.id, guild = %guild_name, "member unbanned");

    let mut report = Report::notice(
        Classification::Created,
        EntityKind::Member,
        "Member Unbanned",
        format!("{} has been unbanned from {}.", user.username, guild_name),
        EntityRef::new(user.username.clone(), user.id),
    )
    .field("User ID", user.id.to_string());
    if let Some(url) = &user.avatar_url {
        report = report.with_thumbnail(url.clone());
    }

    deliver_report(ctx, dispatcher, Category::Members, report).await
}

/// Global profile updates (username, discriminator, global name, avatar).
pub async fn user_updated<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    before: &UserState,
    after: &UserState,
) -> HandlerOutcome {
    let records = diff(&before.snapshot(), &after.snapshot(), UserState::schema());
    if records.is_empty() {
        tracing::info!(user = %before.username, id = before.id, "user updated with no observable changes");
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(user = %after.username, id = after.id, changes = records.len(), "user profile updated");

    let mut report = Report::update(
        EntityKind::User,
        EntityRef::new(user_mention(after.id), after.id),
        records,
    )
    .with_accent(Accent::Blue);
    if let Some(url) = &after.avatar_url {
        report = report.with_thumbnail(url.clone());
    }

    deliver_report(ctx, dispatcher, Category::Members, report).await
}
