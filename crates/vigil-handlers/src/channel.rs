//! Channel create/delete/update notifications.

use vigil_audit::{diff, EntityRef, Observe, Report};
use vigil_types::{channel_mention, Category, ChannelState, EntityKind};

use crate::dispatch::{deliver_report, Dispatch, HandlerOutcome, RelayContext};

/// Fallback shown when a channel has no parent category.
const NO_CATEGORY: &str = "No Category";

pub async fn created<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    channel: &ChannelState,
) -> HandlerOutcome {
    tracing::info!(channel = %channel.name, category = ?channel.category, "channel created");

    let report = Report::created(
        EntityKind::Channel,
        EntityRef::new(channel_mention(channel.id), channel.id),
    )
    .field(
        "Category",
        channel.category.clone().unwrap_or_else(|| NO_CATEGORY.to_string()),
    );

    deliver_report(ctx, dispatcher, Category::Channels, report).await
}

pub async fn deleted<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    channel: &ChannelState,
) -> HandlerOutcome {
    tracing::info!(channel = %channel.name, category = ?channel.category, "channel deleted");

    // A deleted channel cannot be mentioned; use its plain name.
    let report = Report::deleted(
        EntityKind::Channel,
        EntityRef::new(channel.name.clone(), channel.id),
    )
    .field(
        "Category",
        channel.category.clone().unwrap_or_else(|| NO_CATEGORY.to_string()),
    );

    deliver_report(ctx, dispatcher, Category::Channels, report).await
}

pub async fn updated<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    before: &ChannelState,
    after: &ChannelState,
) -> HandlerOutcome {
    let records = diff(&before.snapshot(), &after.snapshot(), ChannelState::schema());
    if records.is_empty() {
        tracing::info!(channel = %before.name, "channel updated with no observable changes");
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(channel = %before.name, changes = records.len(), "channel updated");

    let report = Report::update(
        EntityKind::Channel,
        EntityRef::new(channel_mention(after.id), after.id),
        records,
    );

    deliver_report(ctx, dispatcher, Category::Channels, report).await
}
