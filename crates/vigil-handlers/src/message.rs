//! Message edit and delete notifications.

use vigil_audit::{EntityRef, Report};
use vigil_types::{channel_mention, user_mention, Category, Classification, EntityKind, MessageState};

use crate::dispatch::{deliver_report, Dispatch, HandlerOutcome, RelayContext};

/// Fallback shown when a message side has no text content.
const NO_CONTENT: &str = "No content";

pub async fn edited<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    before: &MessageState,
    after: &MessageState,
) -> HandlerOutcome {
    // Embed-only updates (link previews, pins) arrive as edits with
    // identical text; nothing to report.
    if before.content == after.content {
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(
        author = %before.author_name,
        channel = before.channel_id,
        "message edited"
    );

    let report = Report::notice(
        Classification::Updated,
        EntityKind::Message,
        "Message Edited",
        format!("A message by {} was edited.", before.author_name),
        EntityRef::new(before.author_name.clone(), before.id),
    )
    .field("Channel", channel_mention(before.channel_id))
    .field("Author", user_mention(before.author_id))
    .field("Before", content_or_fallback(&before.content))
    .field("After", content_or_fallback(&after.content));

    deliver_report(ctx, dispatcher, Category::Messages, report).await
}

pub async fn deleted<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    message: &MessageState,
) -> HandlerOutcome {
    // Direct messages are private; contentless deletions (bare embeds or
    // attachments) carry nothing worth relaying.
    if message.direct || message.content.is_empty() {
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(
        author = %message.author_name,
        channel = message.channel_id,
        "message deleted"
    );

    let report = Report::notice(
        Classification::Deleted,
        EntityKind::Message,
        "Message Deleted",
        format!("A message by {} was deleted.", message.author_name),
        EntityRef::new(message.author_name.clone(), message.id),
    )
    .field("Channel", channel_mention(message.channel_id))
    .field("Author", user_mention(message.author_id))
    .field("Content", message.content.clone());

    deliver_report(ctx, dispatcher, Category::Messages, report).await
}

fn content_or_fallback(content: &str) -> String {
    if content.is_empty() {
        NO_CONTENT.to_string()
    } else {
        content.to_string()
    }
}
