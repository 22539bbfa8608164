//! Reaction add/remove/clear notifications.

use vigil_audit::{EntityRef, Report};
use vigil_types::{
    channel_mention, user_mention, Category, Classification, EntityKind, MessageState,
    ReactionState,
};

use crate::dispatch::{deliver_report, Dispatch, HandlerOutcome, RelayContext};

fn message_link(jump_url: Option<&str>) -> String {
    match jump_url {
        Some(url) => format!("[Jump to message]({url})"),
        None => "Unavailable".to_string(),
    }
}

pub async fn added<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    reaction: &ReactionState,
) -> HandlerOutcome {
    // The relay's own reactions (and other bots') would echo forever.
    if reaction.by_bot {
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(
        user = %reaction.user_name,
        emoji = %reaction.emoji,
        channel = reaction.channel_id,
        "reaction added"
    );

    let report = Report::notice(
        Classification::Created,
        EntityKind::Reaction,
        "Reaction Added",
        format!("{} added a reaction.", user_mention(reaction.user_id)),
        EntityRef::new(reaction.emoji.clone(), reaction.message_id),
    )
    .field("Message", message_link(reaction.jump_url.as_deref()))
    .field("Channel", channel_mention(reaction.channel_id))
    .field("Emoji", reaction.emoji.clone())
    .field("User", user_mention(reaction.user_id));

    deliver_report(ctx, dispatcher, Category::Reactions, report).await
}

pub async fn removed<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    reaction: &ReactionState,
) -> HandlerOutcome {
    if reaction.by_bot {
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(
        user = %reaction.user_name,
        emoji = %reaction.emoji,
        channel = reaction.channel_id,
        "reaction removed"
    );

    let report = Report::notice(
        Classification::Deleted,
        EntityKind::Reaction,
        "Reaction Removed",
        format!("{} removed a reaction.", user_mention(reaction.user_id)),
        EntityRef::new(reaction.emoji.clone(), reaction.message_id),
    )
    .field("Message", message_link(reaction.jump_url.as_deref()))
    .field("Channel", channel_mention(reaction.channel_id))
    .field("Emoji", reaction.emoji.clone())
    .field("User", user_mention(reaction.user_id));

    deliver_report(ctx, dispatcher, Category::Reactions, report).await
}

pub async fn cleared<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    message: &MessageState,
    emojis: &[String],
) -> HandlerOutcome {
    tracing::info!(channel = message.channel_id, count = emojis.len(), "reactions cleared");

    let report = Report::notice(
        Classification::Updated,
        EntityKind::Reaction,
        "Reactions Cleared",
        "Reactions were cleared from a message.",
        EntityRef::new("reactions", message.id),
    )
    .field("Message", message_link(message.jump_url.as_deref()))
    .field("Channel", channel_mention(message.channel_id))
    .field("Cleared Reactions", emojis.join(", "));

    deliver_report(ctx, dispatcher, Category::Reactions, report).await
}
