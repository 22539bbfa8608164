//! Invite create/delete notifications (the guild category).

use vigil_audit::{Accent, EntityRef, Report, TIMESTAMP_FORMAT};
use vigil_types::{channel_mention, user_mention, Category, Classification, EntityKind, InviteState};

use crate::dispatch::{deliver_report, Dispatch, HandlerOutcome, RelayContext};

pub async fn created<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    invite: &InviteState,
) -> HandlerOutcome {
    tracing::info!(
        code = %invite.code,
        inviter = ?invite.inviter_id,
        channel = ?invite.channel_id,
        "invite created"
    );

    let max_age = if invite.max_age_seconds > 0 {
        format!("{} seconds", invite.max_age_seconds)
    } else {
        "Never".to_string()
    };
    let max_uses = if invite.max_uses > 0 {
        invite.max_uses.to_string()
    } else {
        "Unlimited".to_string()
    };

    let mut report = Report::notice(
        Classification::Created,
        EntityKind::Invite,
        "Invite Created",
        format!("An invite code **{}** was created.", invite.code),
        EntityRef::new(invite.code.clone(), invite.code.clone()),
    )
    .with_accent(Accent::Blue)
    .field(
        "Inviter",
        invite
            .inviter_id
            .map(user_mention)
            .unwrap_or_else(|| "Unknown".to_string()),
    )
    .field(
        "Channel",
        invite
            .channel_id
            .map(channel_mention)
            .unwrap_or_else(|| "Unknown".to_string()),
    )
    .field("Max Age", max_age)
    .field("Max Uses", max_uses)
    .field(
        "Temporary Membership",
        if invite.temporary { "Yes" } else { "No" },
    )
    .field("Uses", invite.uses.to_string())
    .field("URL", invite.url.clone());

    if let Some(expires_at) = invite.expires_at {
        report = report.field("Expires At", expires_at.format(TIMESTAMP_FORMAT).to_string());
    }

    deliver_report(ctx, dispatcher, Category::Guilds, report).await
}

pub async fn deleted<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    invite: &InviteState,
) -> HandlerOutcome {
    tracing::info!(code = %invite.code, channel = ?invite.channel_id, "invite deleted");

    let report = Report::notice(
        Classification::Deleted,
        EntityKind::Invite,
        "Invite Deleted",
        format!("An invite code **{}** was deleted.", invite.code),
        EntityRef::new(invite.code.clone(), invite.code.clone()),
    )
    .field(
        "Channel",
        invite
            .channel_id
            .map(channel_mention)
            .unwrap_or_else(|| "Unknown".to_string()),
    );

    deliver_report(ctx, dispatcher, Category::Guilds, report).await
}
