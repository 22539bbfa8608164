//! Inbound gateway stream: wire event model, handler routing, and the
//! receive loop.
//!
//! The platform gateway owns the wire protocol, caching, and delivery
//! ordering; update events arrive with both the before and the after
//! snapshot and are processed as one atomic unit. The relay's only jobs
//! here are decoding frames and fanning events out to the handlers.

use futures_util::StreamExt;
use serde::Deserialize;
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use vigil_handlers::{
    channel, invite, member, message, reaction, role, Dispatch, HandlerOutcome, RelayContext,
};
use vigil_types::{
    ChannelState, InviteState, MemberState, MessageState, ReactionState, RoleState, UserState,
};

/// Errors that can occur on the gateway connection.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The WebSocket transport failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The configured token cannot be carried in an HTTP header.
    #[error("platform token is not a valid authorization header value")]
    InvalidToken,
}

/// One decoded gateway frame, `{"t": "<TYPE>", "d": {...}}` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "t", content = "d", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    ChannelCreate(ChannelState),
    ChannelUpdate {
        before: ChannelState,
        after: ChannelState,
    },
    ChannelDelete(ChannelState),
    InviteCreate(InviteState),
    InviteDelete(InviteState),
    MemberJoin(MemberState),
    MemberLeave(MemberState),
    MemberUpdate {
        before: MemberState,
        after: MemberState,
    },
    MemberBan {
        guild_name: String,
        user: UserState,
    },
    MemberUnban {
        guild_name: String,
        user: UserState,
    },
    UserUpdate {
        before: UserState,
        after: UserState,
    },
    MessageUpdate {
        before: MessageState,
        after: MessageState,
    },
    MessageDelete(MessageState),
    ReactionAdd(ReactionState),
    ReactionRemove(ReactionState),
    ReactionClear {
        message: MessageState,
        emojis: Vec<String>,
    },
}

/// Fans one decoded event out to its handler. Handler failures are
/// absorbed into the returned outcome; no event ever aborts the loop.
pub async fn route_event<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    event: GatewayEvent,
) -> HandlerOutcome {
    match event {
        GatewayEvent::ChannelCreate(state) => channel::created(ctx, dispatcher, &state).await,
        GatewayEvent::ChannelUpdate { before, after } => {
            channel::updated(ctx, dispatcher, &before, &after).await
        }
        GatewayEvent::ChannelDelete(state) => channel::deleted(ctx, dispatcher, &state).await,
        GatewayEvent::InviteCreate(state) => invite::created(ctx, dispatcher, &state).await,
        GatewayEvent::InviteDelete(state) => invite::deleted(ctx, dispatcher, &state).await,
        GatewayEvent::MemberJoin(state) => member::joined(ctx, dispatcher, &state).await,
        GatewayEvent::MemberLeave(state) => member::left(ctx, dispatcher, &state).await,
        GatewayEvent::MemberUpdate { before, after } => {
            member::updated(ctx, dispatcher, &before, &after).await
        }
        GatewayEvent::MemberBan { guild_name, user } => {
            member::banned(ctx, dispatcher, &guild_name, &user).await
        }
        GatewayEvent::MemberUnban { guild_name, user } => {
            member::unbanned(ctx, dispatcher, &guild_name, &user).await
        }
        GatewayEvent::UserUpdate { before, after } => {
            member::user_updated(ctx, dispatcher, &before, &after).await
        }
        GatewayEvent::MessageUpdate { before, after } => {
            message::edited(ctx, dispatcher, &before, &after).await
        }
        GatewayEvent::MessageDelete(state) => message::deleted(ctx, dispatcher, &state).await,
        GatewayEvent::ReactionAdd(state) => reaction::added(ctx, dispatcher, &state).await,
        GatewayEvent::ReactionRemove(state) => reaction::removed(ctx, dispatcher, &state).await,
        GatewayEvent::ReactionClear { message: msg, emojis } => {
            reaction::cleared(ctx, dispatcher, &msg, &emojis).await
        }
    }
}

/// Connects to the gateway and processes events until the stream ends.
///
/// Malformed frames are logged and skipped. Reconnection belongs to the
/// supervisor running the process; the relay provides no retry of its
/// own.
///
/// # Errors
///
/// Returns `GatewayError` if the connection cannot be established or the
/// transport fails mid-stream.
pub async fn run<D: Dispatch>(
    gateway_url: &str,
    token: &str,
    ctx: &RelayContext,
    dispatcher: &D,
) -> Result<(), GatewayError> {
    let mut request = gateway_url.into_client_request()?;
    let authorization = HeaderValue::from_str(&format!("Bot {token}"))
        .map_err(|_| GatewayError::InvalidToken)?;
    request.headers_mut().insert(AUTHORIZATION, authorization);

    tracing::info!(url = gateway_url, "connecting to platform gateway");
    let (stream, _) = connect_async(request).await?;
    let (_write, mut read) = stream.split();

    tracing::info!("gateway connected, relaying events");

    while let Some(frame) = read.next().await {
        match frame? {
            Message::Text(text) => match serde_json::from_str::<GatewayEvent>(&text) {
                Ok(event) => {
                    let outcome = route_event(ctx, dispatcher, event).await;
                    tracing::debug!(?outcome, "event processed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed gateway frame");
                }
            },
            Message::Close(_) => {
                tracing::info!("gateway closed the connection");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
