//! Delivery contract and destination bindings.
//!
//! The handlers in this crate never talk to the network themselves; they
//! hand finished reports to a [`Dispatch`] implementation together with a
//! destination resolved from the static category bindings.

use thiserror::Error;
use vigil_audit::Report;
use vigil_types::{Category, ChannelId};

/// Errors surfaced by a dispatcher. Handlers log these and keep going;
/// delivery is fire-and-forget.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The transport failed before a response was received.
    #[error("delivery transport error: {0}")]
    Transport(String),

    /// The platform rejected the delivery.
    #[error("delivery rejected with status {0}")]
    Rejected(u16),
}

/// Outbound delivery of a rendered report to one notification channel.
///
/// The production implementation posts to the platform's channel-send
/// REST API; tests substitute a recording double.
#[allow(async_fn_in_trait)]
pub trait Dispatch {
    async fn deliver(&self, channel: ChannelId, report: &Report) -> Result<(), DispatchError>;
}

/// Static category → notification-channel bindings, constructed once at
/// process start and immutable afterwards. A category with no binding
/// silently drops its notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct Destinations {
    pub channels: Option<ChannelId>,
    pub guilds: Option<ChannelId>,
    pub messages: Option<ChannelId>,
    pub members: Option<ChannelId>,
    pub reactions: Option<ChannelId>,
    pub roles: Option<ChannelId>,
}

impl Destinations {
    /// Resolves the notification channel bound to a category.
    pub fn resolve(&self, category: Category) -> Option<ChannelId> {
        match category {
            Category::Channels => self.channels,
            Category::Guilds => self.guilds,
            Category::Messages => self.messages,
            Category::Members => self.members,
            Category::Reactions => self.reactions,
            Category::Roles => self.roles,
        }
    }
}

/// Explicit per-process context handed to every handler, replacing any
/// ambient global state.
#[derive(Debug, Clone, Copy)]
pub struct RelayContext {
    pub destinations: Destinations,
}

impl RelayContext {
    pub fn new(destinations: Destinations) -> Self {
        Self { destinations }
    }
}

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The report was handed to the dispatcher successfully.
    Delivered,
    /// No notification channel is bound for the category.
    NoDestination,
    /// The event carried nothing worth reporting.
    Suppressed,
    /// The dispatcher returned an error; processing continues.
    Failed,
}

/// Resolves the destination for `category` and hands `report` to the
/// dispatcher, logging the outcome either way.
pub(crate) async fn deliver_report<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    category: Category,
    report: Report,
) -> HandlerOutcome {
    let Some(channel) = ctx.destinations.resolve(category) else {
        tracing::warn!(
            category = %category,
            title = %report.title,
            "no notification channel bound for category, dropping report"
        );
        return HandlerOutcome::NoDestination;
    };

    match dispatcher.deliver(channel, &report).await {
        Ok(()) => {
            tracing::info!(category = %category, channel, title = %report.title, "notification sent");
            HandlerOutcome::Delivered
        }
        Err(e) => {
            tracing::warn!(
                category = %category,
                channel,
                title = %report.title,
                error = %e,
                "notification delivery failed"
            );
            HandlerOutcome::Failed
        }
    }
}
