//! Event handlers for the Vigil relay.
//!
//! One canonical handler per tracked entity kind: channels, invites,
//! members (including ban/unban and user profiles), messages, reactions,
//! and roles. Each handler maps a platform event to reports via the
//! `vigil-audit` engine and hands them to a [`Dispatch`] implementation
//! with the destination resolved from the static category bindings.
//!
//! Handlers are independent: a missing destination or a failed delivery
//! in one category never blocks processing in another, and every handler
//! reports what it did through [`HandlerOutcome`].

pub mod channel;
pub mod invite;
pub mod member;
pub mod message;
pub mod reaction;
pub mod role;

mod dispatch;

pub use dispatch::{Destinations, Dispatch, DispatchError, HandlerOutcome, RelayContext};
