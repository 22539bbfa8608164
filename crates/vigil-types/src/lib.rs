//! Shared types and constants for the Vigil audit-log relay.
//!
//! This crate provides the foundational types used across all Vigil crates:
//! entity kinds, report classifications, notification categories, and the
//! entity state structs delivered by the platform gateway.
//!
//! No crate in the workspace depends on anything *except* `vigil-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform-issued numeric identifier for channels, users, roles, and
/// messages (a snowflake).
pub type Snowflake = u64;

/// Identifier of a notification channel a report is delivered to.
pub type ChannelId = Snowflake;

/// The kinds of platform entities Vigil tracks for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A guild channel (text, voice, category, ...).
    Channel,
    /// A guild invite.
    Invite,
    /// A guild member (user within the guild context).
    Member,
    /// A user's global profile.
    User,
    /// A message posted in a channel.
    Message,
    /// A reaction placed on a message.
    Reaction,
    /// A guild role.
    Role,
}

impl EntityKind {
    /// Returns the display label for this kind, used in report titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Channel => "Channel",
            Self::Invite => "Invite",
            Self::Member => "Member",
            Self::User => "User",
            Self::Message => "Message",
            Self::Reaction => "Reaction",
            Self::Role => "Role",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a report classifies the transition it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// The entity came into existence (or entered the guild).
    Created,
    /// The entity was removed.
    Deleted,
    /// The entity changed between two observed snapshots.
    Updated,
}

impl Classification {
    /// Returns the display label, used when deriving report titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Deleted => "Deleted",
            Self::Updated => "Updated",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Notification categories, each bound to at most one destination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Channel create/delete/update notifications.
    Channels,
    /// Guild-level notifications (invite create/delete).
    Guilds,
    /// Message edit/delete notifications.
    Messages,
    /// Member join/leave/update/ban and user profile notifications.
    Members,
    /// Reaction add/remove/clear notifications.
    Reactions,
    /// Role create/delete/update notifications.
    Roles,
}

impl Category {
    /// Returns the canonical lowercase label for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Channels => "channels",
            Self::Guilds => "guilds",
            Self::Messages => "messages",
            Self::Members => "members",
            Self::Reactions => "reactions",
            Self::Roles => "roles",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the platform mention syntax for a channel.
pub fn channel_mention(id: Snowflake) -> String {
    format!("<#{id}>")
}

/// Renders the platform mention syntax for a user.
pub fn user_mention(id: Snowflake) -> String {
    format!("<@{id}>")
}

/// Point-in-time state of a guild channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelState {
    pub id: Snowflake,
    pub name: String,
    /// Name of the parent category, if the channel sits inside one.
    pub category: Option<String>,
    pub topic: Option<String>,
    pub position: i64,
    pub nsfw: bool,
    /// Slowmode delay between messages, in seconds. Zero disables it.
    pub slowmode_seconds: u32,
}

/// Point-in-time state of a guild role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleState {
    pub id: Snowflake,
    pub name: String,
    /// Names of the granted permissions. Order carries no meaning.
    pub permissions: Vec<String>,
    /// Display color as a packed RGB value.
    pub color: u32,
    /// Whether members with this role are listed separately in the sidebar.
    pub hoist: bool,
    pub mentionable: bool,
    pub position: i64,
}

/// Point-in-time state of a guild member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberState {
    pub id: Snowflake,
    pub username: String,
    pub nickname: Option<String>,
    /// Names of the member's roles. Order carries no meaning.
    pub roles: Vec<String>,
    /// Whether the member has not yet passed membership screening.
    pub pending: bool,
    /// End of the member's communication timeout, if one is active.
    pub timeout_until: Option<DateTime<Utc>>,
    /// Guild-specific avatar URL, if set.
    pub guild_avatar_url: Option<String>,
    /// Public profile flag names.
    pub flags: Vec<String>,
    /// Global avatar URL, if set.
    pub avatar_url: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    /// Whether the account belongs to a bot.
    pub bot: bool,
    /// Name of the guild the member belongs to.
    pub guild_name: String,
}

/// Point-in-time state of a user's global profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    pub global_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bot: bool,
}

/// Point-in-time state of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageState {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub author_name: String,
    pub content: String,
    /// Whether the message lives in a direct-message channel.
    pub direct: bool,
    /// Permalink to the message, if the platform provides one.
    pub jump_url: Option<String>,
}

/// A single reaction event: one emoji placed on (or removed from) a message
/// by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionState {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub emoji: String,
    pub user_id: Snowflake,
    pub user_name: String,
    /// Whether the reacting account belongs to a bot.
    pub by_bot: bool,
    /// Permalink to the message the reaction sits on.
    pub jump_url: Option<String>,
}

/// Point-in-time state of a guild invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteState {
    pub code: String,
    pub inviter_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    /// Invite lifetime in seconds. Zero means the invite never expires.
    pub max_age_seconds: u32,
    /// Maximum number of uses. Zero means unlimited.
    pub max_uses: u32,
    /// Whether the invite grants temporary membership.
    pub temporary: bool,
    /// Number of times the invite has been used.
    pub uses: u32,
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_labels() {
        assert_eq!(EntityKind::Channel.label(), "Channel");
        assert_eq!(EntityKind::Role.to_string(), "Role");
    }

    #[test]
    fn classification_labels() {
        assert_eq!(Classification::Created.label(), "Created");
        assert_eq!(Classification::Deleted.to_string(), "Deleted");
        assert_eq!(Classification::Updated.label(), "Updated");
    }

    #[test]
    fn category_labels_are_lowercase() {
        for category in [
            Category::Channels,
            Category::Guilds,
            Category::Messages,
            Category::Members,
            Category::Reactions,
            Category::Roles,
        ] {
            let label = category.as_str();
            assert_eq!(label, label.to_lowercase());
        }
    }

    #[test]
    fn mention_syntax() {
        assert_eq!(channel_mention(42), "<#42>");
        assert_eq!(user_mention(7), "<@7>");
    }

    #[test]
    fn channel_state_round_trips_through_json() {
        let state = ChannelState {
            id: 1,
            name: "general".to_string(),
            category: Some("Text Channels".to_string()),
            topic: None,
            position: 3,
            nsfw: false,
            slowmode_seconds: 0,
        };

        let json = serde_json::to_string(&state).expect("should serialise");
        let restored: ChannelState = serde_json::from_str(&json).expect("should deserialise");
        assert_eq!(restored, state);
    }
}
