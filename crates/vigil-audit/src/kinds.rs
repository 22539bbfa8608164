//! Declared field schemas for each tracked entity kind.
//!
//! These replace attribute reflection with an explicit, ordered list of
//! observable fields per kind. The declared order is the report order;
//! platform-internal fields never leak into a diff.

use crate::schema::{FieldMap, FieldSpec, Observe};
use crate::value::FieldValue;
use vigil_types::{ChannelState, MemberState, RoleState, UserState};

impl Observe for ChannelState {
    fn schema() -> &'static [FieldSpec] {
        const SCHEMA: &[FieldSpec] = &[
            FieldSpec::value("name"),
            FieldSpec::value("category"),
            FieldSpec::value("topic"),
            FieldSpec::value("position"),
            FieldSpec::value("nsfw"),
            FieldSpec::value("slowmode_seconds"),
        ];
        SCHEMA
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("name", self.name.as_str());
        map.insert("category", FieldValue::opt_text(self.category.as_deref()));
        map.insert("topic", FieldValue::opt_text(self.topic.as_deref()));
        map.insert("position", self.position);
        map.insert("nsfw", self.nsfw);
        map.insert("slowmode_seconds", i64::from(self.slowmode_seconds));
        map
    }
}

impl Observe for RoleState {
    fn schema() -> &'static [FieldSpec] {
        const SCHEMA: &[FieldSpec] = &[
            FieldSpec::value("name"),
            FieldSpec::set_delta("permissions"),
            FieldSpec::value("color"),
            FieldSpec::value("hoist"),
            FieldSpec::value("mentionable"),
            FieldSpec::value("position"),
        ];
        SCHEMA
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("name", self.name.as_str());
        map.insert("permissions", self.permissions.clone());
        map.insert("color", FieldValue::Text(format!("#{:06X}", self.color)));
        map.insert("hoist", self.hoist);
        map.insert("mentionable", self.mentionable);
        map.insert("position", self.position);
        map
    }
}

impl Observe for MemberState {
    fn schema() -> &'static [FieldSpec] {
        const SCHEMA: &[FieldSpec] = &[
            FieldSpec::value("nickname"),
            FieldSpec::set_delta("roles"),
            FieldSpec::value("pending"),
            FieldSpec::timestamp("timeout_until"),
            FieldSpec::url("guild_avatar"),
            FieldSpec::set("flags"),
        ];
        SCHEMA
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("nickname", FieldValue::opt_text(self.nickname.as_deref()));
        map.insert("roles", self.roles.clone());
        map.insert("pending", self.pending);
        map.insert("timeout_until", FieldValue::opt_timestamp(self.timeout_until));
        map.insert(
            "guild_avatar",
            FieldValue::opt_url(self.guild_avatar_url.as_deref()),
        );
        map.insert("flags", self.flags.clone());
        map
    }
}

impl Observe for UserState {
    fn schema() -> &'static [FieldSpec] {
        const SCHEMA: &[FieldSpec] = &[
            FieldSpec::value("username"),
            FieldSpec::value("discriminator"),
            FieldSpec::value("global_name"),
            FieldSpec::url("avatar"),
        ];
        SCHEMA
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("username", self.username.as_str());
        map.insert("discriminator", self.discriminator.as_str());
        map.insert(
            "global_name",
            FieldValue::opt_text(self.global_name.as_deref()),
        );
        map.insert("avatar", FieldValue::opt_url(self.avatar_url.as_deref()));
        map
    }
}
