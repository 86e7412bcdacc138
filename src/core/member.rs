use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::{
    asset::Asset,
    errors::{decode, ProfileError},
    session::SessionContext,
    snowflake::Snowflake,
    user::User,
};

#[derive(Deserialize)]
struct MemberPayload {
    user: Value,
    nick: Option<String>,
    avatar: Option<String>,
    #[serde(default)]
    roles: Vec<Snowflake>,
    joined_at: Option<DateTime<Utc>>,
    premium_since: Option<DateTime<Utc>>,
    pending: Option<bool>,
    flags: Option<u64>,
    communication_disabled_until: Option<DateTime<Utc>>,
    bio: Option<String>,
    banner: Option<String>,
    deaf: Option<bool>,
    mute: Option<bool>,
}

/// A user as seen inside one guild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub user: User,
    pub nick: Option<String>,
    pub roles: Vec<Snowflake>,
    pub joined_at: Option<DateTime<Utc>>,
    pub premium_since: Option<DateTime<Utc>>,
    pub pending: bool,
    pub flags: u64,
    pub communication_disabled_until: Option<DateTime<Utc>>,
    pub bio: String,
    pub deaf: bool,
    pub mute: bool,
    avatar_hash: Option<String>,
    banner_hash: Option<String>,
}

impl GuildMember {
    /// The fragment must carry a `user` object.
    pub fn from_value(guild_id: Snowflake, data: Value) -> Result<Self, ProfileError> {
        let payload: MemberPayload = decode("guild member", data)?;
        let user = User::from_value(payload.user)?;
        trace!(%guild_id, user_id = %user.snowflake, "decoded guild member");

        Ok(GuildMember {
            guild_id,
            user,
            nick: payload.nick,
            roles: payload.roles,
            joined_at: payload.joined_at,
            premium_since: payload.premium_since,
            pending: payload.pending.unwrap_or(false),
            flags: payload.flags.unwrap_or(0),
            communication_disabled_until: payload.communication_disabled_until,
            bio: payload.bio.unwrap_or_default(),
            deaf: payload.deaf.unwrap_or(false),
            mute: payload.mute.unwrap_or(false),
            avatar_hash: payload.avatar,
            banner_hash: payload.banner,
        })
    }

    /// The guild-specific avatar, if one is set.
    pub fn guild_avatar(&self) -> Option<Asset> {
        self.avatar_hash
            .as_deref()
            .map(|hash| Asset::guild_avatar(self.guild_id, self.user.snowflake, hash))
    }

    pub fn display_avatar(&self) -> Asset {
        self.guild_avatar()
            .unwrap_or_else(|| self.user.display_avatar())
    }

    pub fn guild_banner(&self) -> Option<Asset> {
        self.banner_hash
            .as_deref()
            .map(|hash| Asset::guild_banner(self.guild_id, self.user.snowflake, hash))
    }

    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }

    pub fn guild<C: SessionContext>(&self, session: &C) -> C::Guild {
        session.guild(self.guild_id)
    }
}
