//! The assembled profile of one user, as returned by a single profile fetch.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{
    application::ApplicationIdentity,
    asset::Asset,
    badge::ProfileBadge,
    colour::Colour,
    connection::ConnectionRecord,
    errors::{decode, present, ProfileError},
    member::GuildMember,
    mutual_guild::MutualGuildRef,
    overlay::GuildProfileOverlay,
    premium::PremiumType,
    snowflake::Snowflake,
    user::User,
};

#[derive(Deserialize)]
struct ProfilePayload {
    user: Value,
    user_profile: Option<Value>,
    guild_member: Option<Value>,
    guild_member_profile: Option<Value>,
    premium_since: Option<DateTime<Utc>>,
    premium_type: Option<i64>,
    premium_guild_since: Option<DateTime<Utc>>,
    connected_accounts: Option<Vec<Value>>,
    badges: Option<Vec<Value>>,
    guild_badges: Option<Vec<Value>>,
    mutual_guilds: Option<Vec<Value>>,
    mutual_friends_count: Option<u32>,
    application: Option<Value>,
    legacy_username: Option<String>,
}

fn collect<T>(
    items: Option<Vec<Value>>,
    build: impl Fn(Value) -> Result<T, ProfileError>,
) -> Result<Vec<T>, ProfileError> {
    items.unwrap_or_default().into_iter().map(build).collect()
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s).filter(|s| !s.is_empty())
}

/// Everything a profile fetch returned, decoded once.
///
/// Optional parts that were missing are `None` or empty, never guessed at.
/// Merged accessors such as [`ProfileSnapshot::bio`] look at the guild overlay
/// first, then the global overlay, then the base user.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileSnapshot {
    user: User,
    user_profile: Option<GuildProfileOverlay>,
    member: Option<GuildMember>,
    member_profile: Option<GuildProfileOverlay>,
    premium_since: Option<DateTime<Utc>>,
    premium_type: Option<PremiumType>,
    premium_guild_since: Option<DateTime<Utc>>,
    connections: Vec<ConnectionRecord>,
    badges: Vec<ProfileBadge>,
    guild_badges: Vec<ProfileBadge>,
    mutual_guilds: Vec<MutualGuildRef>,
    mutual_friends_count: Option<u32>,
    application: Option<ApplicationIdentity>,
    legacy_username: Option<String>,
}

impl ProfileSnapshot {
    /// Builds a snapshot from a decoded profile payload.
    ///
    /// `guild_id` is the guild the profile was requested for. When it is `None`
    /// the guild member profile's own `guild_id` is used for the member.
    pub fn from_value(data: Value, guild_id: Option<Snowflake>) -> Result<Self, ProfileError> {
        let payload: ProfilePayload = decode("profile", data)?;

        let user = User::from_value(payload.user.clone())?;
        let user_id = user.snowflake;

        let user_profile = present(payload.user_profile)
            .map(|data| GuildProfileOverlay::from_value(user_id, data))
            .transpose()?;
        let member_profile = present(payload.guild_member_profile)
            .map(|data| GuildProfileOverlay::from_value(user_id, data))
            .transpose()?;

        let member = match present(payload.guild_member) {
            Some(mut data) => {
                let guild_id = guild_id
                    .or_else(|| member_profile.as_ref().and_then(|p| p.guild_id))
                    .ok_or(ProfileError::MissingGuildContext)?;
                // Members inside a profile omit their user; it is the profile's user.
                if let Value::Object(fields) = &mut data {
                    fields.insert("user".to_string(), payload.user);
                }
                Some(GuildMember::from_value(guild_id, data)?)
            }
            None => None,
        };

        let snapshot = ProfileSnapshot {
            user,
            user_profile,
            member,
            member_profile,
            premium_since: payload.premium_since,
            premium_type: PremiumType::from_profile(payload.premium_type),
            premium_guild_since: payload.premium_guild_since,
            connections: collect(payload.connected_accounts, ConnectionRecord::from_value)?,
            badges: collect(payload.badges, ProfileBadge::from_value)?,
            guild_badges: collect(payload.guild_badges, ProfileBadge::from_value)?,
            mutual_guilds: collect(payload.mutual_guilds, MutualGuildRef::from_value)?,
            mutual_friends_count: payload.mutual_friends_count,
            application: present(payload.application)
                .map(ApplicationIdentity::from_value)
                .transpose()?,
            legacy_username: payload.legacy_username,
        };

        debug!(
            %user_id,
            member = snapshot.member.is_some(),
            connections = snapshot.connections.len(),
            badges = snapshot.badges.len(),
            mutual_guilds = snapshot.mutual_guilds.len(),
            "built profile snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_slice(bytes: &[u8], guild_id: Option<Snowflake>) -> Result<Self, ProfileError> {
        let data = serde_json::from_slice(bytes)
            .map_err(|source| ProfileError::Malformed { fragment: "profile", source })?;
        ProfileSnapshot::from_value(data, guild_id)
    }

    pub fn from_json(raw: &str, guild_id: Option<Snowflake>) -> Result<Self, ProfileError> {
        ProfileSnapshot::from_slice(raw.as_bytes(), guild_id)
    }

    pub fn id(&self) -> Snowflake {
        self.user.snowflake
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// The global profile customisation.
    pub fn user_profile(&self) -> Option<&GuildProfileOverlay> {
        self.user_profile.as_ref()
    }

    pub fn member(&self) -> Option<&GuildMember> {
        self.member.as_ref()
    }

    /// The customisation for the guild the profile was fetched in.
    pub fn member_profile(&self) -> Option<&GuildProfileOverlay> {
        self.member_profile.as_ref()
    }

    pub fn premium_since(&self) -> Option<DateTime<Utc>> {
        self.premium_since
    }

    pub fn premium_type(&self) -> Option<PremiumType> {
        self.premium_type
    }

    /// When the user started boosting a guild.
    pub fn premium_guild_since(&self) -> Option<DateTime<Utc>> {
        self.premium_guild_since
    }

    pub fn connections(&self) -> &[ConnectionRecord] {
        &self.connections
    }

    pub fn badges(&self) -> &[ProfileBadge] {
        &self.badges
    }

    pub fn guild_badges(&self) -> &[ProfileBadge] {
        &self.guild_badges
    }

    pub fn mutual_guilds(&self) -> &[MutualGuildRef] {
        &self.mutual_guilds
    }

    pub fn mutual_friends_count(&self) -> Option<u32> {
        self.mutual_friends_count
    }

    /// Present only when the profile belongs to an application's bot user.
    pub fn application(&self) -> Option<&ApplicationIdentity> {
        self.application.as_ref()
    }

    /// The pre-migration `name#1234` handle, if the user had one.
    pub fn legacy_username(&self) -> Option<&str> {
        self.legacy_username.as_deref()
    }

    pub fn is_premium(&self) -> bool {
        self.premium_since.is_some()
    }

    fn overlays(&self) -> impl Iterator<Item = &GuildProfileOverlay> {
        self.member_profile.iter().chain(self.user_profile.iter())
    }

    pub fn bio(&self) -> &str {
        self.overlays()
            .find_map(|overlay| non_empty(&overlay.bio))
            .unwrap_or(&self.user.bio)
    }

    pub fn pronouns(&self) -> Option<&str> {
        self.overlays()
            .find_map(|overlay| overlay.pronouns.as_deref().and_then(non_empty))
            .or_else(|| self.user.pronouns.as_deref().and_then(non_empty))
    }

    pub fn banner(&self) -> Option<Asset> {
        self.overlays()
            .find_map(GuildProfileOverlay::banner)
            .or_else(|| self.user.banner())
    }

    pub fn accent_colour(&self) -> Option<Colour> {
        self.overlays()
            .find_map(GuildProfileOverlay::accent_colour)
            .or_else(|| self.user.accent_colour())
    }

    pub fn theme_colours(&self) -> Vec<Colour> {
        self.overlays()
            .map(GuildProfileOverlay::theme_colours)
            .find(|colours| !colours.is_empty())
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        match &self.member {
            Some(member) => member.display_name(),
            None => self.user.display_name(),
        }
    }

    pub fn display_avatar(&self) -> Asset {
        match &self.member {
            Some(member) => member.display_avatar(),
            None => self.user.display_avatar(),
        }
    }
}
