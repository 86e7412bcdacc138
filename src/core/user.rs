use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::{
    asset::Asset,
    colour::Colour,
    errors::{decode, ProfileError},
    snowflake::Snowflake,
};

#[derive(Deserialize)]
struct UserPayload {
    id: Snowflake,
    username: String,
    discriminator: Option<String>,
    avatar: Option<String>,
    global_name: Option<String>,
    public_flags: Option<u64>,
    bot: Option<bool>,
    system: Option<bool>,
    banner: Option<String>,
    accent_color: Option<u32>,
    bio: Option<String>,
    pronouns: Option<String>,
}

/// The global user record a profile is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// The user's ID
    pub snowflake: Snowflake,
    pub username: String,
    /// Often called the "tag". `"0"` once the user has migrated to unique usernames.
    pub discriminator: String,
    pub global_name: Option<String>,
    pub public_flags: u64,
    pub bot: bool,
    pub system: bool,
    pub bio: String,
    pub pronouns: Option<String>,
    avatar_hash: Option<String>,
    banner_hash: Option<String>,
    accent_color: Option<u32>,
}

impl User {
    pub fn from_value(data: Value) -> Result<Self, ProfileError> {
        let payload: UserPayload = decode("user", data)?;
        trace!(user_id = %payload.id, "decoded user");

        Ok(User {
            snowflake: payload.id,
            username: payload.username,
            discriminator: payload.discriminator.unwrap_or_else(|| "0".to_string()),
            global_name: payload.global_name,
            public_flags: payload.public_flags.unwrap_or(0),
            bot: payload.bot.unwrap_or(false),
            system: payload.system.unwrap_or(false),
            bio: payload.bio.unwrap_or_default(),
            pronouns: payload.pronouns,
            avatar_hash: payload.avatar,
            banner_hash: payload.banner,
            accent_color: payload.accent_color,
        })
    }

    pub fn avatar_hash(&self) -> Option<&str> {
        self.avatar_hash.as_deref()
    }

    pub fn avatar(&self) -> Option<Asset> {
        self.avatar_hash
            .as_deref()
            .map(|hash| Asset::user_avatar(self.snowflake, hash))
    }

    pub fn default_avatar(&self) -> Asset {
        let index = if self.is_migrated() {
            (self.snowflake.get() >> 22) % 6
        } else {
            self.discriminator.parse::<u64>().unwrap_or(0) % 5
        };
        Asset::default_avatar(index)
    }

    /// The uploaded avatar if there is one, the default one otherwise.
    pub fn display_avatar(&self) -> Asset {
        self.avatar().unwrap_or_else(|| self.default_avatar())
    }

    pub fn banner(&self) -> Option<Asset> {
        self.banner_hash
            .as_deref()
            .map(|hash| Asset::user_banner(self.snowflake, hash))
    }

    pub fn accent_colour(&self) -> Option<Colour> {
        self.accent_color.map(Colour)
    }

    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.snowflake)
    }

    fn is_migrated(&self) -> bool {
        self.discriminator == "0"
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_migrated() {
            f.write_str(&self.username)
        } else {
            write!(f, "{}#{}", self.username, self.discriminator)
        }
    }
}
