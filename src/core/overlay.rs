//! Profile customisation, either global or for a single guild.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::{
    asset::Asset,
    colour::Colour,
    errors::{decode, ProfileError},
    snowflake::{lenient, Snowflake},
};

#[derive(Deserialize)]
struct OverlayPayload {
    #[serde(default, deserialize_with = "lenient")]
    guild_id: Option<Snowflake>,
    bio: Option<String>,
    pronouns: Option<String>,
    accent_color: Option<u32>,
    theme_colors: Option<Vec<u32>>,
    banner: Option<String>,
    emoji: Option<Value>,
}

/// Bio, pronouns, banner and colours layered on top of the base user.
///
/// An overlay always resolves its banner against its own `guild_id`: with one it
/// points at the guild banner, without one at the global banner. The same hash is
/// never reinterpreted in another context.
#[derive(Clone, Debug, PartialEq)]
pub struct GuildProfileOverlay {
    pub user_id: Snowflake,
    /// `None` for the global profile.
    pub guild_id: Option<Snowflake>,
    pub bio: String,
    pub pronouns: Option<String>,
    /// Raw emoji object; its shape is owned elsewhere.
    pub emoji: Option<Value>,
    accent_color: Option<u32>,
    theme_colors: Vec<u32>,
    banner_hash: Option<String>,
}

impl GuildProfileOverlay {
    pub fn from_value(user_id: Snowflake, data: Value) -> Result<Self, ProfileError> {
        let payload: OverlayPayload = decode("profile metadata", data)?;
        trace!(%user_id, guild_id = ?payload.guild_id, "decoded profile overlay");

        Ok(GuildProfileOverlay {
            user_id,
            guild_id: payload.guild_id,
            bio: payload.bio.unwrap_or_default(),
            pronouns: payload.pronouns,
            emoji: payload.emoji,
            accent_color: payload.accent_color,
            theme_colors: payload.theme_colors.unwrap_or_default(),
            banner_hash: payload.banner,
        })
    }

    pub fn is_guild_scoped(&self) -> bool {
        self.guild_id.is_some()
    }

    pub fn accent_colour(&self) -> Option<Colour> {
        self.accent_color.map(Colour)
    }

    /// Primary then accent, in payload order.
    pub fn theme_colours(&self) -> Vec<Colour> {
        self.theme_colors.iter().copied().map(Colour).collect()
    }

    pub fn banner(&self) -> Option<Asset> {
        let hash = self.banner_hash.as_deref()?;
        Some(match self.guild_id {
            Some(guild_id) => Asset::guild_banner(guild_id, self.user_id, hash),
            None => Asset::user_banner(self.user_id, hash),
        })
    }
}
