//! CDN assets referenced by hash.

use std::fmt;

use super::{config::Endpoints, snowflake::Snowflake};

/// A CDN image. Only the path is stored; the host comes from [`Endpoints`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Asset {
    path: String,
    key: String,
    animated: bool,
}

fn is_animated(hash: &str) -> bool {
    hash.starts_with("a_")
}

fn extension(hash: &str) -> &'static str {
    if is_animated(hash) {
        "gif"
    } else {
        "png"
    }
}

impl Asset {
    pub(crate) fn user_avatar(user_id: Snowflake, hash: &str) -> Self {
        Asset {
            path: format!("/avatars/{}/{}.{}?size=1024", user_id, hash, extension(hash)),
            key: hash.to_string(),
            animated: is_animated(hash),
        }
    }

    pub(crate) fn default_avatar(index: u64) -> Self {
        Asset {
            path: format!("/embed/avatars/{}.png", index),
            key: index.to_string(),
            animated: false,
        }
    }

    pub(crate) fn user_banner(user_id: Snowflake, hash: &str) -> Self {
        Asset {
            path: format!("/banners/{}/{}.{}?size=512", user_id, hash, extension(hash)),
            key: hash.to_string(),
            animated: is_animated(hash),
        }
    }

    pub(crate) fn guild_banner(guild_id: Snowflake, user_id: Snowflake, hash: &str) -> Self {
        Asset {
            path: format!(
                "/guilds/{}/users/{}/banners/{}.{}?size=512",
                guild_id,
                user_id,
                hash,
                extension(hash)
            ),
            key: hash.to_string(),
            animated: is_animated(hash),
        }
    }

    pub(crate) fn guild_avatar(guild_id: Snowflake, user_id: Snowflake, hash: &str) -> Self {
        Asset {
            path: format!(
                "/guilds/{}/users/{}/avatars/{}.{}?size=1024",
                guild_id,
                user_id,
                hash,
                extension(hash)
            ),
            key: hash.to_string(),
            animated: is_animated(hash),
        }
    }

    pub(crate) fn badge_icon(icon: &str) -> Self {
        Asset {
            path: format!("/badge-icons/{}.png", icon),
            key: icon.to_string(),
            animated: false,
        }
    }

    /// The hash (or default-avatar index) identifying this asset.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> String {
        self.url_on(&Endpoints::DISCORD)
    }

    pub fn url_on(&self, endpoints: &Endpoints) -> String {
        endpoints.cdn_url(&self.path)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
