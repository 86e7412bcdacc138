//! Base URLs for Discord-hosted links.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::errors::ProfileError;

/// Where CDN assets and web pages live. Third-party connection links are not affected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub cdn: Cow<'static, str>,
    pub web: Cow<'static, str>,
}

impl Endpoints {
    pub const DISCORD: Endpoints = Endpoints {
        cdn: Cow::Borrowed("https://cdn.discordapp.com"),
        web: Cow::Borrowed("https://discord.com"),
    };

    /// Loads an override; keys left out keep their Discord defaults.
    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        serde_json::from_str(raw).map_err(ProfileError::Config)
    }

    pub(crate) fn cdn_url(&self, path: &str) -> String {
        format!("{}{}", self.cdn.trim_end_matches('/'), path)
    }

    pub(crate) fn web_url(&self, path: &str) -> String {
        format!("{}{}", self.web.trim_end_matches('/'), path)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::DISCORD
    }
}
