use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::{
    asset::Asset,
    errors::{decode, ProfileError},
};

#[derive(Deserialize)]
struct BadgePayload {
    id: String,
    description: Option<String>,
    icon: String,
    link: Option<String>,
}

/// A profile badge. Badges compare and hash by `id` alone.
#[derive(Clone, Debug)]
pub struct ProfileBadge {
    pub id: String,
    pub description: String,
    pub link: Option<String>,
    icon: String,
}

impl ProfileBadge {
    pub fn from_value(data: Value) -> Result<Self, ProfileError> {
        let payload: BadgePayload = decode("badge", data)?;
        trace!(badge = %payload.id, "decoded badge");

        Ok(ProfileBadge {
            id: payload.id,
            description: payload.description.unwrap_or_default(),
            link: payload.link,
            icon: payload.icon,
        })
    }

    pub fn icon(&self) -> Asset {
        Asset::badge_icon(&self.icon)
    }

    pub fn url(&self) -> String {
        self.icon().url()
    }
}

impl PartialEq for ProfileBadge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ProfileBadge {}

impl Hash for ProfileBadge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ProfileBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_and_icon_url() {
        let badge = ProfileBadge::from_value(json!({ "id": "hypesquad", "icon": "abc123" })).unwrap();

        assert_eq!(badge.description, "");
        assert_eq!(badge.link, None);
        assert_eq!(badge.url(), "https://cdn.discordapp.com/badge-icons/abc123.png");
        assert!(!badge.icon().is_animated());
    }

    #[test]
    fn equal_by_id() {
        let a = ProfileBadge::from_value(json!({
            "id": "early_supporter",
            "description": "Early Supporter",
            "icon": "1",
            "link": "https://discord.com/settings/premium"
        }))
        .unwrap();
        let b = ProfileBadge::from_value(json!({ "id": "early_supporter", "icon": "2" })).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Early Supporter");
    }

    #[test]
    fn icon_is_required() {
        let err = ProfileBadge::from_value(json!({ "id": "x" })).unwrap_err();
        assert_eq!(err.fragment(), Some("badge"));
    }
}
