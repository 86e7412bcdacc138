//! Third-party accounts linked to a profile, and where they live on the web.

use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::errors::{decode, ProfileError};

/// The service a connection belongs to. Tags Discord adds later land in `Unknown`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    Twitch,
    Youtube,
    Steam,
    Reddit,
    Twitter,
    Spotify,
    Xbox,
    Github,
    Tiktok,
    Ebay,
    Instagram,
    Playstation,
    Domain,
    Roblox,
    Unknown(String),
}

impl ServiceType {
    pub const KNOWN: [ServiceType; 14] = [
        ServiceType::Twitch,
        ServiceType::Youtube,
        ServiceType::Steam,
        ServiceType::Reddit,
        ServiceType::Twitter,
        ServiceType::Spotify,
        ServiceType::Xbox,
        ServiceType::Github,
        ServiceType::Tiktok,
        ServiceType::Ebay,
        ServiceType::Instagram,
        ServiceType::Playstation,
        ServiceType::Domain,
        ServiceType::Roblox,
    ];

    /// The wire tag, e.g. `"youtube"`.
    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Twitch => "twitch",
            ServiceType::Youtube => "youtube",
            ServiceType::Steam => "steam",
            ServiceType::Reddit => "reddit",
            ServiceType::Twitter => "twitter",
            ServiceType::Spotify => "spotify",
            ServiceType::Xbox => "xbox",
            ServiceType::Github => "github",
            ServiceType::Tiktok => "tiktok",
            ServiceType::Ebay => "ebay",
            ServiceType::Instagram => "instagram",
            ServiceType::Playstation => "playstation",
            ServiceType::Domain => "domain",
            ServiceType::Roblox => "roblox",
            ServiceType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ServiceType::Unknown(_))
    }
}

impl From<String> for ServiceType {
    fn from(raw: String) -> Self {
        ServiceType::KNOWN
            .into_iter()
            .find(|known| known.as_str() == raw)
            .unwrap_or(ServiceType::Unknown(raw))
    }
}

impl From<&str> for ServiceType {
    fn from(raw: &str) -> Self {
        ServiceType::from(raw.to_string())
    }
}

impl From<ServiceType> for String {
    fn from(service: ServiceType) -> Self {
        service.as_str().to_string()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which account field a link is built from.
#[derive(Clone, Copy)]
enum Field {
    Id,
    Name,
}

enum LinkRule {
    Template {
        prefix: &'static str,
        field: Field,
        suffix: &'static str,
    },
    /// A name with a space in it is already a full handle and used as-is.
    Xbox,
}

const fn name(prefix: &'static str) -> LinkRule {
    LinkRule::Template {
        prefix,
        field: Field::Name,
        suffix: "",
    }
}

const fn id(prefix: &'static str, suffix: &'static str) -> LinkRule {
    LinkRule::Template {
        prefix,
        field: Field::Id,
        suffix,
    }
}

const XBOX_PROFILE: &str = "https://account.xbox.com/en-US/Profile?Gamertag=";

fn rule(service: &ServiceType) -> Option<LinkRule> {
    let rule = match service {
        ServiceType::Twitch => name("https://www.twitch.tv/"),
        ServiceType::Youtube => id("https://www.youtube.com/channel/", ""),
        ServiceType::Steam => id("https://steamcommunity.com/profiles/", ""),
        ServiceType::Reddit => name("https://www.reddit.com/u/"),
        ServiceType::Twitter => name("https://twitter.com/"),
        ServiceType::Spotify => id("https://open.spotify.com/user/", ""),
        ServiceType::Xbox => LinkRule::Xbox,
        ServiceType::Github => name("https://github.com/"),
        ServiceType::Tiktok => name("https://tiktok.com/@"),
        ServiceType::Ebay => name("https://www.ebay.com/usr/"),
        ServiceType::Instagram => name("https://www.instagram.com/"),
        ServiceType::Playstation => name("https://psnprofiles.com/"),
        ServiceType::Domain => name("https://"),
        ServiceType::Roblox => id("https://www.roblox.com/users/", "/profile"),
        ServiceType::Unknown(_) => return None,
    };
    Some(rule)
}

/// The public profile URL for an account on `service`, if the service has one.
pub fn resolve_url(service: &ServiceType, account_id: &str, account_name: &str) -> Option<String> {
    match rule(service)? {
        LinkRule::Template {
            prefix,
            field,
            suffix,
        } => {
            let value = match field {
                Field::Id => account_id,
                Field::Name => account_name,
            };
            Some(format!("{}{}{}", prefix, value, suffix))
        }
        LinkRule::Xbox if account_name.contains(' ') => Some(account_name.to_string()),
        LinkRule::Xbox => Some(format!("{}{}", XBOX_PROFILE, account_name)),
    }
}

/// Whether an account with this URL is displayed as a link.
pub fn is_link(url: Option<&str>) -> bool {
    url.map_or(false, |url| url.starts_with("https"))
}

/// Markdown link to `url` labelled with `name`, or just `name` when there is no https link.
pub fn hyperlink(name: &str, url: Option<&str>) -> String {
    match url {
        Some(url) if is_link(Some(url)) => {
            let label = if name.is_empty() { "\u{200b}" } else { name };
            format!("[{}]({})", label, url)
        }
        _ => name.to_string(),
    }
}

/// A resolved account link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: Option<String>,
    pub display_is_link: bool,
}

pub fn resolve(service: &ServiceType, account_id: &str, account_name: &str) -> ResolvedLink {
    let url = resolve_url(service, account_id, account_name);
    ResolvedLink {
        display_is_link: is_link(url.as_deref()),
        url,
    }
}

#[derive(Deserialize)]
struct ConnectionPayload {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: ServiceType,
    verified: bool,
    metadata: Option<HashMap<String, Value>>,
}

/// A connection as shown on someone else's profile.
///
/// Two records are equal when `id` and `name` match. Only `id` is hashed, so equal
/// records always hash alike whatever their service.
#[derive(Clone, Debug)]
pub struct ConnectionRecord {
    /// The account ID on the other service.
    pub id: String,
    pub name: String,
    pub service: ServiceType,
    pub verified: bool,
    /// Only visible connections are ever sent on a profile.
    pub visible: bool,
    /// Service-defined; subject to change without notice.
    pub metadata: HashMap<String, Value>,
}

impl ConnectionRecord {
    pub fn from_value(data: Value) -> Result<Self, ProfileError> {
        let payload: ConnectionPayload = decode("connection", data)?;

        if !payload.kind.is_known() {
            warn!(service = %payload.kind, "unrecognised connection service");
        }
        trace!(service = %payload.kind, id = %payload.id, "decoded connection");

        Ok(ConnectionRecord {
            id: payload.id,
            name: payload.name,
            service: payload.kind,
            verified: payload.verified,
            visible: true,
            metadata: payload.metadata.unwrap_or_default(),
        })
    }

    /// Builds the replacement for this record from a refreshed fragment.
    pub fn rebuild(&self, data: Value) -> Result<Self, ProfileError> {
        let next = ConnectionRecord::from_value(data)?;
        if next.service != self.service || next.id != self.id {
            debug!(
                from = %self.service,
                to = %next.service,
                "connection identity changed on refresh"
            );
        }
        Ok(next)
    }

    pub fn url(&self) -> Option<String> {
        resolve_url(&self.service, &self.id, &self.name)
    }

    pub fn link(&self) -> ResolvedLink {
        resolve(&self.service, &self.id, &self.name)
    }

    pub fn is_link(&self) -> bool {
        self.link().display_is_link
    }

    pub fn hyperlink(&self) -> String {
        hyperlink(&self.name, self.url().as_deref())
    }
}

impl PartialEq for ConnectionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for ConnectionRecord {}

impl Hash for ConnectionRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ConnectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn record(kind: &str, id: &str, name: &str) -> ConnectionRecord {
        ConnectionRecord::from_value(json!({
            "id": id,
            "name": name,
            "type": kind,
            "verified": true
        }))
        .unwrap()
    }

    fn hash_of(record: &ConnectionRecord) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    #[case("twitch", "https://www.twitch.tv/someone")]
    #[case("youtube", "https://www.youtube.com/channel/UC123")]
    #[case("steam", "https://steamcommunity.com/profiles/UC123")]
    #[case("reddit", "https://www.reddit.com/u/someone")]
    #[case("twitter", "https://twitter.com/someone")]
    #[case("spotify", "https://open.spotify.com/user/UC123")]
    #[case("xbox", "https://account.xbox.com/en-US/Profile?Gamertag=someone")]
    #[case("github", "https://github.com/someone")]
    #[case("tiktok", "https://tiktok.com/@someone")]
    #[case("ebay", "https://www.ebay.com/usr/someone")]
    #[case("instagram", "https://www.instagram.com/someone")]
    #[case("playstation", "https://psnprofiles.com/someone")]
    #[case("domain", "https://someone")]
    #[case("roblox", "https://www.roblox.com/users/UC123/profile")]
    fn known_services_resolve(#[case] kind: &str, #[case] expected: &str) {
        let service = ServiceType::from(kind);
        assert!(service.is_known());
        assert_eq!(
            resolve_url(&service, "UC123", "someone").as_deref(),
            Some(expected)
        );
    }

    #[test]
    fn every_known_service_has_a_link() {
        for service in ServiceType::KNOWN {
            let link = resolve(&service, "1", "n");
            assert!(link.url.is_some(), "{}", service);
            assert!(link.display_is_link, "{}", service);
        }
    }

    #[test]
    fn unknown_service_is_preserved_without_link() {
        let conn = record("bluesky", "did:plc:xyz", "someone.bsky.social");

        assert_eq!(conn.service, ServiceType::Unknown("bluesky".to_string()));
        assert_eq!(conn.service.to_string(), "bluesky");
        assert_eq!(conn.url(), None);
        assert!(!conn.is_link());
        assert_eq!(conn.hyperlink(), "someone.bsky.social");
    }

    #[test]
    fn github_hyperlink() {
        let conn = record("github", "1", "foo");

        assert_eq!(conn.url().as_deref(), Some("https://github.com/foo"));
        assert!(conn.is_link());
        assert_eq!(conn.hyperlink(), "[foo](https://github.com/foo)");
        assert!(conn.visible);
        assert!(conn.metadata.is_empty());
    }

    #[rstest]
    #[case("John Doe", "John Doe")]
    #[case("JohnDoe", "https://account.xbox.com/en-US/Profile?Gamertag=JohnDoe")]
    fn xbox_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(record("xbox", "2", name).url().as_deref(), Some(expected));
    }

    #[test]
    fn xbox_handle_with_space_is_not_a_link() {
        let conn = record("xbox", "2", "John Doe");

        assert_eq!(
            conn.link(),
            ResolvedLink {
                url: Some("John Doe".to_string()),
                display_is_link: false,
            }
        );
        assert_eq!(conn.hyperlink(), "John Doe");
    }

    #[test]
    fn empty_name_gets_placeholder_label() {
        assert_eq!(
            hyperlink("", Some("https://example.com")),
            "[\u{200b}](https://example.com)"
        );
        assert_eq!(hyperlink("", None), "");
    }

    #[test]
    fn equality_ignores_everything_but_id_and_name() {
        let a = record("github", "1", "foo");
        let b = ConnectionRecord::from_value(json!({
            "id": "1",
            "name": "foo",
            "type": "twitch",
            "verified": false,
            "metadata": { "followers": 12 }
        }))
        .unwrap();

        assert_eq!(a, b);
        assert_ne!(a, record("github", "1", "bar"));
    }

    #[test]
    fn hash_follows_the_account_id() {
        let a = record("github", "1", "foo");
        assert_eq!(hash_of(&a), hash_of(&record("github", "1", "renamed")));
        assert_ne!(hash_of(&a), hash_of(&record("github", "2", "foo")));
    }

    #[test]
    fn equal_records_hash_alike_across_services() {
        let a = record("github", "1", "foo");
        let b = record("twitch", "1", "foo");

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[rstest]
    #[case(json!({ "name": "n", "type": "github", "verified": true }))]
    #[case(json!({ "id": "1", "type": "github", "verified": true }))]
    #[case(json!({ "id": "1", "name": "n", "verified": true }))]
    #[case(json!({ "id": 1, "name": "n", "type": "github", "verified": true }))]
    fn required_fields(#[case] data: Value) {
        let err = ConnectionRecord::from_value(data).unwrap_err();
        assert_eq!(err.fragment(), Some("connection"));
    }

    #[test]
    fn rebuild_returns_fresh_record() {
        let old = record("github", "1", "foo");
        let new = old
            .rebuild(json!({
                "id": "1",
                "name": "foo-renamed",
                "type": "github",
                "verified": false
            }))
            .unwrap();

        assert_eq!(old.name, "foo");
        assert_eq!(new.hyperlink(), "[foo-renamed](https://github.com/foo-renamed)");
        assert!(!new.verified);
    }
}
