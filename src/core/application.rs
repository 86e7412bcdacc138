//! The application a profile belongs to, when the subject is a bot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::trace;

use super::{
    config::Endpoints,
    errors::{decode, present, ProfileError},
    snowflake::{lenient, NumericVisitor, Snowflake},
};

/// A permission bit set, carried opaquely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Permissions(pub u64);

impl Permissions {
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor).map(Permissions)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ApplicationFlags(u64);

impl ApplicationFlags {
    pub const AUTO_MODERATION_RULE_CREATE_BADGE: u64 = 1 << 6;
    pub const GATEWAY_PRESENCE: u64 = 1 << 12;
    pub const GATEWAY_PRESENCE_LIMITED: u64 = 1 << 13;
    pub const GATEWAY_GUILD_MEMBERS: u64 = 1 << 14;
    pub const GATEWAY_GUILD_MEMBERS_LIMITED: u64 = 1 << 15;
    pub const VERIFICATION_PENDING_GUILD_LIMIT: u64 = 1 << 16;
    pub const EMBEDDED: u64 = 1 << 17;
    pub const GATEWAY_MESSAGE_CONTENT: u64 = 1 << 18;
    pub const GATEWAY_MESSAGE_CONTENT_LIMITED: u64 = 1 << 19;
    pub const APPLICATION_COMMAND_BADGE: u64 = 1 << 23;

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, flag: u64) -> bool {
        self.0 & flag == flag
    }
}

const DEFAULT_SCOPES: [&str; 2] = ["bot", "applications.commands"];

#[derive(Deserialize)]
struct InstallParamsPayload {
    #[serde(default)]
    scopes: Vec<String>,
    permissions: Option<Permissions>,
}

/// What to request when adding the application to a guild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationInstallParams {
    pub application_id: Snowflake,
    pub scopes: Vec<String>,
    pub permissions: Permissions,
}

impl ApplicationInstallParams {
    /// An empty scope list falls back to `bot` + `applications.commands`.
    pub fn new(application_id: Snowflake, scopes: Vec<String>, permissions: Permissions) -> Self {
        let scopes = if scopes.is_empty() {
            DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
        } else {
            scopes
        };
        ApplicationInstallParams {
            application_id,
            scopes,
            permissions,
        }
    }

    pub fn url(&self) -> String {
        self.url_on(&Endpoints::DISCORD)
    }

    pub fn url_on(&self, endpoints: &Endpoints) -> String {
        endpoints.web_url(&format!(
            "/oauth2/authorize?client_id={}&scope={}&permissions={}",
            self.application_id,
            self.scopes.join("+"),
            self.permissions.value()
        ))
    }
}

#[derive(Deserialize)]
struct ApplicationPayload {
    id: Snowflake,
    verified: Option<bool>,
    popular_application_command_ids: Option<Vec<Snowflake>>,
    #[serde(default, deserialize_with = "lenient")]
    primary_sku_id: Option<Snowflake>,
    flags: Option<u64>,
    custom_install_url: Option<String>,
    install_params: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationIdentity {
    pub id: Snowflake,
    pub verified: bool,
    pub popular_application_command_ids: Vec<Snowflake>,
    /// Game, subscription or other store SKU the application leads with.
    pub primary_sku_id: Option<Snowflake>,
    pub custom_install_url: Option<String>,
    pub install_params: Option<ApplicationInstallParams>,
    flags: u64,
}

impl ApplicationIdentity {
    pub fn from_value(data: Value) -> Result<Self, ProfileError> {
        let payload: ApplicationPayload = decode("application", data)?;
        trace!(application_id = %payload.id, "decoded application");

        let install_params = match present(payload.install_params) {
            Some(data) => {
                let params: InstallParamsPayload = decode("install params", data)?;
                Some(ApplicationInstallParams::new(
                    payload.id,
                    params.scopes,
                    params.permissions.unwrap_or_default(),
                ))
            }
            None => None,
        };

        Ok(ApplicationIdentity {
            id: payload.id,
            verified: payload.verified.unwrap_or(false),
            popular_application_command_ids: payload
                .popular_application_command_ids
                .unwrap_or_default(),
            primary_sku_id: payload.primary_sku_id,
            custom_install_url: payload.custom_install_url,
            install_params,
            flags: payload.flags.unwrap_or(0),
        })
    }

    pub fn flags(&self) -> ApplicationFlags {
        ApplicationFlags(self.flags)
    }

    pub fn install_url(&self) -> Option<String> {
        self.install_url_on(&Endpoints::DISCORD)
    }

    /// The custom install URL wins over one derived from the install parameters.
    pub fn install_url_on(&self, endpoints: &Endpoints) -> Option<String> {
        self.custom_install_url.clone().or_else(|| {
            self.install_params
                .as_ref()
                .map(|params| params.url_on(endpoints))
        })
    }

    pub fn primary_sku_url(&self) -> Option<String> {
        self.primary_sku_url_on(&Endpoints::DISCORD)
    }

    pub fn primary_sku_url_on(&self, endpoints: &Endpoints) -> Option<String> {
        self.primary_sku_id
            .filter(|id| id.get() != 0)
            .map(|id| endpoints.web_url(&format!("/store/skus/{}/unknown", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn bare_application() {
        let app = ApplicationIdentity::from_value(json!({ "id": "1000" })).unwrap();

        assert!(!app.verified);
        assert!(app.popular_application_command_ids.is_empty());
        assert_eq!(app.install_url(), None);
        assert_eq!(app.primary_sku_url(), None);
        assert_eq!(app.flags().bits(), 0);
    }

    #[test]
    fn install_params_url() {
        let app = ApplicationIdentity::from_value(json!({
            "id": "1000",
            "install_params": { "scopes": ["bot"], "permissions": "8" }
        }))
        .unwrap();

        assert_eq!(
            app.install_url().as_deref(),
            Some("https://discord.com/oauth2/authorize?client_id=1000&scope=bot&permissions=8")
        );
    }

    #[test]
    fn empty_scopes_use_defaults() {
        let app = ApplicationIdentity::from_value(json!({
            "id": "1000",
            "install_params": { "scopes": [], "permissions": 0 }
        }))
        .unwrap();
        let params = app.install_params.as_ref().unwrap();

        assert_eq!(params.scopes, vec!["bot", "applications.commands"]);
        assert_eq!(
            params.url(),
            "https://discord.com/oauth2/authorize?client_id=1000&scope=bot+applications.commands&permissions=0"
        );
    }

    #[test]
    fn custom_install_url_wins() {
        let app = ApplicationIdentity::from_value(json!({
            "id": "1000",
            "custom_install_url": "https://example.com/invite",
            "install_params": { "scopes": ["bot"], "permissions": "8" }
        }))
        .unwrap();
        assert_eq!(app.install_url().as_deref(), Some("https://example.com/invite"));

        let custom_only = ApplicationIdentity::from_value(json!({
            "id": "1000",
            "custom_install_url": "https://example.com/invite"
        }))
        .unwrap();
        assert_eq!(
            custom_only.install_url().as_deref(),
            Some("https://example.com/invite")
        );
    }

    #[test]
    fn primary_sku() {
        let app = ApplicationIdentity::from_value(json!({
            "id": "1000",
            "verified": true,
            "primary_sku_id": "555",
            "flags": ApplicationFlags::EMBEDDED | ApplicationFlags::GATEWAY_PRESENCE,
            "popular_application_command_ids": ["1", "2"]
        }))
        .unwrap();

        assert_eq!(
            app.primary_sku_url().as_deref(),
            Some("https://discord.com/store/skus/555/unknown")
        );
        assert!(app.flags().contains(ApplicationFlags::EMBEDDED));
        assert!(!app.flags().contains(ApplicationFlags::GATEWAY_MESSAGE_CONTENT));
        assert_eq!(app.popular_application_command_ids.len(), 2);
    }

    #[test]
    fn malformed_sku_is_absent() {
        let app = ApplicationIdentity::from_value(json!({
            "id": "1000",
            "primary_sku_id": "not-a-snowflake"
        }))
        .unwrap();

        assert_eq!(app.primary_sku_id, None);
        assert_eq!(app.primary_sku_url(), None);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!(null))]
    fn empty_install_params_are_absent(#[case] params: Value) {
        let app = ApplicationIdentity::from_value(json!({ "id": "9", "install_params": params })).unwrap();

        assert_eq!(app.install_params, None);
        assert_eq!(app.install_url(), None);
    }

    #[test]
    fn malformed_install_params_fail() {
        let err = ApplicationIdentity::from_value(json!({
            "id": "9",
            "install_params": { "permissions": "lots" }
        }))
        .unwrap_err();
        assert_eq!(err.fragment(), Some("install params"));
    }

    #[test]
    fn id_is_required() {
        let err = ApplicationIdentity::from_value(json!({ "verified": true })).unwrap_err();
        assert_eq!(err.fragment(), Some("application"));
    }
}
