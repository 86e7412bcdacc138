//! The errors types this crate uses.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("malformed {fragment} fragment")]
    Malformed {
        fragment: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("guild member fragment present without a guild id")]
    MissingGuildContext,
    #[error("invalid endpoint configuration")]
    Config(#[source] serde_json::Error),
}

impl ProfileError {
    /// The fragment that failed to decode, if this is a decoding failure.
    pub fn fragment(&self) -> Option<&'static str> {
        match self {
            ProfileError::Malformed { fragment, .. } => Some(*fragment),
            _ => None,
        }
    }
}

/// Decodes one payload fragment, tagging failures with the fragment's name.
pub(crate) fn decode<T: DeserializeOwned>(
    fragment: &'static str,
    value: Value,
) -> Result<T, ProfileError> {
    serde_json::from_value(value).map_err(|source| ProfileError::Malformed { fragment, source })
}

/// Drops optional sub-objects that are `null` or `{}`; both mean "not sent".
pub(crate) fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::Object(fields) => !fields.is_empty(),
        _ => true,
    })
}
