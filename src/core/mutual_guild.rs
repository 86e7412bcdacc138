use std::hash::{Hash, Hasher};

use serde::Deserialize;
use serde_json::Value;

use super::{
    errors::{decode, ProfileError},
    session::SessionContext,
    snowflake::Snowflake,
};

#[derive(Deserialize)]
struct MutualGuildPayload {
    id: Snowflake,
    nick: Option<String>,
}

/// A guild shared with the profile's subject.
#[derive(Clone, Debug)]
pub struct MutualGuildRef {
    pub guild_id: Snowflake,
    /// The subject's nickname in that guild.
    pub nickname: Option<String>,
}

impl MutualGuildRef {
    pub fn from_value(data: Value) -> Result<Self, ProfileError> {
        let payload: MutualGuildPayload = decode("mutual guild", data)?;
        Ok(MutualGuildRef {
            guild_id: payload.id,
            nickname: payload.nick,
        })
    }

    pub fn guild<C: SessionContext>(&self, session: &C) -> C::Guild {
        session.guild(self.guild_id)
    }
}

impl PartialEq for MutualGuildRef {
    fn eq(&self, other: &Self) -> bool {
        self.guild_id == other.guild_id
    }
}

impl Eq for MutualGuildRef {}

impl Hash for MutualGuildRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.guild_id.hash(state);
    }
}
