//! The lookup capability into the caller's guild cache.

use super::snowflake::Snowflake;

/// Read-only access to guild state owned by the surrounding client.
///
/// Value objects never store one of these; only their resolution methods take it.
/// Any synchronisation is the implementor's business.
pub trait SessionContext {
    type Guild;

    /// Returns the cached guild, or a placeholder for one the session has not seen.
    fn guild(&self, id: Snowflake) -> Self::Guild;
}

impl<G, F> SessionContext for F
where
    F: Fn(Snowflake) -> G,
{
    type Guild = G;

    fn guild(&self, id: Snowflake) -> G {
        self(id)
    }
}
