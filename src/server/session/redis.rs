use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fred::prelude::*;

use crate::server::{
    error::Error,
    model::session::MatchupSession,
    session::{
        lua::{INSERT_SESSION_SCRIPT, TAKE_SESSION_SCRIPT},
        SessionStore,
    },
};

const DEFAULT_KEY_PREFIX: &str = "ranker:session";

/// Session store shared by every serving process through Valkey/Redis
///
/// Each session is a JSON string under `{prefix}:{token}` with a native expiry equal to
/// the session TTL.
pub struct RedisSessionStore {
    pool: Pool,
    /// Key prefix in Redis (allows namespacing for test isolation)
    key_prefix: String,
}

impl RedisSessionStore {
    pub fn new(pool: Pool) -> Self {
        Self::with_key_prefix(pool, DEFAULT_KEY_PREFIX.to_string())
    }

    /// Create a new RedisSessionStore with a custom key prefix (useful for testing)
    pub fn with_key_prefix(pool: Pool, key_prefix: String) -> Self {
        Self { pool, key_prefix }
    }

    fn key(&self, token: &str) -> String {
        format!("{}:{}", self.key_prefix, token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn insert(
        &self,
        token: &str,
        session: &MatchupSession,
        ttl: Duration,
    ) -> Result<bool, Error> {
        let value = serde_json::to_string(session)?;
        let ttl_ms = ttl.num_milliseconds().max(1);

        let result: i64 = self
            .pool
            .eval(
                INSERT_SESSION_SCRIPT,
                vec![self.key(token)],
                vec![value, ttl_ms.to_string()],
            )
            .await?;

        Ok(result == 1)
    }

    async fn take(&self, token: &str) -> Result<Option<MatchupSession>, Error> {
        let value: Option<String> = self
            .pool
            .eval(TAKE_SESSION_SCRIPT, vec![self.key(token)], Vec::<String>::new())
            .await?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Keys expire natively after the TTL, so there is nothing to sweep
    async fn sweep_expired(&self, _now: DateTime<Utc>, _ttl: Duration) -> Result<u64, Error> {
        Ok(0)
    }
}
