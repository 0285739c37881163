use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::server::{error::Error, model::session::MatchupSession, session::SessionStore};

/// Process-local session store
///
/// Only correct for a single serving process; multi-process deployments must use
/// [`super::redis::RedisSessionStore`].
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, MatchupSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(
        &self,
        token: &str,
        session: &MatchupSession,
        _ttl: Duration,
    ) -> Result<bool, Error> {
        let mut sessions = self.sessions.lock().await;

        if sessions.contains_key(token) {
            return Ok(false);
        }

        sessions.insert(token.to_string(), session.clone());
        Ok(true)
    }

    async fn take(&self, token: &str) -> Result<Option<MatchupSession>, Error> {
        Ok(self.sessions.lock().await.remove(token))
    }

    async fn sweep_expired(&self, now: DateTime<Utc>, ttl: Duration) -> Result<u64, Error> {
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, ttl));

        Ok((before - sessions.len()) as u64)
    }
}
