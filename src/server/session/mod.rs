//! Matchup session registry.
//!
//! Every dealt pair is bound to a 256-bit random token. The token can be exchanged for the
//! pair exactly once: consuming it removes the session atomically, so a replayed vote finds
//! nothing. Sessions older than the TTL are rejected at consume time and removed by sweeps.
//!
//! Storage sits behind [`SessionStore`] so the registry works the same against the
//! process-local [`memory::MemorySessionStore`] and the shared [`redis::RedisSessionStore`].

mod lua;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, RngCore};

use crate::server::{
    error::{matchup::MatchupError, Error},
    model::session::MatchupSession,
};

/// Number of random bytes in a session token (hex encoded to 64 characters)
pub const TOKEN_BYTES: usize = 32;

/// Attempts to find an unused token before giving up
pub const MAX_TOKEN_ATTEMPTS: u32 = 3;

/// Storage capability for matchup sessions
///
/// Implementations must make `insert` and `take` atomic per token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `session` under `token` unless the token is already present
    ///
    /// # Returns
    /// - `Ok(true)` - Session stored
    /// - `Ok(false)` - Token already taken, nothing was overwritten
    async fn insert(&self, token: &str, session: &MatchupSession, ttl: Duration)
        -> Result<bool, Error>;

    /// Removes and returns the session stored under `token`
    async fn take(&self, token: &str) -> Result<Option<MatchupSession>, Error>;

    /// Removes sessions older than `ttl` at `now`, returning how many were removed
    async fn sweep_expired(&self, now: DateTime<Utc>, ttl: Duration) -> Result<u64, Error>;
}

pub struct MatchupSessionRegistry {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    sweep_probability: f64,
}

impl MatchupSessionRegistry {
    /// Creates a new registry
    ///
    /// # Arguments
    /// - `store` - Session storage backend
    /// - `ttl` - Maximum age of a session before it can no longer be consumed
    /// - `sweep_probability` - Chance in `[0, 1]` that [`Self::maybe_sweep`] runs a sweep
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration, sweep_probability: f64) -> Self {
        Self {
            store,
            ttl,
            sweep_probability: sweep_probability.clamp(0.0, 1.0),
        }
    }

    /// Issues a token for a dealt pair
    ///
    /// A fresh token is drawn for each attempt; the store refuses to overwrite an
    /// existing token, so a collision never hijacks another user's session.
    ///
    /// # Returns
    /// - `Ok(String)` - 64 character hex token
    /// - `Err(MatchupError::SessionTokenCollision)` - Every attempt collided
    /// - `Err(_)` - Store error
    pub async fn create_session(
        &self,
        first_id: i32,
        second_id: i32,
        category: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let session = MatchupSession::new(first_id, second_id, category, now);

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let token = generate_token();

            if self.store.insert(&token, &session, self.ttl).await? {
                return Ok(token);
            }

            tracing::warn!(
                attempt,
                max_attempts = MAX_TOKEN_ATTEMPTS,
                "Matchup session token collision"
            );
        }

        Err(MatchupError::SessionTokenCollision(MAX_TOKEN_ATTEMPTS).into())
    }

    /// Exchanges a token for its session, at most once
    ///
    /// The session is removed before its age is checked, so an expired session is also
    /// cleaned up by the failed attempt.
    ///
    /// # Returns
    /// - `Ok(MatchupSession)` - Token was valid and is now consumed
    /// - `Err(MatchupError::InvalidOrExpiredSession)` - Unknown, already consumed, or expired
    /// - `Err(_)` - Store error
    pub async fn consume_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<MatchupSession, Error> {
        let session = self
            .store
            .take(token)
            .await?
            .ok_or(MatchupError::InvalidOrExpiredSession)?;

        if session.is_expired(now, self.ttl) {
            return Err(MatchupError::InvalidOrExpiredSession.into());
        }

        Ok(session)
    }

    /// Removes every session older than the TTL
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let removed = self.store.sweep_expired(now, self.ttl).await?;

        if removed > 0 {
            tracing::debug!(removed, "Swept expired matchup sessions");
        }

        Ok(removed)
    }

    /// Sweeps expired sessions with the configured probability
    ///
    /// A failed sweep is logged and does not fail the caller.
    pub async fn maybe_sweep(&self, now: DateTime<Utc>) {
        if !rand::rng().random_bool(self.sweep_probability) {
            return;
        }

        if let Err(e) = self.sweep_expired(now).await {
            tracing::warn!("Failed to sweep expired matchup sessions: {}", e);
        }
    }
}

/// Generates a token from 32 bytes of the thread-local CSPRNG
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    hex::encode(bytes)
}
