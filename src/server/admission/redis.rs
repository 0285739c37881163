use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fred::prelude::*;

use crate::server::{
    admission::{
        lua::{RECORD_SCRIPT, RELEASE_SCRIPT, RESERVE_SCRIPT},
        AdmissionLimits, LedgerKey, RateLimitLedger, Reservation, ReserveOutcome, WindowCounts,
        HOUR_WINDOW, MINUTE_WINDOW,
    },
    error::Error,
};

const DEFAULT_KEY_PREFIX: &str = "ranker:ratelimit";

/// Rate-limit ledger shared by every serving process through Valkey/Redis
///
/// One sorted set per `{prefix}:{origin}:{firm_id}`, expiring one hour after its last write.
pub struct RedisRateLimitLedger {
    pool: Pool,
    /// Key prefix in Redis (allows namespacing for test isolation)
    key_prefix: String,
}

impl RedisRateLimitLedger {
    pub fn new(pool: Pool) -> Self {
        Self::with_key_prefix(pool, DEFAULT_KEY_PREFIX.to_string())
    }

    /// Create a new RedisRateLimitLedger with a custom key prefix (useful for testing)
    pub fn with_key_prefix(pool: Pool, key_prefix: String) -> Self {
        Self { pool, key_prefix }
    }

    fn key(&self, key: &LedgerKey) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    fn pending_member(reservation: &Reservation) -> String {
        format!("p:{:016x}", reservation.id)
    }

    fn recorded_member(reservation: &Reservation) -> String {
        format!("r:{:016x}", reservation.id)
    }
}

#[async_trait]
impl RateLimitLedger for RedisRateLimitLedger {
    async fn reserve(
        &self,
        key: &LedgerKey,
        now: DateTime<Utc>,
        limits: AdmissionLimits,
    ) -> Result<ReserveOutcome, Error> {
        let reservation = Reservation {
            key: key.clone(),
            id: rand::random::<u64>(),
            reserved_at: now,
        };
        let now_ms = now.timestamp_millis();

        let result: Vec<i64> = self
            .pool
            .eval(
                RESERVE_SCRIPT,
                vec![self.key(key)],
                vec![
                    now_ms.to_string(),
                    (now - MINUTE_WINDOW).timestamp_millis().to_string(),
                    (now - HOUR_WINDOW).timestamp_millis().to_string(),
                    limits.per_minute.to_string(),
                    limits.per_hour.to_string(),
                    Self::pending_member(&reservation),
                    HOUR_WINDOW.num_milliseconds().to_string(),
                ],
            )
            .await?;

        let [reserved, last_minute, last_hour] = result[..] else {
            return Err(Error::InternalError(format!(
                "Unexpected reserve script reply: {:?}",
                result
            )));
        };

        if reserved == 1 {
            return Ok(ReserveOutcome::Reserved(reservation));
        }

        Ok(ReserveOutcome::Denied(WindowCounts {
            last_minute: last_minute as u32,
            last_hour: last_hour as u32,
        }))
    }

    async fn record(&self, reservation: &Reservation, now: DateTime<Utc>) -> Result<(), Error> {
        let removed: i64 = self
            .pool
            .eval(
                RECORD_SCRIPT,
                vec![self.key(&reservation.key)],
                vec![
                    Self::pending_member(reservation),
                    Self::recorded_member(reservation),
                    now.timestamp_millis().to_string(),
                    (now - HOUR_WINDOW).timestamp_millis().to_string(),
                    HOUR_WINDOW.num_milliseconds().to_string(),
                ],
            )
            .await?;

        if removed == 0 {
            tracing::warn!(
                key = %reservation.key,
                "Recorded a win whose pending reservation had already expired"
            );
        }

        Ok(())
    }

    async fn release(&self, reservation: &Reservation) -> Result<(), Error> {
        let _: i64 = self
            .pool
            .eval(
                RELEASE_SCRIPT,
                vec![self.key(&reservation.key)],
                vec![Self::pending_member(reservation)],
            )
            .await?;

        Ok(())
    }

    /// Keys expire natively an hour after their last write, so there is nothing to prune
    async fn prune_idle(&self, _now: DateTime<Utc>) -> Result<u64, Error> {
        Ok(0)
    }
}
