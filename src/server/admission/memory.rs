use std::{
    collections::{HashMap, VecDeque},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::server::{
    admission::{
        AdmissionLimits, LedgerKey, RateLimitLedger, Reservation, ReserveOutcome, WindowCounts,
        HOUR_WINDOW, MINUTE_WINDOW,
    },
    error::Error,
};

#[derive(Default)]
struct LedgerEntry {
    /// Recorded wins in ascending time order
    recorded: VecDeque<DateTime<Utc>>,
    /// Pending reservations by reservation ID
    pending: HashMap<u64, DateTime<Utc>>,
}

impl LedgerEntry {
    /// Drops everything at or before `now - HOUR_WINDOW`
    fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = now - HOUR_WINDOW;

        while self.recorded.front().is_some_and(|t| *t <= cutoff) {
            self.recorded.pop_front();
        }
        self.pending.retain(|_, t| *t > cutoff);
    }

    fn counts(&self, now: DateTime<Utc>) -> WindowCounts {
        let minute_cutoff = now - MINUTE_WINDOW;
        let in_minute = |t: &DateTime<Utc>| *t > minute_cutoff;

        let last_minute = self.recorded.iter().filter(|t| in_minute(t)).count()
            + self.pending.values().filter(|t| in_minute(t)).count();
        let last_hour = self.recorded.len() + self.pending.len();

        WindowCounts {
            last_minute: last_minute as u32,
            last_hour: last_hour as u32,
        }
    }

    fn is_empty(&self) -> bool {
        self.recorded.is_empty() && self.pending.is_empty()
    }
}

/// Process-local rate-limit ledger
///
/// Only correct for a single serving process; multi-process deployments must use
/// [`super::redis::RedisRateLimitLedger`].
#[derive(Default)]
pub struct MemoryRateLimitLedger {
    entries: Mutex<HashMap<LedgerKey, LedgerEntry>>,
    next_id: AtomicU64,
}

impl MemoryRateLimitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently tracked
    pub async fn key_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl RateLimitLedger for MemoryRateLimitLedger {
    async fn reserve(
        &self,
        key: &LedgerKey,
        now: DateTime<Utc>,
        limits: AdmissionLimits,
    ) -> Result<ReserveOutcome, Error> {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(key.clone()).or_default();

        entry.prune(now);
        let counts = entry.counts(now);

        if counts.exceeded(limits).is_some() {
            if entry.is_empty() {
                entries.remove(key);
            }
            return Ok(ReserveOutcome::Denied(counts));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        entry.pending.insert(id, now);

        Ok(ReserveOutcome::Reserved(Reservation {
            key: key.clone(),
            id,
            reserved_at: now,
        }))
    }

    async fn record(&self, reservation: &Reservation, now: DateTime<Utc>) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(reservation.key.clone()).or_default();

        entry.prune(now);
        entry.pending.remove(&reservation.id);

        // Keep ascending order even if records arrive out of order
        let position = entry.recorded.partition_point(|t| *t <= now);
        entry.recorded.insert(position, now);

        Ok(())
    }

    async fn release(&self, reservation: &Reservation) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get_mut(&reservation.key) {
            entry.pending.remove(&reservation.id);

            if entry.is_empty() {
                entries.remove(&reservation.key);
            }
        }

        Ok(())
    }

    async fn prune_idle(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let mut entries = self.entries.lock().await;

        let before = entries.len();
        entries.retain(|_, entry| {
            entry.prune(now);
            !entry.is_empty()
        });

        Ok((before - entries.len()) as u64)
    }
}
