//! Vote admission control.
//!
//! Votes are limited per (origin key, winning firm) with two sliding windows: a minute and
//! an hour. A timestamp `t` counts toward a window of length `w` when `t > now - w`. Only
//! the winning firm is charged; the losing firm is never rate limited.
//!
//! Admission is a two-phase protocol. [`AdmissionController::check_and_reserve`] counts
//! recorded wins plus pending reservations and, when both windows have room, places a
//! pending reservation in the same atomic step. Concurrent votes for the same key therefore
//! cannot both squeeze through the last free slot. After the rating update commits the
//! reservation is [recorded](AdmissionController::record); if the vote fails it is
//! [released](AdmissionController::release) so the failure consumes no budget. A
//! [`guard::ReservationGuard`] releases a reservation whose vote was abandoned mid-flight.

pub mod guard;
mod lua;
pub mod memory;
pub mod redis;

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::server::error::Error;

use self::guard::ReservationGuard;

/// Length of the short window
pub const MINUTE_WINDOW: Duration = Duration::seconds(60);

/// Length of the long window, also the retention of ledger entries
pub const HOUR_WINDOW: Duration = Duration::seconds(3600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdmissionLimits {
    /// Maximum wins per (origin, firm) in the trailing minute
    pub per_minute: u32,
    /// Maximum wins per (origin, firm) in the trailing hour
    pub per_hour: u32,
}

impl Default for AdmissionLimits {
    fn default() -> Self {
        Self {
            per_minute: 4,
            per_hour: 40,
        }
    }
}

/// Ledger key: one bucket per origin per winning firm
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LedgerKey {
    pub origin: String,
    pub firm_id: i32,
}

impl LedgerKey {
    pub fn new(origin: impl Into<String>, firm_id: i32) -> Self {
        Self {
            origin: origin.into(),
            firm_id,
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.firm_id)
    }
}

/// A pending slot held between admission and the outcome of the vote
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub key: LedgerKey,
    /// Identifies the reservation within its key
    pub id: u64,
    pub reserved_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateWindow {
    Minute,
    Hour,
}

/// Why a vote was refused
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitDenial {
    pub window: RateWindow,
    pub limit: u32,
}

impl fmt::Display for RateLimitDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.window {
            RateWindow::Hour => write!(
                f,
                "You have voted for this firm too many times. Limit: {} votes per hour per firm.",
                self.limit
            ),
            RateWindow::Minute => write!(
                f,
                "You are voting for this firm too quickly. Limit: {} votes per minute per firm.",
                self.limit
            ),
        }
    }
}

/// Recorded wins plus pending reservations inside each window, before any new reservation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub last_minute: u32,
    pub last_hour: u32,
}

impl WindowCounts {
    /// Which window, if any, is full; the hour window is checked first
    pub fn exceeded(&self, limits: AdmissionLimits) -> Option<RateLimitDenial> {
        if self.last_hour >= limits.per_hour {
            return Some(RateLimitDenial {
                window: RateWindow::Hour,
                limit: limits.per_hour,
            });
        }

        if self.last_minute >= limits.per_minute {
            return Some(RateLimitDenial {
                window: RateWindow::Minute,
                limit: limits.per_minute,
            });
        }

        None
    }
}

pub enum ReserveOutcome {
    Reserved(Reservation),
    Denied(WindowCounts),
}

pub enum Admission {
    Allowed(Reservation),
    Denied(RateLimitDenial),
}

/// Storage capability for the rate-limit ledger
///
/// Every method prunes entries older than [`HOUR_WINDOW`] for the key it touches and drops
/// keys left empty. `reserve` must count and reserve atomically per key.
#[async_trait]
pub trait RateLimitLedger: Send + Sync {
    /// Reserves a slot for `key` when neither window is full
    async fn reserve(
        &self,
        key: &LedgerKey,
        now: DateTime<Utc>,
        limits: AdmissionLimits,
    ) -> Result<ReserveOutcome, Error>;

    /// Converts a reservation into a recorded win timestamped `now`
    async fn record(&self, reservation: &Reservation, now: DateTime<Utc>) -> Result<(), Error>;

    /// Removes a reservation without recording a win
    async fn release(&self, reservation: &Reservation) -> Result<(), Error>;

    /// Drops keys whose entries have all aged out, returning how many keys were removed
    async fn prune_idle(&self, now: DateTime<Utc>) -> Result<u64, Error>;
}

#[derive(Clone)]
pub struct AdmissionController {
    ledger: Arc<dyn RateLimitLedger>,
    limits: AdmissionLimits,
}

impl AdmissionController {
    pub fn new(ledger: Arc<dyn RateLimitLedger>, limits: AdmissionLimits) -> Self {
        Self { ledger, limits }
    }

    /// Checks both windows for `(origin, winner_id)` and reserves a slot when allowed
    ///
    /// # Arguments
    /// - `origin` - Coarse client identifier, see [`crate::server::controller::util::origin`]
    /// - `winner_id` - Record ID of the winning firm
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(Admission::Allowed(_))` - Reservation placed, must be recorded or released
    /// - `Ok(Admission::Denied(_))` - A window is full, nothing was reserved
    /// - `Err(_)` - Ledger store error
    pub async fn check_and_reserve(
        &self,
        origin: &str,
        winner_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Admission, Error> {
        let key = LedgerKey::new(origin, winner_id);

        match self.ledger.reserve(&key, now, self.limits).await? {
            ReserveOutcome::Reserved(reservation) => Ok(Admission::Allowed(reservation)),
            ReserveOutcome::Denied(counts) => {
                let denial = counts.exceeded(self.limits).ok_or_else(|| {
                    Error::InternalError(format!(
                        "Ledger denied {} with counts {:?} below limits {:?}",
                        key, counts, self.limits
                    ))
                })?;

                tracing::debug!(
                    origin = %key.origin,
                    firm_id = key.firm_id,
                    last_minute = counts.last_minute,
                    last_hour = counts.last_hour,
                    "Vote rate limited"
                );

                Ok(Admission::Denied(denial))
            }
        }
    }

    /// Wraps a reservation in a guard that releases it unless recorded
    pub fn guard(&self, reservation: Reservation) -> ReservationGuard {
        ReservationGuard::new(self.clone(), reservation)
    }

    /// Records a win for a reservation after the rating update committed
    pub async fn record(&self, reservation: &Reservation, now: DateTime<Utc>) -> Result<(), Error> {
        self.ledger.record(reservation, now).await
    }

    /// Gives back a reservation whose vote failed
    pub async fn release(&self, reservation: &Reservation) -> Result<(), Error> {
        self.ledger.release(reservation).await
    }

    /// Drops idle ledger keys
    pub async fn prune_idle(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let removed = self.ledger.prune_idle(now).await?;

        if removed > 0 {
            tracing::debug!(removed, "Pruned idle rate limit keys");
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Utc};

    use super::{
        memory::MemoryRateLimitLedger, Admission, AdmissionController, AdmissionLimits,
        RateLimitDenial, RateWindow, Reservation,
    };

    fn controller(limits: AdmissionLimits) -> AdmissionController {
        AdmissionController::new(Arc::new(MemoryRateLimitLedger::new()), limits)
    }

    async fn admit(
        controller: &AdmissionController,
        origin: &str,
        firm_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Reservation, RateLimitDenial> {
        match controller
            .check_and_reserve(origin, firm_id, now)
            .await
            .unwrap()
        {
            Admission::Allowed(reservation) => Ok(reservation),
            Admission::Denied(denial) => Err(denial),
        }
    }

    /// Admits and records a win at `now`
    async fn vote(controller: &AdmissionController, origin: &str, firm_id: i32, now: DateTime<Utc>) {
        let reservation = admit(controller, origin, firm_id, now).await.unwrap();
        controller.record(&reservation, now).await.unwrap();
    }

    mod check_and_reserve {
        use super::*;

        /// Expect the 5th win within a minute to be denied and allowed again 61s after the 1st
        #[tokio::test]
        async fn enforces_minute_window() {
            let controller = controller(AdmissionLimits::default());
            let start = Utc::now();

            for i in 0..4 {
                vote(&controller, "1.2.3.4", 1, start + Duration::seconds(i)).await;
            }

            let denied = admit(&controller, "1.2.3.4", 1, start + Duration::seconds(10)).await;
            assert_eq!(
                denied,
                Err(RateLimitDenial {
                    window: RateWindow::Minute,
                    limit: 4
                })
            );

            let allowed = admit(&controller, "1.2.3.4", 1, start + Duration::seconds(61)).await;
            assert!(allowed.is_ok());
        }

        /// Expect an entry exactly one window old to fall outside the window
        #[tokio::test]
        async fn window_boundary_is_exclusive() {
            let controller = controller(AdmissionLimits {
                per_minute: 1,
                per_hour: 40,
            });
            let start = Utc::now();
            vote(&controller, "origin", 1, start).await;

            let at_boundary = admit(&controller, "origin", 1, start + Duration::seconds(60)).await;

            assert!(at_boundary.is_ok());
        }

        /// Expect the hour limit to be reported when both windows are full
        #[tokio::test]
        async fn checks_hour_window_first() {
            let controller = controller(AdmissionLimits {
                per_minute: 2,
                per_hour: 2,
            });
            let now = Utc::now();
            vote(&controller, "origin", 1, now).await;
            vote(&controller, "origin", 1, now).await;

            let denied = admit(&controller, "origin", 1, now).await.unwrap_err();

            assert_eq!(denied.window, RateWindow::Hour);
            assert_eq!(
                denied.to_string(),
                "You have voted for this firm too many times. Limit: 2 votes per hour per firm."
            );
        }

        /// Expect the hour limit to hold across minutes
        #[tokio::test]
        async fn enforces_hour_window() {
            let controller = controller(AdmissionLimits::default());
            let start = Utc::now();

            for i in 0..40 {
                vote(&controller, "origin", 1, start + Duration::seconds(i * 60)).await;
            }

            let last = start + Duration::seconds(39 * 60 + 30);
            let denied = admit(&controller, "origin", 1, last).await.unwrap_err();
            assert_eq!(denied.window, RateWindow::Hour);

            let after_first_expires = start + Duration::seconds(3601);
            assert!(admit(&controller, "origin", 1, after_first_expires)
                .await
                .is_ok());
        }

        /// Expect limits to apply per origin and per firm independently
        #[tokio::test]
        async fn isolates_keys() {
            let controller = controller(AdmissionLimits {
                per_minute: 1,
                per_hour: 40,
            });
            let now = Utc::now();
            vote(&controller, "a", 1, now).await;

            assert!(admit(&controller, "a", 1, now).await.is_err());
            assert!(admit(&controller, "a", 2, now).await.is_ok());
            assert!(admit(&controller, "b", 1, now).await.is_ok());
        }

        /// Expect pending reservations to count toward the limit
        #[tokio::test]
        async fn counts_pending_reservations() {
            let controller = controller(AdmissionLimits {
                per_minute: 1,
                per_hour: 40,
            });
            let now = Utc::now();

            let first = admit(&controller, "origin", 1, now).await;
            let second = admit(&controller, "origin", 1, now).await;

            assert!(first.is_ok());
            assert!(second.is_err());
        }
    }

    mod release {
        use super::*;

        /// Expect a released reservation to give its slot back
        #[tokio::test]
        async fn frees_slot() {
            let controller = controller(AdmissionLimits {
                per_minute: 1,
                per_hour: 40,
            });
            let now = Utc::now();

            let reservation = admit(&controller, "origin", 1, now).await.unwrap();
            controller.release(&reservation).await.unwrap();

            assert!(admit(&controller, "origin", 1, now).await.is_ok());
        }
    }

    mod record {
        use super::*;

        /// Expect a recorded win to be timestamped at record time, not reservation time
        #[tokio::test]
        async fn timestamps_at_record_time() {
            let controller = controller(AdmissionLimits {
                per_minute: 1,
                per_hour: 40,
            });
            let start = Utc::now();

            let reservation = admit(&controller, "origin", 1, start).await.unwrap();
            controller
                .record(&reservation, start + Duration::seconds(30))
                .await
                .unwrap();

            // 61s after reservation but only 31s after the recorded win
            let result = admit(&controller, "origin", 1, start + Duration::seconds(61)).await;
            assert!(result.is_err());
        }
    }
}
