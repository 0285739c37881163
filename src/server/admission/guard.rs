use chrono::{DateTime, Utc};

use crate::server::{
    admission::{AdmissionController, LedgerKey, Reservation},
    error::Error,
};

/// Holds an admitted vote's reservation until the vote is recorded or released
///
/// Dropping a guard that still holds its reservation releases it on a background task. This
/// covers a request future cancelled between admission and the outcome of the rating update.
pub struct ReservationGuard {
    controller: AdmissionController,
    key: LedgerKey,
    reservation: Option<Reservation>,
}

impl ReservationGuard {
    pub fn new(controller: AdmissionController, reservation: Reservation) -> Self {
        Self {
            controller,
            key: reservation.key.clone(),
            reservation: Some(reservation),
        }
    }

    pub fn key(&self) -> &LedgerKey {
        &self.key
    }

    /// Records the win and disarms the guard
    ///
    /// On error the guard stays armed and releases the pending slot when dropped.
    pub async fn record(mut self, now: DateTime<Utc>) -> Result<(), Error> {
        if let Some(reservation) = &self.reservation {
            self.controller.record(reservation, now).await?;
        }
        self.reservation = None;

        Ok(())
    }

    /// Releases the reservation and disarms the guard
    pub async fn release(mut self) -> Result<(), Error> {
        if let Some(reservation) = &self.reservation {
            self.controller.release(reservation).await?;
        }
        self.reservation = None;

        Ok(())
    }
}

impl Drop for ReservationGuard {
    fn drop(&mut self) {
        let Some(reservation) = self.reservation.take() else {
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                key = %reservation.key,
                "No runtime to release vote reservation, it expires with the hour window"
            );
            return;
        };

        let controller = self.controller.clone();
        handle.spawn(async move {
            match controller.release(&reservation).await {
                Ok(()) => tracing::debug!(key = %reservation.key, "Released dropped vote reservation"),
                Err(e) => tracing::warn!(
                    key = %reservation.key,
                    "Failed to release dropped vote reservation: {}",
                    e
                ),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration as StdDuration};

    use chrono::Utc;

    use crate::server::admission::{
        guard::ReservationGuard, memory::MemoryRateLimitLedger, Admission, AdmissionController,
        AdmissionLimits,
    };

    fn single_slot_controller() -> AdmissionController {
        AdmissionController::new(
            Arc::new(MemoryRateLimitLedger::new()),
            AdmissionLimits {
                per_minute: 1,
                per_hour: 40,
            },
        )
    }

    async fn reserve(controller: &AdmissionController) -> Option<ReservationGuard> {
        match controller
            .check_and_reserve("10.0.0.1", 1, Utc::now())
            .await
            .unwrap()
        {
            Admission::Allowed(reservation) => Some(controller.guard(reservation)),
            Admission::Denied(_) => None,
        }
    }

    /// Expect dropping an unfinished guard to give the slot back
    #[tokio::test]
    async fn drop_releases_slot() {
        let controller = single_slot_controller();

        let guard = reserve(&controller).await.unwrap();
        assert!(reserve(&controller).await.is_none());

        drop(guard);
        tokio::time::sleep(StdDuration::from_millis(20)).await;

        assert!(reserve(&controller).await.is_some());
    }

    /// Expect a recorded guard to keep the slot charged after it is dropped
    #[tokio::test]
    async fn record_disarms_guard() {
        let controller = single_slot_controller();

        let guard = reserve(&controller).await.unwrap();
        guard.record(Utc::now()).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(20)).await;

        assert!(reserve(&controller).await.is_none());
    }

    /// Expect an explicit release to free the slot immediately
    #[tokio::test]
    async fn release_frees_slot() {
        let controller = single_slot_controller();

        let guard = reserve(&controller).await.unwrap();
        guard.release().await.unwrap();

        assert!(reserve(&controller).await.is_some());
    }
}
