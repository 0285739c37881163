//! Scheduler for periodic store maintenance.
//!
//! A cron job sweeps expired matchup sessions and prunes idle rate limit ledger keys. Both
//! stores also clean up on their own (expiry checks on consume, probabilistic sweeps on deal,
//! native TTLs in Valkey); the job bounds memory use of the in-memory backends.

pub mod maintenance;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::AppState};

use self::maintenance::run_maintenance;

/// Every minute, at second 0
pub const MAINTENANCE_CRON_EXPRESSION: &str = "0 * * * * *";

/// Job scheduler for background maintenance of the session registry and rate limit ledger
pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers the maintenance job and starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn start(self) -> Result<(), Error> {
        let state = self.state.clone();

        self.sched
            .add(Job::new_async(MAINTENANCE_CRON_EXPRESSION, move |_, _| {
                let state = state.clone();

                Box::pin(async move {
                    match run_maintenance(&state, chrono::Utc::now()).await {
                        Ok(report) => tracing::debug!(
                            sessions_swept = report.sessions_swept,
                            ledger_keys_pruned = report.ledger_keys_pruned,
                            "Ran store maintenance"
                        ),
                        Err(e) => tracing::error!("Error running store maintenance: {:?}", e),
                    }
                })
            })?)
            .await?;

        self.sched.start().await?;

        Ok(())
    }
}
