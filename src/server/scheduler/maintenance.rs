use chrono::{DateTime, Utc};

use crate::server::{error::Error, model::app::AppState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub sessions_swept: u64,
    pub ledger_keys_pruned: u64,
}

/// Sweeps expired sessions and prunes ledger keys with no entries in the hour window
pub async fn run_maintenance(state: &AppState, now: DateTime<Utc>) -> Result<MaintenanceReport, Error> {
    let sessions_swept = state.sessions.sweep_expired(now).await?;
    let ledger_keys_pruned = state.admission.prune_idle(now).await?;

    Ok(MaintenanceReport {
        sessions_swept,
        ledger_keys_pruned,
    })
}
