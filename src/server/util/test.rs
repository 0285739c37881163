use std::{sync::Arc, time::Duration};

use ranker_test_utils::constant::TEST_ADMIN_SECRET;
use sea_orm::DatabaseConnection;

use crate::server::{
    admission::{memory::MemoryRateLimitLedger, AdmissionController, AdmissionLimits},
    config::{profile::RankerType, DEFAULT_LOGO_URL_TEMPLATE},
    model::app::{AppSettings, AppState},
    service::rating::elo::DEFAULT_K_FACTOR,
    session::{memory::MemorySessionStore, MatchupSessionRegistry},
};

/// Creates an [`AppState`] with in-memory stores, default limits and the `ib` profile
pub fn test_app_state(db: DatabaseConnection) -> AppState {
    test_app_state_with_store_timeout(db, Duration::from_secs(5))
}

/// Same as [`test_app_state`] with a custom bound on rating updates
pub fn test_app_state_with_store_timeout(
    db: DatabaseConnection,
    store_timeout: Duration,
) -> AppState {
    let sessions = MatchupSessionRegistry::new(
        Arc::new(MemorySessionStore::new()),
        chrono::Duration::minutes(10),
        0.0,
    );
    let admission = AdmissionController::new(
        Arc::new(MemoryRateLimitLedger::new()),
        AdmissionLimits::default(),
    );

    AppState {
        db,
        sessions: Arc::new(sessions),
        admission: Arc::new(admission),
        settings: Arc::new(AppSettings {
            profile: RankerType::Ib.profile(),
            k_factor: DEFAULT_K_FACTOR,
            store_timeout,
            admin_secret: TEST_ADMIN_SECRET.to_string(),
            logo_url_template: DEFAULT_LOGO_URL_TEMPLATE.to_string(),
        }),
    }
}
