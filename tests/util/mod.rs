//! Helpers for building an [`AppState`] around a test database and reading JSON responses

use std::{sync::Arc, time::Duration};

use axum::{body::Body, http::Response};
use http_body_util::BodyExt;
use ranker::server::{
    admission::{memory::MemoryRateLimitLedger, AdmissionController, AdmissionLimits},
    config::{profile::RankerType, DEFAULT_LOGO_URL_TEMPLATE},
    model::app::{AppSettings, AppState},
    service::rating::elo::DEFAULT_K_FACTOR,
    session::{memory::MemorySessionStore, MatchupSessionRegistry},
};
use ranker_test_utils::{constant::TEST_ADMIN_SECRET, TestContext};
use serde::de::DeserializeOwned;

/// Extension trait for TestContext to create AppState with in-memory stores
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
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
            db: self.db.clone(),
            sessions: Arc::new(sessions),
            admission: Arc::new(admission),
            settings: Arc::new(AppSettings {
                profile: RankerType::Ib.profile(),
                k_factor: DEFAULT_K_FACTOR,
                store_timeout: Duration::from_secs(5),
                admin_secret: TEST_ADMIN_SECRET.to_string(),
                logo_url_template: DEFAULT_LOGO_URL_TEMPLATE.to_string(),
            }),
        }
    }
}

/// Reads and deserializes a JSON response body
pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to deserialize response body")
}
