use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::server::{
    admission::AdmissionController,
    config::{profile::RankerProfile, Config},
    session::MatchupSessionRegistry,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sessions: Arc<MatchupSessionRegistry>,
    pub admission: Arc<AdmissionController>,
    pub settings: Arc<AppSettings>,
}

/// Request-time settings derived from [`Config`]
pub struct AppSettings {
    pub profile: &'static RankerProfile,
    pub k_factor: f64,
    /// Upper bound on the store work of a single vote
    pub store_timeout: Duration,
    pub admin_secret: String,
    pub logo_url_template: String,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            profile: config.ranker_type.profile(),
            k_factor: config.elo_k_factor,
            store_timeout: config.store_timeout,
            admin_secret: config.admin_secret.clone(),
            logo_url_template: config.logo_url_template.clone(),
        }
    }
}
