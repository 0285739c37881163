use std::sync::Arc;

use fred::prelude::{ClientLike, Config as RedisConfig, Pool};
use sea_orm::DatabaseConnection;

use crate::server::{
    admission::{
        memory::MemoryRateLimitLedger, redis::RedisRateLimitLedger, AdmissionController,
        RateLimitLedger,
    },
    config::{Backend, Config},
    error::{config::ConfigError, Error},
    model::app::{AppSettings, AppState},
    session::{
        memory::MemorySessionStore, redis::RedisSessionStore, MatchupSessionRegistry,
        SessionStore,
    },
};

const VALKEY_POOL_SIZE: usize = 6;

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis for the shared session store and rate limit ledger
pub async fn connect_to_valkey(valkey_url: &str) -> Result<Pool, Error> {
    let redis_config = RedisConfig::from_url(valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, VALKEY_POOL_SIZE)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(pool)
}

/// Builds the shared application state, connecting to Valkey when a backend needs it
pub async fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let redis_pool = match (config.uses_redis(), config.valkey_url.as_deref()) {
        (true, Some(url)) => Some(connect_to_valkey(url).await?),
        (true, None) => return Err(ConfigError::MissingEnvVar("VALKEY_URL".to_string()).into()),
        (false, _) => None,
    };

    let session_store: Arc<dyn SessionStore> = match (config.session_backend, &redis_pool) {
        (Backend::Redis, Some(pool)) => Arc::new(RedisSessionStore::new(pool.clone())),
        _ => Arc::new(MemorySessionStore::new()),
    };
    let ledger: Arc<dyn RateLimitLedger> = match (config.rate_limit_backend, &redis_pool) {
        (Backend::Redis, Some(pool)) => Arc::new(RedisRateLimitLedger::new(pool.clone())),
        _ => Arc::new(MemoryRateLimitLedger::new()),
    };

    if config.session_backend == Backend::Memory || config.rate_limit_backend == Backend::Memory {
        tracing::warn!(
            session_backend = ?config.session_backend,
            rate_limit_backend = ?config.rate_limit_backend,
            "In-memory session or rate limit store in use, only correct for a single process"
        );
    }

    let session_ttl =
        chrono::Duration::from_std(config.session_ttl).map_err(|e| ConfigError::InvalidEnvValue {
            var: "SESSION_TTL_SECS".to_string(),
            reason: e.to_string(),
        })?;

    let sessions =
        MatchupSessionRegistry::new(session_store, session_ttl, config.session_sweep_probability);
    let admission = AdmissionController::new(ledger, config.limits);

    Ok(AppState {
        db,
        sessions: Arc::new(sessions),
        admission: Arc::new(admission),
        settings: Arc::new(AppSettings::from_config(config)),
    })
}
