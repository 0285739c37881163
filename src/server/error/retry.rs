use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient store errors)
    Retry,
    /// Failed permanently (bad request, bug)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => {
                match db_err {
                    // Connection acquisition errors - transient, should retry
                    DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                    // Connection errors - transient, should retry
                    DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                    // Query errors, type conversion, record not found/inserted/updated:
                    // data or code issues that won't resolve with retry
                    _ => ErrorRetryStrategy::Fail,
                }
            }

            // Redis errors - transient, connection to Valkey/Redis may recover
            Self::RedisError(_) => ErrorRetryStrategy::Retry,

            // Store timeout - transient, store may be overloaded
            Self::StoreTimeout(_) => ErrorRetryStrategy::Retry,

            // Configuration errors - permanent failures, won't resolve with retry
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,

            // Matchup errors - client errors, repeating the call yields the same answer
            Self::MatchupError(_) => ErrorRetryStrategy::Fail,

            // Admin errors - client errors
            Self::AdminError(_) => ErrorRetryStrategy::Fail,

            // InternalError - permanent failures (bug or broken invariant)
            Self::InternalError(_) => ErrorRetryStrategy::Fail,

            // Serialization errors - permanent failures (corrupt stored data)
            Self::SerdeJsonError(_) => ErrorRetryStrategy::Fail,

            // Socket errors only occur at startup
            Self::IoError(_) => ErrorRetryStrategy::Fail,

            // Job scheduler errors - permanent failures (configuration issue)
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
