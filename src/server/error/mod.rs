//! Error types for the ranker server.
//!
//! This module provides the error handling system with specialized error types for each
//! domain (configuration, matchups and votes, admin firm management). All errors implement
//! `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic error definitions.

pub mod admin;
pub mod config;
pub mod matchup;
pub mod retry;

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{admin::AdminError, config::ConfigError, matchup::MatchupError},
};

/// Main error type for the ranker server.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator. The `IntoResponse` implementation
/// maps errors to appropriate HTTP responses for API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Matchup errors (sessions, vote validation, rate limiting)
/// - Admin errors (authorization, firm validation)
/// - Store errors (database, Redis, timeouts)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Matchup or vote error (session, position, rate limit).
    #[error(transparent)]
    MatchupError(#[from] MatchupError),
    /// Admin firm management error.
    #[error(transparent)]
    AdminError(#[from] AdminError),
    /// The entity store did not finish a vote within the configured timeout.
    #[error("Entity store did not respond within {0:?}")]
    StoreTimeout(Duration),
    /// Internal error indicating a bug or a broken invariant in the ranker's code.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] DbErr),
    /// Redis error from the session store or rate limit ledger.
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// JSON (de)serialization error for stored sessions.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    /// Socket error while binding or serving.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Converts application errors into HTTP responses.
///
/// Domain errors carry their own status mapping. Store failures a client can retry
/// (database connection loss, Redis errors, timeouts) become 503 with `retryable: true`;
/// everything else is a 500 with the details logged and hidden from the client.
///
/// # Returns
/// - 400 Bad Request - Validation failures and insufficient firms
/// - 401 Unauthorized - Admin secret missing or wrong
/// - 404 Not Found - Unknown firm, unknown/consumed/expired session
/// - 409 Conflict - Duplicate firm name
/// - 429 Too Many Requests - Vote rate limited
/// - 503 Service Unavailable - Transient store failure
/// - 500 Internal Server Error - All other errors
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::MatchupError(err) => err.into_response(),
            Self::AdminError(err) => err.into_response(),
            err @ (Self::DbErr(DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
            | Self::StoreTimeout(_)
            | Self::RedisError(_)) => StoreUnavailable(err).into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the given status and message.
pub fn error_response(status: StatusCode, error: impl Into<String>, retryable: bool) -> Response {
    (
        status,
        Json(ErrorDto {
            error: error.into(),
            retryable,
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

/// Converts wrapped errors into 500 Internal Server Error responses.
///
/// # Arguments
/// - `E` - Any type that implements `Display` (typically an error type)
///
/// # Returns
/// A 500 Internal Server Error response with a generic error message JSON body
impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            false,
        )
    }
}

/// Wrapper type for transient store failures, returned as 503 Service Unavailable.
pub struct StoreUnavailable<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for StoreUnavailable<E> {
    fn into_response(self) -> Response {
        tracing::error!("Store unavailable: {}", self.0);

        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable, please try again",
            true,
        )
    }
}
