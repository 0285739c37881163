use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{admission::RateLimitDenial, error::error_response};

/// Errors raised while dealing a pair or recording a vote
#[derive(Error, Debug, PartialEq)]
pub enum MatchupError {
    /// Fewer than two firms match the requested category
    #[error("Fewer than two firms available for category {0:?}")]
    InsufficientFirms(Option<String>),
    /// Token was never issued, was already used, or its session expired
    #[error("Matchup session token is invalid, already used, or expired")]
    InvalidOrExpiredSession,
    #[error("Winner position must be 0 or 1, got {0}")]
    InvalidWinnerPosition(u8),
    #[error("Cannot record a vote between firm ID {0} and itself")]
    SameFirm(i32),
    #[error("Firm ID {0} not found")]
    FirmNotFound(i32),
    /// Origin exceeded a vote window for the winning firm
    #[error("{0}")]
    RateLimited(RateLimitDenial),
    /// Every freshly generated token was already taken
    #[error("Failed to store matchup session after {0} token collisions")]
    SessionTokenCollision(u32),
}

/// Converts matchup errors into HTTP responses.
///
/// Client errors are logged at debug level and returned with the reason; the
/// rate limit denial reason is returned verbatim.
///
/// # Returns
/// - 400 Bad Request - Insufficient firms, invalid winner position, same firm
/// - 404 Not Found - Invalid or expired session, firm not found
/// - 429 Too Many Requests - Rate limited (retryable)
/// - 503 Service Unavailable - Token collisions (retryable)
impl IntoResponse for MatchupError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::InsufficientFirms(_) => error_response(
                StatusCode::BAD_REQUEST,
                "Not enough firms available for a matchup",
                false,
            ),
            Self::InvalidOrExpiredSession => error_response(
                StatusCode::NOT_FOUND,
                "This matchup has expired or was already voted on, please load a new pair",
                false,
            ),
            Self::InvalidWinnerPosition(_) => error_response(
                StatusCode::BAD_REQUEST,
                "Invalid winner, expected 0 or 1",
                false,
            ),
            Self::SameFirm(_) => error_response(
                StatusCode::BAD_REQUEST,
                "A firm cannot be matched against itself",
                false,
            ),
            Self::FirmNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "Firm not found", false)
            }
            Self::RateLimited(denial) => {
                error_response(StatusCode::TOO_MANY_REQUESTS, denial.to_string(), true)
            }
            Self::SessionTokenCollision(_) => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to create a matchup, please try again",
                true,
            ),
        }
    }
}
