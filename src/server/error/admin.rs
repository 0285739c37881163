use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Errors raised by admin firm management routes
#[derive(Error, Debug, PartialEq)]
pub enum AdminError {
    #[error("Admin secret missing or invalid")]
    Unauthorized,
    #[error("Invalid stage {stage:?}, expected one of {allowed:?}")]
    InvalidStage { stage: String, allowed: Vec<String> },
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Nothing to update, provide website or logoUrl")]
    NothingToUpdate,
    #[error("Firm {0:?} already exists")]
    DuplicateName(String),
    #[error("Firm {0:?} not found")]
    FirmNotFound(String),
    /// The active ranker profile ships without seed data
    #[error("No seed data available for {0}")]
    NoSeedData(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidStage { .. }
            | Self::MissingField(_)
            | Self::NothingToUpdate
            | Self::NoSeedData(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateName(_) => StatusCode::CONFLICT,
            Self::FirmNotFound(_) => StatusCode::NOT_FOUND,
        };

        error_response(status, self.to_string(), false)
    }
}
