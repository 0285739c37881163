//! HTTP controller endpoints for the ranker web API.
//!
//! Axum handlers for dealing pairs, voting, the leaderboard and admin firm management.
//! Controllers extract request data, hand it to the services and map the results to
//! HTTP responses. Every route carries a utoipa annotation for the OpenAPI document.

pub mod admin;
pub mod leaderboard;
pub mod matchup;
pub mod util;
