//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories, the session registry and the admission controller to
//! implement the deal and vote flows, the Elo rating update, the leaderboard and admin firm
//! management. Idempotent reads go through [`retry::RetryContext`].

pub mod firm;
pub mod leaderboard;
pub mod matchup;
pub mod rating;
pub mod retry;
