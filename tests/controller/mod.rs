//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments, and full flows go through the
//! router with `tower::ServiceExt::oneshot`.

mod admin;
mod leaderboard;
mod matchup;
mod router;

use ranker_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};
