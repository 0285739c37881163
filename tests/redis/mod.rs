//! Tests for the Valkey/Redis session store and rate limit ledger.
//!
//! Require a server at `redis://127.0.0.1:6379`; run with `--features redis-test`.

mod admission;
mod session;

use ranker_test_utils::{prelude::*, redis::RedisTest};
