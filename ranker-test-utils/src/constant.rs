//! Shared constant values used across tests.
//!
//! These are placeholder values for test setups, not real credentials.

/// Category assigned to firms inserted without an explicit stage.
pub static TEST_STAGE: &str = "bulge bracket";

/// Admin secret tests configure the application with.
pub static TEST_ADMIN_SECRET: &str = "test_admin_secret";

/// Local Redis instance used by tests behind the `redis-test` feature.
pub static TEST_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Rating every fixture firm starts at unless a rating is given.
pub const TEST_DEFAULT_ELO: i32 = 1000;
