use fred::prelude::*;

use crate::{constant::TEST_REDIS_URL, TestError};

/// Deletes every key starting with `ARGV[1]`
static DELETE_PREFIX_SCRIPT: &str = r#"
local keys = redis.call('KEYS', ARGV[1] .. '*')
for _, key in ipairs(keys) do
    redis.call('DEL', key)
end
return #keys
"#;

/// Redis test setup with automatic cleanup
///
/// This struct manages a Redis connection pool and a unique key prefix for testing.
/// Every key under the prefix is removed when the struct is dropped.
pub struct RedisTest {
    pub redis_pool: Pool,
    key_prefix: String,
}

impl RedisTest {
    /// Create a new RedisTest instance with a unique key prefix
    pub async fn new() -> Result<Self, TestError> {
        let redis_config = Config::from_url(TEST_REDIS_URL)?;
        let redis_pool = Pool::new(redis_config, None, None, None, 5)?;
        redis_pool.init().await?;

        let key_prefix = Self::generate_unique_key_prefix();

        Ok(RedisTest {
            redis_pool,
            key_prefix,
        })
    }

    /// Get the unique Redis key prefix for this test instance
    ///
    /// This ensures each test uses its own keys to prevent collisions
    /// when tests run in parallel.
    pub fn key_prefix(&self) -> String {
        self.key_prefix.clone()
    }

    /// Generate a unique key prefix using timestamp and thread ID
    fn generate_unique_key_prefix() -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let thread_id = std::thread::current().id();

        let mut hasher = DefaultHasher::new();
        timestamp.hash(&mut hasher);
        thread_id.hash(&mut hasher);
        let hash = hasher.finish();

        format!("test:{}:{:x}:ranker", timestamp, hash)
    }
}

impl Drop for RedisTest {
    fn drop(&mut self) {
        // Spawn instead of blocking to avoid "runtime within runtime" errors
        let pool = self.redis_pool.clone();
        let key_prefix = self.key_prefix.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _: Result<i64, fred::error::Error> = pool
                    .eval(DELETE_PREFIX_SCRIPT, Vec::<String>::new(), vec![key_prefix])
                    .await;
            });
        }
    }
}
