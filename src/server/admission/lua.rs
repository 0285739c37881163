//! Lua scripts for RedisRateLimitLedger
//!
//! Each ledger key is a sorted set scored by timestamp in milliseconds. Recorded wins are
//! stored as `r:{id}` members, pending reservations as `p:{id}`.

// Lua script to prune, count and conditionally reserve in one step
// Entries at or before the hour cutoff are dropped first; Redis removes the key once empty.
//
// KEYS[1]: sorted set key (origin + firm)
// ARGV[1]: current timestamp (ms)
// ARGV[2]: minute cutoff (ms), entries with a greater score are in the minute window
// ARGV[3]: hour cutoff (ms), entries with a greater score are in the hour window
// ARGV[4]: minute limit
// ARGV[5]: hour limit
// ARGV[6]: pending member to add
// ARGV[7]: key TTL (ms)
//
// Returns: { reserved (1 or 0), minute count, hour count }
// Counts are taken before the reservation is added.
pub static RESERVE_SCRIPT: &str = r#"
local ledger_key = KEYS[1]
local now = tonumber(ARGV[1])
local minute_cutoff = tonumber(ARGV[2])
local hour_cutoff = tonumber(ARGV[3])
local per_minute = tonumber(ARGV[4])
local per_hour = tonumber(ARGV[5])
local member = ARGV[6]
local ttl_ms = tonumber(ARGV[7])

redis.call('ZREMRANGEBYSCORE', ledger_key, '-inf', hour_cutoff)

local last_hour = redis.call('ZCARD', ledger_key)
local last_minute = redis.call('ZCOUNT', ledger_key, '(' .. minute_cutoff, '+inf')

if last_hour >= per_hour or last_minute >= per_minute then
    return { 0, last_minute, last_hour }
end

redis.call('ZADD', ledger_key, now, member)
redis.call('PEXPIRE', ledger_key, ttl_ms)
return { 1, last_minute, last_hour }
"#;

// Lua script to turn a pending reservation into a recorded win
//
// KEYS[1]: sorted set key (origin + firm)
// ARGV[1]: pending member to remove
// ARGV[2]: recorded member to add
// ARGV[3]: current timestamp (ms)
// ARGV[4]: hour cutoff (ms)
// ARGV[5]: key TTL (ms)
//
// Returns: 1 if the pending member was still present, 0 otherwise
pub static RECORD_SCRIPT: &str = r#"
local ledger_key = KEYS[1]
local pending = ARGV[1]
local recorded = ARGV[2]
local now = tonumber(ARGV[3])
local hour_cutoff = tonumber(ARGV[4])
local ttl_ms = tonumber(ARGV[5])

redis.call('ZREMRANGEBYSCORE', ledger_key, '-inf', hour_cutoff)
local removed = redis.call('ZREM', ledger_key, pending)
redis.call('ZADD', ledger_key, now, recorded)
redis.call('PEXPIRE', ledger_key, ttl_ms)
return removed
"#;

// Lua script to drop a pending reservation
//
// KEYS[1]: sorted set key (origin + firm)
// ARGV[1]: pending member to remove
//
// Returns: number of members removed
pub static RELEASE_SCRIPT: &str = r#"
local ledger_key = KEYS[1]
local pending = ARGV[1]

return redis.call('ZREM', ledger_key, pending)
"#;
