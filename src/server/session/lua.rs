//! Lua scripts for RedisSessionStore

// Lua script to store a session only if the token is unused
// The key expires natively after the session TTL
//
// KEYS[1]: session key
// ARGV[1]: serialized session
// ARGV[2]: TTL in milliseconds
//
// Returns:
//   1 if the session was stored
//   0 if the token is already taken
pub static INSERT_SESSION_SCRIPT: &str = r#"
local session_key = KEYS[1]
local session = ARGV[1]
local ttl_ms = tonumber(ARGV[2])

if redis.call('EXISTS', session_key) == 1 then
    return 0
end

redis.call('SET', session_key, session, 'PX', ttl_ms)
return 1
"#;

// Lua script to atomically read and delete a session
// Two concurrent takes of the same token can never both see the session
//
// KEYS[1]: session key
//
// Returns: the serialized session, or nil if absent
pub static TAKE_SESSION_SCRIPT: &str = r#"
local session_key = KEYS[1]

local session = redis.call('GET', session_key)
if session then
    redis.call('DEL', session_key)
end
return session
"#;
