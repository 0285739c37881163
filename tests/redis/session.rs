use chrono::{Duration, Utc};
use ranker::server::{
    model::session::MatchupSession,
    session::{redis::RedisSessionStore, SessionStore},
};

use super::*;

fn store(redis: &RedisTest) -> RedisSessionStore {
    RedisSessionStore::with_key_prefix(redis.redis_pool.clone(), redis.key_prefix())
}

/// Expect a stored session to be taken exactly once
#[tokio::test]
async fn take_is_single_use() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let store = store(&redis);
    let session = MatchupSession::new(1, 2, None, Utc::now());

    assert!(store
        .insert("token", &session, Duration::minutes(10))
        .await
        .unwrap());

    assert_eq!(store.take("token").await.unwrap(), Some(session));
    assert_eq!(store.take("token").await.unwrap(), None);

    Ok(())
}

/// Expect insert to refuse an existing token
#[tokio::test]
async fn insert_refuses_existing_token() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let store = store(&redis);
    let first = MatchupSession::new(1, 2, None, Utc::now());
    let second = MatchupSession::new(3, 4, None, Utc::now());

    assert!(store
        .insert("token", &first, Duration::minutes(10))
        .await
        .unwrap());
    assert!(!store
        .insert("token", &second, Duration::minutes(10))
        .await
        .unwrap());

    assert_eq!(store.take("token").await.unwrap(), Some(first));

    Ok(())
}

/// Expect the key to expire with the session TTL
#[tokio::test]
async fn session_expires_with_ttl() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let store = store(&redis);
    let session = MatchupSession::new(1, 2, None, Utc::now());

    store
        .insert("token", &session, Duration::milliseconds(50))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;

    assert_eq!(store.take("token").await.unwrap(), None);

    Ok(())
}
