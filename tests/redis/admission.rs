use chrono::{Duration, Utc};
use ranker::server::admission::{
    redis::RedisRateLimitLedger, AdmissionLimits, LedgerKey, RateLimitLedger, ReserveOutcome,
};

use super::*;

fn ledger(redis: &RedisTest) -> RedisRateLimitLedger {
    RedisRateLimitLedger::with_key_prefix(redis.redis_pool.clone(), redis.key_prefix())
}

/// Expect the fifth reservation in a minute to be denied and one past the window allowed
#[tokio::test]
async fn denies_fifth_vote_in_minute() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let ledger = ledger(&redis);
    let key = LedgerKey::new("203.0.113.9", 7);
    let limits = AdmissionLimits::default();
    let start = Utc::now();

    for i in 0..4 {
        let now = start + Duration::seconds(i);
        match ledger.reserve(&key, now, limits).await.unwrap() {
            ReserveOutcome::Reserved(reservation) => {
                ledger.record(&reservation, now).await.unwrap()
            }
            ReserveOutcome::Denied(_) => panic!("vote {} should be admitted", i + 1),
        }
    }

    let fifth = ledger
        .reserve(&key, start + Duration::seconds(10), limits)
        .await
        .unwrap();
    assert!(matches!(fifth, ReserveOutcome::Denied(counts) if counts.last_minute == 4));

    let later = ledger
        .reserve(&key, start + Duration::seconds(61), limits)
        .await
        .unwrap();
    assert!(matches!(later, ReserveOutcome::Reserved(_)));

    Ok(())
}

/// Expect a released reservation to free its slot
#[tokio::test]
async fn release_frees_slot() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let ledger = ledger(&redis);
    let key = LedgerKey::new("203.0.113.9", 7);
    let limits = AdmissionLimits {
        per_minute: 1,
        per_hour: 40,
    };
    let now = Utc::now();

    let ReserveOutcome::Reserved(reservation) = ledger.reserve(&key, now, limits).await.unwrap()
    else {
        panic!("first reservation should be admitted");
    };
    assert!(matches!(
        ledger.reserve(&key, now, limits).await.unwrap(),
        ReserveOutcome::Denied(_)
    ));

    ledger.release(&reservation).await.unwrap();

    assert!(matches!(
        ledger.reserve(&key, now, limits).await.unwrap(),
        ReserveOutcome::Reserved(_)
    ));

    Ok(())
}
