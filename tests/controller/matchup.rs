use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use ranker::{
    model::{
        api::ErrorDto,
        matchup::{DealtPairDto, PairRequestDto, VoteRequestDto, VoteResultDto},
    },
    server::controller::{matchup::deal_pair, matchup::vote, util::origin::OriginKey},
};

use super::*;

fn origin() -> OriginKey {
    OriginKey("203.0.113.9".to_string())
}

/// Expect 200 with a token and two firms
#[tokio::test]
async fn deal_pair_returns_two_firms() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("Lazard", TEST_STAGE)
        .with_firm("Evercore", TEST_STAGE)
        .build()
        .await?;

    let resp = deal_pair(State(test.into_app_state()), None)
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let pair: DealtPairDto = json_body(resp).await;
    assert_eq!(pair.token.len(), 64);
    assert_eq!(pair.pair.len(), 2);
    assert_ne!(pair.pair[0].name, pair.pair[1].name);

    Ok(())
}

/// Expect 400 for a category with fewer than two firms
#[tokio::test]
async fn deal_pair_insufficient_firms() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("Lazard", "elite boutique")
        .with_firm("Goldman Sachs", "bulge bracket")
        .build()
        .await?;

    let payload = PairRequestDto {
        stage: Some("elite boutique".to_string()),
    };
    let resp = deal_pair(State(test.into_app_state()), Some(Json(payload)))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = json_body(resp).await;
    assert!(!error.retryable);

    Ok(())
}

/// Expect the first vote between fresh firms to move them to 1016/984
#[tokio::test]
async fn vote_updates_ratings() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("Lazard", TEST_STAGE)
        .with_firm("Evercore", TEST_STAGE)
        .build()
        .await?;
    let state = test.into_app_state();

    let resp = deal_pair(State(state.clone()), None)
        .await
        .unwrap()
        .into_response();
    let pair: DealtPairDto = json_body(resp).await;

    let payload = VoteRequestDto {
        token: pair.token,
        winner: 0,
    };
    let resp = vote(State(state), origin(), Json(payload))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: VoteResultDto = json_body(resp).await;
    assert_eq!(
        (result.winner.old_elo, result.winner.new_elo),
        (1000, 1016)
    );
    assert_eq!((result.loser.old_elo, result.loser.new_elo), (1000, 984));
    assert_eq!((result.winner.old_rank, result.winner.new_rank), (1, 1));
    assert_eq!((result.loser.old_rank, result.loser.new_rank), (1, 2));
    assert_eq!(result.total, 2);

    Ok(())
}

/// Expect 404 when a token is replayed, with ratings left as after the first vote
#[tokio::test]
async fn vote_replay_is_rejected() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_firm("Lazard", TEST_STAGE)
        .with_firm("Evercore", TEST_STAGE)
        .build()
        .await?;
    let state = test.into_app_state();

    let resp = deal_pair(State(state.clone()), None)
        .await
        .unwrap()
        .into_response();
    let pair: DealtPairDto = json_body(resp).await;

    let payload = VoteRequestDto {
        token: pair.token.clone(),
        winner: 1,
    };
    vote(State(state.clone()), origin(), Json(payload.clone()))
        .await
        .unwrap();
    let resp = vote(State(state), origin(), Json(payload))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let ratings: Vec<i32> = test
        .firm()
        .all_firms()
        .await?
        .into_iter()
        .map(|f| f.elo_score)
        .collect();
    assert_eq!(ratings.iter().sum::<i32>(), 2000);
    assert!(ratings.contains(&1016));

    Ok(())
}

/// Expect 400 for a winner position other than 0 or 1
#[tokio::test]
async fn vote_invalid_position() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("Lazard", TEST_STAGE)
        .with_firm("Evercore", TEST_STAGE)
        .build()
        .await?;
    let state = test.into_app_state();

    let payload = VoteRequestDto {
        token: "0".repeat(64),
        winner: 2,
    };
    let resp = vote(State(state), origin(), Json(payload))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
