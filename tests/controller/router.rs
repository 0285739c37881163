use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ranker::{
    model::{
        api::ErrorDto,
        matchup::{DealtPairDto, VoteResultDto},
    },
    server::router::routes,
};
use serde_json::json;
use tower::ServiceExt;

use super::*;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "198.51.100.4")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn deal(router: &Router) -> DealtPairDto {
    let resp = router
        .clone()
        .oneshot(post_json("/api/pair", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    json_body(resp).await
}

/// Expect the fifth vote for the same firm within a minute to be rate limited
#[tokio::test]
async fn fifth_vote_for_same_firm_is_rate_limited() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("Lazard", TEST_STAGE)
        .with_firm("Evercore", TEST_STAGE)
        .build()
        .await?;
    let router = routes().with_state(test.into_app_state());

    for attempt in 1..=5 {
        let pair = deal(&router).await;
        let position = pair
            .pair
            .iter()
            .position(|f| f.name == "Lazard")
            .unwrap();

        let resp = router
            .clone()
            .oneshot(post_json(
                "/api/vote",
                json!({ "token": pair.token, "winner": position }),
            ))
            .await
            .unwrap();

        if attempt < 5 {
            assert_eq!(resp.status(), StatusCode::OK);
            let _: VoteResultDto = json_body(resp).await;
        } else {
            assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
            let error: ErrorDto = json_body(resp).await;
            assert!(error.retryable);
            assert!(error.error.contains("4 votes per minute"));
        }
    }

    Ok(())
}

/// Expect the pair endpoint to accept a request without a body
#[tokio::test]
async fn pair_without_body() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("Lazard", TEST_STAGE)
        .with_firm("Evercore", TEST_STAGE)
        .build()
        .await?;
    let router = routes().with_state(test.into_app_state());

    let request = Request::builder()
        .method("POST")
        .uri("/api/pair")
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect a 404 error body for an unknown token
#[tokio::test]
async fn vote_unknown_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_firm_table().build().await?;
    let router = routes().with_state(test.into_app_state());

    let resp = router
        .oneshot(post_json(
            "/api/vote",
            json!({ "token": "ab".repeat(32), "winner": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: ErrorDto = json_body(resp).await;
    assert!(!error.retryable);

    Ok(())
}
