use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use ranker::{
    model::firm::{CategoriesDto, LeaderboardDto},
    server::controller::leaderboard::{get_categories, get_leaderboard, LeaderboardParams},
};

use super::*;

/// Expect firms ordered by rating with shared ranks for ties
#[tokio::test]
async fn leaderboard_orders_by_rating() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_rated_firm("Lazard", "elite boutique", 1040)
        .with_rated_firm("Goldman Sachs", "bulge bracket", 1100)
        .with_rated_firm("Evercore", "elite boutique", 1040)
        .build()
        .await?;

    let resp = get_leaderboard(
        State(test.into_app_state()),
        Query(LeaderboardParams { stage: None }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let leaderboard: LeaderboardDto = json_body(resp).await;
    let rows: Vec<(&str, u64)> = leaderboard
        .firms
        .iter()
        .map(|e| (e.firm.name.as_str(), e.rank))
        .collect();
    assert_eq!(
        rows,
        vec![("Goldman Sachs", 1), ("Evercore", 2), ("Lazard", 2)]
    );

    Ok(())
}

/// Expect only firms of the requested category
#[tokio::test]
async fn leaderboard_filters_by_stage() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_rated_firm("Lazard", "elite boutique", 1040)
        .with_rated_firm("Goldman Sachs", "bulge bracket", 1100)
        .build()
        .await?;

    let resp = get_leaderboard(
        State(test.into_app_state()),
        Query(LeaderboardParams {
            stage: Some("elite boutique".to_string()),
        }),
    )
    .await
    .unwrap()
    .into_response();

    let leaderboard: LeaderboardDto = json_body(resp).await;
    assert_eq!(leaderboard.firms.len(), 1);
    assert_eq!(leaderboard.firms[0].firm.name, "Lazard");
    assert_eq!(leaderboard.firms[0].rank, 1);

    Ok(())
}

/// Expect the active profile's title and categories
#[tokio::test]
async fn categories_returns_active_profile() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = get_categories(State(test.into_app_state()))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let categories: CategoriesDto = json_body(resp).await;
    assert!(categories
        .stages
        .iter()
        .any(|c| c.value == "bulge bracket"));

    Ok(())
}
