use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use ranker::{
    model::firm::{CreateFirmDto, FirmDto, SeedResultDto, UpdateFirmDto},
    server::controller::admin::{create_firm, seed, update_firm},
};

use super::*;

fn admin_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-admin-secret", HeaderValue::from_static(TEST_ADMIN_SECRET));
    headers
}

fn create_payload() -> CreateFirmDto {
    CreateFirmDto {
        name: "PJT Partners".to_string(),
        website: "https://www.pjtpartners.com".to_string(),
        stage: "elite boutique".to_string(),
    }
}

/// Expect 201 with the new firm
#[tokio::test]
async fn create_firm_returns_created() -> Result<(), TestError> {
    let test = TestBuilder::new().with_firm_table().build().await?;

    let resp = create_firm(
        State(test.into_app_state()),
        admin_headers(),
        Json(create_payload()),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let firm: FirmDto = json_body(resp).await;
    assert_eq!(firm.name, "PJT Partners");
    assert_eq!(firm.elo_score, 1000);

    Ok(())
}

/// Expect 401 without the admin secret and no firm created
#[tokio::test]
async fn create_firm_requires_secret() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_firm_table().build().await?;

    let resp = create_firm(
        State(test.into_app_state()),
        HeaderMap::new(),
        Json(create_payload()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(test.firm().all_firms().await?.is_empty());

    Ok(())
}

/// Expect 409 for a duplicate name
#[tokio::test]
async fn create_firm_duplicate_conflicts() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("PJT Partners", "elite boutique")
        .build()
        .await?;

    let resp = create_firm(
        State(test.into_app_state()),
        admin_headers(),
        Json(create_payload()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect 404 when updating an unknown firm
#[tokio::test]
async fn update_firm_unknown_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_firm_table().build().await?;

    let payload = UpdateFirmDto {
        name: "PJT Partners".to_string(),
        website: Some("https://pjtpartners.com".to_string()),
        logo_url: None,
    };
    let resp = update_firm(State(test.into_app_state()), admin_headers(), Json(payload))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect logoUrl null to clear the logo
#[tokio::test]
async fn update_firm_clears_logo() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_firm("PJT Partners", "elite boutique")
        .build()
        .await?;
    let state = test.into_app_state();

    let payload = UpdateFirmDto {
        name: "PJT Partners".to_string(),
        website: None,
        logo_url: Some(Some("https://logo/pjt".to_string())),
    };
    update_firm(State(state.clone()), admin_headers(), Json(payload))
        .await
        .unwrap();

    let payload = UpdateFirmDto {
        name: "PJT Partners".to_string(),
        website: None,
        logo_url: Some(None),
    };
    let resp = update_firm(State(state), admin_headers(), Json(payload))
        .await
        .unwrap()
        .into_response();

    let firm: FirmDto = json_body(resp).await;
    assert_eq!(firm.logo_url, None);

    Ok(())
}

/// Expect the seed list inserted at the starting rating
#[tokio::test]
async fn seed_inserts_profile_firms() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_rated_firm("Evercore", "elite boutique", 1200)
        .build()
        .await?;

    let resp = seed(State(test.into_app_state()), admin_headers())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: SeedResultDto = json_body(resp).await;
    let firms = test.firm().all_firms().await?;
    assert_eq!(result.count, firms.len() as u64);
    assert!(firms.iter().all(|f| f.elo_score == 1000 && f.match_count == 0));

    Ok(())
}
