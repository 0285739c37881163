use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        firm::{CategoriesDto, CategoryDto, LeaderboardDto},
    },
    server::{error::Error, model::app::AppState, service::leaderboard::LeaderboardService},
};

pub static LEADERBOARD_TAG: &str = "leaderboard";

#[derive(Deserialize, utoipa::IntoParams)]
pub struct LeaderboardParams {
    /// Restrict the leaderboard to one category
    pub stage: Option<String>,
}

/// Firms ordered by Elo rating
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = LEADERBOARD_TAG,
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked firms", body = LeaderboardDto),
        (status = 503, description = "Entity store unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, Error> {
    let leaderboard = LeaderboardService::new(&state.db)
        .get_leaderboard(params.stage)
        .await?;

    Ok((StatusCode::OK, Json(leaderboard)))
}

/// The active ranker profile and its categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = LEADERBOARD_TAG,
    responses(
        (status = 200, description = "Active profile", body = CategoriesDto)
    ),
)]
pub async fn get_categories(State(state): State<AppState>) -> impl IntoResponse {
    let profile = state.settings.profile;

    let categories = CategoriesDto {
        title: profile.title.to_string(),
        entity_name: profile.entity_name.to_string(),
        entity_name_plural: profile.entity_name_plural.to_string(),
        stages: profile
            .categories
            .iter()
            .map(|c| CategoryDto {
                value: c.value.to_string(),
                label: c.label.to_string(),
            })
            .collect(),
    };

    (StatusCode::OK, Json(categories))
}
