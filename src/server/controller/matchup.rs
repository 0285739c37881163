use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        matchup::{DealtPairDto, PairRequestDto, VoteRequestDto, VoteResultDto},
    },
    server::{
        controller::util::origin::OriginKey, error::Error, model::app::AppState,
        service::matchup::MatchupService,
    },
};

pub static MATCHUP_TAG: &str = "matchup";

/// Deal two random firms to compare
///
/// The returned token is valid for a single vote until the session TTL elapses.
#[utoipa::path(
    post,
    path = "/api/pair",
    tag = MATCHUP_TAG,
    request_body(content = PairRequestDto, description = "Optional category filter"),
    responses(
        (status = 200, description = "Pair dealt", body = DealtPairDto),
        (status = 400, description = "Fewer than two firms in the requested category", body = ErrorDto),
        (status = 503, description = "Entity store unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deal_pair(
    State(state): State<AppState>,
    payload: Option<Json<PairRequestDto>>,
) -> Result<impl IntoResponse, Error> {
    let stage = payload.and_then(|Json(payload)| payload.stage);

    let pair = MatchupService::from_state(&state).deal_pair(stage).await?;

    Ok((StatusCode::OK, Json(pair)))
}

/// Vote for the winner of a dealt pair
#[utoipa::path(
    post,
    path = "/api/vote",
    tag = MATCHUP_TAG,
    request_body = VoteRequestDto,
    responses(
        (status = 200, description = "Vote recorded, ratings updated", body = VoteResultDto),
        (status = 400, description = "Invalid winner position or same firm twice", body = ErrorDto),
        (status = 404, description = "Session expired, already used or firm not found", body = ErrorDto),
        (status = 429, description = "Too many votes for this firm", body = ErrorDto),
        (status = 503, description = "Entity store unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn vote(
    State(state): State<AppState>,
    OriginKey(origin): OriginKey,
    Json(payload): Json<VoteRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let result = MatchupService::from_state(&state)
        .submit_vote(&payload.token, payload.winner, &origin)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
