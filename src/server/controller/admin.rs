use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        firm::{CreateFirmDto, FirmDto, SeedResultDto, UpdateFirmDto},
    },
    server::{
        controller::util::admin::require_admin, error::Error, model::app::AppState,
        service::firm::FirmService,
    },
};

pub static ADMIN_TAG: &str = "admin";

/// Add a firm at the starting rating
///
/// Requires the `X-Admin-Secret` header.
#[utoipa::path(
    post,
    path = "/api/admin/firms",
    tag = ADMIN_TAG,
    request_body = CreateFirmDto,
    params(("X-Admin-Secret" = String, Header, description = "Admin secret")),
    responses(
        (status = 201, description = "Firm created", body = FirmDto),
        (status = 400, description = "Missing field or invalid stage", body = ErrorDto),
        (status = 401, description = "Admin secret missing or invalid", body = ErrorDto),
        (status = 409, description = "A firm with this name exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_firm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateFirmDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&headers, &state.settings)?;

    let firm = FirmService::new(&state.db, &state.settings)
        .create_firm(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(firm)))
}

/// Update a firm's website or logo URL by name
///
/// Requires the `X-Admin-Secret` header.
#[utoipa::path(
    post,
    path = "/api/admin/firms/update",
    tag = ADMIN_TAG,
    request_body = UpdateFirmDto,
    params(("X-Admin-Secret" = String, Header, description = "Admin secret")),
    responses(
        (status = 200, description = "Firm updated", body = FirmDto),
        (status = 400, description = "Nothing to update", body = ErrorDto),
        (status = 401, description = "Admin secret missing or invalid", body = ErrorDto),
        (status = 404, description = "Firm not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_firm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateFirmDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&headers, &state.settings)?;

    let firm = FirmService::new(&state.db, &state.settings)
        .update_firm(payload)
        .await?;

    Ok((StatusCode::OK, Json(firm)))
}

/// Replace all firms with the active profile's seed list
///
/// Ratings and match counts are reset; logo URLs carry over by firm name.
/// Requires the `X-Admin-Secret` header.
#[utoipa::path(
    post,
    path = "/api/admin/seed",
    tag = ADMIN_TAG,
    params(("X-Admin-Secret" = String, Header, description = "Admin secret")),
    responses(
        (status = 200, description = "Firms seeded", body = SeedResultDto),
        (status = 400, description = "No seed data for the active profile", body = ErrorDto),
        (status = 401, description = "Admin secret missing or invalid", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn seed(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    require_admin(&headers, &state.settings)?;

    let result = FirmService::new(&state.db, &state.settings).seed().await?;

    Ok((StatusCode::OK, Json(result)))
}
