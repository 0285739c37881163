//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered with its utoipa specification and collected into one OpenAPI
//! document, served with Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/pair` - Deal two random firms
/// - `POST /api/vote` - Vote for the winner of a dealt pair
/// - `GET /api/leaderboard` - Firms ranked by rating
/// - `GET /api/categories` - Active ranker profile
/// - `POST /api/admin/firms` - Add a firm
/// - `POST /api/admin/firms/update` - Update a firm's website or logo
/// - `POST /api/admin/seed` - Replace all firms with the seed list
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Ranker", description = "Firm head-to-head ranking API"), tags(
        (name = controller::matchup::MATCHUP_TAG, description = "Deal pairs and vote"),
        (name = controller::leaderboard::LEADERBOARD_TAG, description = "Leaderboard and categories"),
        (name = controller::admin::ADMIN_TAG, description = "Admin firm management"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::matchup::deal_pair))
        .routes(routes!(controller::matchup::vote))
        .routes(routes!(controller::leaderboard::get_leaderboard))
        .routes(routes!(controller::leaderboard::get_categories))
        .routes(routes!(controller::admin::create_firm))
        .routes(routes!(controller::admin::update_firm))
        .routes(routes!(controller::admin::seed))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
