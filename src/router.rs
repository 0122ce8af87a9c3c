//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa annotations,
//! collected into one OpenAPI document served through Swagger UI at
//! `/api/docs`. Relocated character images are served from the media root
//! under `/media`.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

pub fn routes(media_root: &Path) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Tradelist", description = "Tradelist API"), tags(
        (name = controller::characters::CHARACTERS_TAG, description = "Character upload and list routes"),
        (name = controller::trade::TRADE_LIST_TAG, description = "Trade list routes"),
        (name = controller::health::HEALTH_TAG, description = "Health check routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::characters::list_characters))
        .routes(routes!(
            controller::characters::upload_characters,
            controller::characters::upload_view
        ))
        .routes(routes!(
            controller::characters::clear_all_characters,
            controller::characters::clear_all_characters_redirect
        ))
        .routes(routes!(controller::trade::trade_list))
        .routes(routes!(controller::trade::toggle_trade_list))
        .routes(routes!(
            controller::trade::clear_trade_list,
            controller::trade::clear_trade_list_redirect
        ))
        .routes(routes!(controller::health::health_check))
        .split_for_parts();

    let routes = routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .nest_service("/media", ServeDir::new(media_root));

    routes
}
