// House Cup points API
//
// Router assembly lives here so the binary and the integration tests build
// the exact same app.

pub mod common;
pub mod config;
pub mod debug;
pub mod points;
pub mod services;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use housecup_storage::Database;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use config::AppConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ingestion_enabled: bool,
}

/// State for health endpoint
#[derive(Debug, Clone)]
pub struct HealthState {
    pub ingestion_enabled: bool,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ingestion_enabled: state.ingestion_enabled,
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(points::get_points, debug::debug_db),
    components(schemas(
        points::HousePoints,
        debug::DebugDbResponse,
        debug::DbReport,
        debug::CategoryStats,
        common::ErrorResponse,
    )),
    tags(
        (name = "points", description = "Per-house point totals"),
        (name = "debug", description = "Store diagnostics")
    ),
    info(
        title = "House Cup API",
        version = "0.1.0",
        description = "Aggregated house points over relative time windows",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Any origin may call `/api/*`
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Routes mounted under `/api`, with CORS applied
pub fn api_routes(db: Arc<Database>) -> Router {
    Router::new()
        .merge(points::routes(points::AppState::new(db.clone())))
        .merge(debug::routes(debug::AppState::new(db)))
        .layer(cors_layer())
}

/// Build the full application router
pub fn build_app(db: Arc<Database>, health_state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health).with_state(health_state))
        .route("/api-doc/openapi.json", get(openapi_json))
        .nest("/api", api_routes(db))
        .layer(TraceLayer::new_for_http())
}
