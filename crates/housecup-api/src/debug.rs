// Store diagnostics HTTP routes
// Decision: diagnostics always answer 200, failures are reported in the body

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use housecup_storage::Database;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::ErrorResponse;
use crate::services::DiagnosticsService;

/// Row count and point total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStats {
    pub category: Option<String>,
    pub count: i64,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DbReport {
    pub table_exists: bool,
    pub total_records: i64,
    pub by_category: Vec<CategoryStats>,
    /// Location of the SQLite file backing the store
    pub database_file: String,
}

/// Body of GET /api/debug/db: a report, or an error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DebugDbResponse {
    Report(DbReport),
    Error(ErrorResponse),
}

impl DebugDbResponse {
    pub fn error(message: impl Into<String>) -> Self {
        DebugDbResponse::Error(ErrorResponse::new(message))
    }
}

/// App state for diagnostics routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DiagnosticsService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(DiagnosticsService::new(db)),
        }
    }
}

/// Create diagnostics routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/debug/db", get(debug_db))
        .with_state(state)
}

/// GET /api/debug/db - Row counts and per-category totals
#[utoipa::path(
    get,
    path = "/api/debug/db",
    responses(
        (status = 200, description = "Store report, or an error message", body = DebugDbResponse)
    ),
    tag = "debug"
)]
pub async fn debug_db(State(state): State<AppState>) -> Json<DebugDbResponse> {
    match state.service.report().await {
        Ok(report) => Json(report),
        Err(e) => {
            tracing::error!("Failed to build store diagnostics: {}", e);
            Json(DebugDbResponse::error(e.to_string()))
        }
    }
}
