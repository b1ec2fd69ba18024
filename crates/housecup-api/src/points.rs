// Points aggregation HTTP routes
// Decision: unknown `window` values are served as `all`, never rejected

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use housecup_core::{House, Window};
use housecup_storage::Database;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::ErrorResponse;
use crate::services::PointsService;

/// Point totals for each known house
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HousePoints {
    #[serde(rename = "Gryff")]
    pub gryff: i64,
    #[serde(rename = "Slyth")]
    pub slyth: i64,
    #[serde(rename = "Raven")]
    pub raven: i64,
    #[serde(rename = "Huff")]
    pub huff: i64,
}

impl HousePoints {
    /// Build from per-category sums. Known houses missing from `sums` stay
    /// at 0 and unknown categories are dropped.
    pub fn from_sums(sums: &HashMap<String, i64>) -> Self {
        let mut points = Self::default();
        for house in House::ALL {
            if let Some(total) = sums.get(house.as_str()) {
                *points.slot(house) = *total;
            }
        }
        points
    }

    fn slot(&mut self, house: House) -> &mut i64 {
        match house {
            House::Gryff => &mut self.gryff,
            House::Slyth => &mut self.slyth,
            House::Raven => &mut self.raven,
            House::Huff => &mut self.huff,
        }
    }
}

/// Query parameters for GET /api/points
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PointsQuery {
    /// `all` (default), `5min` or `1hour`; anything else is treated as `all`
    pub window: Option<String>,
}

impl PointsQuery {
    /// Build from raw query pairs. A repeated `window` keeps its first value
    /// and other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let window = pairs
            .into_iter()
            .find(|(key, _)| key == "window")
            .map(|(_, value)| value);

        Self { window }
    }
}

/// App state for points routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PointsService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(PointsService::new(db)),
        }
    }
}

/// Create points routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/points", get(get_points))
        .with_state(state)
}

/// GET /api/points - Per-house totals over a time window
#[utoipa::path(
    get,
    path = "/api/points",
    params(PointsQuery),
    responses(
        (status = 200, description = "Totals for every known house", body = HousePoints),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "points"
)]
pub async fn get_points(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<HousePoints>, (StatusCode, Json<ErrorResponse>)> {
    let query = PointsQuery::from_pairs(pairs);
    let window = Window::parse_lenient(query.window.as_deref());

    let points = state.service.totals(window).await.map_err(|e| {
        tracing::error!(window = %window, "Error in get_points: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    Ok(Json(points))
}
