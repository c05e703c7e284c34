use axum::{extract::State, Json};

use crate::catalog::SatelliteInfo;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "catalog",
    responses(
        (status = 200, description = "Loaded satellites in catalog order", body = Vec<SatelliteInfo>)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<Vec<SatelliteInfo>> {
    Json(state.catalog.satellites().iter().map(|s| s.info()).collect())
}
