use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::catalog::Selection;
use crate::predict::{Prediction, RunSummary, VisibilityRecord};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisibilityQuery {
    /// Comma-separated catalog numbers; overrides train selection
    pub satellites: Option<String>,
    /// Evaluate every satellite instead of one per launch
    #[serde(default)]
    pub all_satellites: bool,
}

impl VisibilityQuery {
    fn selection(&self, default: &Selection) -> ApiResult<Selection> {
        if let Some(list) = self.satellites.as_deref().filter(|s| !s.trim().is_empty()) {
            let ids = list
                .split(',')
                .map(|s| {
                    let s = s.trim();
                    s.parse::<u32>().map_err(|_| {
                        ApiError::Validation(format!("invalid catalog number '{}'", s))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Selection::Explicit(ids));
        }
        if self.all_satellites {
            return Ok(Selection::All);
        }
        Ok(default.clone())
    }
}

async fn run_prediction(state: AppState, query: &VisibilityQuery) -> ApiResult<Prediction> {
    let selection = query.selection(&state.default_selection)?;
    tokio::task::spawn_blocking(move || state.predict_from_now(&selection))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/visibility",
    tag = "visibility",
    params(VisibilityQuery),
    responses(
        (status = 200, description = "Best visible pass per night", body = Vec<VisibilityRecord>),
        (status = 400, description = "Invalid parameters", body = crate::web::api::error::ErrorResponse)
    )
)]
pub async fn visibility(
    State(state): State<AppState>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<Vec<VisibilityRecord>>> {
    let prediction = run_prediction(state, &query).await?;
    Ok(Json(prediction.report))
}

#[utoipa::path(
    get,
    path = "/api/visibility/summary",
    tag = "visibility",
    params(VisibilityQuery),
    responses(
        (status = 200, description = "Diagnostics of a prediction run", body = RunSummary),
        (status = 400, description = "Invalid parameters", body = crate::web::api::error::ErrorResponse)
    )
)]
pub async fn visibility_summary(
    State(state): State<AppState>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<RunSummary>> {
    let prediction = run_prediction(state, &query).await?;
    Ok(Json(prediction.summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(satellites: Option<&str>, all_satellites: bool) -> VisibilityQuery {
        VisibilityQuery {
            satellites: satellites.map(String::from),
            all_satellites,
        }
    }

    #[test]
    fn explicit_ids_take_precedence() {
        let selection = query(Some("44713, 53544"), true)
            .selection(&Selection::OnePerTrain)
            .unwrap();
        assert_eq!(selection, Selection::Explicit(vec![44713, 53544]));
    }

    #[test]
    fn falls_back_to_configured_selection() {
        assert_eq!(
            query(None, false).selection(&Selection::OnePerTrain).unwrap(),
            Selection::OnePerTrain
        );
        assert_eq!(
            query(Some(" "), false).selection(&Selection::OnePerTrain).unwrap(),
            Selection::OnePerTrain
        );
        assert_eq!(
            query(None, true).selection(&Selection::OnePerTrain).unwrap(),
            Selection::All
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(matches!(
            query(Some("44713,abc"), false).selection(&Selection::OnePerTrain),
            Err(ApiError::Validation(_))
        ));
    }
}
