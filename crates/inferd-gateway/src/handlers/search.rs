//! Prediction search endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use inferd_inference::InferenceService;
use inferd_store::{PredictionRecord, Store};

use crate::auth::AuthUser;
use crate::error::GateError;
use crate::state::AppState;

/// Routes for the search group.
pub fn routes<M, S>() -> Router<Arc<AppState<M, S>>>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    Router::new().route("/predictions/search", get(search::<M, S>))
}

/// Query parameters for a prediction search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring match on the predicted label.
    #[serde(default)]
    pub label: Option<String>,
    /// Minimum score, inclusive, in `[0, 1]`.
    #[serde(default)]
    pub min_score: Option<f64>,
}

/// Response for a search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// Matching predictions, newest first.
    pub data: Vec<PredictionRecord>,
}

/// Search the authenticated caller's predictions.
pub async fn search<M, S>(
    State(state): State<Arc<AppState<M, S>>>,
    AuthUser { user }: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, GateError>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    if let Some(min_score) = query.min_score {
        if !(0.0..=1.0).contains(&min_score) {
            return Err(GateError::input(
                StatusCode::BAD_REQUEST,
                "min_score must be between 0 and 1",
            ));
        }
    }

    let needle = query.label.as_deref().map(str::to_lowercase);
    let data = state
        .store
        .predictions_for_user(&user.id)?
        .into_iter()
        .filter(|record| {
            needle
                .as_deref()
                .map_or(true, |needle| record.label.to_lowercase().contains(needle))
        })
        .filter(|record| query.min_score.map_or(true, |min| record.score >= min))
        .collect();

    Ok(Json(SearchResponse {
        status: "success",
        data,
    }))
}
