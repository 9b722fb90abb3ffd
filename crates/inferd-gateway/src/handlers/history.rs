//! Prediction history endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use inferd_inference::InferenceService;
use inferd_store::{PredictionRecord, Store};

use crate::auth::AuthUser;
use crate::error::GateError;
use crate::state::AppState;

/// Routes for the history group.
pub fn routes<M, S>() -> Router<Arc<AppState<M, S>>>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    Router::new().route("/predict/histories", get(histories::<M, S>))
}

/// Response for a history listing.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// The caller's predictions, newest first.
    pub data: Vec<PredictionRecord>,
}

/// List the authenticated caller's predictions, newest first.
pub async fn histories<M, S>(
    State(state): State<Arc<AppState<M, S>>>,
    AuthUser { user }: AuthUser,
) -> Result<Json<HistoryResponse>, GateError>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    let data = state.store.predictions_for_user(&user.id)?;
    Ok(Json(HistoryResponse {
        status: "success",
        data,
    }))
}
