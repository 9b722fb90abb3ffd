//! Prediction endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use inferd_core::PredictionId;
use inferd_inference::InferenceService;
use inferd_store::{PredictionRecord, Store};

use crate::auth::AuthUser;
use crate::error::GateError;
use crate::state::AppState;

/// Routes for the predict group.
pub fn routes<M, S>() -> Router<Arc<AppState<M, S>>>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    Router::new().route("/predict", post(predict::<M, S>))
}

/// Request body for a prediction.
#[derive(Debug, Deserialize)]
pub struct PredictBody {
    /// Input feature vector for the model.
    pub data: Vec<f64>,
}

/// Response for a stored prediction.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// The stored prediction record.
    pub data: PredictionRecord,
}

/// Run a prediction for the authenticated caller and store the result.
pub async fn predict<M, S>(
    State(state): State<Arc<AppState<M, S>>>,
    AuthUser { user }: AuthUser,
    Json(body): Json<PredictBody>,
) -> Result<impl IntoResponse, GateError>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    if body.data.is_empty() {
        return Err(GateError::input(
            StatusCode::BAD_REQUEST,
            "data must not be empty",
        ));
    }

    // Shape and value errors from the model surface as client input
    // failures through the GateError conversion.
    let prediction = state.inference.predict(&body.data).await?;

    let record = PredictionRecord {
        id: PredictionId::generate(),
        user_id: user.id,
        label: prediction.label,
        score: prediction.score,
        suggestion: prediction.suggestion,
        created_at: Utc::now(),
    };
    state.store.put_prediction(&record)?;

    tracing::debug!(prediction_id = %record.id, label = %record.label, "Prediction stored");

    Ok((
        StatusCode::CREATED,
        Json(PredictResponse {
            status: "success",
            data: record,
        }),
    ))
}
