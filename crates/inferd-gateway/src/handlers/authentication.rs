//! Authentication endpoints: registration and login.
//!
//! Login mints the tokens the credential validator consumes, so the
//! issued payload shape (a `user` claim plus the temporal claims) is the
//! contract between this group and the gate.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inferd_core::Identity;
use inferd_inference::InferenceService;
use inferd_store::{Store, StoreError, UserRecord};

use crate::error::GateError;
use crate::state::AppState;

/// Routes for the authentication group.
pub fn routes<M, S>() -> Router<Arc<AppState<M, S>>>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    Router::new()
        .route("/register", post(register::<M, S>))
        .route("/login", post(login::<M, S>))
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address, used as the login key.
    pub email: String,
    /// Plaintext password; only its digest is stored.
    pub password: String,
}

/// Response for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// The registered identity.
    pub data: Identity,
}

/// Register a new user.
pub async fn register<M, S>(
    State(state): State<Arc<AppState<M, S>>>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, GateError>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    if !body.email.contains('@') {
        return Err(GateError::input(
            StatusCode::BAD_REQUEST,
            "email must be a valid address",
        ));
    }
    if body.password.len() < 8 {
        return Err(GateError::input(
            StatusCode::BAD_REQUEST,
            "password must be at least 8 characters",
        ));
    }

    let mut identity = Identity::new(Uuid::new_v4().to_string(), body.email);
    identity.name = body.name;

    let record = UserRecord::new(identity.clone(), &body.password);
    state.store.put_user(&record).map_err(|err| match err {
        StoreError::Conflict(_) => {
            GateError::input(StatusCode::BAD_REQUEST, "email is already registered")
        }
        other => GateError::from(other),
    })?;

    tracing::info!(user_id = %identity.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success",
            data: identity,
        }),
    ))
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Registered email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// Token and identity.
    pub data: LoginData,
}

/// Payload of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginData {
    /// Bearer token to present on protected routes.
    pub token: String,
    /// The authenticated identity.
    pub user: Identity,
}

/// Authenticate with email and password, issuing a bearer token.
pub async fn login<M, S>(
    State(state): State<Arc<AppState<M, S>>>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, GateError>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    let record = state
        .store
        .user_by_email(&body.email)?
        .filter(|record| record.verify_password(&body.password));

    let Some(record) = record else {
        // One message for both unknown email and wrong password.
        return Err(GateError::unauthorized("invalid email or password"));
    };

    let token = state.issuer.issue(&record.identity, Utc::now())?;

    tracing::info!(user_id = %record.identity.id, "User logged in");

    Ok(Json(LoginResponse {
        status: "success",
        data: LoginData {
            token,
            user: record.identity,
        },
    }))
}
