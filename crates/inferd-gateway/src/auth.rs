//! Authentication middleware and extractor.
//!
//! Routes registered with `AuthPolicy::Required` pass through
//! [`authenticate`] before their handler runs; the handler then receives
//! the resolved credentials through the [`AuthUser`] extractor without
//! re-implementing any check of its own.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use inferd_core::{Credentials, Identity};
use inferd_inference::InferenceService;
use inferd_store::Store;

use crate::error::GateError;
use crate::state::AppState;

/// Message returned when no token accompanies a protected request.
pub const MISSING_AUTHENTICATION: &str = "Missing authentication";

/// Middleware enforcing authentication on a route group.
///
/// The token is taken from the `Authorization: Bearer` header or the
/// `token` cookie. On success the resolved [`Credentials`] are inserted
/// into the request for extractors, and copied onto the response so the
/// error normalizer can see them. On failure the request is rejected
/// with a 401 before the handler runs.
pub async fn authenticate<M, S>(
    State(state): State<Arc<AppState<M, S>>>,
    mut request: Request,
    next: Next,
) -> Response
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    let token = bearer_token(request.headers()).or_else(|| cookie_token(request.headers()));
    let Some(token) = token else {
        return GateError::unauthorized(MISSING_AUTHENTICATION).into_response();
    };

    match state.validator.validate(&token, Utc::now()) {
        Ok(credentials) => {
            request.extensions_mut().insert(credentials.clone());
            let mut response = next.run(request).await;
            // Preserved source behavior: a 401 raised downstream reports
            // whatever credential context was resolved here.
            response.extensions_mut().insert(credentials);
            response
        }
        Err(rejection) => GateError::from(rejection).into_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "token")
        .map(|(_, value)| value.to_string())
}

/// The authenticated caller, extracted from request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity resolved by the credential validator.
    pub user: Identity,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = GateError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Credentials>()
            .cloned()
            .map(|credentials| Self {
                user: credentials.user,
            })
            .ok_or_else(|| GateError::unauthorized(MISSING_AUTHENTICATION))
    }
}
