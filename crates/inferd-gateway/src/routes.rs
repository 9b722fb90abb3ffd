//! Router configuration.
//!
//! Capability groups declare their authentication requirement here, at
//! registration time. `Required` is the default posture; a group must
//! opt out explicitly to be reachable without credentials. The error
//! normalizer is the outermost layer so that every failure, including
//! those produced by the body-size limiter and the framework itself,
//! leaves in the uniform envelope.

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use inferd_inference::InferenceService;
use inferd_store::Store;

use crate::auth::authenticate;
use crate::handlers::{authentication, health, history, predict, search};
use crate::normalize::normalize;
use crate::state::AppState;

/// Authentication requirement for a capability group, resolved when the
/// group is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Requests must carry a valid token; the default.
    Required,
    /// The group is reachable without credentials.
    Public,
}

/// Create the gateway router with all capability groups and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /register` - Register a user
/// - `POST /login` - Obtain a bearer token
///
/// ## Authenticated
/// - `POST /predict` - Run and store a prediction
/// - `GET /predict/histories` - List the caller's predictions
/// - `GET /predictions/search` - Search the caller's predictions
pub fn create_router<M, S>(state: AppState<M, S>) -> Router
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    let max_body_bytes = state.config.max_body_bytes;
    let state = Arc::new(state);

    Router::new()
        .merge(bind(authentication::routes(), AuthPolicy::Public, &state))
        .merge(bind(health::routes(), AuthPolicy::Public, &state))
        .merge(bind(predict::routes(), AuthPolicy::Required, &state))
        .merge(bind(history::routes(), AuthPolicy::Required, &state))
        .merge(bind(search::routes(), AuthPolicy::Required, &state))
        // Middleware; the last layer added is the outermost.
        .layer(TraceLayer::new_for_http())
        .layer(cors_any())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn(normalize))
        .with_state(state)
}

/// Attach the auth gate to a group according to its declared policy.
fn bind<M, S>(
    group: Router<Arc<AppState<M, S>>>,
    policy: AuthPolicy,
    state: &Arc<AppState<M, S>>,
) -> Router<Arc<AppState<M, S>>>
where
    M: InferenceService + 'static,
    S: Store + 'static,
{
    match policy {
        AuthPolicy::Required => group.route_layer(middleware::from_fn_with_state(
            Arc::clone(state),
            authenticate::<M, S>,
        )),
        AuthPolicy::Public => group,
    }
}

/// Any-origin CORS, per the published transport contract.
fn cors_any() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
