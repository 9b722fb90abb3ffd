//! Gateway application state.
//!
//! The explicit dependency-injection context handed to every handler:
//! constructed once at startup, read-only afterwards, shared across
//! requests without synchronization.

use std::sync::Arc;

use inferd_auth::{TokenIssuer, TokenValidator};
use inferd_inference::InferenceService;
use inferd_store::Store;

use crate::config::ServerConfig;

/// Shared application state for the gateway.
pub struct AppState<M, S>
where
    M: InferenceService,
    S: Store,
{
    /// The inference service behind the predict routes.
    pub inference: Arc<M>,
    /// The record store behind the authentication and history routes.
    pub store: Arc<S>,
    /// The credential validator applied to protected routes.
    pub validator: Arc<TokenValidator>,
    /// The token issuer used by the login route.
    pub issuer: Arc<TokenIssuer>,
    /// Server configuration.
    pub config: ServerConfig,
}

impl<M, S> AppState<M, S>
where
    M: InferenceService,
    S: Store,
{
    /// Create a new application state.
    #[must_use]
    pub fn new(
        inference: Arc<M>,
        store: Arc<S>,
        validator: Arc<TokenValidator>,
        issuer: Arc<TokenIssuer>,
        config: ServerConfig,
    ) -> Self {
        Self {
            inference,
            store,
            validator,
            issuer,
            config,
        }
    }
}

impl<M, S> Clone for AppState<M, S>
where
    M: InferenceService,
    S: Store,
{
    fn clone(&self) -> Self {
        Self {
            inference: Arc::clone(&self.inference),
            store: Arc::clone(&self.store),
            validator: Arc::clone(&self.validator),
            issuer: Arc::clone(&self.issuer),
            config: self.config.clone(),
        }
    }
}
