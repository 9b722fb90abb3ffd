//! HTTP gateway for the inferd prediction API.
//!
//! This crate is the request-handling backbone of the service: it
//! authenticates callers, routes them to the capability groups
//! (authentication, predict, history, search), and normalizes every
//! failure into a single client-facing envelope.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Clients                           │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                    inferd-gateway                       │
//! │  ┌──────────────┐ ┌─────────────┐ ┌─────────────────┐  │
//! │  │  Auth gate   │ │   Router    │ │     Error       │  │
//! │  │ (middleware) │ │ + Handlers  │ │   Normalizer    │  │
//! │  └──────────────┘ └─────────────┘ └─────────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!              ┌─────────────┼─────────────┐
//!              ▼             ▼             ▼
//!       ┌───────────┐ ┌───────────┐ ┌───────────┐
//!       │   Auth    │ │ Inference │ │   Store   │
//!       │  (tokens) │ │  (model)  │ │ (records) │
//!       └───────────┘ └───────────┘ └───────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use inferd_auth::{AuthConfig, TokenIssuer, TokenValidator};
//! use inferd_gateway::{create_router, AppState, ServerConfig};
//! use inferd_inference::LinearModel;
//! use inferd_store::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let validator = Arc::new(TokenValidator::new(&config.auth));
//! let issuer = Arc::new(TokenIssuer::new(&config.auth));
//! let state = AppState::new(
//!     Arc::new(LinearModel::builtin()),
//!     Arc::new(MemoryStore::new()),
//!     validator,
//!     issuer,
//!     config,
//! );
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod normalize;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{Failure, GateError};
pub use normalize::{ErrorEnvelope, PAYLOAD_TOO_LARGE_MESSAGE};
pub use routes::{create_router, AuthPolicy};
pub use state::AppState;

// Re-export key types for convenience
pub use auth::AuthUser;
