//! Inferd gateway - HTTP API for the prediction service.
//!
//! Entry point: loads configuration from the environment, loads the model
//! and the record store once, wires the credential validator, the auth
//! gate, the error normalizer, and the capability groups in that order,
//! then serves.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inferd_auth::{TokenIssuer, TokenValidator};
use inferd_gateway::{create_router, AppState, ServerConfig};
use inferd_inference::LinearModel;
use inferd_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inferd=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting inferd gateway");

    // Load configuration; a missing signing secret aborts here.
    let config = ServerConfig::from_env()?;
    let listen_addr = config.listen_addr();

    tracing::info!(
        listen_addr = %listen_addr,
        max_body_bytes = config.max_body_bytes,
        model_path = ?config.model_path,
        "Configuration loaded"
    );

    // Load the model once; it is read-only for the life of the process.
    let model = match &config.model_path {
        Some(path) => LinearModel::load(path)?,
        None => {
            tracing::warn!("No MODEL_PATH set - using the built-in model");
            LinearModel::builtin()
        }
    };

    let store = Arc::new(MemoryStore::new());
    let validator = Arc::new(TokenValidator::new(&config.auth));
    let issuer = Arc::new(TokenIssuer::new(&config.auth));

    let state = AppState::new(Arc::new(model), store, validator, issuer, config);
    let app = create_router(state);
    tracing::info!("Router configured with all capability groups");

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
