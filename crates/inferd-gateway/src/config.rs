//! Server configuration.
//!
//! Loaded from the environment at startup. The signing secret is the one
//! required input: without it the validator could never soundly accept a
//! token, so its absence aborts the process instead of being handled per
//! request.

use std::path::PathBuf;

use thiserror::Error;

use inferd_auth::{AuthConfig, AuthError};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default maximum request body size in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10_000_000;

/// Errors from loading the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `JWT_SECRET` is not set.
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    /// An environment variable has an unparseable value.
    #[error("invalid {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// The authentication configuration was rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind, default all interfaces.
    pub host: String,
    /// Port to bind, default 8000.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
    /// Path to a model definition file; the built-in model is used when
    /// absent.
    pub model_path: Option<PathBuf>,
    /// Token validation and issuance settings.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    ///
    /// Reads `JWT_SECRET` (required), `HOST`, `PORT`, `MAX_BODY_BYTES`,
    /// and `MODEL_PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or empty, or if a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;
        let auth = AuthConfig::new(secret)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "MAX_BODY_BYTES",
                value,
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        let model_path = lookup("MODEL_PATH").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            max_body_bytes,
            model_path,
            auth,
        })
    }

    /// The address to bind the listener to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn defaults_apply() {
        let config = ServerConfig::from_lookup(vars(&[("JWT_SECRET", "secret")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_body_bytes, 10_000_000);
        assert!(config.model_path.is_none());
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn missing_secret_aborts() {
        let result = ServerConfig::from_lookup(vars(&[]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn empty_secret_aborts() {
        let result = ServerConfig::from_lookup(vars(&[("JWT_SECRET", "")]));
        assert!(matches!(result, Err(ConfigError::Auth(_))));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result =
            ServerConfig::from_lookup(vars(&[("JWT_SECRET", "secret"), ("PORT", "eight")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "PORT", .. })));
    }

    #[test]
    fn overrides_apply() {
        let config = ServerConfig::from_lookup(vars(&[
            ("JWT_SECRET", "secret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("MAX_BODY_BYTES", "1024"),
            ("MODEL_PATH", "/etc/inferd/model.json"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
        assert_eq!(config.max_body_bytes, 1024);
        assert_eq!(
            config.model_path.as_deref(),
            Some(std::path::Path::new("/etc/inferd/model.json"))
        );
    }
}
