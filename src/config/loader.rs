//! Configuration loading from the environment.
//!
//! Every variable is optional; unset or empty variables fall back to the
//! defaults baked into the schema. A variable that is set but cannot be
//! parsed is a hard error: the process must refuse to start rather than
//! run partially configured and silently black-hole traffic.

use std::env;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    Parse {
        var: &'static str,
        value: String,
        reason: String,
    },
    /// The assembled configuration failed semantic validation.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse { var, value, reason } => {
                write!(f, "invalid {}={:?}: {}", var, value, reason)
            }
            ConfigError::Validation(errors) => {
                write!(f, "validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from environment variables.
pub fn load_from_env() -> Result<RouterConfig, ConfigError> {
    let mut config = RouterConfig::default();

    if let Some(host) = env_nonempty("HOST") {
        config.listener.host = host;
    }
    if let Some(port) = env_nonempty("PORT") {
        config.listener.port = port.parse().map_err(|e| ConfigError::Parse {
            var: "PORT",
            value: port.clone(),
            reason: format!("{}", e),
        })?;
    }
    if let Some(url) = env_nonempty("VLLM_URL") {
        config.upstreams.inference_url = url;
    }
    if let Some(url) = env_nonempty("RAG_URL") {
        config.upstreams.rag_url = url;
    }
    if let Some(root) = env_nonempty("STATIC_DIR") {
        config.assets.root = root;
    }
    if let Some(secs) = env_nonempty("REQUEST_TIMEOUT_SECS") {
        config.timeouts.request_secs = secs.parse().map_err(|e| ConfigError::Parse {
            var: "REQUEST_TIMEOUT_SECS",
            value: secs.clone(),
            reason: format!("{}", e),
        })?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read an environment variable, treating unset and blank identically.
fn env_nonempty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
