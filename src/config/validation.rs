//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntactic)
//! - Check upstream base URLs are absolute http/https origins
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RouterConfig -> Result<(), Vec<ValidationError>>
//! - Runs before the configuration is accepted into the system

use url::Url;

use crate::config::schema::RouterConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub enum ValidationError {
    /// An upstream base URL is not a usable http/https origin.
    InvalidUpstreamUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// The static asset root is empty.
    EmptyAssetRoot,
    /// The request timeout is zero.
    ZeroRequestTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUpstreamUrl { field, value, reason } => {
                write!(f, "{} {:?}: {}", field, value, reason)
            }
            ValidationError::EmptyAssetRoot => write!(f, "static asset root is empty"),
            ValidationError::ZeroRequestTimeout => write!(f, "request timeout must be > 0"),
        }
    }
}

/// Validate the assembled configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_upstream_url("inference upstream", &config.upstreams.inference_url, &mut errors);
    check_upstream_url("rag upstream", &config.upstreams.rag_url, &mut errors);

    if config.assets.root.is_empty() {
        errors.push(ValidationError::EmptyAssetRoot);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason: String| ValidationError::InvalidUpstreamUrl {
        field,
        value: value.to_string(),
        reason,
    };

    match Url::parse(value) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(invalid(format!("unsupported scheme {:?}", url.scheme())));
            } else if url.host_str().is_none() {
                errors.push(invalid("missing host".to_string()));
            }
        }
        Err(e) => errors.push(invalid(format!("{}", e))),
    }
}
