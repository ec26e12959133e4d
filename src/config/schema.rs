//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry defaults matching the
//! documented environment variables, so a router started with no
//! environment at all is fully configured.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream service base URLs.
    pub upstreams: UpstreamConfig,

    /// Static asset configuration.
    pub assets: AssetConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

impl RouterConfig {
    /// The address the listener binds to, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (env `HOST`).
    pub host: String,

    /// Port to listen on (env `PORT`).
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5173,
        }
    }
}

/// Base URLs of the two upstream services.
///
/// Both are origin-only URLs; request paths are appended verbatim
/// (no prefix stripping).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Inference server exposing the OpenAI-compatible API (env `VLLM_URL`).
    pub inference_url: String,

    /// RAG service (env `RAG_URL`).
    pub rag_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            inference_url: "http://vllm:8000".to_string(),
            rag_url: "http://rag-api:7000".to_string(),
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory served for paths that resolve to existing files
    /// (env `STATIC_DIR`).
    pub root: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: "./public".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds (env `REQUEST_TIMEOUT_SECS`).
    ///
    /// Generous by default: chat completions can stream for minutes.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 300 }
    }
}
