//! Edge router for an LLM serving stack.
//!
//! Sits in front of an OpenAI-compatible inference server and a RAG
//! service: rewrites legacy paths into the versioned API namespace,
//! redirects legacy aliases, serves static assets, and proxies the rest
//! (including WebSocket upgrades) to the matching upstream.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
