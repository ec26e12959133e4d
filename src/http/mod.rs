//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request pipeline)
//!     → statics.rs (file lookup, traversal rejection)
//!     → proxy.rs (forward to matched upstream)
//!     → websocket.rs (duplex relay for protocol upgrades)
//!     → Send to client
//! ```

pub mod proxy;
pub mod server;
pub mod statics;
pub mod websocket;

pub use proxy::{ProxyClient, ProxyError};
pub use server::HttpServer;
