//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variables
//!     → loader.rs (read, parse, apply defaults)
//!     → validation.rs (semantic checks, all errors collected)
//!     → RouterConfig (immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Environment-only: this system has no config file (matches its deployment)
//! - Every input optional with a documented default
//! - Invalid config is fatal at startup, never degraded operation
//! - The loaded config is never mutated after startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{AssetConfig, ListenerConfig, RouterConfig, TimeoutConfig, UpstreamConfig};
pub use validation::{validate_config, ValidationError};
