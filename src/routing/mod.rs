//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request target (path + query)
//!     → alias.rs (exact legacy path? → 307, stop)
//!     → rewrite.rs (legacy prefix? → rewrite once)
//!     → router.rs (first matching upstream prefix, or none)
//!     → Return: RoutePlan (redirect, or dispatch target)
//!
//! Table compilation (at startup):
//!     RouterConfig
//!     → Fixed rules + env-provided upstream origins
//!     → Freeze as immutable EdgeRouter
//! ```
//!
//! # Design Decisions
//! - Tables compiled at startup, immutable at runtime
//! - No regex in the hot path (prefix and equality tests only)
//! - Deterministic: same target always yields the same plan
//! - At most one rewrite rule fires per request; aliases short-circuit

pub mod alias;
pub mod matcher;
pub mod rewrite;
pub mod router;

pub use alias::{AliasRedirect, AliasTable};
pub use rewrite::{RewriteRule, Rewriter};
pub use router::{EdgeRouter, RoutePlan, RouteTable, UpstreamRoute};
