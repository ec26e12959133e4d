//! Cross-cutting observability concerns.
//!
//! The router's only mandated observability surface is the per-request
//! log line emitted before routing; everything else (trace layer,
//! request IDs) is plumbing around it.

pub mod logging;
