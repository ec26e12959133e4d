//! Legacy full-path aliases.
//!
//! # Responsibilities
//! - Map a small fixed table of legacy paths to their versioned targets
//! - Short-circuit routing with a 307 redirect on a hit
//!
//! # Design Decisions
//! - Matching is exact string equality on the path component, never a
//!   prefix test, and applies regardless of HTTP method
//! - 307 (not 302/303) so clients reissue the same method and body
//! - Aliases are consulted on the raw, pre-rewrite path; see the route
//!   planner for the ordering rationale

use crate::routing::matcher::split_path_query;

/// An exact-path redirect entry.
#[derive(Debug, Clone)]
pub struct AliasRedirect {
    exact_path: String,
    target_path: String,
}

impl AliasRedirect {
    pub fn new(exact_path: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            exact_path: exact_path.into(),
            target_path: target_path.into(),
        }
    }
}

/// The fixed alias table, immutable after startup.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<AliasRedirect>,
}

impl AliasTable {
    pub fn new(entries: Vec<AliasRedirect>) -> Self {
        Self { entries }
    }

    /// Return the redirect target for a request target, if its path
    /// component exactly matches an alias.
    pub fn target(&self, path_and_query: &str) -> Option<&str> {
        let (path, _query) = split_path_query(path_and_query);
        self.entries
            .iter()
            .find(|entry| entry.exact_path == path)
            .map(|entry| entry.target_path.as_str())
    }
}
