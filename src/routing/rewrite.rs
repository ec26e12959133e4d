//! Legacy path prefix rewriting.
//!
//! # Responsibilities
//! - Rewrite legacy path prefixes into the versioned API namespace
//! - Preserve the remainder of the path and the query string verbatim
//!
//! # Design Decisions
//! - Rules are evaluated in declaration order; the first match wins and
//!   no further rule is tried (no chaining)
//! - Matching is done on the path component only, so `/models?x=1`
//!   rewrites even though `?` is not a segment separator
//! - A path matching no rule passes through unchanged; there is no
//!   error condition

use crate::routing::matcher::{path_has_prefix, split_path_query};

/// A single prefix substitution rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    match_prefix: String,
    replacement_prefix: String,
}

impl RewriteRule {
    pub fn new(match_prefix: impl Into<String>, replacement_prefix: impl Into<String>) -> Self {
        Self {
            match_prefix: match_prefix.into(),
            replacement_prefix: replacement_prefix.into(),
        }
    }

    /// Apply this rule to a path, returning the rewritten path if the
    /// prefix matched at a segment boundary.
    fn apply(&self, path: &str) -> Option<String> {
        if path_has_prefix(path, &self.match_prefix) {
            let rest = &path[self.match_prefix.len()..];
            Some(format!("{}{}", self.replacement_prefix, rest))
        } else {
            None
        }
    }
}

/// An ordered rule set, applied once per request before any routing.
#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
}

impl Rewriter {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Rewrite a request target (path plus optional query string).
    ///
    /// At most one rule fires; the query string is copied through
    /// untouched either way.
    pub fn rewrite(&self, path_and_query: &str) -> String {
        let (path, query) = split_path_query(path_and_query);

        for rule in &self.rules {
            if let Some(rewritten) = rule.apply(path) {
                return match query {
                    Some(q) => format!("{}?{}", rewritten, q),
                    None => rewritten,
                };
            }
        }

        path_and_query.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> Rewriter {
        Rewriter::new(vec![
            RewriteRule::new("/models", "/v1/models"),
            RewriteRule::new("/chat", "/v1/chat"),
        ])
    }

    #[test]
    fn rewrites_exact_prefix() {
        assert_eq!(rewriter().rewrite("/models"), "/v1/models");
        assert_eq!(rewriter().rewrite("/chat"), "/v1/chat");
    }

    #[test]
    fn rewrites_subpath_and_preserves_query() {
        assert_eq!(rewriter().rewrite("/models/foo?x=1"), "/v1/models/foo?x=1");
        assert_eq!(rewriter().rewrite("/chat/completions"), "/v1/chat/completions");
    }

    #[test]
    fn query_on_bare_prefix_still_matches() {
        assert_eq!(rewriter().rewrite("/models?x=1"), "/v1/models?x=1");
    }

    #[test]
    fn non_boundary_prefix_passes_through() {
        assert_eq!(rewriter().rewrite("/modelsX"), "/modelsX");
        assert_eq!(rewriter().rewrite("/chatter"), "/chatter");
    }

    #[test]
    fn unmatched_paths_pass_through() {
        assert_eq!(rewriter().rewrite("/"), "/");
        assert_eq!(rewriter().rewrite("/rag/query?q=hi"), "/rag/query?q=hi");
        assert_eq!(rewriter().rewrite("/v1/models"), "/v1/models");
    }

    #[test]
    fn first_matching_rule_wins() {
        let overlapping = Rewriter::new(vec![
            RewriteRule::new("/models", "/first"),
            RewriteRule::new("/models", "/second"),
        ]);
        assert_eq!(overlapping.rewrite("/models/x"), "/first/x");
    }
}
