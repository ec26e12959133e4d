//! Path matching primitives.
//!
//! # Design Decisions
//! - Prefix matching is case-sensitive and respects segment boundaries:
//!   `/models` covers `/models` and `/models/foo` but never `/modelsX`
//! - No regex, so matching stays O(n) in the path length
//! - The query string never participates in matching

/// Returns true if `prefix` is a segment-boundary prefix of `path`.
///
/// The character after the prefix must be a segment separator (or the
/// path must end there) for the prefix to count.
pub fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Split a request target into its path and optional query string.
pub fn split_path_query(path_and_query: &str) -> (&str, Option<&str>) {
    match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    }
}
