//! Static asset serving.
//!
//! # Responsibilities
//! - Map a rewritten request path to a file under the configured root
//! - Reject traversal attempts before any filesystem access
//! - Fall through on a miss so proxy dispatch can still claim the path
//!
//! # Design Decisions
//! - A miss is not an error: the static store is a lookup stage, not a
//!   terminal handler
//! - Directory-style paths resolve to `index.html`
//! - Content type is inferred from the extension; unknown extensions are
//!   served as `application/octet-stream`

use std::path::Path;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Outcome of a static store lookup.
pub enum StaticLookup {
    /// A file existed; the response carries its contents.
    Served(Response),
    /// The path was rejected before touching the filesystem.
    Denied(Response),
    /// No file; the caller continues to proxy dispatch.
    Miss,
}

/// Try to serve `path` (no query string) from the asset root.
pub async fn lookup(root: &Path, path: &str) -> StaticLookup {
    // Traversal check runs on the raw path, before any join.
    if path.split('/').any(|segment| segment == "..") {
        tracing::warn!(path = %path, "blocked static path traversal attempt");
        return StaticLookup::Denied(
            (StatusCode::BAD_REQUEST, "invalid path").into_response(),
        );
    }

    let relative = path.trim_start_matches('/');
    let mut file = root.join(relative);
    if relative.is_empty() || path.ends_with('/') {
        file = file.join("index.html");
    }

    match tokio::fs::read(&file).await {
        Ok(contents) => {
            let response = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type_for(&file))
                .body(Body::from(contents))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
            StaticLookup::Served(response)
        }
        Err(_) => StaticLookup::Miss,
    }
}

fn content_type_for(file: &Path) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("edge-router-statics-{}", name));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[tokio::test]
    async fn serves_existing_file_with_content_type() {
        let root = scratch_root("serve");
        std::fs::write(root.join("app.js"), "console.log(1);").unwrap();

        match lookup(&root, "/app.js").await {
            StaticLookup::Served(response) => {
                assert_eq!(response.status(), StatusCode::OK);
                assert_eq!(
                    response.headers()[header::CONTENT_TYPE],
                    "application/javascript"
                );
            }
            _ => panic!("expected file to be served"),
        }
    }

    #[tokio::test]
    async fn root_path_serves_index_document() {
        let root = scratch_root("index");
        std::fs::write(root.join("index.html"), "<html></html>").unwrap();

        match lookup(&root, "/").await {
            StaticLookup::Served(response) => {
                assert_eq!(
                    response.headers()[header::CONTENT_TYPE],
                    "text/html; charset=utf-8"
                );
            }
            _ => panic!("expected index.html to be served"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_a_miss() {
        let root = scratch_root("miss");
        assert!(matches!(lookup(&root, "/nope.css").await, StaticLookup::Miss));
    }

    #[tokio::test]
    async fn traversal_is_denied_not_missed() {
        let root = scratch_root("traversal");
        match lookup(&root, "/../outside.txt").await {
            StaticLookup::Denied(response) => {
                assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            }
            _ => panic!("expected traversal to be denied"),
        }
    }

    #[tokio::test]
    async fn embedded_traversal_is_denied() {
        let root = scratch_root("embedded");
        assert!(matches!(
            lookup(&root, "/assets/../../etc/passwd").await,
            StaticLookup::Denied(_)
        ));
    }
}
