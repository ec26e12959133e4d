//! Upstream HTTP forwarding.
//!
//! # Responsibilities
//! - Rebuild the request URI against the matched upstream origin
//! - Rewrite the `Host` header (origin-changing proxy)
//! - Stream the request body up and the response body back unmodified
//!
//! # Design Decisions
//! - One shared pooled client, built once at startup
//! - No automatic retries: a failed upstream call surfaces as a gateway
//!   error and the caller decides what to do
//! - All non-`Host` headers pass through untouched in both directions

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, Uri, Version},
    response::Response,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::routing::UpstreamRoute;

/// Pooled client shared by every forwarded request.
pub type ProxyClient = Client<HttpConnector, Body>;

/// Build the shared upstream client.
pub fn build_client() -> ProxyClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Errors surfaced while forwarding a request upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid upstream target: {0}")]
    Target(#[from] axum::http::Error),

    #[error("invalid upstream host header: {0}")]
    HostHeader(#[from] axum::http::header::InvalidHeaderValue),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Forward a request to the matched upstream, preserving the full
/// (rewritten) path and query.
///
/// The response is returned with its body still streaming; backpressure
/// between client and upstream is the transport's.
pub async fn forward(
    client: &ProxyClient,
    route: &UpstreamRoute,
    path_and_query: &str,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let (mut parts, body) = request.into_parts();

    let authority = route.authority();
    parts.uri = Uri::builder()
        .scheme(route.scheme())
        .authority(authority.as_str())
        .path_and_query(path_and_query)
        .build()?;
    parts
        .headers
        .insert(header::HOST, HeaderValue::from_str(&authority)?);
    // The pooled connector speaks HTTP/1.1 to upstreams regardless of
    // what the client negotiated with us.
    parts.version = Version::HTTP_11;

    let response = client.request(Request::from_parts(parts, body)).await?;

    let (parts, body) = response.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}
