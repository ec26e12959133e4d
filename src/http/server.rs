//! HTTP server setup and the request pipeline.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Dispatch each request through the routing pipeline:
//!   log → alias → rewrite → static store → proxy → 404
//! - Relay protocol upgrades to WebSocket-capable upstreams
//!
//! # Design Decisions
//! - One handler, explicit stage ordering, no middleware chain hiding
//!   the short-circuit semantics
//! - Routing state is immutable and shared via `Arc` (no request-time
//!   mutation, no locks)
//! - Upstream failures answer 502 and never crash the process

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::ws::rejection::WebSocketUpgradeRejection,
    extract::{State, WebSocketUpgrade},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::proxy::{self, ProxyClient};
use crate::http::statics::{self, StaticLookup};
use crate::http::websocket;
use crate::routing::{EdgeRouter, RoutePlan};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
    pub asset_root: Arc<PathBuf>,
    pub client: ProxyClient,
}

/// HTTP server for the edge router.
pub struct HttpServer {
    app: Router,
}

impl HttpServer {
    /// Compile routing tables and build the service.
    pub fn new(config: &RouterConfig) -> Result<Self, url::ParseError> {
        let state = AppState {
            router: Arc::new(EdgeRouter::from_config(config)?),
            asset_root: Arc::new(PathBuf::from(&config.assets.root)),
            client: proxy::build_client(),
        };

        Ok(Self {
            app: Self::build_router(config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(edge_handler))
            .route("/", any(edge_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The single catch-all handler: every request flows through the same
/// ordered pipeline.
async fn edge_handler(
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    request: Request<Body>,
) -> Response {
    let raw_target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();

    // Operational log line: observability only, never affects routing.
    tracing::info!(method = %request.method(), url = %raw_target, "request");

    match state.router.plan(&raw_target) {
        RoutePlan::Redirect { location } => redirect_response(location),
        RoutePlan::Dispatch {
            path_and_query,
            upstream,
        } => {
            let (path, _query) =
                crate::routing::matcher::split_path_query(&path_and_query);

            // Static store first; a miss falls through to the proxy.
            match statics::lookup(&state.asset_root, path).await {
                StaticLookup::Served(response) | StaticLookup::Denied(response) => {
                    return response;
                }
                StaticLookup::Miss => {}
            }

            let Some(route) = upstream else {
                return (StatusCode::NOT_FOUND, "no matching route").into_response();
            };

            if route.supports_websocket {
                if let Ok(upgrade) = ws {
                    let route = route.clone();
                    let headers = request.headers().clone();
                    let target = path_and_query.clone();
                    return upgrade.on_upgrade(move |socket| async move {
                        if let Err(error) =
                            websocket::relay(&route, &target, &headers, socket).await
                        {
                            tracing::error!(
                                route = %route.name,
                                error = %error,
                                "websocket relay failed"
                            );
                        }
                    });
                }
            }

            match proxy::forward(&state.client, route, &path_and_query, request).await {
                Ok(response) => response,
                Err(error) => {
                    tracing::error!(
                        route = %route.name,
                        target = %path_and_query,
                        error = %error,
                        "upstream request failed"
                    );
                    (StatusCode::BAD_GATEWAY, "upstream request failed").into_response()
                }
            }
        }
    }
}

fn redirect_response(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("Shutdown signal received");
}
