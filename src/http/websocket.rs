//! WebSocket relay to upstream services.
//!
//! # Responsibilities
//! - Complete the upgrade handshake with the client
//! - Open the matching WebSocket connection to the upstream
//! - Forward frames in both directions for the connection's lifetime
//!
//! # Data Flow
//! ```text
//! Client ←── frames ──→ Router ←── frames ──→ Upstream
//! ```
//!
//! # Design Decisions
//! - Frame-level forwarding, no message buffering
//! - Close frames propagated in both directions
//! - The relay owns both sockets; when either pump finishes, the other
//!   is aborted so the pair is torn down together

use axum::extract::ws::{Message as ClientMessage, WebSocket};
use axum::http::HeaderMap;
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;

use crate::routing::UpstreamRoute;

/// Errors surfaced while establishing or running a relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream websocket handshake failed: {0}")]
    Handshake(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Relay a client WebSocket to the upstream behind `route`.
///
/// Returns once both legs are closed. Client disconnects tear down the
/// upstream connection promptly, and vice versa.
pub async fn relay(
    route: &UpstreamRoute,
    path_and_query: &str,
    headers: &HeaderMap,
    client_socket: WebSocket,
) -> Result<(), RelayError> {
    let mut request = route.websocket_url(path_and_query).into_client_request()?;

    // The subprotocol negotiation and credentials travel with the
    // upstream handshake; everything else is a fresh client handshake.
    for name in ["sec-websocket-protocol", "cookie", "authorization", "user-agent"] {
        if let Some(value) = headers.get(name) {
            request.headers_mut().insert(name, value.clone());
        }
    }

    let (upstream, _response) = tokio_tungstenite::connect_async(request).await?;

    tracing::debug!(
        route = %route.name,
        target = %path_and_query,
        "websocket relay established"
    );

    let (mut upstream_sink, mut upstream_stream) = upstream.split();
    let (mut client_sink, mut client_stream) = client_socket.split();

    let mut client_to_upstream = tokio::spawn(async move {
        while let Some(message) = client_stream.next().await {
            let forward = match message {
                Ok(ClientMessage::Text(text)) => UpstreamMessage::Text(text.as_str().into()),
                Ok(ClientMessage::Binary(data)) => UpstreamMessage::Binary(data),
                Ok(ClientMessage::Ping(data)) => UpstreamMessage::Ping(data),
                Ok(ClientMessage::Pong(data)) => UpstreamMessage::Pong(data),
                Ok(ClientMessage::Close(_)) => {
                    let _ = upstream_sink.send(UpstreamMessage::Close(None)).await;
                    break;
                }
                Err(_) => break,
            };
            if upstream_sink.send(forward).await.is_err() {
                break;
            }
        }
    });

    let mut upstream_to_client = tokio::spawn(async move {
        while let Some(message) = upstream_stream.next().await {
            let forward = match message {
                Ok(UpstreamMessage::Text(text)) => ClientMessage::Text(text.as_str().into()),
                Ok(UpstreamMessage::Binary(data)) => ClientMessage::Binary(data),
                Ok(UpstreamMessage::Ping(data)) => ClientMessage::Ping(data),
                Ok(UpstreamMessage::Pong(data)) => ClientMessage::Pong(data),
                Ok(UpstreamMessage::Close(_)) => {
                    let _ = client_sink.send(ClientMessage::Close(None)).await;
                    break;
                }
                Ok(UpstreamMessage::Frame(_)) => continue,
                Err(_) => break,
            };
            if client_sink.send(forward).await.is_err() {
                break;
            }
        }
    });

    // Either side finishing ends the relay; the surviving pump is
    // aborted so both sockets drop together.
    tokio::select! {
        _ = &mut client_to_upstream => upstream_to_client.abort(),
        _ = &mut upstream_to_client => client_to_upstream.abort(),
    }

    Ok(())
}
