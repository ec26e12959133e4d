//! Edge router entry point.

use tokio::net::TcpListener;

use edge_router::{config, observability, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    // Misconfiguration is fatal: a partially configured router would
    // silently black-hole traffic.
    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.bind_address(),
        inference_url = %config.upstreams.inference_url,
        rag_url = %config.upstreams.rag_url,
        static_root = %config.assets.root,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    let server = HttpServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
