//! SkillGraph — skill relationship graph server.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use skillgraph_core::GraphConfig;
use skillgraph_store::GraphService;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GraphConfig::from_env();
    let port = config.port;

    // Neo4j when configured and reachable, in-memory otherwise
    let graph = GraphService::connect(&config).await;
    info!("Skill graph backend: {:?}", graph.active());

    let state = Arc::new(AppState::new(config, graph));
    let app = routes::build_router(state.clone());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("SkillGraph server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.graph.shutdown();
    info!("SkillGraph server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
