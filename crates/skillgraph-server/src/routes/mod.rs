//! HTTP route handlers.

pub mod analytics;
pub mod graph;
pub mod jobs;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(graph::routes())
        .merge(jobs::routes())
        .merge(analytics::routes())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use skillgraph_core::{GraphConfig, JobRecord};
    use skillgraph_store::GraphService;

    use crate::state::AppState;

    pub fn state() -> Arc<AppState> {
        Arc::new(AppState::new(GraphConfig::default(), GraphService::in_memory()))
    }

    /// State with the given jobs cataloged and ingested.
    pub async fn state_with(jobs: &[JobRecord]) -> Arc<AppState> {
        let state = state();
        for job in jobs {
            let job = state.insert_job(job.clone()).unwrap();
            state.ingester().ingest_job(&job).await;
        }
        state
    }
}
