//! Graph status, maintenance and traversal routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::state::AppState;
use skillgraph_analytics::{related_skills, relationship_graph, skill_network};
use skillgraph_store::{NodeKind, ProjectionRequest, RelKind};

const DEFAULT_PROJECTION_TYPES: &str = "Skill,Role";
const DEFAULT_RANK_LIMIT: usize = 10;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/graph/status", get(get_status))
        .route("/graph/reload", post(reload_graph))
        .route("/graph/clear", post(clear_graph))
        .route("/skill-graph", get(get_skill_graph))
        .route("/relationship-graph", get(get_relationship_graph))
        .route("/related-skills/{skill}", get(get_related_skills))
        .route("/roles/{role}/skills", get(get_role_skills))
        .route("/skills/{skill}/roles", get(get_skill_roles))
}

/// GET /api/graph/status — backend state, graph size and the effective
/// connection settings (never the password).
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.graph.stats().await;
    let config = &state.config;
    Json(serde_json::json!({
        "backend": state.graph.status(),
        "config": {
            "port": config.port,
            "neo4j_uri": config.neo4j.as_ref().map(|n| n.uri.as_str()),
            "connect_timeout_secs": config.connect_timeout.as_secs_f64(),
        },
        "stats": stats,
        "nodes": stats.node_count(),
        "edges": stats.edge_count(),
        "jobs": state.jobs().len(),
    }))
}

/// POST /api/graph/reload — clear the graph and re-ingest every cataloged job.
async fn reload_graph(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let jobs = state.jobs();
    let summary = state.ingester().reload(&jobs).await;
    Json(serde_json::json!({ "status": "reloaded", "summary": summary }))
}

/// POST /api/graph/clear
async fn clear_graph(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.graph.clear_all().await;
    info!("Skill graph cleared");
    Json(serde_json::json!({ "status": "cleared" }))
}

#[derive(Deserialize)]
struct MinWeightQuery {
    min_weight: Option<u64>,
}

/// GET /api/skill-graph — skill co-occurrence network.
async fn get_skill_graph(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MinWeightQuery>,
) -> Json<serde_json::Value> {
    let network = skill_network(&state.graph, q.min_weight.unwrap_or(1)).await;
    Json(serde_json::json!(network))
}

#[derive(Deserialize)]
struct ProjectionQuery {
    types: Option<String>,
    min_weight: Option<u64>,
    limit: Option<usize>,
}

impl ProjectionQuery {
    fn to_request(&self) -> ProjectionRequest {
        let types = self.types.as_deref().unwrap_or(DEFAULT_PROJECTION_TYPES);
        let node_kinds = types
            .split(',')
            .filter(|t| !t.trim().is_empty())
            .filter_map(|t| match t.parse::<NodeKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    warn!("Ignoring projection type: {}", e);
                    None
                }
            })
            .collect();
        let defaults = ProjectionRequest::default();
        ProjectionRequest {
            node_kinds,
            min_weight: self.min_weight.unwrap_or(defaults.min_weight),
            limit_per_kind: self.limit.unwrap_or(defaults.limit_per_kind),
        }
    }
}

/// GET /api/relationship-graph — multi-type projection for visualization.
async fn get_relationship_graph(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ProjectionQuery>,
) -> Json<serde_json::Value> {
    let projection = relationship_graph(&state.graph, &q.to_request()).await;
    Json(serde_json::json!(projection))
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

/// GET /api/related-skills/{skill}
async fn get_related_skills(
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
    Query(q): Query<LimitQuery>,
) -> Json<serde_json::Value> {
    let related = related_skills(&state.graph, &skill, q.limit.unwrap_or(DEFAULT_RANK_LIMIT)).await;
    Json(serde_json::json!({ "skill": skill, "related": related }))
}

/// GET /api/roles/{role}/skills — skills a role requires most.
async fn get_role_skills(
    State(state): State<Arc<AppState>>,
    Path(role): Path<String>,
    Query(q): Query<LimitQuery>,
) -> Json<serde_json::Value> {
    let skills = state
        .graph
        .top_targets(RelKind::Requires, &role, q.limit.unwrap_or(DEFAULT_RANK_LIMIT))
        .await;
    Json(serde_json::json!({ "role": role, "skills": skills }))
}

/// GET /api/skills/{skill}/roles — roles that require a skill most.
async fn get_skill_roles(
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
    Query(q): Query<LimitQuery>,
) -> Json<serde_json::Value> {
    let roles = state
        .graph
        .top_sources(RelKind::Requires, &skill, q.limit.unwrap_or(DEFAULT_RANK_LIMIT))
        .await;
    Json(serde_json::json!({ "skill": skill, "roles": roles }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support;
    use skillgraph_core::JobRecord;

    fn sample_jobs() -> Vec<JobRecord> {
        vec![
            JobRecord::new("J1", &["Python", "SQL"]).with_role("Data Scientist"),
            JobRecord::new("J2", &["Python", "SQL"]).with_role("Data Scientist"),
            JobRecord::new("J3", &["Python", "AWS"]).with_role("ML Engineer"),
        ]
    }

    #[tokio::test]
    async fn test_status_reports_memory_backend() {
        let state = test_support::state_with(&sample_jobs()).await;
        let Json(body) = get_status(State(state)).await;
        assert_eq!(body["backend"]["active"], "in_memory");
        assert_eq!(body["backend"]["degraded"], false);
        assert_eq!(body["stats"]["skills"], 3);
        assert_eq!(body["stats"]["cooccurrences"], 2);
        assert_eq!(body["jobs"], 3);
        assert_eq!(body["config"]["port"], 5050);
        assert!(body["config"]["neo4j_uri"].is_null());
        assert_eq!(body["config"]["connect_timeout_secs"], 5.0);
    }

    #[tokio::test]
    async fn test_related_skills_route() {
        let state = test_support::state_with(&sample_jobs()).await;
        let Json(body) = get_related_skills(
            State(state),
            Path("Python".into()),
            Query(LimitQuery { limit: None }),
        )
        .await;
        assert_eq!(body["related"][0]["name"], "SQL");
        assert_eq!(body["related"][0]["weight"], 2);
        assert_eq!(body["related"][1]["name"], "AWS");
    }

    #[tokio::test]
    async fn test_role_and_skill_rankings() {
        let state = test_support::state_with(&sample_jobs()).await;
        let Json(skills) = get_role_skills(
            State(state.clone()),
            Path("Data Scientist".into()),
            Query(LimitQuery { limit: Some(1) }),
        )
        .await;
        assert_eq!(skills["skills"].as_array().unwrap().len(), 1);
        assert_eq!(skills["skills"][0]["count"], 2);

        let Json(roles) = get_skill_roles(
            State(state),
            Path("Python".into()),
            Query(LimitQuery { limit: None }),
        )
        .await;
        assert_eq!(roles["roles"][0]["name"], "Data Scientist");
        assert_eq!(roles["roles"][1]["name"], "ML Engineer");
    }

    #[tokio::test]
    async fn test_relationship_graph_defaults_and_bad_types() {
        let state = test_support::state_with(&sample_jobs()).await;
        let Json(body) = get_relationship_graph(
            State(state.clone()),
            Query(ProjectionQuery {
                types: None,
                min_weight: None,
                limit: None,
            }),
        )
        .await;
        assert_eq!(body["nodes"].as_array().unwrap().len(), 5);
        assert_eq!(body["nodes"][0]["id"], "role_Data Scientist");
        assert_eq!(body["links"].as_array().unwrap().len(), 4);

        let Json(body) = get_relationship_graph(
            State(state),
            Query(ProjectionQuery {
                types: Some("Planet,Location".into()),
                min_weight: Some(1),
                limit: Some(5),
            }),
        )
        .await;
        assert!(body["nodes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_reload() {
        let state = test_support::state_with(&sample_jobs()).await;
        clear_graph(State(state.clone())).await;
        assert_eq!(state.graph.stats().await.node_count(), 0);

        let Json(body) = reload_graph(State(state.clone())).await;
        assert_eq!(body["summary"]["jobs"], 3);
        assert_eq!(state.graph.neighbors("Python", 10).await[0].weight, 2);

        let Json(network) = get_skill_graph(
            State(state),
            Query(MinWeightQuery { min_weight: Some(2) }),
        )
        .await;
        assert_eq!(network["links"].as_array().unwrap().len(), 1);
        assert_eq!(network["nodes"].as_array().unwrap().len(), 3);
    }
}
