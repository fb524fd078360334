//! Analytics routes computed over the job catalog.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;
use skillgraph_analytics::{
    category_similarity, industry_category_profile, industry_top_skills, recommend_skills,
    similar_jobs, skill_frequency,
};
use skillgraph_core::parse_skill_list;

const DEFAULT_FREQUENCY_LIMIT: usize = 20;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/skill-recommender", get(get_recommendations))
        .route("/role-similarity", get(get_role_similarity))
        .route("/skill-frequency", get(get_skill_frequency))
        .route("/industry-skills", get(get_industry_skills))
        .route("/industry-comparison", get(get_industry_comparison))
}

#[derive(Deserialize)]
struct RecommenderQuery {
    skills: Option<String>,
    career_goal: Option<String>,
}

/// GET /api/skill-recommender?skills=Python,SQL&career_goal=...
async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RecommenderQuery>,
) -> Json<serde_json::Value> {
    let current = parse_skill_list(q.skills.as_deref().unwrap_or_default());
    let report = recommend_skills(
        &state.jobs(),
        &current,
        q.career_goal.as_deref(),
        &state.classifier,
    );
    Json(serde_json::json!(report))
}

#[derive(Deserialize)]
struct SimilarityQuery {
    job_id: Option<String>,
}

/// GET /api/role-similarity — similar jobs for `job_id`, or category
/// similarity when no job is given.
async fn get_role_similarity(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SimilarityQuery>,
) -> (StatusCode, Json<serde_json::Value>) {
    let jobs = state.jobs();
    let job_id = q.job_id.as_deref().map(str::trim).filter(|id| !id.is_empty());

    let Some(job_id) = job_id else {
        return (StatusCode::OK, Json(serde_json::json!(category_similarity(&jobs))));
    };

    match jobs.iter().find(|j| j.id == job_id) {
        Some(target) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "target_job": target,
                "similar_jobs": similar_jobs(target, &jobs),
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Job not found" })),
        ),
    }
}

#[derive(Deserialize)]
struct FrequencyQuery {
    industry: Option<String>,
    role: Option<String>,
    limit: Option<usize>,
}

/// GET /api/skill-frequency — chart-ready labels and counts.
async fn get_skill_frequency(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FrequencyQuery>,
) -> Json<serde_json::Value> {
    let ranked = skill_frequency(
        &state.jobs(),
        q.industry.as_deref(),
        q.role.as_deref(),
        q.limit.unwrap_or(DEFAULT_FREQUENCY_LIMIT),
    );
    Json(serde_json::json!({
        "labels": ranked.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        "data": ranked.iter().map(|r| r.count).collect::<Vec<_>>(),
    }))
}

/// GET /api/industry-skills
async fn get_industry_skills(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!(industry_top_skills(&state.jobs())))
}

/// GET /api/industry-comparison — category mix per industry.
async fn get_industry_comparison(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!(industry_category_profile(
        &state.jobs(),
        &state.classifier
    )))
}
