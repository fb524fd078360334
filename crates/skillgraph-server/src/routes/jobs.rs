//! Job catalog routes. Each accepted job is ingested into the graph.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;
use skillgraph_analytics::related_for_job;
use skillgraph_core::{parse_skill_list, Error, JobRecord};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", post(create_job).get(list_jobs))
        .route("/jobs/{id}", get(get_job))
}

/// Skills arrive either as a list or as one comma-separated field.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsField {
    List(Vec<String>),
    Csv(String),
}

impl Default for SkillsField {
    fn default() -> Self {
        SkillsField::List(Vec::new())
    }
}

impl SkillsField {
    fn into_list(self) -> Vec<String> {
        match self {
            SkillsField::List(items) => items
                .iter()
                .flat_map(|item| parse_skill_list(item))
                .collect(),
            SkillsField::Csv(field) => parse_skill_list(&field),
        }
    }
}

#[derive(Deserialize)]
struct CreateJobRequest {
    id: String,
    title: Option<String>,
    #[serde(default)]
    skills: SkillsField,
    role: Option<String>,
    industry: Option<String>,
    location: Option<String>,
}

impl CreateJobRequest {
    fn into_record(self) -> JobRecord {
        JobRecord {
            id: self.id,
            title: self.title,
            skills: self.skills.into_list(),
            role: self.role,
            industry: self.industry,
            location: self.location,
        }
    }
}

/// POST /api/jobs — catalog a job and ingest it into the graph.
async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateJobRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.insert_job(req.into_record()) {
        Ok(job) => {
            let summary = state.ingester().ingest_job(&job).await;
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "job": job, "ingested": summary })),
            )
        }
        Err(e @ Error::DuplicateJob(_)) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// GET /api/jobs
async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let jobs = state.jobs();
    Json(serde_json::json!({ "total": jobs.len(), "jobs": jobs }))
}

/// GET /api/jobs/{id} — job with related skills for its first skills.
async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.find_job(&id) {
        Some(job) => {
            let related = related_for_job(&state.graph, &job).await;
            (
                StatusCode::OK,
                Json(serde_json::json!({ "job": job, "related_skills": related })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Job not found" })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support;

    fn request(json: serde_json::Value) -> Json<CreateJobRequest> {
        Json(serde_json::from_value(json).unwrap())
    }

    #[tokio::test]
    async fn test_create_job_ingests_into_graph() {
        let state = test_support::state();
        let (status, Json(body)) = create_job(
            State(state.clone()),
            request(serde_json::json!({
                "id": "J1",
                "skills": "Python, SQL, Python",
                "role": "Data Scientist",
                "location": "Berlin",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["job"]["skills"], serde_json::json!(["Python", "SQL", "Python"]));
        assert_eq!(body["ingested"]["co_occurrence_pairs"], 1);
        assert_eq!(state.graph.neighbors("SQL", 5).await[0].name, "Python");
    }

    #[tokio::test]
    async fn test_duplicate_and_invalid_jobs_rejected() {
        let state = test_support::state();
        let body = serde_json::json!({ "id": "J1", "skills": ["Python", "AWS, Docker"] });
        let (status, _) = create_job(State(state.clone()), request(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(state.jobs()[0].skills, vec!["Python", "AWS", "Docker"]);

        let (status, _) = create_job(State(state.clone()), request(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = create_job(State(state.clone()), request(serde_json::json!({ "id": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Rejected submissions never reach the graph.
        assert_eq!(state.graph.neighbors("Python", 10).await.len(), 2);
    }

    #[tokio::test]
    async fn test_get_job_includes_related_skills() {
        let state = test_support::state_with(&[
            JobRecord::new("J1", &["Python", "SQL"]),
            JobRecord::new("J2", &["Python", "AWS"]),
        ])
        .await;

        let (status, Json(body)) = get_job(State(state.clone()), Path("J1".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["related_skills"][0]["skill"], "Python");
        assert_eq!(body["related_skills"][0]["related"].as_array().unwrap().len(), 2);

        let (status, _) = get_job(State(state.clone()), Path("missing".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let Json(list) = list_jobs(State(state)).await;
        assert_eq!(list["total"], 2);
    }
}
