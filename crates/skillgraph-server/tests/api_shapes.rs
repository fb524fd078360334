//! Response shape tests — the field names the visualization frontend reads.
//!
//! These build results through the library crates and check the serialized
//! JSON, no HTTP server needed.

use skillgraph_analytics::{recommend_skills, similar_jobs, skill_network};
use skillgraph_core::{CategoryTable, JobRecord};
use skillgraph_ingest::GraphIngester;
use skillgraph_store::{GraphService, ProjectionRequest};

fn jobs() -> Vec<JobRecord> {
    vec![
        JobRecord::new("1", &["Python", "SQL", "AWS"])
            .with_role("Data Scientist")
            .with_industry("Tech")
            .with_location("Berlin"),
        JobRecord::new("2", &["Python", "SQL", "Docker"])
            .with_role("ML Engineer")
            .with_industry("Tech")
            .with_location("Remote"),
    ]
}

async fn loaded_graph() -> GraphService {
    let graph = GraphService::in_memory();
    let table = CategoryTable::builtin();
    GraphIngester::new(&graph, &table).reload(&jobs()).await;
    graph
}

/// Projection: { nodes: [{id, name, type, category?, count}], links: [{source, target, relationship, weight}] }
#[tokio::test]
async fn test_projection_shape() {
    let graph = loaded_graph().await;
    let projection = graph.full_projection(&ProjectionRequest::default()).await;
    let json = serde_json::to_value(&projection).unwrap();

    for node in json["nodes"].as_array().unwrap() {
        assert!(node["id"].is_string());
        assert!(node["name"].is_string());
        assert!(node["type"].is_string());
        assert!(node["count"].is_number());
        assert_eq!(node["type"] == "Skill", node["category"].is_string());
    }
    for link in json["links"].as_array().unwrap() {
        assert!(link["source"].is_string());
        assert!(link["target"].is_string());
        assert!(link["relationship"].is_string());
        assert!(link["weight"].is_number());
    }
    let kinds: Vec<&str> = json["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["relationship"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"REQUIRES"));
    assert!(kinds.contains(&"USES"));
    assert!(kinds.contains(&"OFFERS"));
}

/// Skill network: { nodes: [{id, name, category, connections}], links: [{source, target, weight}] }
#[tokio::test]
async fn test_skill_network_shape() {
    let graph = loaded_graph().await;
    let json = serde_json::to_value(skill_network(&graph, 1).await).unwrap();

    let node = &json["nodes"][0];
    assert!(node["id"].is_string());
    assert!(node["category"].is_string());
    assert!(node["connections"].is_number());

    let link = &json["links"][0];
    assert_eq!(link["source"], "Python");
    assert_eq!(link["target"], "SQL");
    assert_eq!(link["weight"], 2);
}

/// Recommendations: [{skill, frequency, relevance, category}]
#[test]
fn test_recommendation_shape() {
    let table = CategoryTable::builtin();
    let report = recommend_skills(&jobs(), &["Python".to_string()], None, &table);
    let json = serde_json::to_value(&report).unwrap();

    let rec = &json["recommendations"][0];
    assert!(rec["skill"].is_string());
    assert!(rec["frequency"].is_number());
    assert!(rec["relevance"].is_f64());
    assert!(rec["category"].is_string());
    assert!(json.get("message").is_none());
}

/// Similar jobs: [{id, title?, similarity, shared_skills, unique_skills}]
#[test]
fn test_similar_job_shape() {
    let all = jobs();
    let json = serde_json::to_value(similar_jobs(&all[0], &all)).unwrap();

    let job = &json[0];
    assert_eq!(job["id"], "2");
    assert!(job["similarity"].is_f64());
    assert!(job["shared_skills"].is_array());
    assert!(job["unique_skills"].is_array());
    assert!(job.get("title").is_none());
}
