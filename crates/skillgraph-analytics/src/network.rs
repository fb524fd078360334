//! Graph views for visualization.

use serde::Serialize;

use skillgraph_core::DEFAULT_CATEGORY;
use skillgraph_store::{CoOccurrence, GraphService, Projection, ProjectionRequest};

/// A skill in the co-occurrence network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub category: String,
    pub connections: u64,
}

/// Skill nodes and the co-occurrence links between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillNetwork {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<CoOccurrence>,
}

pub async fn skill_network(graph: &GraphService, min_weight: u64) -> SkillNetwork {
    let nodes = graph
        .skill_nodes()
        .await
        .into_iter()
        .map(|node| NetworkNode {
            id: node.name.clone(),
            name: node.name,
            category: node
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            connections: node.connections,
        })
        .collect();

    SkillNetwork {
        nodes,
        links: graph.co_occurrence_edges(min_weight.max(1)).await,
    }
}

pub async fn relationship_graph(graph: &GraphService, request: &ProjectionRequest) -> Projection {
    graph.full_projection(request).await
}
