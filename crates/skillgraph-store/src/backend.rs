//! Graph store trait shared by the in-memory index and the Neo4j adapter.
//!
//! Implementations report failures through `Result`; `GraphService` is the
//! layer that turns them into fallbacks so callers never see an error.

use async_trait::async_trait;

use crate::types::*;
use skillgraph_core::Result;

/// Storage contract for the skill relationship graph.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Which storage strategy this is.
    fn kind(&self) -> BackendKind;

    /// Create the node if absent. `category` is (re)set on every call for
    /// skills and ignored for other kinds.
    async fn upsert_node(&self, kind: NodeKind, name: &str, category: Option<&str>) -> Result<()>;

    /// Create the edge at weight 1 or add 1 to its weight. Both endpoints
    /// must already exist. For `CooccursWith` the endpoints are canonicalized,
    /// self-pairs are ignored and `job_id` is appended to the edge's job list.
    async fn increment_edge(
        &self,
        kind: RelKind,
        from: &str,
        to: &str,
        job_id: Option<&str>,
    ) -> Result<()>;

    /// Skills co-occurring with `skill`, heaviest first, at most `limit`.
    async fn neighbors(&self, skill: &str, limit: usize) -> Result<Vec<Neighbor>>;

    /// Every co-occurrence edge with weight ≥ `min_weight`, heaviest first.
    async fn co_occurrence_edges(&self, min_weight: u64) -> Result<Vec<CoOccurrence>>;

    /// Every skill node with its distinct co-occurrence partner count.
    async fn skill_nodes(&self) -> Result<Vec<SkillNode>>;

    /// Per-kind top nodes and the links among them.
    async fn full_projection(&self, request: &ProjectionRequest) -> Result<Projection>;

    /// Targets of a directed relationship from `from`, heaviest first.
    async fn top_targets(&self, kind: RelKind, from: &str, limit: usize) -> Result<Vec<RankedName>>;

    /// Sources of a directed relationship into `to`, heaviest first.
    async fn top_sources(&self, kind: RelKind, to: &str, limit: usize) -> Result<Vec<RankedName>>;

    /// Node and edge counts.
    async fn stats(&self) -> Result<GraphStats>;

    /// Remove every node and edge.
    async fn clear_all(&self) -> Result<()>;
}
