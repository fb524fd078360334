//! Process-local skill graph backed by petgraph.
//!
//! Nodes are keyed by `(kind, name)` and edges by `(relationship, from, to)`,
//! so lookups of a missing key return zero/empty without touching the graph.
//! Co-occurrence edges are stored once, directed from the lexicographically
//! smaller skill name to the larger. All state sits behind one mutex so each
//! read-modify-write of a weight is serialized.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::backend::GraphStore;
use crate::types::*;
use skillgraph_core::{Result, DEFAULT_CATEGORY};

/// A node in the skill graph.
#[derive(Debug, Clone)]
struct GraphNode {
    kind: NodeKind,
    name: String,
    category: Option<String>,
    /// Distinct co-occurrence partners (skills only).
    connections: u64,
}

/// A weighted relationship.
#[derive(Debug, Clone)]
struct GraphEdge {
    kind: RelKind,
    weight: u64,
    /// Contributing job ids, co-occurrence edges only.
    jobs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    kind: RelKind,
    from: NodeIndex,
    to: NodeIndex,
}

#[derive(Default)]
struct GraphInner {
    graph: DiGraph<GraphNode, GraphEdge>,
    node_index: HashMap<(NodeKind, String), NodeIndex>,
    edge_index: HashMap<EdgeKey, EdgeIndex>,
}

/// In-memory skill graph.
pub struct InMemoryGraph {
    inner: Mutex<GraphInner>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(GraphInner::default()),
        }
    }

    /// Create the node if absent; refresh a skill's category when one is given.
    pub fn upsert_node(&self, kind: NodeKind, name: &str, category: Option<&str>) {
        let mut inner = self.inner.lock();
        let key = (kind, name.to_string());
        if let Some(&idx) = inner.node_index.get(&key) {
            if kind == NodeKind::Skill {
                if let Some(category) = category {
                    inner.graph[idx].category = Some(category.to_string());
                }
            }
            return;
        }

        let idx = inner.graph.add_node(GraphNode {
            kind,
            name: name.to_string(),
            category: if kind == NodeKind::Skill {
                category.map(String::from)
            } else {
                None
            },
            connections: 0,
        });
        inner.node_index.insert(key, idx);
    }

    /// Add one observation of `from -kind-> to`. Missing endpoints make this
    /// a no-op.
    pub fn increment_edge(&self, kind: RelKind, from: &str, to: &str, job_id: Option<&str>) {
        let (from, to) = if kind.is_symmetric() {
            if from == to {
                return;
            }
            canonical_pair(from, to)
        } else {
            (from, to)
        };

        let mut inner = self.inner.lock();
        let (from_kind, to_kind) = kind.endpoints();
        let (Some(a), Some(b)) = (inner.find_node(from_kind, from), inner.find_node(to_kind, to))
        else {
            debug!("Skipping {} {} -> {}: endpoint missing", kind, from, to);
            return;
        };

        let key = EdgeKey { kind, from: a, to: b };
        let created = match inner.edge_index.get(&key).copied() {
            Some(e) => {
                let edge = &mut inner.graph[e];
                edge.weight += 1;
                if let Some(job) = job_id.filter(|_| kind.is_symmetric()) {
                    edge.jobs.push(job.to_string());
                }
                false
            }
            None => {
                let jobs = match job_id.filter(|_| kind.is_symmetric()) {
                    Some(job) => vec![job.to_string()],
                    None => Vec::new(),
                };
                let e = inner.graph.add_edge(
                    a,
                    b,
                    GraphEdge {
                        kind,
                        weight: 1,
                        jobs,
                    },
                );
                inner.edge_index.insert(key, e);
                true
            }
        };

        // Partner sets only change when a new pair appears.
        if created && kind.is_symmetric() {
            for idx in [a, b] {
                let count = inner.co_occurrence_partners(idx);
                inner.graph[idx].connections = count;
            }
        }
    }

    /// Current weight of an edge, 0 if it does not exist.
    pub fn edge_weight(&self, kind: RelKind, from: &str, to: &str) -> u64 {
        let inner = self.inner.lock();
        inner
            .find_edge(kind, from, to)
            .map(|e| inner.graph[e].weight)
            .unwrap_or(0)
    }

    /// Job ids recorded on a co-occurrence edge, empty if it does not exist.
    pub fn edge_jobs(&self, skill_a: &str, skill_b: &str) -> Vec<String> {
        let inner = self.inner.lock();
        inner
            .find_edge(RelKind::CooccursWith, skill_a, skill_b)
            .map(|e| inner.graph[e].jobs.clone())
            .unwrap_or_default()
    }

    pub fn contains_node(&self, kind: NodeKind, name: &str) -> bool {
        self.inner.lock().find_node(kind, name).is_some()
    }

    pub fn neighbors(&self, skill: &str, limit: usize) -> Vec<Neighbor> {
        let inner = self.inner.lock();
        let Some(idx) = inner.find_node(NodeKind::Skill, skill) else {
            return Vec::new();
        };
        let mut ranked = inner.ranked_edges(idx, RelKind::CooccursWith, None);
        ranked.truncate(limit);
        ranked
            .into_iter()
            .map(|(other, weight)| Neighbor {
                name: inner.graph[other].name.clone(),
                weight,
            })
            .collect()
    }

    pub fn co_occurrence_edges(&self, min_weight: u64) -> Vec<CoOccurrence> {
        let inner = self.inner.lock();
        let mut edges: Vec<CoOccurrence> = inner
            .graph
            .edge_references()
            .filter(|e| e.weight().kind == RelKind::CooccursWith && e.weight().weight >= min_weight)
            .map(|e| CoOccurrence {
                source: inner.graph[e.source()].name.clone(),
                target: inner.graph[e.target()].name.clone(),
                weight: e.weight().weight,
            })
            .collect();
        edges.sort_by(|a, b| b.weight.cmp(&a.weight));
        edges
    }

    pub fn skill_nodes(&self) -> Vec<SkillNode> {
        let inner = self.inner.lock();
        inner
            .graph
            .node_weights()
            .filter(|n| n.kind == NodeKind::Skill)
            .map(|n| SkillNode {
                name: n.name.clone(),
                category: n.category.clone(),
                connections: n.connections,
            })
            .collect()
    }

    /// Top `limit_per_kind` nodes of each requested kind, ranked by total
    /// relationship weight (first-seen order on ties), plus every link of
    /// weight ≥ `min_weight` whose endpoints were both selected.
    pub fn full_projection(&self, request: &ProjectionRequest) -> Projection {
        let inner = self.inner.lock();
        let mut projection = Projection::default();
        let mut selected: HashMap<NodeKind, Vec<NodeIndex>> = HashMap::new();
        let mut selected_set: HashSet<NodeIndex> = HashSet::new();

        for kind in request.emission_order() {
            let mut scored: Vec<(NodeIndex, u64)> = inner
                .graph
                .node_indices()
                .filter(|&idx| inner.graph[idx].kind == kind)
                .map(|idx| (idx, inner.projection_score(idx)))
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            scored.truncate(request.limit_per_kind);

            for &(idx, count) in &scored {
                let node = &inner.graph[idx];
                projection.nodes.push(ProjectionNode {
                    id: kind.node_id(&node.name),
                    name: node.name.clone(),
                    kind,
                    category: (kind == NodeKind::Skill).then(|| {
                        node.category
                            .clone()
                            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
                    }),
                    count,
                });
                selected_set.insert(idx);
            }
            selected.insert(kind, scored.into_iter().map(|(idx, _)| idx).collect());
        }

        for rel in request.link_kinds() {
            let (from_kind, to_kind) = rel.endpoints();
            let Some(sources) = selected.get(&from_kind) else {
                continue;
            };
            for &src in sources {
                let mut edges: Vec<_> = inner
                    .graph
                    .edges_directed(src, Direction::Outgoing)
                    .filter(|e| e.weight().kind == rel)
                    .collect();
                edges.sort_by_key(|e| e.id());
                for e in edges {
                    if e.weight().weight < request.min_weight || !selected_set.contains(&e.target()) {
                        continue;
                    }
                    projection.links.push(ProjectionLink {
                        source: from_kind.node_id(&inner.graph[src].name),
                        target: to_kind.node_id(&inner.graph[e.target()].name),
                        relationship: rel,
                        weight: e.weight().weight,
                    });
                }
            }
        }

        projection
    }

    pub fn top_targets(&self, kind: RelKind, from: &str, limit: usize) -> Vec<RankedName> {
        self.ranked_names(kind, from, kind.endpoints().0, Direction::Outgoing, limit)
    }

    pub fn top_sources(&self, kind: RelKind, to: &str, limit: usize) -> Vec<RankedName> {
        self.ranked_names(kind, to, kind.endpoints().1, Direction::Incoming, limit)
    }

    pub fn stats(&self) -> GraphStats {
        let inner = self.inner.lock();
        let mut stats = GraphStats::default();
        for node in inner.graph.node_weights() {
            stats.add_node(node.kind, 1);
        }
        for edge in inner.graph.edge_weights() {
            stats.add_edge(edge.kind, 1);
        }
        stats
    }

    pub fn clear_all(&self) {
        *self.inner.lock() = GraphInner::default();
    }

    fn ranked_names(
        &self,
        kind: RelKind,
        name: &str,
        node_kind: NodeKind,
        direction: Direction,
        limit: usize,
    ) -> Vec<RankedName> {
        let inner = self.inner.lock();
        let Some(idx) = inner.find_node(node_kind, name) else {
            return Vec::new();
        };
        let direction = (!kind.is_symmetric()).then_some(direction);
        let mut ranked = inner.ranked_edges(idx, kind, direction);
        ranked.truncate(limit);
        ranked
            .into_iter()
            .map(|(other, count)| RankedName {
                name: inner.graph[other].name.clone(),
                count,
            })
            .collect()
    }
}

impl GraphInner {
    fn find_node(&self, kind: NodeKind, name: &str) -> Option<NodeIndex> {
        self.node_index.get(&(kind, name.to_string())).copied()
    }

    fn find_edge(&self, kind: RelKind, from: &str, to: &str) -> Option<EdgeIndex> {
        let (from, to) = if kind.is_symmetric() {
            canonical_pair(from, to)
        } else {
            (from, to)
        };
        let (from_kind, to_kind) = kind.endpoints();
        let key = EdgeKey {
            kind,
            from: self.find_node(from_kind, from)?,
            to: self.find_node(to_kind, to)?,
        };
        self.edge_index.get(&key).copied()
    }

    /// `(other endpoint, weight)` for edges of `kind` touching `idx`, heaviest
    /// first, insertion order on ties. `None` direction means both.
    fn ranked_edges(
        &self,
        idx: NodeIndex,
        kind: RelKind,
        direction: Option<Direction>,
    ) -> Vec<(NodeIndex, u64)> {
        let directions: &[Direction] = match direction {
            Some(Direction::Outgoing) => &[Direction::Outgoing],
            Some(Direction::Incoming) => &[Direction::Incoming],
            None => &[Direction::Outgoing, Direction::Incoming],
        };
        let mut ranked: Vec<(EdgeIndex, NodeIndex, u64)> = Vec::new();
        for &dir in directions {
            for e in self.graph.edges_directed(idx, dir) {
                if e.weight().kind != kind {
                    continue;
                }
                let other = if dir == Direction::Outgoing {
                    e.target()
                } else {
                    e.source()
                };
                ranked.push((e.id(), other, e.weight().weight));
            }
        }
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .map(|(_, other, weight)| (other, weight))
            .collect()
    }

    fn co_occurrence_partners(&self, idx: NodeIndex) -> u64 {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .filter(|e| e.weight().kind == RelKind::CooccursWith)
            .count() as u64
    }

    /// Total weight a node contributes to projection ranking: outgoing
    /// REQUIRES/USES/OFFERS for roles/industries/locations, incoming
    /// REQUIRES for skills.
    fn projection_score(&self, idx: NodeIndex) -> u64 {
        let (rel, direction) = match self.graph[idx].kind {
            NodeKind::Skill => (RelKind::Requires, Direction::Incoming),
            NodeKind::Role => (RelKind::Requires, Direction::Outgoing),
            NodeKind::Industry => (RelKind::Uses, Direction::Outgoing),
            NodeKind::Location => (RelKind::Offers, Direction::Outgoing),
        };
        self.graph
            .edges_directed(idx, direction)
            .filter(|e| e.weight().kind == rel)
            .map(|e| e.weight().weight)
            .sum()
    }
}

impl Default for InMemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraph {
    fn kind(&self) -> BackendKind {
        BackendKind::InMemory
    }

    async fn upsert_node(&self, kind: NodeKind, name: &str, category: Option<&str>) -> Result<()> {
        InMemoryGraph::upsert_node(self, kind, name, category);
        Ok(())
    }

    async fn increment_edge(
        &self,
        kind: RelKind,
        from: &str,
        to: &str,
        job_id: Option<&str>,
    ) -> Result<()> {
        InMemoryGraph::increment_edge(self, kind, from, to, job_id);
        Ok(())
    }

    async fn neighbors(&self, skill: &str, limit: usize) -> Result<Vec<Neighbor>> {
        Ok(InMemoryGraph::neighbors(self, skill, limit))
    }

    async fn co_occurrence_edges(&self, min_weight: u64) -> Result<Vec<CoOccurrence>> {
        Ok(InMemoryGraph::co_occurrence_edges(self, min_weight))
    }

    async fn skill_nodes(&self) -> Result<Vec<SkillNode>> {
        Ok(InMemoryGraph::skill_nodes(self))
    }

    async fn full_projection(&self, request: &ProjectionRequest) -> Result<Projection> {
        Ok(InMemoryGraph::full_projection(self, request))
    }

    async fn top_targets(&self, kind: RelKind, from: &str, limit: usize) -> Result<Vec<RankedName>> {
        Ok(InMemoryGraph::top_targets(self, kind, from, limit))
    }

    async fn top_sources(&self, kind: RelKind, to: &str, limit: usize) -> Result<Vec<RankedName>> {
        Ok(InMemoryGraph::top_sources(self, kind, to, limit))
    }

    async fn stats(&self) -> Result<GraphStats> {
        Ok(InMemoryGraph::stats(self))
    }

    async fn clear_all(&self) -> Result<()> {
        InMemoryGraph::clear_all(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_job(graph: &InMemoryGraph, job_id: &str, skills: &[&str]) {
        for s in skills {
            graph.upsert_node(NodeKind::Skill, s, None);
        }
        for (i, a) in skills.iter().enumerate() {
            for b in &skills[i + 1..] {
                graph.increment_edge(RelKind::CooccursWith, a, b, Some(job_id));
            }
        }
    }

    fn sample_graph() -> InMemoryGraph {
        let graph = InMemoryGraph::new();
        add_job(&graph, "J1", &["Python", "SQL"]);
        add_job(&graph, "J2", &["Python", "SQL"]);
        add_job(&graph, "J3", &["Python", "AWS"]);
        graph
    }

    #[test]
    fn test_cooccurrence_weights_count_jobs() {
        let graph = sample_graph();
        let edges = graph.co_occurrence_edges(1);
        assert_eq!(
            edges,
            vec![
                CoOccurrence {
                    source: "Python".into(),
                    target: "SQL".into(),
                    weight: 2
                },
                CoOccurrence {
                    source: "AWS".into(),
                    target: "Python".into(),
                    weight: 1
                },
            ]
        );
    }

    #[test]
    fn test_neighbors_sorted_by_weight() {
        let graph = sample_graph();
        let related = graph.neighbors("Python", 10);
        assert_eq!(
            related,
            vec![
                Neighbor {
                    name: "SQL".into(),
                    weight: 2
                },
                Neighbor {
                    name: "AWS".into(),
                    weight: 1
                },
            ]
        );
        assert_eq!(graph.neighbors("Python", 1).len(), 1);
        assert!(graph.neighbors("Cobol", 10).is_empty());
    }

    #[test]
    fn test_cooccurrence_is_order_independent() {
        let graph = InMemoryGraph::new();
        graph.upsert_node(NodeKind::Skill, "SQL", None);
        graph.upsert_node(NodeKind::Skill, "AWS", None);
        graph.increment_edge(RelKind::CooccursWith, "SQL", "AWS", Some("J1"));
        graph.increment_edge(RelKind::CooccursWith, "AWS", "SQL", Some("J2"));

        assert_eq!(graph.edge_weight(RelKind::CooccursWith, "AWS", "SQL"), 2);
        assert_eq!(graph.edge_weight(RelKind::CooccursWith, "SQL", "AWS"), 2);
        assert_eq!(graph.co_occurrence_edges(1).len(), 1);
        assert_eq!(graph.edge_jobs("SQL", "AWS"), vec!["J1", "J2"]);
    }

    #[test]
    fn test_self_pairs_and_missing_endpoints_are_ignored() {
        let graph = InMemoryGraph::new();
        graph.upsert_node(NodeKind::Skill, "Python", None);
        graph.increment_edge(RelKind::CooccursWith, "Python", "Python", Some("J1"));
        graph.increment_edge(RelKind::CooccursWith, "Python", "Rust", Some("J1"));
        graph.increment_edge(RelKind::Requires, "Engineer", "Python", None);

        assert_eq!(graph.stats().edge_count(), 0);
        assert_eq!(graph.edge_weight(RelKind::Requires, "Engineer", "Python"), 0);
        assert!(!graph.contains_node(NodeKind::Role, "Engineer"));
    }

    #[test]
    fn test_upsert_is_idempotent_and_refreshes_category() {
        let graph = InMemoryGraph::new();
        graph.upsert_node(NodeKind::Skill, "Python", None);
        graph.upsert_node(NodeKind::Skill, "Python", Some("ML"));
        graph.upsert_node(NodeKind::Skill, "Python", None);
        graph.upsert_node(NodeKind::Role, "Python", Some("ignored"));

        let skills = graph.skill_nodes();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].category.as_deref(), Some("ML"));
        let stats = graph.stats();
        assert_eq!(stats.skills, 1);
        assert_eq!(stats.roles, 1);
    }

    #[test]
    fn test_connections_count_distinct_partners() {
        let graph = sample_graph();
        let skills: HashMap<String, u64> = graph
            .skill_nodes()
            .into_iter()
            .map(|s| (s.name, s.connections))
            .collect();
        assert_eq!(skills["Python"], 2);
        assert_eq!(skills["SQL"], 1);
        assert_eq!(skills["AWS"], 1);
    }

    #[test]
    fn test_min_weight_filter() {
        let graph = sample_graph();
        let heavy = graph.co_occurrence_edges(2);
        assert_eq!(heavy.len(), 1);
        assert_eq!(heavy[0].weight, 2);
        assert!(graph.co_occurrence_edges(3).is_empty());
    }

    #[test]
    fn test_directed_edges_and_rankings() {
        let graph = InMemoryGraph::new();
        graph.upsert_node(NodeKind::Role, "ML Engineer", None);
        graph.upsert_node(NodeKind::Role, "Data Analyst", None);
        graph.upsert_node(NodeKind::Skill, "Python", Some("ML"));
        graph.upsert_node(NodeKind::Skill, "SQL", Some("Data"));
        graph.increment_edge(RelKind::Requires, "ML Engineer", "Python", None);
        graph.increment_edge(RelKind::Requires, "ML Engineer", "Python", None);
        graph.increment_edge(RelKind::Requires, "ML Engineer", "SQL", None);
        graph.increment_edge(RelKind::Requires, "Data Analyst", "SQL", None);

        let skills = graph.top_targets(RelKind::Requires, "ML Engineer", 10);
        assert_eq!(skills[0].name, "Python");
        assert_eq!(skills[0].count, 2);
        assert_eq!(skills[1].name, "SQL");

        let roles = graph.top_sources(RelKind::Requires, "SQL", 10);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].name, "ML Engineer");
        assert!(graph.top_sources(RelKind::Requires, "Rust", 10).is_empty());
    }

    #[test]
    fn test_projection_caps_and_drops_unselected_links() {
        let graph = InMemoryGraph::new();
        for role in ["A", "B"] {
            graph.upsert_node(NodeKind::Role, role, None);
        }
        for skill in ["Python", "SQL", "AWS"] {
            graph.upsert_node(NodeKind::Skill, skill, None);
        }
        for _ in 0..3 {
            graph.increment_edge(RelKind::Requires, "A", "Python", None);
        }
        graph.increment_edge(RelKind::Requires, "A", "SQL", None);
        graph.increment_edge(RelKind::Requires, "A", "SQL", None);
        graph.increment_edge(RelKind::Requires, "B", "AWS", None);

        let projection = graph.full_projection(&ProjectionRequest {
            node_kinds: vec![NodeKind::Skill, NodeKind::Role],
            min_weight: 1,
            limit_per_kind: 2,
        });

        let ids: Vec<&str> = projection.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["role_A", "role_B", "skill_Python", "skill_SQL"]);
        assert_eq!(projection.nodes[2].category.as_deref(), Some("Other"));
        assert_eq!(projection.nodes[0].count, 5);

        let node_ids: HashSet<&str> = ids.into_iter().collect();
        for link in &projection.links {
            assert!(node_ids.contains(link.source.as_str()));
            assert!(node_ids.contains(link.target.as_str()));
            assert_eq!(link.relationship, RelKind::Requires);
        }
        assert_eq!(projection.links.len(), 2);

        let heavy = graph.full_projection(&ProjectionRequest {
            node_kinds: vec![NodeKind::Skill, NodeKind::Role],
            min_weight: 3,
            limit_per_kind: 20,
        });
        assert_eq!(heavy.links.len(), 1);
        assert_eq!(heavy.links[0].target, "skill_Python");
    }

    #[test]
    fn test_projection_single_kind_has_no_links() {
        let graph = InMemoryGraph::new();
        graph.upsert_node(NodeKind::Location, "Berlin", None);
        graph.upsert_node(NodeKind::Role, "Engineer", None);
        graph.increment_edge(RelKind::Offers, "Berlin", "Engineer", None);

        let projection = graph.full_projection(&ProjectionRequest {
            node_kinds: vec![NodeKind::Location],
            ..Default::default()
        });
        assert_eq!(projection.nodes.len(), 1);
        assert!(projection.links.is_empty());

        let both = graph.full_projection(&ProjectionRequest {
            node_kinds: vec![NodeKind::Location, NodeKind::Role],
            ..Default::default()
        });
        assert_eq!(both.links.len(), 1);
        assert_eq!(both.links[0].source, "location_Berlin");
        assert_eq!(both.links[0].target, "role_Engineer");
    }

    #[test]
    fn test_projection_ranks_industries_by_uses_weight() {
        let graph = InMemoryGraph::new();
        for industry in ["Retail", "Finance", "Tech"] {
            graph.upsert_node(NodeKind::Industry, industry, None);
        }
        graph.upsert_node(NodeKind::Skill, "Python", Some("ML"));
        graph.upsert_node(NodeKind::Skill, "SQL", Some("Data"));
        graph.increment_edge(RelKind::Uses, "Tech", "Python", None);
        graph.increment_edge(RelKind::Uses, "Tech", "Python", None);
        graph.increment_edge(RelKind::Uses, "Tech", "SQL", None);
        graph.increment_edge(RelKind::Uses, "Finance", "SQL", None);

        let projection = graph.full_projection(&ProjectionRequest {
            node_kinds: vec![NodeKind::Skill, NodeKind::Industry],
            min_weight: 1,
            limit_per_kind: 2,
        });
        let ids: Vec<&str> = projection.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["industry_Tech", "industry_Finance", "skill_Python", "skill_SQL"]
        );
        assert_eq!(projection.nodes[0].count, 3);
        assert_eq!(projection.nodes[1].count, 1);
        assert!(projection.nodes[0].category.is_none());
        assert_eq!(projection.nodes[3].category.as_deref(), Some("Data"));

        assert_eq!(projection.links.len(), 3);
        assert!(projection.links.iter().all(|l| l.relationship == RelKind::Uses));
        assert!(projection
            .links
            .iter()
            .any(|l| l.source == "industry_Finance" && l.target == "skill_SQL"));

        let heavy = graph.full_projection(&ProjectionRequest {
            node_kinds: vec![NodeKind::Skill, NodeKind::Industry],
            min_weight: 2,
            limit_per_kind: 20,
        });
        assert_eq!(heavy.links.len(), 1);
        assert_eq!(heavy.links[0].source, "industry_Tech");
        assert_eq!(heavy.links[0].target, "skill_Python");
        assert_eq!(heavy.links[0].weight, 2);
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let graph = sample_graph();
        graph.clear_all();
        assert_eq!(graph.stats(), GraphStats::default());
        assert!(graph.neighbors("Python", 10).is_empty());

        add_job(&graph, "J1", &["Python", "SQL"]);
        assert_eq!(graph.edge_weight(RelKind::CooccursWith, "Python", "SQL"), 1);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let graph = std::sync::Arc::new(InMemoryGraph::new());
        graph.upsert_node(NodeKind::Skill, "Python", None);
        graph.upsert_node(NodeKind::Skill, "SQL", None);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let graph = graph.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let job = format!("J{t}-{i}");
                        graph.increment_edge(RelKind::CooccursWith, "Python", "SQL", Some(&job));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(graph.edge_weight(RelKind::CooccursWith, "SQL", "Python"), 800);
        assert_eq!(graph.edge_jobs("Python", "SQL").len(), 800);
    }
}
