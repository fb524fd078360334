//! Node/relationship kinds and the plain result records served to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four kinds of node in the skill graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Skill,
    Role,
    Industry,
    Location,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Skill,
        NodeKind::Role,
        NodeKind::Industry,
        NodeKind::Location,
    ];

    /// Graph label, e.g. `Skill`.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Skill => "Skill",
            NodeKind::Role => "Role",
            NodeKind::Industry => "Industry",
            NodeKind::Location => "Location",
        }
    }

    /// Prefix used to namespace projection ids, e.g. `skill`.
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Skill => "skill",
            NodeKind::Role => "role",
            NodeKind::Industry => "industry",
            NodeKind::Location => "location",
        }
    }

    /// Type-prefixed identifier, e.g. `skill_Python`.
    pub fn node_id(self, name: &str) -> String {
        format!("{}_{}", self.id_prefix(), name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skill" => Ok(NodeKind::Skill),
            "role" => Ok(NodeKind::Role),
            "industry" => Ok(NodeKind::Industry),
            "location" => Ok(NodeKind::Location),
            other => Err(format!("unknown node type: {other}")),
        }
    }
}

/// Relationship kinds. All are directed except `CooccursWith`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelKind {
    /// Role → Skill
    Requires,
    /// Industry → Skill
    Uses,
    /// Location → Role
    Offers,
    /// Skill ↔ Skill
    CooccursWith,
}

impl RelKind {
    pub const ALL: [RelKind; 4] = [
        RelKind::Requires,
        RelKind::Uses,
        RelKind::Offers,
        RelKind::CooccursWith,
    ];

    /// Relationship type name, e.g. `REQUIRES`.
    pub fn rel_type(self) -> &'static str {
        match self {
            RelKind::Requires => "REQUIRES",
            RelKind::Uses => "USES",
            RelKind::Offers => "OFFERS",
            RelKind::CooccursWith => "COOCCURS_WITH",
        }
    }

    /// `(source kind, target kind)`.
    pub fn endpoints(self) -> (NodeKind, NodeKind) {
        match self {
            RelKind::Requires => (NodeKind::Role, NodeKind::Skill),
            RelKind::Uses => (NodeKind::Industry, NodeKind::Skill),
            RelKind::Offers => (NodeKind::Location, NodeKind::Role),
            RelKind::CooccursWith => (NodeKind::Skill, NodeKind::Skill),
        }
    }

    pub fn is_symmetric(self) -> bool {
        matches!(self, RelKind::CooccursWith)
    }

    /// Directed kinds that link two different node types in a projection.
    pub fn projected() -> [RelKind; 3] {
        [RelKind::Requires, RelKind::Uses, RelKind::Offers]
    }
}

impl fmt::Display for RelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rel_type())
    }
}

/// Canonical endpoint order for an undirected pair: smaller name first.
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A skill co-occurring with a queried skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub name: String,
    pub weight: u64,
}

/// One undirected co-occurrence edge, endpoints in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoOccurrence {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// A skill node with its number of distinct co-occurrence partners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillNode {
    pub name: String,
    pub category: Option<String>,
    pub connections: u64,
}

/// A name ranked by relationship weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedName {
    pub name: String,
    pub count: u64,
}

/// Parameters of a filtered, size-capped projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub node_kinds: Vec<NodeKind>,
    pub min_weight: u64,
    pub limit_per_kind: usize,
}

impl Default for ProjectionRequest {
    fn default() -> Self {
        Self {
            node_kinds: NodeKind::ALL.to_vec(),
            min_weight: 1,
            limit_per_kind: 20,
        }
    }
}

impl ProjectionRequest {
    pub fn includes(&self, kind: NodeKind) -> bool {
        self.node_kinds.contains(&kind)
    }

    /// Requested kinds, deduplicated, in the fixed emission order
    /// Role, Industry, Location, Skill.
    pub fn emission_order(&self) -> Vec<NodeKind> {
        [
            NodeKind::Role,
            NodeKind::Industry,
            NodeKind::Location,
            NodeKind::Skill,
        ]
        .into_iter()
        .filter(|k| self.includes(*k))
        .collect()
    }

    /// Relationship kinds whose both endpoint kinds were requested.
    pub fn link_kinds(&self) -> Vec<RelKind> {
        RelKind::projected()
            .into_iter()
            .filter(|rel| {
                let (from, to) = rel.endpoints();
                self.includes(from) && self.includes(to)
            })
            .collect()
    }
}

/// A node emitted by a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub count: u64,
}

/// A link emitted by a projection, endpoints as type-prefixed ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionLink {
    pub source: String,
    pub target: String,
    pub relationship: RelKind,
    pub weight: u64,
}

/// Filtered subgraph for visualization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub nodes: Vec<ProjectionNode>,
    pub links: Vec<ProjectionLink>,
}

/// Node and edge counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub skills: u64,
    pub roles: u64,
    pub industries: u64,
    pub locations: u64,
    pub requires: u64,
    pub uses: u64,
    pub offers: u64,
    pub cooccurrences: u64,
}

impl GraphStats {
    pub fn node_count(&self) -> u64 {
        self.skills + self.roles + self.industries + self.locations
    }

    pub fn edge_count(&self) -> u64 {
        self.requires + self.uses + self.offers + self.cooccurrences
    }

    pub(crate) fn add_node(&mut self, kind: NodeKind, n: u64) {
        match kind {
            NodeKind::Skill => self.skills += n,
            NodeKind::Role => self.roles += n,
            NodeKind::Industry => self.industries += n,
            NodeKind::Location => self.locations += n,
        }
    }

    pub(crate) fn add_edge(&mut self, kind: RelKind, n: u64) {
        match kind {
            RelKind::Requires => self.requires += n,
            RelKind::Uses => self.uses += n,
            RelKind::Offers => self.offers += n,
            RelKind::CooccursWith => self.cooccurrences += n,
        }
    }
}

/// Which storage strategy serves a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Neo4j,
    InMemory,
}

/// Observable backend state, including degradation after failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Backend chosen from configuration at startup.
    pub configured: BackendKind,
    /// Backend currently serving reads and writes.
    pub active: BackendKind,
    /// True once a persistent-backend failure forced the in-memory index.
    pub degraded: bool,
    /// Number of backend failures observed.
    pub failures: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_at: Option<String>,
}
