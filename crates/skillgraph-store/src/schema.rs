//! Cypher statements for the Neo4j backend.
//!
//! Labels and relationship types cannot be query parameters, so statements
//! that vary by kind are built from the closed `NodeKind`/`RelKind` enums.

use crate::types::{NodeKind, RelKind};

/// One uniqueness constraint per label on `name`.
pub const CONSTRAINTS: &[&str] = &[
    "CREATE CONSTRAINT skill_name IF NOT EXISTS FOR (n:Skill) REQUIRE n.name IS UNIQUE",
    "CREATE CONSTRAINT role_name IF NOT EXISTS FOR (n:Role) REQUIRE n.name IS UNIQUE",
    "CREATE CONSTRAINT industry_name IF NOT EXISTS FOR (n:Industry) REQUIRE n.name IS UNIQUE",
    "CREATE CONSTRAINT location_name IF NOT EXISTS FOR (n:Location) REQUIRE n.name IS UNIQUE",
];

pub const PING: &str = "RETURN 1";

pub const UPSERT_SKILL_WITH_CATEGORY: &str =
    "MERGE (n:Skill {name: $name}) SET n.category = $category";

pub const INCREMENT_COOCCURRENCE: &str = "
MATCH (a:Skill {name: $from}), (b:Skill {name: $to})
MERGE (a)-[r:COOCCURS_WITH]->(b)
ON CREATE SET r.weight = 1, r.jobs = [$job]
ON MATCH SET r.weight = r.weight + 1, r.jobs = r.jobs + $job";

pub const INCREMENT_COOCCURRENCE_NO_JOB: &str = "
MATCH (a:Skill {name: $from}), (b:Skill {name: $to})
MERGE (a)-[r:COOCCURS_WITH]->(b)
ON CREATE SET r.weight = 1, r.jobs = []
ON MATCH SET r.weight = r.weight + 1";

pub const NEIGHBORS: &str = "
MATCH (s:Skill {name: $name})-[r:COOCCURS_WITH]-(o:Skill)
RETURN o.name AS name, r.weight AS weight
ORDER BY weight DESC, name
LIMIT $limit";

pub const COOCCURRENCE_EDGES: &str = "
MATCH (a:Skill)-[r:COOCCURS_WITH]->(b:Skill)
WHERE r.weight >= $min_weight
RETURN a.name AS source, b.name AS target, r.weight AS weight
ORDER BY weight DESC, source, target";

pub const SKILL_NODES: &str = "
MATCH (s:Skill)
RETURN s.name AS name,
       coalesce(s.category, '') AS category,
       size([(s)-[:COOCCURS_WITH]-(:Skill) | 1]) AS connections
ORDER BY name";

pub const CLEAR_ALL: &str =
    "MATCH (n) WHERE n:Skill OR n:Role OR n:Industry OR n:Location DETACH DELETE n";

pub fn upsert_node(kind: NodeKind) -> String {
    format!("MERGE (n:{} {{name: $name}})", kind.label())
}

pub fn increment_edge(kind: RelKind) -> String {
    let (from, to) = kind.endpoints();
    format!(
        "MATCH (a:{} {{name: $from}}), (b:{} {{name: $to}})
MERGE (a)-[r:{}]->(b)
ON CREATE SET r.weight = 1
ON MATCH SET r.weight = r.weight + 1",
        from.label(),
        to.label(),
        kind.rel_type()
    )
}

/// Targets of `kind` from the node named `$name`, heaviest first.
pub fn top_targets(kind: RelKind) -> String {
    let (from, to) = kind.endpoints();
    format!(
        "MATCH (a:{} {{name: $name}})-[r:{}]->(b:{})
RETURN b.name AS name, r.weight AS count
ORDER BY count DESC, name
LIMIT $limit",
        from.label(),
        kind.rel_type(),
        to.label()
    )
}

/// Sources of `kind` into the node named `$name`, heaviest first.
pub fn top_sources(kind: RelKind) -> String {
    let (from, to) = kind.endpoints();
    format!(
        "MATCH (a:{})-[r:{}]->(b:{} {{name: $name}})
RETURN a.name AS name, r.weight AS count
ORDER BY count DESC, name
LIMIT $limit",
        from.label(),
        kind.rel_type(),
        to.label()
    )
}

/// Top nodes of one kind ranked by the weight they carry in a projection.
pub fn projection_nodes(kind: NodeKind) -> String {
    let pattern = match kind {
        NodeKind::Skill => "(:Role)-[r:REQUIRES]->(n)",
        NodeKind::Role => "(n)-[r:REQUIRES]->(:Skill)",
        NodeKind::Industry => "(n)-[r:USES]->(:Skill)",
        NodeKind::Location => "(n)-[r:OFFERS]->(:Role)",
    };
    format!(
        "MATCH (n:{})
OPTIONAL MATCH {}
RETURN n.name AS name, coalesce(n.category, '') AS category, coalesce(sum(r.weight), 0) AS count
ORDER BY count DESC, name
LIMIT $limit",
        kind.label(),
        pattern
    )
}

/// Links of `kind` between two selected name sets.
pub fn projection_links(kind: RelKind) -> String {
    let (from, to) = kind.endpoints();
    format!(
        "MATCH (a:{})-[r:{}]->(b:{})
WHERE a.name IN $sources AND b.name IN $targets AND r.weight >= $min_weight
RETURN a.name AS source, b.name AS target, r.weight AS weight",
        from.label(),
        kind.rel_type(),
        to.label()
    )
}

pub fn count_nodes(kind: NodeKind) -> String {
    format!("MATCH (n:{}) RETURN count(n) AS count", kind.label())
}

pub fn count_edges(kind: RelKind) -> String {
    format!("MATCH ()-[r:{}]->() RETURN count(r) AS count", kind.rel_type())
}
