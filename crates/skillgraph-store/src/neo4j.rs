//! Neo4j-backed graph store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use neo4rs::{query, Graph, Query, Row};
use tracing::{info, warn};

use crate::backend::GraphStore;
use crate::schema;
use crate::types::*;
use skillgraph_core::{Error, Neo4jSettings, Result};

/// Graph store persisted in a Neo4j database.
pub struct Neo4jGraph {
    graph: Arc<Graph>,
}

impl Neo4jGraph {
    /// Connect, verify the server answers and ensure the per-label uniqueness
    /// constraints exist, all within `timeout`.
    pub async fn connect(settings: &Neo4jSettings, timeout: Duration) -> Result<Self> {
        let connect = async {
            let graph = Graph::new(&settings.uri, &settings.user, &settings.password)
                .await
                .map_err(|e| Error::Unavailable(e.to_string()))?;
            graph
                .run(query(schema::PING))
                .await
                .map_err(|e| Error::Unavailable(e.to_string()))?;
            let store = Self {
                graph: Arc::new(graph),
            };
            store.ensure_constraints().await;
            Ok::<_, Error>(store)
        };

        let store = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| {
                Error::Unavailable(format!(
                    "no answer from {} within {}s",
                    settings.uri,
                    timeout.as_secs_f32()
                ))
            })??;
        info!("Connected to Neo4j at {}", settings.uri);
        Ok(store)
    }

    async fn ensure_constraints(&self) {
        for constraint in schema::CONSTRAINTS {
            if let Err(e) = self.graph.run(query(constraint)).await {
                warn!("Failed to create constraint: {}", e);
            }
        }
    }

    async fn run(&self, q: Query) -> Result<()> {
        self.graph
            .run(q)
            .await
            .map_err(|e| Error::Query(e.to_string()))
    }

    async fn rows(&self, q: Query) -> Result<Vec<Row>> {
        let mut stream = self
            .graph
            .execute(q)
            .await
            .map_err(|e| Error::Query(e.to_string()))?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(|e| Error::Query(e.to_string()))? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn count(&self, cypher: &str) -> Result<u64> {
        let rows = self.rows(query(cypher)).await?;
        match rows.first() {
            Some(row) => get_u64(row, "count"),
            None => Ok(0),
        }
    }

    async fn ranked(&self, cypher: &str, name: &str, limit: usize) -> Result<Vec<RankedName>> {
        let q = query(cypher)
            .param("name", name)
            .param("limit", int_param(limit));
        self.rows(q)
            .await?
            .iter()
            .map(|row| {
                Ok(RankedName {
                    name: get_string(row, "name")?,
                    count: get_u64(row, "count")?,
                })
            })
            .collect()
    }
}

fn get_string(row: &Row, key: &str) -> Result<String> {
    row.get::<String>(key)
        .map_err(|e| Error::Query(format!("column {key}: {e}")))
}

fn get_u64(row: &Row, key: &str) -> Result<u64> {
    row.get::<i64>(key)
        .map(|v| v.max(0) as u64)
        .map_err(|e| Error::Query(format!("column {key}: {e}")))
}

/// Bolt integers are signed; larger values saturate instead of wrapping.
fn int_param<T: TryInto<i64>>(value: T) -> i64 {
    value.try_into().unwrap_or(i64::MAX)
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[async_trait]
impl GraphStore for Neo4jGraph {
    fn kind(&self) -> BackendKind {
        BackendKind::Neo4j
    }

    async fn upsert_node(&self, kind: NodeKind, name: &str, category: Option<&str>) -> Result<()> {
        let q = match (kind, category) {
            (NodeKind::Skill, Some(category)) => query(schema::UPSERT_SKILL_WITH_CATEGORY)
                .param("name", name)
                .param("category", category),
            _ => query(&schema::upsert_node(kind)).param("name", name),
        };
        self.run(q).await
    }

    async fn increment_edge(
        &self,
        kind: RelKind,
        from: &str,
        to: &str,
        job_id: Option<&str>,
    ) -> Result<()> {
        let q = if kind.is_symmetric() {
            if from == to {
                return Ok(());
            }
            let (from, to) = canonical_pair(from, to);
            match job_id {
                Some(job) => query(schema::INCREMENT_COOCCURRENCE)
                    .param("from", from)
                    .param("to", to)
                    .param("job", job),
                None => query(schema::INCREMENT_COOCCURRENCE_NO_JOB)
                    .param("from", from)
                    .param("to", to),
            }
        } else {
            query(&schema::increment_edge(kind))
                .param("from", from)
                .param("to", to)
        };
        self.run(q).await
    }

    async fn neighbors(&self, skill: &str, limit: usize) -> Result<Vec<Neighbor>> {
        let q = query(schema::NEIGHBORS)
            .param("name", skill)
            .param("limit", int_param(limit));
        self.rows(q)
            .await?
            .iter()
            .map(|row| {
                Ok(Neighbor {
                    name: get_string(row, "name")?,
                    weight: get_u64(row, "weight")?,
                })
            })
            .collect()
    }

    async fn co_occurrence_edges(&self, min_weight: u64) -> Result<Vec<CoOccurrence>> {
        let q = query(schema::COOCCURRENCE_EDGES).param("min_weight", int_param(min_weight));
        self.rows(q)
            .await?
            .iter()
            .map(|row| {
                Ok(CoOccurrence {
                    source: get_string(row, "source")?,
                    target: get_string(row, "target")?,
                    weight: get_u64(row, "weight")?,
                })
            })
            .collect()
    }

    async fn skill_nodes(&self) -> Result<Vec<SkillNode>> {
        self.rows(query(schema::SKILL_NODES))
            .await?
            .iter()
            .map(|row| {
                Ok(SkillNode {
                    name: get_string(row, "name")?,
                    category: non_empty(get_string(row, "category")?),
                    connections: get_u64(row, "connections")?,
                })
            })
            .collect()
    }

    async fn full_projection(&self, request: &ProjectionRequest) -> Result<Projection> {
        let mut projection = Projection::default();
        let mut selected: Vec<(NodeKind, Vec<String>)> = Vec::new();

        for kind in request.emission_order() {
            let q = query(&schema::projection_nodes(kind))
                .param("limit", int_param(request.limit_per_kind));
            let mut names = Vec::new();
            for row in self.rows(q).await? {
                let name = get_string(&row, "name")?;
                let category = match kind {
                    NodeKind::Skill => Some(
                        non_empty(get_string(&row, "category")?)
                            .unwrap_or_else(|| skillgraph_core::DEFAULT_CATEGORY.to_string()),
                    ),
                    _ => None,
                };
                projection.nodes.push(ProjectionNode {
                    id: kind.node_id(&name),
                    name: name.clone(),
                    kind,
                    category,
                    count: get_u64(&row, "count")?,
                });
                names.push(name);
            }
            selected.push((kind, names));
        }

        let names_of = |kind: NodeKind| -> Vec<String> {
            selected
                .iter()
                .find(|(k, _)| *k == kind)
                .map(|(_, names)| names.clone())
                .unwrap_or_default()
        };

        for rel in request.link_kinds() {
            let (from_kind, to_kind) = rel.endpoints();
            let q = query(&schema::projection_links(rel))
                .param("sources", names_of(from_kind))
                .param("targets", names_of(to_kind))
                .param("min_weight", int_param(request.min_weight));
            for row in self.rows(q).await? {
                projection.links.push(ProjectionLink {
                    source: from_kind.node_id(&get_string(&row, "source")?),
                    target: to_kind.node_id(&get_string(&row, "target")?),
                    relationship: rel,
                    weight: get_u64(&row, "weight")?,
                });
            }
        }

        Ok(projection)
    }

    async fn top_targets(&self, kind: RelKind, from: &str, limit: usize) -> Result<Vec<RankedName>> {
        if kind.is_symmetric() {
            return Ok(self
                .neighbors(from, limit)
                .await?
                .into_iter()
                .map(|n| RankedName {
                    name: n.name,
                    count: n.weight,
                })
                .collect());
        }
        self.ranked(&schema::top_targets(kind), from, limit).await
    }

    async fn top_sources(&self, kind: RelKind, to: &str, limit: usize) -> Result<Vec<RankedName>> {
        if kind.is_symmetric() {
            return self.top_targets(kind, to, limit).await;
        }
        self.ranked(&schema::top_sources(kind), to, limit).await
    }

    async fn stats(&self) -> Result<GraphStats> {
        let mut stats = GraphStats::default();
        for kind in NodeKind::ALL {
            stats.add_node(kind, self.count(&schema::count_nodes(kind)).await?);
        }
        for kind in RelKind::ALL {
            stats.add_edge(kind, self.count(&schema::count_edges(kind)).await?);
        }
        Ok(stats)
    }

    async fn clear_all(&self) -> Result<()> {
        self.run(query(schema::CLEAR_ALL)).await?;
        info!("Cleared Neo4j skill graph");
        Ok(())
    }
}
