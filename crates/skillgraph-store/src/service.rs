//! Process-wide graph service: one persistent store with an in-memory fallback.
//!
//! The persistent store is chosen once from configuration. Any failure it
//! reports afterwards is logged, counted and answered from the in-memory
//! index, which serves every later call for the rest of the process. Callers
//! get plain values back and never see a backend error.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::backend::GraphStore;
use crate::graph::InMemoryGraph;
use crate::neo4j::Neo4jGraph;
use crate::types::*;
use skillgraph_core::{Error, GraphConfig};

/// Failure bookkeeping and the decision whether the primary may be used.
#[derive(Default)]
pub struct BackendHealth {
    failed_over: AtomicBool,
    failures: AtomicU64,
    last_error: Mutex<Option<(String, String)>>,
}

impl BackendHealth {
    /// Whether calls should still be routed to the primary store.
    pub fn allows_primary(&self) -> bool {
        !self.failed_over.load(Ordering::Acquire)
    }

    pub fn record_failure(&self, err: &Error) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        *self.last_error.lock() = Some((err.to_string(), chrono::Utc::now().to_rfc3339()));
        self.failed_over.store(true, Ordering::Release);
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn degraded(&self) -> bool {
        self.failed_over.load(Ordering::Acquire)
    }
}

/// Graph facade shared by ingestion, analytics and the HTTP layer.
pub struct GraphService {
    configured: BackendKind,
    primary: RwLock<Option<Arc<dyn GraphStore>>>,
    memory: Arc<InMemoryGraph>,
    health: BackendHealth,
}

impl GraphService {
    /// Pick the backend from configuration. An unset or unreachable Neo4j
    /// leaves the service on the in-memory index.
    pub async fn connect(config: &GraphConfig) -> Self {
        let Some(settings) = &config.neo4j else {
            info!("Neo4j not configured. Using in-memory skill graph.");
            return Self::in_memory();
        };

        match Neo4jGraph::connect(settings, config.connect_timeout).await {
            Ok(store) => Self::with_primary(Arc::new(store)),
            Err(e) => {
                warn!("Neo4j unavailable: {}. Falling back to in-memory skill graph.", e);
                let service = Self {
                    configured: BackendKind::Neo4j,
                    ..Self::in_memory()
                };
                service.health.record_failure(&e);
                service
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            configured: BackendKind::InMemory,
            primary: RwLock::new(None),
            memory: Arc::new(InMemoryGraph::new()),
            health: BackendHealth::default(),
        }
    }

    /// Serve from `primary` until it fails.
    pub fn with_primary(primary: Arc<dyn GraphStore>) -> Self {
        Self {
            configured: primary.kind(),
            primary: RwLock::new(Some(primary)),
            memory: Arc::new(InMemoryGraph::new()),
            health: BackendHealth::default(),
        }
    }

    fn primary(&self) -> Option<Arc<dyn GraphStore>> {
        if !self.health.allows_primary() {
            return None;
        }
        self.primary.read().clone()
    }

    fn fail_over(&self, op: &str, err: &Error) {
        if self.health.allows_primary() {
            warn!(
                "Graph backend failed during {}: {}. Switching to in-memory skill graph.",
                op, err
            );
        }
        self.health.record_failure(err);
    }

    /// Backend currently serving calls.
    pub fn active(&self) -> BackendKind {
        match self.primary() {
            Some(primary) => primary.kind(),
            None => BackendKind::InMemory,
        }
    }

    pub fn status(&self) -> BackendStatus {
        let last = self.health.last_error.lock().clone();
        BackendStatus {
            configured: self.configured,
            active: self.active(),
            degraded: self.health.degraded(),
            failures: self.health.failures(),
            last_error: last.as_ref().map(|(msg, _)| msg.clone()),
            last_error_at: last.map(|(_, at)| at),
        }
    }

    pub async fn upsert_node(&self, kind: NodeKind, name: &str, category: Option<&str>) {
        if let Some(primary) = self.primary() {
            match primary.upsert_node(kind, name, category).await {
                Ok(()) => return,
                Err(e) => self.fail_over("upsert_node", &e),
            }
        }
        self.memory.upsert_node(kind, name, category);
    }

    pub async fn increment_edge(&self, kind: RelKind, from: &str, to: &str, job_id: Option<&str>) {
        if let Some(primary) = self.primary() {
            match primary.increment_edge(kind, from, to, job_id).await {
                Ok(()) => return,
                Err(e) => self.fail_over("increment_edge", &e),
            }
        }
        self.memory.increment_edge(kind, from, to, job_id);
    }

    pub async fn neighbors(&self, skill: &str, limit: usize) -> Vec<Neighbor> {
        if let Some(primary) = self.primary() {
            match primary.neighbors(skill, limit).await {
                Ok(found) => return found,
                Err(e) => self.fail_over("neighbors", &e),
            }
        }
        self.memory.neighbors(skill, limit)
    }

    pub async fn co_occurrence_edges(&self, min_weight: u64) -> Vec<CoOccurrence> {
        if let Some(primary) = self.primary() {
            match primary.co_occurrence_edges(min_weight).await {
                Ok(edges) => return edges,
                Err(e) => self.fail_over("co_occurrence_edges", &e),
            }
        }
        self.memory.co_occurrence_edges(min_weight)
    }

    pub async fn skill_nodes(&self) -> Vec<SkillNode> {
        if let Some(primary) = self.primary() {
            match primary.skill_nodes().await {
                Ok(nodes) => return nodes,
                Err(e) => self.fail_over("skill_nodes", &e),
            }
        }
        self.memory.skill_nodes()
    }

    pub async fn full_projection(&self, request: &ProjectionRequest) -> Projection {
        if let Some(primary) = self.primary() {
            match primary.full_projection(request).await {
                Ok(projection) => return projection,
                Err(e) => self.fail_over("full_projection", &e),
            }
        }
        self.memory.full_projection(request)
    }

    pub async fn top_targets(&self, kind: RelKind, from: &str, limit: usize) -> Vec<RankedName> {
        if let Some(primary) = self.primary() {
            match primary.top_targets(kind, from, limit).await {
                Ok(ranked) => return ranked,
                Err(e) => self.fail_over("top_targets", &e),
            }
        }
        self.memory.top_targets(kind, from, limit)
    }

    pub async fn top_sources(&self, kind: RelKind, to: &str, limit: usize) -> Vec<RankedName> {
        if let Some(primary) = self.primary() {
            match primary.top_sources(kind, to, limit).await {
                Ok(ranked) => return ranked,
                Err(e) => self.fail_over("top_sources", &e),
            }
        }
        self.memory.top_sources(kind, to, limit)
    }

    pub async fn stats(&self) -> GraphStats {
        if let Some(primary) = self.primary() {
            match primary.stats().await {
                Ok(stats) => return stats,
                Err(e) => self.fail_over("stats", &e),
            }
        }
        self.memory.stats()
    }

    pub async fn clear_all(&self) {
        if let Some(primary) = self.primary() {
            match primary.clear_all().await {
                Ok(()) => return,
                Err(e) => self.fail_over("clear_all", &e),
            }
        }
        self.memory.clear_all();
    }

    /// Release the persistent connection. Later calls use the in-memory index.
    pub fn shutdown(&self) {
        if self.primary.write().take().is_some() {
            info!("Closed graph backend connection");
        }
    }
}
