//! Job ingestion: record → nodes → weighted relationships.

use serde::Serialize;
use tracing::{debug, info};

use skillgraph_core::{JobRecord, SkillClassifier};
use skillgraph_store::{GraphService, NodeKind, RelKind};

/// What one job contributed to the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub job_id: String,
    pub nodes: usize,
    pub relationships: usize,
    pub co_occurrence_pairs: usize,
}

/// Totals for a clear-and-reload pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadSummary {
    pub jobs: usize,
    pub nodes: usize,
    pub relationships: usize,
    pub co_occurrence_pairs: usize,
}

/// Writes job records into the skill graph.
///
/// Each job must be ingested once between clears. Ingesting the same job
/// again adds its contribution a second time.
pub struct GraphIngester<'a> {
    graph: &'a GraphService,
    classifier: &'a dyn SkillClassifier,
}

impl<'a> GraphIngester<'a> {
    pub fn new(graph: &'a GraphService, classifier: &'a dyn SkillClassifier) -> Self {
        Self { graph, classifier }
    }

    /// Ingest one job. Missing labels or skills only skip the relationships
    /// that need them.
    pub async fn ingest_job(&self, job: &JobRecord) -> IngestSummary {
        let mut summary = IngestSummary {
            job_id: job.id.clone(),
            ..Default::default()
        };
        let role = job.role();
        let industry = job.industry();
        let location = job.location();
        let skills = job.distinct_skills();

        for (kind, label) in [
            (NodeKind::Role, role),
            (NodeKind::Industry, industry),
            (NodeKind::Location, location),
        ] {
            if let Some(name) = label {
                self.graph.upsert_node(kind, name, None).await;
                summary.nodes += 1;
            }
        }

        for skill in &skills {
            let category = self.classifier.classify(skill);
            self.graph
                .upsert_node(NodeKind::Skill, skill, Some(category))
                .await;
            summary.nodes += 1;
        }

        for skill in &skills {
            if let Some(role) = role {
                self.graph
                    .increment_edge(RelKind::Requires, role, skill, None)
                    .await;
                summary.relationships += 1;
            }
            if let Some(industry) = industry {
                self.graph
                    .increment_edge(RelKind::Uses, industry, skill, None)
                    .await;
                summary.relationships += 1;
            }
        }
        if let (Some(location), Some(role)) = (location, role) {
            self.graph
                .increment_edge(RelKind::Offers, location, role, None)
                .await;
            summary.relationships += 1;
        }

        let job_id = Some(job.id.trim()).filter(|id| !id.is_empty());
        for (i, a) in skills.iter().enumerate() {
            for b in &skills[i + 1..] {
                self.graph
                    .increment_edge(RelKind::CooccursWith, a, b, job_id)
                    .await;
                summary.co_occurrence_pairs += 1;
            }
        }
        summary.relationships += summary.co_occurrence_pairs;

        debug!(
            "Ingested job {}: {} nodes, {} relationships",
            job.id, summary.nodes, summary.relationships
        );
        summary
    }

    /// Wipe the graph and ingest every job once.
    pub async fn reload(&self, jobs: &[JobRecord]) -> ReloadSummary {
        self.graph.clear_all().await;

        let mut total = ReloadSummary::default();
        for job in jobs {
            let summary = self.ingest_job(job).await;
            total.jobs += 1;
            total.nodes += summary.nodes;
            total.relationships += summary.relationships;
            total.co_occurrence_pairs += summary.co_occurrence_pairs;
        }

        info!(
            "Reloaded skill graph from {} jobs ({} relationships)",
            total.jobs, total.relationships
        );
        total
    }
}
