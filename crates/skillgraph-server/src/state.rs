//! Shared application state.

use parking_lot::RwLock;

use skillgraph_core::{CategoryTable, Error, GraphConfig, JobRecord, Result};
use skillgraph_ingest::GraphIngester;
use skillgraph_store::GraphService;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: GraphConfig,
    pub graph: GraphService,
    pub classifier: CategoryTable,
    /// Jobs in submission order.
    jobs: RwLock<Vec<JobRecord>>,
}

impl AppState {
    pub fn new(config: GraphConfig, graph: GraphService) -> Self {
        Self {
            config,
            graph,
            classifier: CategoryTable::builtin(),
            jobs: RwLock::new(Vec::new()),
        }
    }

    pub fn ingester(&self) -> GraphIngester<'_> {
        GraphIngester::new(&self.graph, &self.classifier)
    }

    /// Add a job to the catalog. Ids are trimmed and must be unique.
    pub fn insert_job(&self, mut job: JobRecord) -> Result<JobRecord> {
        job.id = job.id.trim().to_string();
        job.validate()?;

        let mut jobs = self.jobs.write();
        if jobs.iter().any(|j| j.id == job.id) {
            return Err(Error::DuplicateJob(job.id));
        }
        jobs.push(job.clone());
        Ok(job)
    }

    pub fn find_job(&self, id: &str) -> Option<JobRecord> {
        let id = id.trim();
        self.jobs.read().iter().find(|j| j.id == id).cloned()
    }

    pub fn jobs(&self) -> Vec<JobRecord> {
        self.jobs.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rejects_duplicates_and_blank_ids() {
        let state = AppState::new(GraphConfig::default(), GraphService::in_memory());
        assert!(state.insert_job(JobRecord::new(" J1 ", &["Python"])).is_ok());
        assert!(matches!(
            state.insert_job(JobRecord::new("J1", &["SQL"])),
            Err(Error::DuplicateJob(_))
        ));
        assert!(matches!(
            state.insert_job(JobRecord::new("", &[])),
            Err(Error::InvalidRecord(_))
        ));
        assert_eq!(state.jobs().len(), 1);
        assert_eq!(state.find_job("J1").unwrap().skills, vec!["Python"]);
    }
}
