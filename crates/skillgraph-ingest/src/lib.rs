//! SkillGraph Ingest — turns job records into graph nodes and weighted edges.

pub mod ingest;

pub use ingest::{GraphIngester, IngestSummary, ReloadSummary};
