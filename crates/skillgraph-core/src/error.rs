//! Error types for SkillGraph.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Invalid job record: {0}")]
    InvalidRecord(String),

    #[error("Duplicate job id: {0}")]
    DuplicateJob(String),
}

pub type Result<T> = std::result::Result<T, Error>;
