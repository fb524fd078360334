//! SkillGraph Core — error type, configuration, job records, skill categories.

pub mod category;
pub mod config;
pub mod error;
pub mod job;

pub use category::{CategoryTable, SkillClassifier, DEFAULT_CATEGORY};
pub use config::{GraphConfig, Neo4jSettings};
pub use error::{Error, Result};
pub use job::{parse_skill_list, JobRecord};
