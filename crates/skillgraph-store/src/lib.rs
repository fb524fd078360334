//! SkillGraph Store — skill relationship graph with Neo4j and in-memory backends.

pub mod backend;
pub mod graph;
pub mod neo4j;
pub mod schema;
pub mod service;
pub mod types;

pub use backend::GraphStore;
pub use graph::InMemoryGraph;
pub use neo4j::Neo4jGraph;
pub use service::{BackendHealth, GraphService};
pub use types::*;
