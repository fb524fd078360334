//! Configuration loaded from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default timeout for the startup connectivity check.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default HTTP port of the server binary.
pub const DEFAULT_PORT: u16 = 5050;

/// Connection settings for the persistent graph backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Neo4jSettings {
    /// Bolt endpoint, e.g. `bolt://localhost:7687`.
    pub uri: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Top-level SkillGraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// HTTP server port.
    pub port: u16,
    /// Persistent backend settings. `None` forces the in-memory index.
    pub neo4j: Option<Neo4jSettings>,
    /// Upper bound on the startup connectivity check.
    pub connect_timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            neo4j: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl GraphConfig {
    /// Create configuration from process environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// All three of `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD` must be
    /// present and non-blank for the persistent backend to be configured.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let neo4j = match (
            non_blank("NEO4J_URI"),
            non_blank("NEO4J_USER"),
            non_blank("NEO4J_PASSWORD"),
        ) {
            (Some(uri), Some(user), Some(password)) => Some(Neo4jSettings {
                uri,
                user,
                password,
            }),
            _ => None,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let timeout_secs = lookup("NEO4J_CONNECT_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        Self {
            port,
            neo4j,
            connect_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
