//! Configuration for Mythos services.
//!
//! Settings are loaded from `mythos.toml` (`[neo4j]` section) or
//! `MYTHOS__`-prefixed environment variables by the binaries; this module
//! only defines the deserializable shapes and their defaults.

use serde::Deserialize;

/// Connection settings for the Neo4j graph store.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphSettings {
    /// Bolt URI (default: "bolt://localhost:7687").
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database user (default: "neo4j").
    #[serde(default = "default_user")]
    pub user: String,

    /// Database password.
    #[serde(default = "default_password")]
    pub password: String,

    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Rows fetched per batch when streaming results.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "mythos-dev".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}
