//! Neo4j connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph};

use mythos_core::config::GraphSettings;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    /// A write that must produce a record produced none (e.g. the store
    /// reported no created node).
    #[error("Database error: {0}")]
    Database(String),

    /// The targeted identity does not exist for this label.
    #[error("Node not found: {label} with id {id}")]
    NotFound { label: &'static str, id: i64 },

    /// A guarded delete was refused because the node still has incident
    /// relationships. The node is left untouched.
    #[error("{label} node {id} has {rel_count} relationships and cannot be deleted")]
    Conflict {
        label: &'static str,
        id: i64,
        rel_count: i64,
    },

    /// A raw property map failed validation or temporal normalization.
    #[error("Hydration error: {0}")]
    Hydration(String),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "mythos-dev".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

impl From<GraphSettings> for GraphConfig {
    fn from(settings: GraphSettings) -> Self {
        Self {
            uri: settings.uri,
            user: settings.user,
            password: settings.password,
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Owns the transaction boundary: callers open a [`neo4rs::Txn`] here, pass
/// it to DAO calls, and commit or roll back themselves. Clone is cheap
/// (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Begin a transaction. The caller owns commit/rollback.
    pub async fn start_txn(&self) -> Result<neo4rs::Txn, GraphError> {
        Ok(self.graph.start_txn().await?)
    }
}
