//! Neo4j connection management and the write executor.

use hearth_core::{HearthError, HearthResult};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Default bounded-retry count for graph mutations.
pub const DEFAULT_WRITE_RETRIES: u32 = 3;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl GraphConfig {
    /// Read connection settings from the environment.
    ///
    /// `NEO4J_URI` and `NEO4J_USER` have development defaults;
    /// `NEO4J_PASSWORD` has none, and its absence is a startup error so the
    /// process dies before accepting any work.
    pub fn from_env() -> HearthResult<Self> {
        let uri =
            std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
        let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
        let password = std::env::var("NEO4J_PASSWORD").map_err(|_| {
            HearthError::config("NEO4J_PASSWORD is not set; refusing to start without credentials")
        })?;

        Ok(Self {
            uri,
            user,
            password,
        })
    }
}

/// Client for the Hearth knowledge graph.
///
/// Owns a lazily-initialized pooled driver. `connect()` is idempotent and
/// every write path reconnects on demand, so a transient outage only costs
/// the affected invocations.
pub struct GraphClient {
    config: GraphConfig,
    graph: RwLock<Option<Graph>>,
    write_retries: u32,
}

impl GraphClient {
    /// Create an unconnected client. No I/O happens until the first write
    /// or an explicit `connect()`.
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            graph: RwLock::new(None),
            write_retries: DEFAULT_WRITE_RETRIES,
        }
    }

    /// Override the retry budget. Used by tests and the backfill tool.
    pub fn with_write_retries(mut self, retries: u32) -> Self {
        self.write_retries = retries;
        self
    }

    /// Establish the connection pool if it does not exist yet.
    ///
    /// neo4rs uses a lazy pool: building it does not open a bolt
    /// connection, so a `RETURN 1` ping runs before the client marks itself
    /// connected. A failed ping leaves the client disconnected and the next
    /// operation will retry from scratch.
    pub async fn connect(&self) -> HearthResult<()> {
        self.ensure_connected().await.map(|_| ())
    }

    /// Whether a verified connection pool currently exists.
    pub async fn is_connected(&self) -> bool {
        self.graph.read().await.is_some()
    }

    /// Tear down the pool and reset connection state.
    pub async fn close(&self) {
        let mut guard = self.graph.write().await;
        if guard.take().is_some() {
            info!("Graph connection closed");
        }
    }

    async fn ensure_connected(&self) -> HearthResult<Graph> {
        if let Some(graph) = self.graph.read().await.as_ref() {
            return Ok(graph.clone());
        }

        let mut guard = self.graph.write().await;
        // Another caller may have connected while we waited for the lock.
        if let Some(graph) = guard.as_ref() {
            return Ok(graph.clone());
        }

        let neo4j_config = ConfigBuilder::default()
            .uri(&self.config.uri)
            .user(&self.config.user)
            .password(&self.config.password)
            .db("neo4j")
            .max_connections(10)
            .fetch_size(20)
            .build()?;

        let graph = Graph::connect(neo4j_config).await?;

        // Force an actual TCP+bolt handshake before reporting liveness.
        graph.run(Query::new("RETURN 1".to_string())).await?;

        info!(uri = %self.config.uri, "Connected to Neo4j");
        let handle = graph.clone();
        *guard = Some(graph);
        Ok(handle)
    }

    /// Execute a single graph mutation with bounded retries.
    ///
    /// The sole path through which mutations reach the graph. Each attempt
    /// lazily reconnects, so connectivity failures are retried the same way
    /// statement failures are: exponential backoff of `2^attempt` seconds
    /// (2s, 4s, 8s) between attempts, then the last error is re-thrown.
    /// Each statement is its own implicit transaction; there is no batching
    /// across statements.
    pub async fn execute_write(&self, query: Query) -> HearthResult<()> {
        self.write_with_retry(query, None).await.map(|_| ())
    }

    /// Execute a mutation whose statement returns a single integer column,
    /// e.g. a match count used to detect not-yet-synced entities. Retry
    /// semantics are identical to [`execute_write`](Self::execute_write).
    pub async fn execute_write_counting(&self, query: Query, field: &str) -> HearthResult<i64> {
        self.write_with_retry(query, Some(field)).await
    }

    async fn write_with_retry(&self, query: Query, count_field: Option<&str>) -> HearthResult<i64> {
        let mut attempt = 0u32;
        loop {
            match self.try_write(query.clone(), count_field).await {
                Ok(count) => return Ok(count),
                Err(err) => {
                    if attempt >= self.write_retries {
                        return Err(err);
                    }
                    attempt += 1;
                    let delay = Duration::from_secs(2u64.pow(attempt));
                    warn!(
                        attempt,
                        max_retries = self.write_retries,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "Graph write failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn try_write(&self, query: Query, count_field: Option<&str>) -> HearthResult<i64> {
        let graph = self.ensure_connected().await?;

        match count_field {
            None => {
                graph.run(query).await?;
                Ok(0)
            }
            Some(field) => {
                let mut stream = graph.execute(query).await?;
                let mut count = 0i64;
                while let Some(row) = stream.next().await? {
                    count = row.get::<i64>(field).unwrap_or(0);
                }
                Ok(count)
            }
        }
    }

    /// Get node and relationship counts for status display.
    pub async fn get_counts(&self) -> HearthResult<GraphCounts> {
        let graph = self.ensure_connected().await?;

        let nodes = Self::scalar(
            &graph,
            Query::new("MATCH (n) RETURN count(n) as count".to_string()),
        )
        .await?;
        let relationships = Self::scalar(
            &graph,
            Query::new("MATCH ()-[r]->() RETURN count(r) as count".to_string()),
        )
        .await?;

        debug!(nodes, relationships, "Fetched graph counts");
        Ok(GraphCounts {
            nodes: nodes as usize,
            relationships: relationships as usize,
        })
    }

    async fn scalar(graph: &Graph, query: Query) -> HearthResult<i64> {
        let mut stream = graph.execute(query).await?;
        if let Some(row) = stream.next().await? {
            Ok(row.get::<i64>("count").unwrap_or(0))
        } else {
            Ok(0)
        }
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_requires_password() {
        std::env::remove_var("NEO4J_PASSWORD");
        let err = GraphConfig::from_env().unwrap_err();
        assert!(matches!(err, HearthError::Config(_)));

        std::env::set_var("NEO4J_PASSWORD", "sync_test_pw");
        let config = GraphConfig::from_env().unwrap();
        assert_eq!(config.password, "sync_test_pw");
        std::env::remove_var("NEO4J_PASSWORD");
    }

    #[tokio::test]
    async fn test_client_starts_disconnected() {
        let client = GraphClient::new(GraphConfig {
            uri: "bolt://127.0.0.1:1".to_string(),
            user: "neo4j".to_string(),
            password: "pw".to_string(),
        });
        assert!(!client.is_connected().await);

        client.close().await;
        assert!(!client.is_connected().await);
    }
}
