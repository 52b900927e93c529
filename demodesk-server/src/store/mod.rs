//! Document store layer - adapter trait and startup handle
//!
//! # Design Principles
//!
//! - One trait (`DocumentStore`) at the seam, with Postgres and in-memory backends
//! - The handle is resolved once at startup: `Connected` or `Disconnected(reason)`
//! - Failing to connect is never fatal; callers decide whether to surface or degrade
//! - Every write is a single INSERT - no multi-document transactions

pub mod collection;
pub mod memory;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DatabaseConfig;

pub use collection::CollectionName;
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// JSON object stored in a collection
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Document as read back from a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database not available: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// Document store operations (testable)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Logical database name this store writes into.
    fn database_name(&self) -> Result<String, StoreError>;

    /// Insert one document, returning its new id.
    async fn create_document(&self, collection: &str, data: Document) -> Result<String, StoreError>;

    /// Documents whose top-level fields contain `filter`, newest first.
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<u32>,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Number of documents whose top-level fields contain `filter`.
    async fn count_documents(&self, collection: &str, filter: &Document) -> Result<u64, StoreError>;

    /// Collection names in this database, sorted.
    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Store handle established once at startup
#[derive(Clone)]
pub enum StoreHandle {
    Connected(Arc<dyn DocumentStore>),
    Disconnected(String),
}

impl StoreHandle {
    pub fn connected(store: impl DocumentStore + 'static) -> Self {
        Self::Connected(Arc::new(store))
    }

    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self::Disconnected(reason.into())
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// The live store, or `StoreError::Unavailable` carrying the startup reason.
    pub fn store(&self) -> Result<&dyn DocumentStore, StoreError> {
        match self {
            Self::Connected(store) => Ok(store.as_ref()),
            Self::Disconnected(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected(store) => f
                .debug_tuple("Connected")
                .field(&store.database_name().unwrap_or_default())
                .finish(),
            Self::Disconnected(reason) => f.debug_tuple("Disconnected").field(reason).finish(),
        }
    }
}

/// Resolve the store handle for this process.
///
/// Never fails: a missing URL or a failed connection yields `Disconnected`.
pub async fn connect(config: &DatabaseConfig) -> StoreHandle {
    let Some(url) = config.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, running without a document store");
        return StoreHandle::disconnected(
            "DATABASE_URL is not set. Check DATABASE_URL and DATABASE_NAME env vars.",
        );
    };

    match PgDocumentStore::connect(url, &config.name, config.max_connections, config.connect_timeout)
        .await
    {
        Ok(store) => {
            tracing::info!(database = %config.name, "Document store connected");
            StoreHandle::connected(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Document store unavailable, continuing in degraded mode");
            StoreHandle::disconnected(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn disconnected_store_is_unavailable() {
        let handle = StoreHandle::disconnected("no url");
        assert!(!handle.is_connected());

        let err = handle.store().err().unwrap();
        assert!(matches!(err, StoreError::Unavailable(ref r) if r == "no url"));
        assert_eq!(err.to_string(), "Database not available: no url");
    }

    #[test]
    fn connected_store_is_reachable() {
        let handle = StoreHandle::connected(MemoryStore::new("demo"));
        assert!(handle.is_connected());
        assert_eq!(handle.store().unwrap().database_name().unwrap(), "demo");
    }

    #[tokio::test]
    async fn connect_without_url_is_disconnected() {
        let config = DatabaseConfig {
            url: None,
            name: "demodesk".into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(1),
        };

        let handle = connect(&config).await;
        assert!(matches!(handle, StoreHandle::Disconnected(ref r) if r.contains("DATABASE_URL")));
    }

    #[tokio::test]
    async fn connect_with_bad_url_is_disconnected() {
        let config = DatabaseConfig {
            url: Some("not a url".into()),
            name: "demodesk".into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(1),
        };

        let handle = connect(&config).await;
        assert!(!handle.is_connected());
    }
}
