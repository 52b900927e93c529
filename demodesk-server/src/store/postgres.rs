//! PostgreSQL document store
//!
//! The logical database is a Postgres schema; each collection is a table of
//! JSONB documents created on first write:
//!
//! ```sql
//! CREATE TABLE "<schema>"."<collection>" (
//!     id UUID PRIMARY KEY,
//!     data JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! )
//! ```

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CollectionName, Document, DocumentStore, StoreError, StoredDocument};

/// Postgres SQLSTATE for "relation does not exist"
const UNDEFINED_TABLE: &str = "42P01";

/// Create a PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
/// * `acquire_timeout` - How long to wait for a connection before failing
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Json<Document>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id.to_string(),
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Document store backed by JSONB tables
pub struct PgDocumentStore {
    pool: PgPool,
    schema: CollectionName,
    /// Collections whose table is known to exist
    ensured: Mutex<HashSet<CollectionName>>,
}

impl PgDocumentStore {
    /// Connect and make sure the schema for `database_name` exists.
    pub async fn connect(
        database_url: &str,
        database_name: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let schema = CollectionName::new(database_name)?;
        let pool = create_pool(database_url, max_connections, acquire_timeout).await?;
        Self::with_pool(pool, schema).await
    }

    /// Wrap an existing pool.
    pub async fn with_pool(pool: PgPool, schema: CollectionName) -> Result<Self, StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema.quoted()))
            .execute(&pool)
            .await?;

        Ok(Self {
            pool,
            schema,
            ensured: Mutex::new(HashSet::new()),
        })
    }

    fn table(&self, collection: &CollectionName) -> String {
        format!("{}.{}", self.schema.quoted(), collection.quoted())
    }

    /// Create the collection table on first use. Holding the lock serializes
    /// concurrent first writes to the same process.
    async fn ensure_collection(&self, collection: &CollectionName) -> Result<(), StoreError> {
        let mut ensured = self.ensured.lock().await;
        if ensured.contains(collection) {
            return Ok(());
        }

        let table = self.table(collection);
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS \"{}_created_at_idx\" ON {table} (created_at DESC)",
            collection.as_str()
        ))
        .execute(&self.pool)
        .await?;

        tracing::debug!(schema = %self.schema.as_str(), collection = %collection.as_str(), "Collection ready");
        ensured.insert(collection.clone());
        Ok(())
    }
}

fn is_undefined_table(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNDEFINED_TABLE))
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn database_name(&self) -> Result<String, StoreError> {
        Ok(self.schema.as_str().to_owned())
    }

    async fn create_document(&self, collection: &str, data: Document) -> Result<String, StoreError> {
        let collection = CollectionName::new(collection)?;
        self.ensure_collection(&collection).await?;

        let id = Uuid::new_v4();
        sqlx::query(&format!(
            "INSERT INTO {} (id, data) VALUES ($1, $2)",
            self.table(&collection)
        ))
        .bind(id)
        .bind(Json(&data))
        .execute(&self.pool)
        .await?;

        tracing::debug!(collection = %collection.as_str(), %id, "Document created");
        Ok(id.to_string())
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<u32>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let collection = CollectionName::new(collection)?;

        // LIMIT NULL means no limit
        let result: Result<Vec<DocumentRow>, sqlx::Error> = sqlx::query_as(&format!(
            r#"
            SELECT id, data, created_at, updated_at
            FROM {}
            WHERE data @> $1
            ORDER BY created_at DESC, id
            LIMIT $2
            "#,
            self.table(&collection)
        ))
        .bind(Json(filter))
        .bind(limit.map(i64::from))
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => Ok(rows.into_iter().map(StoredDocument::from).collect()),
            Err(e) if is_undefined_table(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn count_documents(&self, collection: &str, filter: &Document) -> Result<u64, StoreError> {
        let collection = CollectionName::new(collection)?;

        let result: Result<i64, sqlx::Error> = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE data @> $1",
            self.table(&collection)
        ))
        .bind(Json(filter))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(count) => Ok(count.max(0) as u64),
            Err(e) if is_undefined_table(&e) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = $1
            ORDER BY table_name
            "#,
        )
        .bind(self.schema.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p demodesk-server -- --ignored

    async fn test_store() -> PgDocumentStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let schema = format!("demodesk_test_{}", Uuid::new_v4().simple());
        PgDocumentStore::connect(&url, &schema, 2, Duration::from_secs(5))
            .await
            .expect("store connection failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_count_and_list() {
        let store = test_store().await;
        let doc = json!({"email": "a@b.com", "name": "Ada"})
            .as_object()
            .cloned()
            .unwrap();

        let id = store.create_document("demorequest", doc).await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let count = store
            .count_documents("demorequest", &Document::new())
            .await
            .unwrap();
        assert_eq!(count, 1);

        let names = store.list_collection_names().await.unwrap();
        assert_eq!(names, vec!["demorequest"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_collection_reads_empty() {
        let store = test_store().await;

        let count = store.count_documents("nothing", &Document::new()).await.unwrap();
        assert_eq!(count, 0);

        let docs = store
            .get_documents("nothing", &Document::new(), Some(10))
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn filter_by_field() {
        let store = test_store().await;
        for email in ["a@b.com", "c@d.com"] {
            let doc = json!({"email": email}).as_object().cloned().unwrap();
            store.create_document("demorequest", doc).await.unwrap();
        }

        let filter = json!({"email": "c@d.com"}).as_object().cloned().unwrap();
        let docs = store
            .get_documents("demorequest", &filter, None)
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].data["email"], "c@d.com");
    }
}
