//! In-process document store
//!
//! Backs `serve --memory` and the test suite. `fail_with` switches every
//! collection operation to an error so degraded paths can be exercised.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CollectionName, Document, DocumentStore, StoreError, StoredDocument};

/// In-memory document store
pub struct MemoryStore {
    name: String,
    collections: RwLock<BTreeMap<CollectionName, Vec<StoredDocument>>>,
    failure: Mutex<Option<String>>,
    write_attempts: AtomicUsize,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
            failure: Mutex::new(None),
            write_attempts: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent collection operation fail with `message`.
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        self.set_failure(Some(message.into()));
        self
    }

    /// Set or clear the injected failure.
    pub fn set_failure(&self, message: Option<String>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = message;
        }
    }

    /// Number of `create_document` calls, successful or not.
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        let failure = self
            .failure
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))?;

        match failure.as_ref() {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

/// Top-level field containment, matching Postgres `data @> filter` for flat filters.
fn matches(data: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| data.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> Result<String, StoreError> {
        Ok(self.name.clone())
    }

    async fn create_document(&self, collection: &str, data: Document) -> Result<String, StoreError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let collection = CollectionName::new(collection)?;

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                data,
                created_at: now,
                updated_at: now,
            });

        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<u32>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_failure()?;
        let collection = CollectionName::new(collection)?;

        let collections = self.collections.read().await;
        let limit = limit.map_or(usize::MAX, |n| n as usize);
        let docs = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .rev()
                    .filter(|doc| matches(&doc.data, filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(docs)
    }

    async fn count_documents(&self, collection: &str, filter: &Document) -> Result<u64, StoreError> {
        self.check_failure()?;
        let collection = CollectionName::new(collection)?;

        let collections = self.collections.read().await;
        let count = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| matches(&doc.data, filter)).count())
            .unwrap_or(0);

        Ok(count as u64)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.check_failure()?;

        let collections = self.collections.read().await;
        Ok(collections.keys().map(|name| name.as_str().to_owned()).collect())
    }
}
