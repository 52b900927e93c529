//! Store diagnostics for GET /test
//!
//! Sub-checks are independent: a failing one only changes its own fields.

use super::{best_effort, preview};
use crate::config::{EnvSource, DATABASE_NAME_VAR, DATABASE_URL_VAR};
use crate::models::DiagnosticsReport;
use crate::store::{DocumentStore, StoreError, StoreHandle};

/// Most collection names included in a report
const MAX_LISTED_COLLECTIONS: usize = 10;

/// Characters of an error message kept in a report
const ERROR_PREVIEW_CHARS: usize = 50;

pub async fn diagnostics(store: &StoreHandle, env: &EnvSource) -> DiagnosticsReport {
    let mut report = DiagnosticsReport {
        backend: "✅ Running".into(),
        database: "⚠️  Available but not initialized".into(),
        database_url: presence(env, DATABASE_URL_VAR),
        database_name: presence(env, DATABASE_NAME_VAR),
        connection_status: "Not Connected".into(),
        active_database: None,
        collections: Vec::new(),
    };

    let StoreHandle::Connected(store) = store else {
        return report;
    };

    report.database = "✅ Available".into();
    report.connection_status = "Connected".into();
    report.active_database = best_effort("database_name", store.database_name());

    match list_collections(store.as_ref()).await {
        Ok(names) => {
            report.collections = names;
            report.database = "✅ Connected & Working".into();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Collection listing failed");
            report.database = format!(
                "⚠️  Connected but Error: {}",
                preview(&e.to_string(), ERROR_PREVIEW_CHARS)
            );
        }
    }

    report
}

async fn list_collections(store: &dyn DocumentStore) -> Result<Vec<String>, StoreError> {
    let mut names = store.list_collection_names().await?;
    names.truncate(MAX_LISTED_COLLECTIONS);
    Ok(names)
}

fn presence(env: &EnvSource, var: &str) -> String {
    if env.is_set(var) {
        "✅ Set".into()
    } else {
        "❌ Not Set".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, MemoryStore, StoredDocument};
    use async_trait::async_trait;

    /// Lists collections but cannot report its database name
    struct NamelessStore;

    #[async_trait]
    impl DocumentStore for NamelessStore {
        fn database_name(&self) -> Result<String, StoreError> {
            Err(StoreError::Backend("name lookup refused".into()))
        }

        async fn create_document(&self, _: &str, _: Document) -> Result<String, StoreError> {
            Ok("id".into())
        }

        async fn get_documents(
            &self,
            _: &str,
            _: &Document,
            _: Option<u32>,
        ) -> Result<Vec<StoredDocument>, StoreError> {
            Ok(Vec::new())
        }

        async fn count_documents(&self, _: &str, _: &Document) -> Result<u64, StoreError> {
            Ok(0)
        }

        async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
            Ok(vec!["demorequest".into()])
        }
    }

    #[tokio::test]
    async fn disconnected_report_still_checks_env() {
        let env = EnvSource::fixed([("DATABASE_URL", "postgres://db/demo")]);
        let report = diagnostics(&StoreHandle::disconnected("refused"), &env).await;

        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.connection_status, "Not Connected");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert!(report.active_database.is_none());
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn working_store_lists_first_ten() {
        let store = MemoryStore::new("leads");
        for i in 0..12 {
            store
                .create_document(&format!("c{:02}", i), Document::new())
                .await
                .unwrap();
        }

        let env = EnvSource::Fixed(Default::default());
        let report = diagnostics(&StoreHandle::connected(store), &env).await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.active_database.as_deref(), Some("leads"));
        assert_eq!(report.collections.len(), 10);
        assert_eq!(report.collections[0], "c00");
        assert_eq!(report.collections[9], "c09");
    }

    #[tokio::test]
    async fn listing_failure_is_truncated_and_contained() {
        let message = "x".repeat(80);
        let handle = StoreHandle::connected(MemoryStore::new("leads").fail_with(message));
        let env = EnvSource::fixed([("DATABASE_URL", "u"), ("DATABASE_NAME", "n")]);

        let report = diagnostics(&handle, &env).await;
        assert_eq!(
            report.database,
            format!("⚠️  Connected but Error: {}", "x".repeat(50))
        );
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.active_database.as_deref(), Some("leads"));
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "✅ Set");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn failed_name_lookup_leaves_other_checks_intact() {
        let env = EnvSource::Fixed(Default::default());
        let report = diagnostics(&StoreHandle::connected(NamelessStore), &env).await;

        assert!(report.active_database.is_none());
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections, vec!["demorequest".to_string()]);
    }
}
