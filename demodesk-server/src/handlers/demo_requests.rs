//! Demo request submission and listing

use serde_json::Value;

use crate::models::{DemoRequestIn, DemoRequestOut};
use crate::store::{Document, StoreError, StoreHandle, StoredDocument};

/// Collection holding submitted demo requests
pub const DEMO_REQUEST_COLLECTION: &str = "demorequest";

/// Persist a validated demo request.
///
/// Exactly one `create_document` call; the response is only built once the
/// store has returned an id. Store failures (including a disconnected handle)
/// are returned unchanged for the caller to surface.
pub async fn submit_demo_request(
    store: &StoreHandle,
    request: DemoRequestIn,
) -> Result<DemoRequestOut, StoreError> {
    let id = store
        .store()?
        .create_document(DEMO_REQUEST_COLLECTION, request.to_document())
        .await?;

    if id.is_empty() {
        return Err(StoreError::Backend("store returned an empty document id".into()));
    }

    tracing::info!(%id, "Demo request stored");
    Ok(DemoRequestOut::created(id, request))
}

/// Stored demo requests, newest first, optionally filtered by exact email.
pub async fn list_demo_requests(
    store: &StoreHandle,
    email: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<StoredDocument>, StoreError> {
    let mut filter = Document::new();
    if let Some(email) = email {
        filter.insert("email".into(), Value::String(email.to_owned()));
    }

    store
        .store()?
        .get_documents(DEMO_REQUEST_COLLECTION, &filter, limit)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DemoRequestPayload, EmailAddress};
    use crate::store::{DocumentStore, MemoryStore};
    use async_trait::async_trait;

    /// Store that always hands back the same id
    struct FixedIdStore(&'static str);

    #[async_trait]
    impl DocumentStore for FixedIdStore {
        fn database_name(&self) -> Result<String, StoreError> {
            Ok("fixed".into())
        }

        async fn create_document(&self, _: &str, _: Document) -> Result<String, StoreError> {
            Ok(self.0.to_owned())
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
            Ok(Vec::new())
        }
    }

    fn request(email: &str, name: Option<&str>) -> DemoRequestIn {
        DemoRequestIn::try_from(DemoRequestPayload {
            email: Some(email.into()),
            name: name.map(str::to_owned),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn echoes_fields_with_store_id() {
        let handle = StoreHandle::connected(FixedIdStore("abc123"));
        let out = submit_demo_request(&handle, request("a@b.com", Some("Ada")))
            .await
            .unwrap();

        assert_eq!(
            out,
            DemoRequestOut {
                id: "abc123".into(),
                email: EmailAddress::new("a@b.com").unwrap(),
                name: Some("Ada".into()),
                company: None,
            }
        );
    }

    #[tokio::test]
    async fn empty_id_is_an_error() {
        let handle = StoreHandle::connected(FixedIdStore(""));
        let err = submit_demo_request(&handle, request("a@b.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn write_failure_is_surfaced() {
        let handle = StoreHandle::connected(MemoryStore::new("test").fail_with("disk full"));
        let err = submit_demo_request(&handle, request("a@b.com", None))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn disconnected_store_is_surfaced() {
        let handle = StoreHandle::disconnected("DATABASE_URL is not set");
        let err = submit_demo_request(&handle, request("a@b.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn duplicates_are_accepted_and_listed() {
        let handle = StoreHandle::connected(MemoryStore::new("test"));
        let first = submit_demo_request(&handle, request("a@b.com", None)).await.unwrap();
        let second = submit_demo_request(&handle, request("a@b.com", None)).await.unwrap();
        submit_demo_request(&handle, request("c@d.com", None)).await.unwrap();
        assert_ne!(first.id, second.id);

        let listed = list_demo_requests(&handle, Some("a@b.com"), None).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);

        let all = list_demo_requests(&handle, None, Some(10)).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
