//! In-process document store.
//!
//! Keeps documents in insertion order per collection. Used by tests and
//! local development; failures can be injected to exercise fallback and
//! rollback paths.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use folio_core::types::DocId;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, StoreError};

#[derive(Debug, Default)]
struct Faults {
    reads: bool,
    deletes: bool,
    writes_for: HashSet<DocId>,
}

/// Thread-safe via interior `RwLock`; wrap in `Arc` to share.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    faults: RwLock<Faults>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `list`/`get` fail (or succeed again).
    pub async fn fail_reads(&self, fail: bool) {
        self.faults.write().await.reads = fail;
    }

    /// Make every `delete` fail (or succeed again).
    pub async fn fail_deletes(&self, fail: bool) {
        self.faults.write().await.deletes = fail;
    }

    /// Make `set` fail for the document with this id in any collection.
    pub async fn fail_writes_for(&self, id: impl Into<DocId>) {
        self.faults.write().await.writes_for.insert(id.into());
    }

    /// Number of documents currently in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn injected(what: &str) -> StoreError {
        StoreError::Unavailable(format!("injected {what} failure"))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        if self.faults.read().await.reads {
            return Err(Self::injected("read"));
        }
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        if self.faults.read().await.reads {
            return Err(Self::injected("read"));
        }
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .map(|d| d.data.clone()))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<(), StoreError> {
        if self.faults.read().await.writes_for.contains(id) {
            return Err(Self::injected("write"));
        }
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.data = data,
            None => docs.push(Document {
                id: id.to_string(),
                data,
            }),
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if self.faults.read().await.deletes {
            return Err(Self::injected("delete"));
        }
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn set_overwrites_in_place() {
        let store = MemoryDocumentStore::new();
        store.set("c", "a", json!({ "v": 1 })).await.unwrap();
        store.set("c", "b", json!({ "v": 2 })).await.unwrap();
        store.set("c", "a", json!({ "v": 3 })).await.unwrap();

        let docs = store.list("c").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[0].data, json!({ "v": 3 }));
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let store = MemoryDocumentStore::new();
        assert!(store.delete("c", "ghost").await.is_ok());
    }

    #[tokio::test]
    async fn injected_faults() {
        let store = MemoryDocumentStore::new();
        store.fail_writes_for("x").await;
        assert_matches!(
            store.set("c", "x", json!({})).await,
            Err(StoreError::Unavailable(_))
        );
        assert!(store.set("c", "y", json!({})).await.is_ok());

        store.fail_reads(true).await;
        assert!(store.list("c").await.is_err());
        assert!(store.get("c", "y").await.is_err());
        store.fail_reads(false).await;
        assert_eq!(store.get("c", "y").await.unwrap(), Some(json!({})));
    }
}
