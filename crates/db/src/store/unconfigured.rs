//! Stand-in used when no database is configured.
//!
//! Every operation fails with [`StoreError::Unavailable`], so reads fall
//! back to seed data and writes are reported as failed.

use async_trait::async_trait;

use super::{Document, DocumentStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct UnconfiguredStore;

impl UnconfiguredStore {
    fn unavailable() -> StoreError {
        StoreError::Unavailable("no document store is configured (DATABASE_URL unset)".into())
    }
}

#[async_trait]
impl DocumentStore for UnconfiguredStore {
    async fn list(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(Self::unavailable())
    }

    async fn get(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Err(Self::unavailable())
    }

    async fn set(
        &self,
        _collection: &str,
        _id: &str,
        _data: serde_json::Value,
    ) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }
}
