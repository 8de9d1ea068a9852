//! The remote document store seam.
//!
//! A store is a set of named collections holding JSON documents addressed
//! by string id. The only access patterns are read-all, get-by-id,
//! set-by-id (full overwrite) and delete-by-id.

use async_trait::async_trait;
use folio_core::types::DocId;

pub mod memory;
pub mod postgres;
pub mod unconfigured;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use unconfigured::UnconfiguredStore;

/// Collection holding one document per project, keyed by project id.
pub const PROJECTS_COLLECTION: &str = "projects";
/// Collection holding the profile singleton.
pub const SETTINGS_COLLECTION: &str = "settings";
/// Fixed id of the profile document inside [`SETTINGS_COLLECTION`].
pub const PROFILE_DOC_ID: &str = "user_profile";

/// A stored document: its id and raw JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocId,
    pub data: serde_json::Value,
}

/// Errors from a document store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The Postgres backend failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store is not configured or refused the operation.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`, in store iteration order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str)
        -> Result<Option<serde_json::Value>, StoreError>;

    /// Create or fully overwrite a document.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<(), StoreError>;

    /// Remove a document. Removing a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
