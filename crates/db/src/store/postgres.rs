//! Postgres-backed document store: one JSONB row per document.

use async_trait::async_trait;
use sqlx::FromRow;

use super::{Document, DocumentStore, StoreError};
use crate::DbPool;

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: serde_json::Value,
}

/// Documents live in the `documents` table keyed by `(collection, id)`.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Document {
                id: r.id,
                data: r.data,
            })
            .collect())
    }

    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.data))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) \
             DO UPDATE SET data = EXCLUDED.data, updated_at = now()",
        )
        .bind(collection)
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
