use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

/// Hard per-record ceiling of the backing document store (~1 MB).
pub const MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// The remote document database: one singleton document plus flat collections,
/// each document keyed by a store-assigned identifier.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>>;
    async fn list(&self, collection: &str) -> anyhow::Result<Vec<(String, Value)>>;
    /// Create-or-replace under a caller-chosen key.
    async fn set(&self, collection: &str, id: &str, doc: Value) -> anyhow::Result<()>;
    /// Create under a store-assigned key; returns the new identifier.
    async fn create(&self, collection: &str, doc: Value) -> anyhow::Result<String>;
    /// Create several documents as one atomic write.
    async fn create_batch(&self, collection: &str, docs: Vec<Value>) -> anyhow::Result<Vec<String>>;
    /// Merge the given top-level fields into an existing document.
    /// Fails if the document does not exist.
    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()>;
    /// Idempotent: deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()>;
}

fn ensure_document_size(doc: &Value) -> anyhow::Result<()> {
    let size = serde_json::to_vec(doc)?.len();
    anyhow::ensure!(
        size <= MAX_DOCUMENT_BYTES,
        "document of {size} bytes exceeds the {MAX_DOCUMENT_BYTES} byte record limit"
    );
    Ok(())
}

fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}

/// Documents as JSONB rows keyed by (collection, id).
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>> {
        let doc = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT data FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn list(&self, collection: &str) -> anyhow::Result<Vec<(String, Value)>> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            r#"
            SELECT id, data FROM documents
            WHERE collection = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn set(&self, collection: &str, id: &str, doc: Value) -> anyhow::Result<()> {
        ensure_document_size(&doc)?;
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, collection: &str, doc: Value) -> anyhow::Result<String> {
        ensure_document_size(&doc)?;
        let id = new_document_id();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn create_batch(&self, collection: &str, docs: Vec<Value>) -> anyhow::Result<Vec<String>> {
        for doc in &docs {
            ensure_document_size(doc)?;
        }
        let mut tx = self.pool.begin().await.context("begin batch")?;
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = new_document_id();
            sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
                .bind(collection)
                .bind(&id)
                .bind(doc)
                .execute(&mut *tx)
                .await?;
            ids.push(id);
        }
        tx.commit().await.context("commit batch")?;
        Ok(ids)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        let patch = Value::Object(fields);
        ensure_document_size(&patch)?;
        let res = sqlx::query(
            r#"
            UPDATE documents SET data = data || $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(patch)
        .execute(&self.pool)
        .await?;
        anyhow::ensure!(
            res.rows_affected() == 1,
            "no {collection} document with id {id}"
        );
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-memory stand-in with the same semantics, used by `AppState::fake()` and
/// the test suites. Insertion order is preserved.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<(String, Value)>>>,
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>> {
        let collections = self.collections.lock();
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(_, doc)| doc.clone())
        }))
    }

    async fn list(&self, collection: &str) -> anyhow::Result<Vec<(String, Value)>> {
        let collections = self.collections.lock();
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn set(&self, collection: &str, id: &str, doc: Value) -> anyhow::Result<()> {
        ensure_document_size(&doc)?;
        let mut collections = self.collections.lock();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, existing)) => *existing = doc,
            None => docs.push((id.to_string(), doc)),
        }
        Ok(())
    }

    async fn create(&self, collection: &str, doc: Value) -> anyhow::Result<String> {
        ensure_document_size(&doc)?;
        let id = new_document_id();
        let mut collections = self.collections.lock();
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), doc));
        Ok(id)
    }

    async fn create_batch(&self, collection: &str, docs: Vec<Value>) -> anyhow::Result<Vec<String>> {
        for doc in &docs {
            ensure_document_size(doc)?;
        }
        let mut collections = self.collections.lock();
        let stored = collections.entry(collection.to_string()).or_default();
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = new_document_id();
            stored.push((id.clone(), doc));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        let mut collections = self.collections.lock();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
            .map(|(_, doc)| doc)
            .with_context(|| format!("no {collection} document with id {id}"))?;
        if let Some(obj) = doc.as_object_mut() {
            for (key, value) in fields {
                obj.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
        let mut collections = self.collections.lock();
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|(doc_id, _)| doc_id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn create_assigns_unique_ids_and_preserves_order() {
        let store = MemoryDocumentStore::default();
        let first = store.create("goals", json!({"title": "a"})).await.unwrap();
        let second = store.create("goals", json!({"title": "b"})).await.unwrap();
        assert_ne!(first, second);

        let docs = store.list("goals").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].0, first);
        assert_eq!(docs[1].0, second);
    }

    #[tokio::test]
    async fn set_replaces_and_get_reads_back() {
        let store = MemoryDocumentStore::default();
        store
            .set("site_content", "main", json!({"heroName": "x"}))
            .await
            .unwrap();
        store
            .set("site_content", "main", json!({"heroName": "y"}))
            .await
            .unwrap();

        let doc = store.get("site_content", "main").await.unwrap().unwrap();
        assert_eq!(doc["heroName"], "y");
        assert_eq!(store.list("site_content").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_fields_merges_only_named_fields() {
        let store = MemoryDocumentStore::default();
        store
            .set("site_content", "main", json!({"heroName": "a", "heroRole": "b"}))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("heroRole".to_string(), json!("c"));
        store.update_fields("site_content", "main", fields).await.unwrap();

        let doc = store.get("site_content", "main").await.unwrap().unwrap();
        assert_eq!(doc["heroName"], "a");
        assert_eq!(doc["heroRole"], "c");
    }

    #[tokio::test]
    async fn update_fields_fails_for_missing_document() {
        let store = MemoryDocumentStore::default();
        let mut fields = Map::new();
        fields.insert("heroName".to_string(), json!("x"));
        let err = store
            .update_fields("site_content", "missing", fields)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryDocumentStore::default();
        let id = store.create("goals", json!({"title": "a"})).await.unwrap();
        store.delete("goals", &id).await.unwrap();
        store.delete("goals", &id).await.unwrap();
        assert!(store.list("goals").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_documents_are_refused() {
        let store = MemoryDocumentStore::default();
        let doc = json!({"image": "x".repeat(MAX_DOCUMENT_BYTES + 1)});
        let err = store.create("achievements", doc).await.unwrap_err();
        assert!(err.to_string().contains("record limit"));
    }

    #[tokio::test]
    async fn batch_create_returns_ids_in_input_order() {
        let store = MemoryDocumentStore::default();
        let ids = store
            .create_batch(
                "skills",
                vec![json!({"name": "a"}), json!({"name": "b"}), json!({"name": "c"})],
            )
            .await
            .unwrap();
        assert_eq!(ids.len(), 3);

        let docs = store.list("skills").await.unwrap();
        let listed: Vec<_> = docs.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(listed, ids);
        assert_eq!(docs[0].1["name"], "a");
        assert_eq!(docs[2].1["name"], "c");
    }
}
