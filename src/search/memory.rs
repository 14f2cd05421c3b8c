// ABOUTME: In-memory search index backed by a concurrent map
// ABOUTME: Used in tests and single-process deployments without Meilisearch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::SearchIndex;
use crate::constants::search::PRIMARY_KEY;
use crate::errors::{AppError, AppResult};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// Process-local document store keyed by index uid, then document id
#[derive(Clone, Default)]
pub struct InMemorySearchIndex {
    indexes: Arc<DashMap<String, DashMap<String, Value>>>,
}

impl InMemorySearchIndex {
    /// Create an empty index set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored document, if any
    #[must_use]
    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        let docs = self.indexes.get(index)?;
        let document = docs.get(id)?.value().clone();
        Some(document)
    }

    /// Number of documents in an index
    #[must_use]
    pub fn document_count(&self, index: &str) -> usize {
        self.indexes.get(index).map_or(0, |docs| docs.len())
    }
}

#[async_trait::async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn ensure_index(&self, index: &str) -> AppResult<()> {
        self.indexes.entry(index.to_owned()).or_default();
        Ok(())
    }

    async fn upsert_document(&self, index: &str, document: &Value) -> AppResult<()> {
        let id = document
            .get(PRIMARY_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::search(format!("document for '{index}' has no string id")))?;

        self.indexes
            .entry(index.to_owned())
            .or_default()
            .insert(id.to_owned(), document.clone());
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        if let Some(docs) = self.indexes.get(index) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let index = InMemorySearchIndex::new();
        index
            .upsert_document("courses", &json!({"id": "c1", "version": 1}))
            .await
            .unwrap();
        index
            .upsert_document("courses", &json!({"id": "c1", "version": 2}))
            .await
            .unwrap();

        assert_eq!(index.document_count("courses"), 1);
        assert_eq!(index.document("courses", "c1").unwrap()["version"], 2);
    }

    #[tokio::test]
    async fn test_document_without_id_is_rejected() {
        let index = InMemorySearchIndex::new();
        let err = index
            .upsert_document("courses", &json!({"version": 1}))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::SearchError);
    }

    #[tokio::test]
    async fn test_delete_absent_document_succeeds() {
        let index = InMemorySearchIndex::new();
        index.delete_document("courses", "missing").await.unwrap();
    }
}
