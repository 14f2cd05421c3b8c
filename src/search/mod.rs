// ABOUTME: Search index abstraction for publishing flattened detail documents
// ABOUTME: Pluggable backend support (in-memory, Meilisearch) behind an object-safe trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Search factory for selecting a backend from configuration
pub mod factory;
/// Meilisearch HTTP backend
pub mod meili;
/// In-memory search index
pub mod memory;

use crate::errors::AppResult;
use serde_json::Value;

/// Document index with upsert-by-id and delete-by-id per index uid.
///
/// Documents are flat JSON objects whose `id` field is the primary key.
#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    /// Create the index if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request
    async fn ensure_index(&self, index: &str) -> AppResult<()>;

    /// Insert or replace a document by its `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no string `id` or the write fails
    async fn upsert_document(&self, index: &str, document: &Value) -> AppResult<()>;

    /// Delete a document; deleting an absent document succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request
    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()>;

    /// Verify the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the health probe fails
    async fn health_check(&self) -> AppResult<()>;
}
