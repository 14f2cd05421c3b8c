// ABOUTME: Search upserter flattening detail aggregates into one document per root
// ABOUTME: Child rows travel as JSON-encoded string blobs so every family shares a flat schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::config::environment::SearchConfig;
use crate::constants::search::{PRIMARY_KEY, STATUS_FIELD};
use crate::errors::AppResult;
use crate::models::{CompletionStatus, ContentFamily, Detail, RootEntity};
use crate::search::SearchIndex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Flatten an aggregate into its search document
///
/// # Errors
///
/// Returns an error if a child row fails to serialize
pub fn build_document<R: RootEntity>(
    detail: &Detail<R>,
    status: CompletionStatus,
) -> AppResult<Value> {
    let root = &detail.root;
    let mut document = root.search_fields();

    document.insert(PRIMARY_KEY.into(), json!(root.id().to_string()));
    document.insert("type".into(), json!(root.type_tag()));
    document.insert("version".into(), json!(root.version()));
    document.insert(STATUS_FIELD.into(), json!(status.as_str()));
    document.extend(detail.branch.search_blobs()?);

    Ok(Value::Object(document))
}

/// Publishes aggregates to the per-family search indexes
#[derive(Clone)]
pub struct SearchPublisher {
    index: Arc<dyn SearchIndex>,
    config: SearchConfig,
}

impl SearchPublisher {
    /// Create a publisher with the index uids from `config`
    #[must_use]
    pub fn new(index: Arc<dyn SearchIndex>, config: SearchConfig) -> Self {
        Self { index, config }
    }

    /// Index uid of a family
    #[must_use]
    pub fn index_for(&self, family: ContentFamily) -> &str {
        self.config.index_for(family)
    }

    /// Insert or replace the document of `detail`
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be built or the index rejects it
    pub async fn upsert<R: RootEntity>(
        &self,
        detail: &Detail<R>,
        status: CompletionStatus,
    ) -> AppResult<()> {
        let document = build_document(detail, status)?;
        let index = self.index_for(R::FAMILY);

        self.index
            .upsert_document(index, &document)
            .await
            .map_err(|e| e.with_resource_id(detail.root.id().to_string()))?;

        debug!(search.index = %index, content.root_id = %detail.root.id(), "Document upserted");
        Ok(())
    }

    /// Remove the document of a root
    ///
    /// # Errors
    ///
    /// Returns an error if the index rejects the delete
    pub async fn delete_from_index(&self, family: ContentFamily, root_id: Uuid) -> AppResult<()> {
        self.index
            .delete_document(self.index_for(family), &root_id.to_string())
            .await
            .map_err(|e| e.with_resource_id(root_id.to_string()))
    }
}
