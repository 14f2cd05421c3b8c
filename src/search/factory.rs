// ABOUTME: Search factory for configuration-based backend selection
// ABOUTME: Picks Meilisearch when a URL is configured, otherwise the in-memory index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::{meili::MeiliSearchIndex, memory::InMemorySearchIndex, SearchIndex};
use crate::config::environment::SearchConfig;
use crate::errors::AppResult;
use crate::models::ContentFamily;
use serde_json::Value;

/// Unified search index over the configured backend
#[derive(Clone)]
pub enum Search {
    /// Process-local index
    Memory(InMemorySearchIndex),
    /// Meilisearch instance
    Meili(MeiliSearchIndex),
}

impl Search {
    /// Create the backend and make sure every family index exists
    ///
    /// # Errors
    ///
    /// Returns an error if Meilisearch is configured but an index cannot be created
    pub async fn new(config: &SearchConfig) -> AppResult<Self> {
        let search = match &config.meili_url {
            Some(url) => {
                tracing::info!(url = %url, "Initializing Meilisearch backend");
                Self::Meili(MeiliSearchIndex::new(url, config.meili_api_key.clone())?)
            }
            None => {
                tracing::info!("Initializing in-memory search index");
                Self::Memory(InMemorySearchIndex::new())
            }
        };

        for family in ContentFamily::ALL {
            search.ensure_index(config.index_for(family)).await?;
        }
        Ok(search)
    }

    /// Backend name for logs and health output
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Meili(_) => "meilisearch",
        }
    }

    fn provider(&self) -> &dyn SearchIndex {
        match self {
            Self::Memory(index) => index,
            Self::Meili(index) => index,
        }
    }
}

#[async_trait::async_trait]
impl SearchIndex for Search {
    async fn ensure_index(&self, index: &str) -> AppResult<()> {
        self.provider().ensure_index(index).await
    }

    async fn upsert_document(&self, index: &str, document: &Value) -> AppResult<()> {
        self.provider().upsert_document(index, document).await
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        self.provider().delete_document(index, id).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.provider().health_check().await
    }
}
