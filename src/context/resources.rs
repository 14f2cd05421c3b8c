// ABOUTME: Shared server resources holding the store, cache, search index, updator, and services
// ABOUTME: Built from configuration at startup or from injected backends in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::cache::factory::Cache;
use crate::cache::CacheProvider;
use crate::config::environment::{SearchConfig, ServerConfig};
use crate::database::repositories::{ChildRepository, ChildRepositoryImpl};
use crate::database::Database;
use crate::errors::AppResult;
use crate::search::factory::Search;
use crate::search::SearchIndex;
use crate::services::{CourseService, GrammarService, ListeningService};
use crate::sync::{DetailBuilder, DetailCache, LoaderRegistry, SearchPublisher, Updator};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything a request or a job needs, cheap to clone
#[derive(Clone)]
pub struct ServerResources {
    /// Relational store
    pub database: Database,
    /// Cache backend
    pub cache: Arc<dyn CacheProvider>,
    /// Search backend
    pub search: Arc<dyn SearchIndex>,
    /// Publication pipeline shared by every service
    pub updator: Arc<Updator>,
    /// Listening family service
    pub listening: ListeningService,
    /// Grammar family service
    pub grammar: GrammarService,
    /// Course family service
    pub courses: CourseService,
}

impl ServerResources {
    /// Connect every backend named by `config` and wire the services
    ///
    /// # Errors
    ///
    /// Returns an error if the database, cache, or search backend cannot be initialized
    pub async fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database).await?;

        let cache = Cache::new(config.cache.clone()).await?;
        let search = Search::new(&config.search).await?;
        info!(
            cache.backend = cache.backend_name(),
            search.backend = search.backend_name(),
            "Backends initialized"
        );

        Ok(Self::new(
            database,
            Arc::new(cache),
            Arc::new(search),
            config.search.clone(),
            config.cache.detail_ttl,
        ))
    }

    /// Wire services over already-constructed backends
    #[must_use]
    pub fn new(
        database: Database,
        cache: Arc<dyn CacheProvider>,
        search: Arc<dyn SearchIndex>,
        search_config: SearchConfig,
        detail_ttl: Duration,
    ) -> Self {
        let repo: Arc<dyn ChildRepository> = Arc::new(ChildRepositoryImpl::new(database.clone()));
        let updator = Arc::new(Updator::new(
            database.clone(),
            DetailBuilder::new(LoaderRegistry::with_defaults(&repo)),
            DetailCache::new(cache.clone(), detail_ttl),
            SearchPublisher::new(search.clone(), search_config),
        ));

        Self {
            listening: ListeningService::new(database.clone(), updator.clone()),
            grammar: GrammarService::new(database.clone(), updator.clone()),
            courses: CourseService::new(database.clone(), updator.clone()),
            database,
            cache,
            search,
            updator,
        }
    }
}
