// ABOUTME: Cache factory for environment-based backend selection
// ABOUTME: Picks Redis when a URL is configured, otherwise the in-memory LRU cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::{memory::InMemoryCache, redis::RedisCache, CacheConfig, CacheProvider};
use crate::errors::AppResult;
use std::time::Duration;

/// Unified cache over the configured backend
#[derive(Clone)]
pub enum Cache {
    /// Process-local LRU cache
    Memory(InMemoryCache),
    /// Shared Redis cache
    Redis(RedisCache),
}

impl Cache {
    /// Create new cache instance based on configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis backend is configured but unreachable
    pub async fn new(config: CacheConfig) -> AppResult<Self> {
        if config.redis_url.is_some() {
            tracing::info!("Initializing Redis cache backend");
            return Ok(Self::Redis(RedisCache::connect(&config).await?));
        }

        tracing::info!(
            "Initializing in-memory cache (max entries: {})",
            config.max_entries
        );
        Ok(Self::Memory(InMemoryCache::new(config)))
    }

    /// Backend name for logs and health output
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }

    fn provider(&self) -> &dyn CacheProvider {
        match self {
            Self::Memory(cache) => cache,
            Self::Redis(cache) => cache,
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for Cache {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.provider().set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.provider().get(key).await
    }

    async fn keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        self.provider().keys(pattern).await
    }

    async fn invalidate(&self, key: &str) -> AppResult<()> {
        self.provider().invalidate(key).await
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        self.provider().invalidate_pattern(pattern).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.provider().exists(key).await
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        self.provider().ttl(key).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.provider().health_check().await
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.provider().clear_all().await
    }
}
