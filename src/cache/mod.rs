// ABOUTME: Cache abstraction layer for detail aggregate caching
// ABOUTME: Pluggable backend support (in-memory, Redis) behind an object-safe provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Cache factory for creating cache providers
pub mod factory;
/// In-memory cache implementation
pub mod memory;
/// Redis cache implementation
pub mod redis;

use crate::config::environment::RedisConnectionConfig;
use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS, TTL_DETAIL_SECS,
};
use crate::errors::AppResult;
use crate::models::CompletionStatus;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Key-value cache provider used by the detail cache writer.
///
/// Values are opaque strings; callers own the encoding. Keys are
/// `:`-delimited and patterns use shell-style globs with a trailing `*`.
///
/// # Examples
///
/// ```rust,no_run
/// use linguacms::cache::{CacheConfig, CacheProvider};
/// use linguacms::cache::memory::InMemoryCache;
/// use std::time::Duration;
/// # async fn example() -> Result<(), linguacms::errors::AppError> {
///
/// let cache = InMemoryCache::new(CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// });
///
/// cache.set("a1b2:complete:3", "{}", Duration::from_secs(60)).await?;
/// let keys = cache.keys("a1b2:*").await?;
/// assert_eq!(keys, vec!["a1b2:complete:3".to_owned()]);
///
/// cache.invalidate_pattern("a1b2:*").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync {
    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Retrieve value from cache, `None` on miss or expiry
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// List live keys matching a glob pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or the scan fails
    async fn keys(&self, pattern: &str) -> AppResult<Vec<String>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &str) -> AppResult<()>;

    /// Remove all cache entries matching pattern (e.g., "a1b2:*"), returning the count
    ///
    /// # Errors
    ///
    /// Returns an error if pattern invalidation fails
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Check if key exists in cache
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>>;

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Clear all cache entries (for testing/admin)
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries (for in-memory cache)
    pub max_entries: usize,
    /// Redis connection URL (for Redis cache)
    pub redis_url: Option<String>,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
    /// Redis connection and retry configuration
    pub redis_connection: RedisConnectionConfig,
    /// TTL applied to every detail entry
    pub detail_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            redis_url: None,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
            redis_connection: RedisConnectionConfig::default(),
            detail_ttl: Duration::from_secs(TTL_DETAIL_SECS),
        }
    }
}

/// Versioned, status-qualified cache key of a detail aggregate
///
/// Rendered as `{root_id}:{status}:{version}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailCacheKey {
    /// Root entity id
    pub root_id: Uuid,
    /// Completion status at publish time
    pub status: CompletionStatus,
    /// Root version at publish time
    pub version: i64,
}

impl DetailCacheKey {
    /// Create new cache key
    #[must_use]
    pub const fn new(root_id: Uuid, status: CompletionStatus, version: i64) -> Self {
        Self {
            root_id,
            status,
            version,
        }
    }

    /// Pattern matching every key ever written for a root
    #[must_use]
    pub fn root_pattern(root_id: Uuid) -> String {
        format!("{root_id}:*")
    }

    /// Parse a rendered key; `None` for keys of another layout
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let mut segments = key.split(':');
        let root_id = Uuid::parse_str(segments.next()?).ok()?;
        let status = CompletionStatus::parse(segments.next()?)?;
        let version = segments.next()?.parse().ok()?;
        if segments.next().is_some() {
            return None;
        }
        Some(Self::new(root_id, status, version))
    }
}

impl fmt::Display for DetailCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.root_id, self.status, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout_round_trips() {
        let root_id = Uuid::new_v4();
        let key = DetailCacheKey::new(root_id, CompletionStatus::Uncomplete, 1);

        assert_eq!(key.to_string(), format!("{root_id}:uncomplete:1"));
        assert_eq!(DetailCacheKey::parse(&key.to_string()), Some(key));
    }

    #[test]
    fn test_parse_rejects_foreign_layouts() {
        let root_id = Uuid::new_v4();
        assert!(DetailCacheKey::parse("not-a-uuid:complete:1").is_none());
        assert!(DetailCacheKey::parse(&format!("{root_id}:done:1")).is_none());
        assert!(DetailCacheKey::parse(&format!("{root_id}:complete:x")).is_none());
        assert!(DetailCacheKey::parse(&format!("{root_id}:complete:1:extra")).is_none());
    }
}
