// ABOUTME: Detail cache writer keyed by root id, completion status, and version
// ABOUTME: Replaces every prior entry of a root on write; reads pick the newest entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::cache::{CacheProvider, DetailCacheKey};
use crate::errors::AppResult;
use crate::models::{CompletionStatus, Detail, RootEntity};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Detail read back from the cache together with the key it was stored under
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDetail<R> {
    /// Key the entry was found under
    pub key: DetailCacheKey,
    /// Decoded aggregate
    pub detail: Detail<R>,
}

/// Writes and reads detail aggregates in the cache
#[derive(Clone)]
pub struct DetailCache {
    cache: Arc<dyn CacheProvider>,
    ttl: Duration,
}

impl DetailCache {
    /// Create a writer over a cache backend with a fixed entry TTL
    #[must_use]
    pub fn new(cache: Arc<dyn CacheProvider>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Remove every entry of the root, then store the aggregate under its current key
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or a cache call fails
    pub async fn set_cached<R: RootEntity>(
        &self,
        detail: &Detail<R>,
        is_complete: bool,
    ) -> AppResult<DetailCacheKey> {
        let key = DetailCacheKey::new(
            detail.root.id(),
            CompletionStatus::from_complete(is_complete),
            detail.root.version(),
        );
        let payload = serde_json::to_string(detail)?;

        let removed = self
            .cache
            .invalidate_pattern(&DetailCacheKey::root_pattern(key.root_id))
            .await?;
        self.cache.set(&key.to_string(), &payload, self.ttl).await?;

        debug!(cache.key = %key, cache.replaced = removed, "Detail cached");
        Ok(key)
    }

    /// Remove every entry of the root, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the cache call fails
    pub async fn remove_entries(&self, root_id: Uuid) -> AppResult<u64> {
        self.cache
            .invalidate_pattern(&DetailCacheKey::root_pattern(root_id))
            .await
    }

    /// Current cached aggregate of a root, `None` on a miss
    ///
    /// # Errors
    ///
    /// Returns an error if a cache call fails or the payload does not decode
    pub async fn get_current<R: RootEntity>(
        &self,
        root_id: Uuid,
    ) -> AppResult<Option<CachedDetail<R>>> {
        let keys = self
            .cache
            .keys(&DetailCacheKey::root_pattern(root_id))
            .await?;

        let Some(key) = select_current(&keys) else {
            return Ok(None);
        };

        // The entry may expire between KEYS and GET
        let Some(payload) = self.cache.get(&key.to_string()).await? else {
            return Ok(None);
        };

        Ok(Some(CachedDetail {
            key,
            detail: serde_json::from_str(&payload)?,
        }))
    }
}

/// Newest key: highest version, `complete` over `uncomplete` on a tie.
/// Keys of any other layout are ignored.
#[must_use]
pub fn select_current(keys: &[String]) -> Option<DetailCacheKey> {
    keys.iter()
        .filter_map(|key| DetailCacheKey::parse(key))
        .max_by_key(|key| (key.version, key.status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_current_prefers_version_then_complete() {
        let id = Uuid::new_v4();
        let keys = vec![
            format!("{id}:complete:1"),
            format!("{id}:uncomplete:3"),
            format!("{id}:complete:3"),
            format!("{id}:uncomplete:2"),
            "garbage".to_owned(),
        ];

        let current = select_current(&keys).unwrap();
        assert_eq!(current.version, 3);
        assert_eq!(current.status, CompletionStatus::Complete);
    }

    #[test]
    fn test_select_current_on_no_keys() {
        assert!(select_current(&[]).is_none());
        assert!(select_current(&["a:b:c".to_owned()]).is_none());
    }
}
