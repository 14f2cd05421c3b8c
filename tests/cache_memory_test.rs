// ABOUTME: Unit tests for in-memory cache implementation
// ABOUTME: Tests TTL expiration, glob patterns, capacity limits, and background cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use linguacms::cache::{factory::Cache, CacheConfig, CacheProvider, DetailCacheKey};
use linguacms::models::CompletionStatus;
use std::time::Duration;
use uuid::Uuid;

/// Helper: Create in-memory cache with custom config
async fn create_test_cache(max_entries: usize, cleanup_interval_secs: u64) -> Result<Cache> {
    let config = CacheConfig {
        max_entries,
        redis_url: None,
        cleanup_interval: Duration::from_secs(cleanup_interval_secs),
        enable_background_cleanup: false, // Disable in tests to avoid tokio runtime conflicts
        ..CacheConfig::default()
    };
    Ok(Cache::new(config).await?)
}

fn detail_key(root_id: Uuid, status: CompletionStatus, version: i64) -> String {
    DetailCacheKey::new(root_id, status, version).to_string()
}

#[tokio::test]
async fn test_cache_set_and_get() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = detail_key(Uuid::new_v4(), CompletionStatus::Uncomplete, 1);

    cache.set(&key, r#"{"root":{}}"#, Duration::from_secs(10)).await?;

    assert_eq!(cache.get(&key).await?.as_deref(), Some(r#"{"root":{}}"#));
    assert_eq!(cache.backend_name(), "memory");

    Ok(())
}

#[tokio::test]
async fn test_cache_expiration() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = detail_key(Uuid::new_v4(), CompletionStatus::Complete, 2);

    cache.set(&key, "expires", Duration::from_secs(1)).await?;
    assert!(cache.exists(&key).await?);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(cache.get(&key).await?, None);
    assert!(!cache.exists(&key).await?);
    assert!(cache.keys("*").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_cache_ttl() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = detail_key(Uuid::new_v4(), CompletionStatus::Complete, 1);

    cache.set(&key, "ttl", Duration::from_secs(60)).await?;

    let ttl = cache.ttl(&key).await?.unwrap();
    assert!(ttl <= Duration::from_secs(60));
    assert!(ttl > Duration::from_secs(55));
    assert_eq!(cache.ttl("missing").await?, None);

    Ok(())
}

#[tokio::test]
async fn test_cache_invalidate() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = detail_key(Uuid::new_v4(), CompletionStatus::Uncomplete, 1);

    cache.set(&key, "value", Duration::from_secs(60)).await?;
    cache.invalidate(&key).await?;

    assert!(!cache.exists(&key).await?);
    Ok(())
}

#[tokio::test]
async fn test_cache_root_pattern_only_matches_its_root() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let root = Uuid::new_v4();
    let other = Uuid::new_v4();

    for version in 1..=3 {
        cache
            .set(
                &detail_key(root, CompletionStatus::Uncomplete, version),
                "v",
                Duration::from_secs(60),
            )
            .await?;
    }
    cache
        .set(
            &detail_key(other, CompletionStatus::Complete, 1),
            "other",
            Duration::from_secs(60),
        )
        .await?;

    let keys = cache.keys(&DetailCacheKey::root_pattern(root)).await?;
    assert_eq!(keys.len(), 3);

    let removed = cache
        .invalidate_pattern(&DetailCacheKey::root_pattern(root))
        .await?;
    assert_eq!(removed, 3);

    assert!(cache
        .keys(&DetailCacheKey::root_pattern(root))
        .await?
        .is_empty());
    assert!(cache
        .exists(&detail_key(other, CompletionStatus::Complete, 1))
        .await?);

    Ok(())
}

#[tokio::test]
async fn test_cache_invalid_pattern_is_cache_error() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;

    let err = cache.keys("[unterminated").await.unwrap_err();
    assert_eq!(err.code, linguacms::errors::ErrorCode::CacheError);

    Ok(())
}

#[tokio::test]
async fn test_cache_capacity_eviction() -> Result<()> {
    let cache = create_test_cache(3, 300).await?;
    let keys: Vec<String> = (0..4)
        .map(|_| detail_key(Uuid::new_v4(), CompletionStatus::Complete, 1))
        .collect();

    for key in &keys {
        cache.set(key, "v", Duration::from_secs(60)).await?;
    }

    // Least recently used entry is evicted first
    assert!(!cache.exists(&keys[0]).await?);
    for key in &keys[1..] {
        assert!(cache.exists(key).await?);
    }

    Ok(())
}

#[tokio::test]
async fn test_cache_background_cleanup() -> Result<()> {
    let config = CacheConfig {
        max_entries: 100,
        redis_url: None,
        cleanup_interval: Duration::from_millis(100),
        enable_background_cleanup: true,
        ..CacheConfig::default()
    };
    let cache = Cache::new(config).await?;
    let key = detail_key(Uuid::new_v4(), CompletionStatus::Uncomplete, 1);

    cache.set(&key, "short", Duration::from_millis(50)).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(cache.keys("*").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cache_clear_all() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;

    for _ in 0..5 {
        cache
            .set(
                &detail_key(Uuid::new_v4(), CompletionStatus::Complete, 1),
                "v",
                Duration::from_secs(60),
            )
            .await?;
    }
    cache.clear_all().await?;

    assert!(cache.keys("*").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cache_health_check() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    cache.health_check().await?;
    Ok(())
}
