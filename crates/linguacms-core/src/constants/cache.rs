// ABOUTME: Cache-related constants for TTL, capacity, and cleanup intervals
// ABOUTME: Supports both in-memory and Redis cache backends with the detail key layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Default maximum cache entries for in-memory cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Detail aggregate cache TTL (24 hours) - safety net against unbounded staleness
pub const TTL_DETAIL_SECS: u64 = 86_400;

/// Redis connection timeout in seconds
pub const REDIS_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Redis operation timeout in seconds
pub const REDIS_OPERATION_TIMEOUT_SECS: u64 = 3;

/// Number of keys requested per Redis SCAN iteration
pub const REDIS_SCAN_COUNT: usize = 100;

/// Cache key prefix for namespacing in shared Redis instances
pub const CACHE_KEY_PREFIX: &str = "linguacms:cache:";

/// Status segment for aggregates that pass completion classification
pub const STATUS_COMPLETE: &str = "complete";

/// Status segment for aggregates that fail completion classification
pub const STATUS_UNCOMPLETE: &str = "uncomplete";

/// Reconnection retries after a dropped Redis connection
pub const REDIS_RECONNECTION_RETRIES: usize = 6;

/// Exponential backoff base for Redis reconnection delays
pub const REDIS_RETRY_EXPONENT_BASE: u64 = 2;

/// Maximum Redis retry delay in milliseconds
pub const REDIS_MAX_RETRY_DELAY_MS: u64 = 10_000;

/// Retries for the initial Redis connection at startup
pub const REDIS_INITIAL_CONNECTION_RETRIES: u32 = 3;

/// Initial Redis retry delay in milliseconds (doubles per attempt)
pub const REDIS_INITIAL_RETRY_DELAY_MS: u64 = 500;
