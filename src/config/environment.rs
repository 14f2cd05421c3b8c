// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses database, cache, Redis, and search settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! Environment-based configuration management for production deployment

use crate::cache::CacheConfig;
use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS, REDIS_CONNECT_TIMEOUT_SECS,
    REDIS_INITIAL_CONNECTION_RETRIES, REDIS_INITIAL_RETRY_DELAY_MS, REDIS_MAX_RETRY_DELAY_MS,
    REDIS_OPERATION_TIMEOUT_SECS, REDIS_RECONNECTION_RETRIES, REDIS_RETRY_EXPONENT_BASE,
    TTL_DETAIL_SECS,
};
use crate::constants::search::{COURSE_INDEX, GRAMMAR_INDEX, LISTENING_INDEX};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::ContentFamily;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default on-disk database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/linguacms.db";

/// Default maximum number of pooled database connections
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Read an optional variable, rejecting values that fail to parse
fn parse_env<T: FromStr>(key: &str) -> AppResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Invalid value for {key}: {e}"),
            )
        }),
        Err(_) => Ok(None),
    }
}

/// Read an optional, non-blank string variable
fn non_blank_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Relational store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL
    pub url: String,
    /// Maximum pooled connections (forced to 1 for in-memory databases)
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_MAX_CONNECTIONS` is not a number
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            url: non_blank_env("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
        })
    }
}

/// Redis connection and retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConnectionConfig {
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// Response/command timeout in seconds
    pub response_timeout_secs: u64,
    /// Number of reconnection retries after connection drop
    pub reconnection_retries: usize,
    /// Exponential backoff base for retry delays
    pub retry_exponent_base: u64,
    /// Maximum retry delay in milliseconds
    pub max_retry_delay_ms: u64,
    /// Number of retries for initial connection at startup
    pub initial_connection_retries: u32,
    /// Initial retry delay in milliseconds (doubles with exponential backoff)
    pub initial_retry_delay_ms: u64,
}

impl Default for RedisConnectionConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: REDIS_CONNECT_TIMEOUT_SECS,
            response_timeout_secs: REDIS_OPERATION_TIMEOUT_SECS,
            reconnection_retries: REDIS_RECONNECTION_RETRIES,
            retry_exponent_base: REDIS_RETRY_EXPONENT_BASE,
            max_retry_delay_ms: REDIS_MAX_RETRY_DELAY_MS,
            initial_connection_retries: REDIS_INITIAL_CONNECTION_RETRIES,
            initial_retry_delay_ms: REDIS_INITIAL_RETRY_DELAY_MS,
        }
    }
}

impl RedisConnectionConfig {
    /// Load Redis connection configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if any `REDIS_*` numeric variable fails to parse
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            connection_timeout_secs: parse_env("REDIS_CONNECTION_TIMEOUT_SECS")?
                .unwrap_or(defaults.connection_timeout_secs),
            response_timeout_secs: parse_env("REDIS_RESPONSE_TIMEOUT_SECS")?
                .unwrap_or(defaults.response_timeout_secs),
            reconnection_retries: parse_env("REDIS_RECONNECTION_RETRIES")?
                .unwrap_or(defaults.reconnection_retries),
            retry_exponent_base: parse_env("REDIS_RETRY_EXPONENT_BASE")?
                .unwrap_or(defaults.retry_exponent_base),
            max_retry_delay_ms: parse_env("REDIS_MAX_RETRY_DELAY_MS")?
                .unwrap_or(defaults.max_retry_delay_ms),
            initial_connection_retries: parse_env("REDIS_INITIAL_CONNECTION_RETRIES")?
                .unwrap_or(defaults.initial_connection_retries),
            initial_retry_delay_ms: parse_env("REDIS_INITIAL_RETRY_DELAY_MS")?
                .unwrap_or(defaults.initial_retry_delay_ms),
        })
    }
}

/// Load cache configuration from environment
///
/// # Errors
///
/// Returns an error if any numeric cache variable fails to parse
pub fn cache_config_from_env() -> AppResult<CacheConfig> {
    Ok(CacheConfig {
        max_entries: parse_env("CACHE_MAX_ENTRIES")?.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
        redis_url: non_blank_env("REDIS_URL"),
        cleanup_interval: Duration::from_secs(
            parse_env("CACHE_CLEANUP_INTERVAL_SECS")?.unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECS),
        ),
        enable_background_cleanup: true,
        redis_connection: RedisConnectionConfig::from_env()?,
        detail_ttl: Duration::from_secs(
            parse_env("CACHE_DETAIL_TTL_SECS")?.unwrap_or(TTL_DETAIL_SECS),
        ),
    })
}

/// Search backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Meilisearch base URL; the in-memory index is used when absent
    pub meili_url: Option<String>,
    /// Meilisearch API key
    pub meili_api_key: Option<String>,
    /// Index uid for listening questions
    pub listening_index: String,
    /// Index uid for grammar questions
    pub grammar_index: String,
    /// Index uid for courses
    pub course_index: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            meili_url: None,
            meili_api_key: None,
            listening_index: LISTENING_INDEX.to_owned(),
            grammar_index: GRAMMAR_INDEX.to_owned(),
            course_index: COURSE_INDEX.to_owned(),
        }
    }
}

impl SearchConfig {
    /// Load search configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            meili_url: non_blank_env("MEILI_URL"),
            meili_api_key: non_blank_env("MEILI_API_KEY"),
            listening_index: non_blank_env("SEARCH_LISTENING_INDEX")
                .unwrap_or_else(|| LISTENING_INDEX.to_owned()),
            grammar_index: non_blank_env("SEARCH_GRAMMAR_INDEX")
                .unwrap_or_else(|| GRAMMAR_INDEX.to_owned()),
            course_index: non_blank_env("SEARCH_COURSE_INDEX")
                .unwrap_or_else(|| COURSE_INDEX.to_owned()),
        }
    }

    /// Index uid configured for a family
    #[must_use]
    pub fn index_for(&self, family: ContentFamily) -> &str {
        match family {
            ContentFamily::Listening => &self.listening_index,
            ContentFamily::Grammar => &self.grammar_index,
            ContentFamily::Course => &self.course_index,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Relational store settings
    pub database: DatabaseConfig,
    /// Cache backend settings
    pub cache: CacheConfig,
    /// Search backend settings
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            database: DatabaseConfig::from_env()?,
            cache: cache_config_from_env()?,
            search: SearchConfig::from_env(),
        };

        if config.search.meili_url.is_none() {
            warn!("MEILI_URL not set, search documents are kept in process memory only");
        }
        info!("{}", config.summary());

        Ok(config)
    }

    /// One-line description without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} cache={} search={}",
            self.database.url,
            if self.cache.redis_url.is_some() {
                "redis"
            } else {
                "memory"
            },
            self.search.meili_url.as_deref().unwrap_or("memory"),
        )
    }
}
