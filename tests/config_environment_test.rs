// ABOUTME: Tests for environment-driven configuration loading
// ABOUTME: Covers defaults, overrides, blank values, and rejection of malformed numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use linguacms::config::environment::{
    cache_config_from_env, DatabaseConfig, SearchConfig, ServerConfig, DEFAULT_DATABASE_URL,
};
use linguacms::constants::cache::{DEFAULT_CACHE_MAX_ENTRIES, TTL_DETAIL_SECS};
use linguacms::constants::search::{COURSE_INDEX, GRAMMAR_INDEX, LISTENING_INDEX};
use linguacms::errors::ErrorCode;
use linguacms::models::ContentFamily;
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "DATABASE_URL",
    "DATABASE_MAX_CONNECTIONS",
    "CACHE_MAX_ENTRIES",
    "CACHE_CLEANUP_INTERVAL_SECS",
    "CACHE_DETAIL_TTL_SECS",
    "REDIS_URL",
    "REDIS_CONNECTION_TIMEOUT_SECS",
    "MEILI_URL",
    "MEILI_API_KEY",
    "SEARCH_LISTENING_INDEX",
    "SEARCH_GRAMMAR_INDEX",
    "SEARCH_COURSE_INDEX",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let database = DatabaseConfig::from_env().unwrap();
    assert_eq!(database.url, DEFAULT_DATABASE_URL);

    let cache = cache_config_from_env().unwrap();
    assert_eq!(cache.max_entries, DEFAULT_CACHE_MAX_ENTRIES);
    assert_eq!(cache.detail_ttl, Duration::from_secs(TTL_DETAIL_SECS));
    assert!(cache.redis_url.is_none());

    let search = SearchConfig::from_env();
    assert!(search.meili_url.is_none());
    assert_eq!(search.index_for(ContentFamily::Listening), LISTENING_INDEX);
    assert_eq!(search.index_for(ContentFamily::Grammar), GRAMMAR_INDEX);
    assert_eq!(search.index_for(ContentFamily::Course), COURSE_INDEX);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("DATABASE_MAX_CONNECTIONS", "3");
    env::set_var("CACHE_MAX_ENTRIES", "250");
    env::set_var("CACHE_DETAIL_TTL_SECS", "120");
    env::set_var("REDIS_URL", "redis://localhost:6379");
    env::set_var("MEILI_URL", "http://localhost:7700");
    env::set_var("SEARCH_GRAMMAR_INDEX", "grammar_staging");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.database.max_connections, 3);
    assert_eq!(config.cache.max_entries, 250);
    assert_eq!(config.cache.detail_ttl, Duration::from_secs(120));
    assert_eq!(
        config.cache.redis_url.as_deref(),
        Some("redis://localhost:6379")
    );
    assert_eq!(
        config.search.meili_url.as_deref(),
        Some("http://localhost:7700")
    );
    assert_eq!(
        config.search.index_for(ContentFamily::Grammar),
        "grammar_staging"
    );
    assert_eq!(
        config.search.index_for(ContentFamily::Listening),
        LISTENING_INDEX
    );

    let summary = config.summary();
    assert!(summary.contains("cache=redis"));
    assert!(summary.contains("search=http://localhost:7700"));

    clear_env();
}

#[test]
#[serial]
fn test_blank_values_fall_back_to_defaults() {
    clear_env();
    env::set_var("DATABASE_URL", "   ");
    env::set_var("CACHE_MAX_ENTRIES", "");
    env::set_var("MEILI_URL", "");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    assert_eq!(config.cache.max_entries, DEFAULT_CACHE_MAX_ENTRIES);
    assert!(config.search.meili_url.is_none());
    assert!(config.summary().contains("search=memory"));

    clear_env();
}

#[test]
#[serial]
fn test_malformed_number_is_config_invalid() {
    clear_env();
    env::set_var("CACHE_MAX_ENTRIES", "lots");

    let err = cache_config_from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("CACHE_MAX_ENTRIES"));

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
}

#[test]
#[serial]
fn test_malformed_redis_setting_is_rejected() {
    clear_env();
    env::set_var("REDIS_CONNECTION_TIMEOUT_SECS", "-5");

    let err = cache_config_from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
}
