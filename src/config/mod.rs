// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for database, cache, and search backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! Configuration module for Lingua CMS
//!
//! All settings come from environment variables; there is no config file.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseConfig, RedisConnectionConfig, SearchConfig, ServerConfig};
