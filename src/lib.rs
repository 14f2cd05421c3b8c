// ABOUTME: Main library entry point for the Lingua CMS content backend
// ABOUTME: Keeps cache and search in sync with the relational store after every write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Lingua CMS
//!
//! Content backend for a language-learning platform. Listening questions,
//! grammar questions, and courses are stored relationally; after every
//! committed write the owning root is rebuilt into a denormalized detail
//! aggregate, classified complete or uncomplete, and published to the
//! cache and the search index.
//!
//! ## Architecture
//!
//! - **Database**: sqlx `SQLite` storage with per-family migrations
//! - **Sync**: detail builder, completion classifier, cache writer,
//!   search upserter, and the `Updator` that runs them in order
//! - **Cache**: pluggable in-memory or Redis key-value backends
//! - **Search**: pluggable in-memory or Meilisearch document indexes
//! - **Services**: validated, transactional writes per content family
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use linguacms::config::environment::ServerConfig;
//! use linguacms::context::ServerResources;
//! use linguacms::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::from_config(&config).await?;
//!
//!     let detail = resources
//!         .listening
//!         .changed_since(0)
//!         .await?;
//!     println!("{} listening questions", detail.len());
//!
//!     Ok(())
//! }
//! ```

/// Cache abstraction layer with pluggable backends
pub mod cache;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Wiring of backends, updator, and services
pub mod context;

/// `SQLite` storage for roots and children
pub mod database;

/// Unified error handling system with standard error codes
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Content models
pub mod models;

/// Search index abstraction with pluggable backends
pub mod search;

/// Validated write services per content family
pub mod services;

/// Detail build, classification, and publication
pub mod sync;
