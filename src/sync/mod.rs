// ABOUTME: Cache and search synchronization core
// ABOUTME: Rebuilds a root's detail aggregate after each write and publishes it downstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! # Synchronization Core
//!
//! After every committed write the owning root is handed to the [`Updator`],
//! which runs four steps in order:
//!
//! 1. [`DetailBuilder`] loads the children the root's type owns
//! 2. [`completion::is_complete`] classifies the aggregate
//! 3. [`DetailCache`] replaces every cached entry of the root
//! 4. [`SearchPublisher`] upserts the flattened search document
//!
//! Build errors abort the publication. Cache failures are always downgraded
//! to warnings; search failures are downgraded for child writes and
//! propagated for root writes.

/// Type dispatch from a root to its child loader
pub mod builder;
/// Detail cache writes and the current-entry read path
pub mod cache_writer;
/// Per-type minimum-content rules
pub mod completion;
/// Child loaders for each question and course type
pub mod loaders;
/// Flattened search documents
pub mod search_upserter;
/// Orchestration of build, classify, cache, and search
pub mod updator;

pub use builder::{DetailBuilder, LoaderRegistry};
pub use cache_writer::{CachedDetail, DetailCache};
pub use completion::is_complete;
pub use loaders::ChildLoader;
pub use search_upserter::SearchPublisher;
pub use updator::{PublishMode, PublishReport, Updator};
