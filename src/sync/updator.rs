// ABOUTME: Updator rebuilding, classifying, and publishing a root's detail after every committed write
// ABOUTME: Serializes publications per root id and downgrades cache and leaf search failures to warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::builder::DetailBuilder;
use super::cache_writer::DetailCache;
use super::completion::is_complete;
use super::search_upserter::SearchPublisher;
use crate::database::{Database, StoredRoot};
use crate::errors::{AppError, AppResult};
use crate::logging::SyncLogger;
use crate::models::{CompletionStatus, ContentFamily};
use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Which kind of write triggered a publication.
///
/// Decides whether a search failure fails the call. Cache failures never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// A child row changed; search failures become warnings
    Leaf,
    /// The root itself was created, updated, or deleted; search failures propagate
    Root,
}

/// Outcome of a publication that succeeded, possibly with degraded downstream writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Root the publication was for
    pub root_id: Uuid,
    /// Status the aggregate was classified as; `None` for removals
    pub status: Option<CompletionStatus>,
    /// Version published; `None` for removals
    pub version: Option<i64>,
    /// Downstream failures that were logged and swallowed
    pub warnings: Vec<String>,
}

impl PublishReport {
    fn removal(root_id: Uuid) -> Self {
        Self {
            root_id,
            status: None,
            version: None,
            warnings: Vec::new(),
        }
    }

    /// Whether every downstream write succeeded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn degrade(&mut self, target: &str, error: &dyn std::fmt::Display) {
        SyncLogger::log_degraded(target, self.root_id, error);
        self.warnings.push(format!("{target}: {error}"));
    }
}

/// Single re-entry point called with the owning root after every committed write
pub struct Updator {
    database: Database,
    builder: DetailBuilder,
    cache: DetailCache,
    search: SearchPublisher,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl Updator {
    /// Wire the root store, the builder, and both downstream writers
    #[must_use]
    pub fn new(
        database: Database,
        builder: DetailBuilder,
        cache: DetailCache,
        search: SearchPublisher,
    ) -> Self {
        Self {
            database,
            builder,
            cache,
            search,
            locks: DashMap::new(),
        }
    }

    /// Detail builder used for every publication
    #[must_use]
    pub const fn builder(&self) -> &DetailBuilder {
        &self.builder
    }

    /// Cache writer, also used by the read path
    #[must_use]
    pub const fn detail_cache(&self) -> &DetailCache {
        &self.cache
    }

    /// Rebuild the aggregate of `root`, classify it, then write cache and search.
    ///
    /// `root` only identifies the publication: its stored row is re-read once
    /// the root's lock is held, so a caller holding an older snapshot still
    /// publishes the latest committed version. A root deleted in the meantime
    /// is unpublished instead.
    ///
    /// # Errors
    ///
    /// Returns the reload or builder error unchanged. In [`PublishMode::Root`]
    /// a search failure is returned as well; every other downstream failure
    /// is reported through [`PublishReport::warnings`].
    #[instrument(skip(self, root), fields(content.family = %R::FAMILY, content.root_id = %root.id()))]
    pub async fn update_cache_and_search<R: StoredRoot>(
        &self,
        root: R,
        mode: PublishMode,
    ) -> AppResult<PublishReport> {
        let root_id = root.id();

        self.with_root_lock(root_id, async {
            let Some(current) = self.reload::<R>(root_id).await? else {
                debug!("Root deleted before publication, unpublishing");
                return self.unpublish(R::FAMILY, root_id, mode).await;
            };
            if current.version() != root.version() {
                debug!(
                    snapshot.version = root.version(),
                    stored.version = current.version(),
                    "Publishing stored version over caller snapshot"
                );
            }

            let detail = self.builder.build(current).await?;
            let complete = is_complete(&detail);
            let status = CompletionStatus::from_complete(complete);
            let version = detail.root.version();

            let mut report = PublishReport {
                root_id,
                status: Some(status),
                version: Some(version),
                warnings: Vec::new(),
            };

            if let Err(e) = self.cache.set_cached(&detail, complete).await {
                report.degrade("cache", &e);
            }

            if let Err(e) = self.search.upsert(&detail, status).await {
                match mode {
                    PublishMode::Root => return Err(e.with_operation("upsert_document")),
                    PublishMode::Leaf => report.degrade("search", &e),
                }
            }

            SyncLogger::log_publish(R::FAMILY, root_id, version, status, report.warnings.len());
            Ok(report)
        })
        .await
    }

    /// Remove every cache entry and the search document of a deleted root.
    ///
    /// # Errors
    ///
    /// Returns the search error; cache failures are reported as warnings
    #[instrument(skip(self), fields(content.family = %family, content.root_id = %root_id))]
    pub async fn remove(&self, family: ContentFamily, root_id: Uuid) -> AppResult<PublishReport> {
        self.with_root_lock(root_id, self.unpublish(family, root_id, PublishMode::Root))
            .await
    }

    async fn reload<R: StoredRoot>(&self, root_id: Uuid) -> AppResult<Option<R>> {
        self.database.find_root::<R>(root_id).await.map_err(|e| {
            AppError::from(e)
                .with_resource_id(root_id.to_string())
                .with_operation("reload_root")
        })
    }

    /// Unpublish a root; caller holds the root's lock
    async fn unpublish(
        &self,
        family: ContentFamily,
        root_id: Uuid,
        mode: PublishMode,
    ) -> AppResult<PublishReport> {
        let mut report = PublishReport::removal(root_id);

        if let Err(e) = self.cache.remove_entries(root_id).await {
            report.degrade("cache", &e);
        }

        if let Err(e) = self.search.delete_from_index(family, root_id).await {
            match mode {
                PublishMode::Root => return Err(e.with_operation("delete_document")),
                PublishMode::Leaf => report.degrade("search", &e),
            }
        }

        SyncLogger::log_removal(family, root_id, report.warnings.len());
        Ok(report)
    }

    /// Number of roots with a publication in flight
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.locks.len()
    }

    /// Run `work` while holding the publication lock of `root_id`
    async fn with_root_lock<T>(&self, root_id: Uuid, work: impl Future<Output = T>) -> T {
        let lock = self
            .locks
            .entry(root_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let output = {
            let _guard = lock.lock().await;
            work.await
        };

        drop(lock);
        self.locks
            .remove_if(&root_id, |_, lock| Arc::strong_count(lock) == 1);
        output
    }
}
