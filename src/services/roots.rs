// ABOUTME: Generic root lifecycle shared by every content family and the cached detail read path
// ABOUTME: Root writes publish in root mode, so search failures fail the call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::{validation, Published};
use crate::database::{Database, DatabaseError, StoredRoot};
use crate::errors::AppResult;
use crate::logging::SyncLogger;
use crate::models::{
    CompletionStatus, ContentType, Course, CourseInput, Detail, GrammarQuestion,
    GrammarQuestionInput, ListeningQuestion, ListeningQuestionInput, RootEntity,
};
use crate::sync::{is_complete, PublishMode, PublishReport, Updator};
use async_trait::async_trait;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Root with create and update operations bound to its family's input type
#[async_trait]
pub trait RootStore: StoredRoot {
    /// Editable fields accepted on create and update
    type Input: Send + Sync;

    /// Validate `input`, returning the resolved type
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first offending field
    fn validate(input: &Self::Input) -> AppResult<ContentType>;

    /// Insert a new root at version 1
    async fn insert(db: &Database, input: &Self::Input) -> Result<Self, DatabaseError>;

    /// Overwrite the root's fields and bump its version
    async fn update(db: &Database, id: Uuid, input: &Self::Input) -> Result<Self, DatabaseError>;
}

#[async_trait]
impl RootStore for ListeningQuestion {
    type Input = ListeningQuestionInput;

    fn validate(input: &Self::Input) -> AppResult<ContentType> {
        validation::listening_question(input)
    }

    async fn insert(db: &Database, input: &Self::Input) -> Result<Self, DatabaseError> {
        db.create_listening_question(input).await
    }

    async fn update(db: &Database, id: Uuid, input: &Self::Input) -> Result<Self, DatabaseError> {
        db.update_listening_question(id, input).await
    }
}

#[async_trait]
impl RootStore for GrammarQuestion {
    type Input = GrammarQuestionInput;

    fn validate(input: &Self::Input) -> AppResult<ContentType> {
        validation::grammar_question(input)
    }

    async fn insert(db: &Database, input: &Self::Input) -> Result<Self, DatabaseError> {
        db.create_grammar_question(input).await
    }

    async fn update(db: &Database, id: Uuid, input: &Self::Input) -> Result<Self, DatabaseError> {
        db.update_grammar_question(id, input).await
    }
}

#[async_trait]
impl RootStore for Course {
    type Input = CourseInput;

    fn validate(input: &Self::Input) -> AppResult<ContentType> {
        validation::course(input)
    }

    async fn insert(db: &Database, input: &Self::Input) -> Result<Self, DatabaseError> {
        db.create_course(input).await
    }

    async fn update(db: &Database, id: Uuid, input: &Self::Input) -> Result<Self, DatabaseError> {
        db.update_course(id, input).await
    }
}

/// Where a detail read was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailSource {
    /// Current cache entry of the root
    Cache,
    /// Rebuilt from the relational store after a cache miss
    Database,
}

/// Detail aggregate returned by the read path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "R: RootEntity")]
pub struct DetailRead<R> {
    /// The aggregate
    pub detail: Detail<R>,
    /// Completion status of the aggregate
    pub status: CompletionStatus,
    /// Where it was served from
    pub source: DetailSource,
}

/// Create, update, delete, and read operations for one root family
pub struct RootService<R> {
    db: Database,
    updator: Arc<Updator>,
    _root: PhantomData<fn() -> R>,
}

impl<R> Clone for RootService<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            updator: self.updator.clone(),
            _root: PhantomData,
        }
    }
}

impl<R: RootStore> RootService<R> {
    /// Create the service over a store and a shared updator
    #[must_use]
    pub fn new(db: Database, updator: Arc<Updator>) -> Self {
        Self {
            db,
            updator,
            _root: PhantomData,
        }
    }

    /// Validate and insert a root, then publish it
    ///
    /// # Errors
    ///
    /// Returns a validation, database, build, or search error
    pub async fn create(&self, input: &R::Input) -> AppResult<Published<R>> {
        R::validate(input)?;
        let root = R::insert(&self.db, input).await?;
        let report = self
            .updator
            .update_cache_and_search(root.clone(), PublishMode::Root)
            .await?;
        Ok(Published::new(root, report))
    }

    /// Validate and overwrite a root, bumping its version, then publish it
    ///
    /// # Errors
    ///
    /// Returns a validation, not-found, database, build, or search error
    pub async fn update(&self, id: Uuid, input: &R::Input) -> AppResult<Published<R>> {
        R::validate(input)?;
        let root = R::update(&self.db, id, input).await?;
        let report = self
            .updator
            .update_cache_and_search(root.clone(), PublishMode::Root)
            .await?;
        Ok(Published::new(root, report))
    }

    /// Delete a root with its children, then remove it from cache and search
    ///
    /// # Errors
    ///
    /// Returns a not-found, database, or search error
    pub async fn delete(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        self.db.delete_root::<R>(id).await?;
        let report = self.updator.remove(R::FAMILY, id).await?;
        Ok(Published::new(id, report))
    }

    /// Root as stored
    ///
    /// # Errors
    ///
    /// Returns a not-found or database error
    pub async fn get(&self, id: Uuid) -> AppResult<R> {
        Ok(self.db.get_root::<R>(id).await?)
    }

    /// Detail of a root from the cache, rebuilt from the store on a miss.
    ///
    /// A failing cache is treated as a miss.
    ///
    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn get_detail(&self, id: Uuid) -> AppResult<DetailRead<R>> {
        match self.updator.detail_cache().get_current::<R>(id).await {
            Ok(Some(cached)) => {
                debug!(cache.key = %cached.key, "Detail served from cache");
                return Ok(DetailRead {
                    detail: cached.detail,
                    status: cached.key.status,
                    source: DetailSource::Cache,
                });
            }
            Ok(None) => {}
            Err(e) => SyncLogger::log_degraded("cache", id, &e),
        }

        let root = self.db.get_root::<R>(id).await?;
        let detail = self.updator.builder().build(root).await?;
        let status = CompletionStatus::from_complete(is_complete(&detail));
        Ok(DetailRead {
            detail,
            status,
            source: DetailSource::Database,
        })
    }

    /// Roots whose version is greater than `version`, ascending
    ///
    /// # Errors
    ///
    /// Returns a database error
    pub async fn changed_since(&self, version: i64) -> AppResult<Vec<R>> {
        Ok(self.db.roots_since::<R>(version).await?)
    }

    /// Rebuild and publish a root after one of its children changed
    ///
    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn republish(&self, id: Uuid, mode: PublishMode) -> AppResult<PublishReport> {
        let root = self.db.get_root::<R>(id).await?;
        self.updator.update_cache_and_search(root, mode).await
    }

    /// Publish every stored root of the family, stopping at the first error
    ///
    /// # Errors
    ///
    /// Returns the first database, build, or search error
    pub async fn republish_all(&self) -> AppResult<Vec<PublishReport>> {
        let roots = self.db.list_roots::<R>().await?;
        let mut reports = Vec::with_capacity(roots.len());
        for root in roots {
            reports.push(
                self.updator
                    .update_cache_and_search(root, PublishMode::Root)
                    .await?,
            );
        }
        Ok(reports)
    }

    /// Stored root, checked to be of `expected` type before a child write
    pub(super) async fn root_of_type(&self, id: Uuid, expected: ContentType) -> AppResult<R> {
        let root = self.get(id).await?;
        validation::ensure_root_type(&root, expected)?;
        Ok(root)
    }

    pub(super) const fn database(&self) -> &Database {
        &self.db
    }
}
