// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory store, cache, and search wiring plus failing backends for fault injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs
)]
//! Shared test utilities for `linguacms`

use async_trait::async_trait;
use linguacms::cache::memory::InMemoryCache;
use linguacms::cache::{CacheConfig, CacheProvider};
use linguacms::config::environment::SearchConfig;
use linguacms::context::ServerResources;
use linguacms::database::repositories::{ChildRepository, ChildRepositoryImpl};
use linguacms::database::{Database, DatabaseError, QuestionTables};
use linguacms::errors::{AppError, AppResult};
use linguacms::models::{
    Answer, ChoiceOption, CourseBook, CourseInput, GrammarQuestionInput, Lesson,
    ListeningQuestionInput, MapLabel, MatchingPair, SubQuestion,
};
use linguacms::search::memory::InMemorySearchIndex;
use linguacms::search::SearchIndex;
use linguacms::sync::{DetailBuilder, DetailCache, LoaderRegistry, SearchPublisher, Updator};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

pub const DETAIL_TTL: Duration = Duration::from_secs(86_400);

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh migrated in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::connect("sqlite::memory:").await.unwrap()
}

/// In-memory cache without the background cleanup task
pub fn create_test_cache() -> InMemoryCache {
    InMemoryCache::new(CacheConfig {
        max_entries: 1000,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    })
}

/// Backends of a test environment, kept concrete so tests can inspect them
pub struct TestBackends {
    pub database: Database,
    pub cache: InMemoryCache,
    pub search: InMemorySearchIndex,
    pub resources: ServerResources,
}

impl TestBackends {
    /// Current search document of a root in the index of `family`
    pub fn document(&self, index: &str, root_id: Uuid) -> Option<Value> {
        self.search.document(index, &root_id.to_string())
    }

    /// Every cache key written for a root
    pub async fn cache_keys(&self, root_id: Uuid) -> Vec<String> {
        self.cache.keys(&format!("{root_id}:*")).await.unwrap()
    }
}

/// Full service stack over in-memory backends
pub async fn create_test_backends() -> TestBackends {
    let database = create_test_database().await;
    let cache = create_test_cache();
    let search = InMemorySearchIndex::new();

    let resources = ServerResources::new(
        database.clone(),
        Arc::new(cache.clone()),
        Arc::new(search.clone()),
        SearchConfig::default(),
        DETAIL_TTL,
    );

    TestBackends {
        database,
        cache,
        search,
        resources,
    }
}

/// Updator over the given cache and search backends and the real child repository
pub fn create_updator(
    database: &Database,
    cache: Arc<dyn CacheProvider>,
    search: Arc<dyn SearchIndex>,
) -> Updator {
    let repo: Arc<dyn ChildRepository> = Arc::new(ChildRepositoryImpl::new(database.clone()));
    Updator::new(
        database.clone(),
        DetailBuilder::new(LoaderRegistry::with_defaults(&repo)),
        DetailCache::new(cache, DETAIL_TTL),
        SearchPublisher::new(search, SearchConfig::default()),
    )
}

pub fn listening_input(question_type: &str) -> ListeningQuestionInput {
    ListeningQuestionInput {
        title: "Train station announcement".to_owned(),
        audio_url: "https://cdn.example.com/audio/station.mp3".to_owned(),
        transcript: Some("The 9:15 to Leeds departs from platform 4".to_owned()),
        question_type: question_type.to_owned(),
        tags: vec!["travel".to_owned()],
    }
}

pub fn grammar_input(question_type: &str) -> GrammarQuestionInput {
    GrammarQuestionInput {
        title: "Past simple".to_owned(),
        instruction: "Fill in the verb".to_owned(),
        level: "A2".to_owned(),
        question_type: question_type.to_owned(),
        tags: vec![],
    }
}

pub fn course_input(course_type: &str) -> CourseInput {
    CourseInput {
        name: "English for travellers".to_owned(),
        description: "Phrases for airports and stations".to_owned(),
        level: "B1".to_owned(),
        course_type: course_type.to_owned(),
        tags: vec!["travel".to_owned()],
    }
}

// ============================================================================
// Failing backends
// ============================================================================

/// Cache backend that fails every call while `failing` is set
#[derive(Default)]
pub struct FlakyCache {
    inner: Option<InMemoryCache>,
    pub failing: AtomicBool,
}

impl FlakyCache {
    pub fn failing() -> Self {
        Self {
            inner: Some(create_test_cache()),
            failing: AtomicBool::new(true),
        }
    }

    fn check(&self) -> AppResult<&InMemoryCache> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::cache("connection refused"));
        }
        self.inner
            .as_ref()
            .ok_or_else(|| AppError::cache("no backend"))
    }
}

#[async_trait]
impl CacheProvider for FlakyCache {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.check()?.set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check()?.get(key).await
    }

    async fn keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        self.check()?.keys(pattern).await
    }

    async fn invalidate(&self, key: &str) -> AppResult<()> {
        self.check()?.invalidate(key).await
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        self.check()?.invalidate_pattern(pattern).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.check()?.exists(key).await
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        self.check()?.ttl(key).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.check().map(|_| ())
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.check()?.clear_all().await
    }
}

/// Search backend that fails every write while `failing` is set
pub struct FlakySearch {
    pub inner: InMemorySearchIndex,
    pub failing: AtomicBool,
    pub upserts: AtomicUsize,
}

impl FlakySearch {
    pub fn new(failing: bool) -> Self {
        Self {
            inner: InMemorySearchIndex::new(),
            failing: AtomicBool::new(failing),
            upserts: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::search("index unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for FlakySearch {
    async fn ensure_index(&self, index: &str) -> AppResult<()> {
        self.inner.ensure_index(index).await
    }

    async fn upsert_document(&self, index: &str, document: &Value) -> AppResult<()> {
        self.check()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert_document(index, document).await
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        self.check()?;
        self.inner.delete_document(index, id).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.check()
    }
}

/// Child repository whose every read fails with a query error
pub struct BrokenRepository;

fn broken<T>() -> Result<T, DatabaseError> {
    Err(DatabaseError::QueryError {
        context: "disk I/O error".to_owned(),
    })
}

#[async_trait]
impl ChildRepository for BrokenRepository {
    async fn sub_questions_by_root(
        &self,
        _tables: QuestionTables,
        _root_id: Uuid,
    ) -> Result<Vec<SubQuestion>, DatabaseError> {
        broken()
    }

    async fn answers_by_question(
        &self,
        _tables: QuestionTables,
        _question_id: Uuid,
    ) -> Result<Vec<Answer>, DatabaseError> {
        broken()
    }

    async fn options_by_question(
        &self,
        _tables: QuestionTables,
        _question_id: Uuid,
    ) -> Result<Vec<ChoiceOption>, DatabaseError> {
        broken()
    }

    async fn map_labels_by_root(&self, _root_id: Uuid) -> Result<Vec<MapLabel>, DatabaseError> {
        broken()
    }

    async fn matching_pairs_by_root(
        &self,
        _root_id: Uuid,
    ) -> Result<Vec<MatchingPair>, DatabaseError> {
        broken()
    }

    async fn books_by_course(&self, _course_id: Uuid) -> Result<Vec<CourseBook>, DatabaseError> {
        broken()
    }

    async fn lessons_by_course(&self, _course_id: Uuid) -> Result<Vec<Lesson>, DatabaseError> {
        broken()
    }
}
