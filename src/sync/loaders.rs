// ABOUTME: Child loaders that assemble the type-specific branch of a detail aggregate
// ABOUTME: One loader per hierarchy shape: two-level questions, flat rows, and courses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::database::repositories::ChildRepository;
use crate::database::{DatabaseError, QuestionTables};
use crate::models::{ContentType, DetailBranch};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Loads the children of one root type into its [`DetailBranch`].
///
/// Absence of children is not an error: the loader returns the empty branch.
#[async_trait]
pub trait ChildLoader: Send + Sync {
    /// Load every child of `root_id` this loader's type owns
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged
    async fn load(&self, root_id: Uuid) -> Result<DetailBranch, DatabaseError>;
}

/// Sub-question plus its answers or options.
///
/// Only the first sub-question of a root is surfaced; any further
/// sub-questions are ignored by the aggregate.
pub struct TwoLevelLoader {
    repo: Arc<dyn ChildRepository>,
    tables: QuestionTables,
}

impl TwoLevelLoader {
    /// Create a loader over one family's question tables
    #[must_use]
    pub fn new(repo: Arc<dyn ChildRepository>, tables: QuestionTables) -> Self {
        Self { repo, tables }
    }
}

#[async_trait]
impl ChildLoader for TwoLevelLoader {
    async fn load(&self, root_id: Uuid) -> Result<DetailBranch, DatabaseError> {
        let content_type = self.tables.content_type();
        let first = self
            .repo
            .sub_questions_by_root(self.tables, root_id)
            .await?
            .into_iter()
            .next();

        let Some(question) = first else {
            return Ok(DetailBranch::empty(content_type));
        };

        let branch = match content_type {
            ContentType::FillInTheBlank => {
                let answers = self
                    .repo
                    .answers_by_question(self.tables, question.id)
                    .await?;
                DetailBranch::FillInTheBlank {
                    question: Some(question),
                    answers,
                }
            }
            ContentType::ChoiceOne => {
                let options = self
                    .repo
                    .options_by_question(self.tables, question.id)
                    .await?;
                DetailBranch::ChoiceOne {
                    question: Some(question),
                    options,
                }
            }
            ContentType::ChoiceMulti => {
                let options = self
                    .repo
                    .options_by_question(self.tables, question.id)
                    .await?;
                DetailBranch::ChoiceMulti {
                    question: Some(question),
                    options,
                }
            }
            other => DetailBranch::empty(other),
        };

        Ok(branch)
    }
}

/// Label rows of a map-labelling question
pub struct MapLabellingLoader {
    repo: Arc<dyn ChildRepository>,
}

impl MapLabellingLoader {
    /// Create the loader
    #[must_use]
    pub fn new(repo: Arc<dyn ChildRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ChildLoader for MapLabellingLoader {
    async fn load(&self, root_id: Uuid) -> Result<DetailBranch, DatabaseError> {
        let labels = self.repo.map_labels_by_root(root_id).await?;
        Ok(DetailBranch::MapLabelling { labels })
    }
}

/// Rows of a matching question
pub struct MatchingLoader {
    repo: Arc<dyn ChildRepository>,
}

impl MatchingLoader {
    /// Create the loader
    #[must_use]
    pub fn new(repo: Arc<dyn ChildRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ChildLoader for MatchingLoader {
    async fn load(&self, root_id: Uuid) -> Result<DetailBranch, DatabaseError> {
        let pairs = self.repo.matching_pairs_by_root(root_id).await?;
        Ok(DetailBranch::Matching { pairs })
    }
}

/// First book and every lesson of a `BOOK` course
pub struct BookCourseLoader {
    repo: Arc<dyn ChildRepository>,
}

impl BookCourseLoader {
    /// Create the loader
    #[must_use]
    pub fn new(repo: Arc<dyn ChildRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ChildLoader for BookCourseLoader {
    async fn load(&self, root_id: Uuid) -> Result<DetailBranch, DatabaseError> {
        let book = self.repo.books_by_course(root_id).await?.into_iter().next();
        let lessons = self.repo.lessons_by_course(root_id).await?;
        Ok(DetailBranch::Book { book, lessons })
    }
}

/// Lessons of a course without a book
pub struct LessonsLoader {
    repo: Arc<dyn ChildRepository>,
}

impl LessonsLoader {
    /// Create the loader
    #[must_use]
    pub fn new(repo: Arc<dyn ChildRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ChildLoader for LessonsLoader {
    async fn load(&self, root_id: Uuid) -> Result<DetailBranch, DatabaseError> {
        let lessons = self.repo.lessons_by_course(root_id).await?;
        Ok(DetailBranch::Lessons { lessons })
    }
}
