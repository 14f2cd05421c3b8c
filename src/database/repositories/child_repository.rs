// ABOUTME: SQLite implementation of the child repository
// ABOUTME: Delegates to Database queries so loaders never see the pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::ChildRepository;
use crate::database::{Database, DatabaseError, QuestionTables};
use crate::models::{
    Answer, ChoiceOption, CourseBook, Lesson, MapLabel, MatchingPair, SubQuestion,
};
use async_trait::async_trait;
use uuid::Uuid;

/// `SQLite` implementation of `ChildRepository`
#[derive(Clone)]
pub struct ChildRepositoryImpl {
    db: Database,
}

impl ChildRepositoryImpl {
    /// Create a new `ChildRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChildRepository for ChildRepositoryImpl {
    async fn sub_questions_by_root(
        &self,
        tables: QuestionTables,
        root_id: Uuid,
    ) -> Result<Vec<SubQuestion>, DatabaseError> {
        self.db.sub_questions_by_root(tables, root_id).await
    }

    async fn answers_by_question(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, DatabaseError> {
        self.db.answers_by_question(tables, question_id).await
    }

    async fn options_by_question(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
    ) -> Result<Vec<ChoiceOption>, DatabaseError> {
        self.db.options_by_question(tables, question_id).await
    }

    async fn map_labels_by_root(&self, root_id: Uuid) -> Result<Vec<MapLabel>, DatabaseError> {
        self.db.map_labels_by_root(root_id).await
    }

    async fn matching_pairs_by_root(
        &self,
        root_id: Uuid,
    ) -> Result<Vec<MatchingPair>, DatabaseError> {
        self.db.matching_pairs_by_root(root_id).await
    }

    async fn books_by_course(&self, course_id: Uuid) -> Result<Vec<CourseBook>, DatabaseError> {
        self.db.books_by_course(course_id).await
    }

    async fn lessons_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, DatabaseError> {
        self.db.lessons_by_course(course_id).await
    }
}
