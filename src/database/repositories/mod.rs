// ABOUTME: Repository trait definitions for the synchronization core
// ABOUTME: Narrow read-only interfaces over child rows, injected into detail loaders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

//! Repository pattern for child row access.
//!
//! Absence is never an error here: a parent without children yields an empty
//! `Vec`. Only storage failures surface as [`DatabaseError`].

/// `SQLite` implementation of [`ChildRepository`]
pub mod child_repository;

pub use child_repository::ChildRepositoryImpl;

use crate::database::{DatabaseError, QuestionTables};
use crate::models::{
    Answer, ChoiceOption, CourseBook, Lesson, MapLabel, MatchingPair, SubQuestion,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to every kind of child row, keyed by parent id
#[async_trait]
pub trait ChildRepository: Send + Sync {
    /// Sub-questions of a root in the given question tables
    async fn sub_questions_by_root(
        &self,
        tables: QuestionTables,
        root_id: Uuid,
    ) -> Result<Vec<SubQuestion>, DatabaseError>;

    /// Answers of a fill-in-the-blank sub-question
    async fn answers_by_question(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, DatabaseError>;

    /// Options of a choice sub-question
    async fn options_by_question(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
    ) -> Result<Vec<ChoiceOption>, DatabaseError>;

    /// Label rows of a map-labelling question
    async fn map_labels_by_root(&self, root_id: Uuid) -> Result<Vec<MapLabel>, DatabaseError>;

    /// Matching rows of a matching question
    async fn matching_pairs_by_root(
        &self,
        root_id: Uuid,
    ) -> Result<Vec<MatchingPair>, DatabaseError>;

    /// Books of a course
    async fn books_by_course(&self, course_id: Uuid) -> Result<Vec<CourseBook>, DatabaseError>;

    /// Lessons of a course
    async fn lessons_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, DatabaseError>;
}
