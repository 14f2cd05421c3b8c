// ABOUTME: Course service covering course roots, the book of BOOK courses, and lessons
// ABOUTME: Books are only accepted on BOOK courses; lessons on any course
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::roots::{DetailRead, RootService};
use super::{validation, Published};
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{ContentType, Course, CourseBook, CourseBookInput, CourseInput, Lesson, LessonInput};
use crate::sync::{PublishMode, Updator};
use std::sync::Arc;
use uuid::Uuid;

/// Course family operations
#[derive(Clone)]
pub struct CourseService {
    roots: RootService<Course>,
}

impl CourseService {
    /// Create the service over a store and a shared updator
    #[must_use]
    pub fn new(db: Database, updator: Arc<Updator>) -> Self {
        Self {
            roots: RootService::new(db, updator),
        }
    }

    /// Root lifecycle operations
    #[must_use]
    pub const fn roots(&self) -> &RootService<Course> {
        &self.roots
    }

    /// # Errors
    ///
    /// Returns a validation, database, build, or search error
    pub async fn create(&self, input: &CourseInput) -> AppResult<Published<Course>> {
        self.roots.create(input).await
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, build, or search error
    pub async fn update(&self, id: Uuid, input: &CourseInput) -> AppResult<Published<Course>> {
        self.roots.update(id, input).await
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or search error
    pub async fn delete(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        self.roots.delete(id).await
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn get_detail(&self, id: Uuid) -> AppResult<DetailRead<Course>> {
        self.roots.get_detail(id).await
    }

    /// # Errors
    ///
    /// Returns a database error
    pub async fn changed_since(&self, version: i64) -> AppResult<Vec<Course>> {
        self.roots.changed_since(version).await
    }

    /// Books attached to a course
    ///
    /// # Errors
    ///
    /// Returns a database error
    pub async fn books(&self, course_id: Uuid) -> AppResult<Vec<CourseBook>> {
        Ok(self.roots.database().books_by_course(course_id).await?)
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, type-mismatch, database, or build error
    pub async fn create_book(
        &self,
        course_id: Uuid,
        input: &CourseBookInput,
    ) -> AppResult<Published<CourseBook>> {
        validation::course_book(input)?;
        self.roots
            .root_of_type(course_id, ContentType::Book)
            .await?;

        let book = self
            .roots
            .database()
            .create_course_book(course_id, input)
            .await?;
        let report = self.roots.republish(course_id, PublishMode::Leaf).await?;
        Ok(Published::new(book, report))
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn update_book(
        &self,
        id: Uuid,
        input: &CourseBookInput,
    ) -> AppResult<Published<CourseBook>> {
        validation::course_book(input)?;
        let book = self.roots.database().update_course_book(id, input).await?;
        let report = self
            .roots
            .republish(book.course_id, PublishMode::Leaf)
            .await?;
        Ok(Published::new(book, report))
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn delete_book(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        let course_id = self.roots.database().delete_course_book(id).await?;
        let report = self.roots.republish(course_id, PublishMode::Leaf).await?;
        Ok(Published::new(id, report))
    }

    /// Lessons of a course in position order
    ///
    /// # Errors
    ///
    /// Returns a database error
    pub async fn lessons(&self, course_id: Uuid) -> AppResult<Vec<Lesson>> {
        Ok(self.roots.database().lessons_by_course(course_id).await?)
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn create_lesson(
        &self,
        course_id: Uuid,
        input: &LessonInput,
    ) -> AppResult<Published<Lesson>> {
        validation::lesson(input)?;
        let lesson = self
            .roots
            .database()
            .create_lesson(course_id, input)
            .await?;
        let report = self.roots.republish(course_id, PublishMode::Leaf).await?;
        Ok(Published::new(lesson, report))
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn update_lesson(&self, id: Uuid, input: &LessonInput) -> AppResult<Published<Lesson>> {
        validation::lesson(input)?;
        let lesson = self.roots.database().update_lesson(id, input).await?;
        let report = self
            .roots
            .republish(lesson.course_id, PublishMode::Leaf)
            .await?;
        Ok(Published::new(lesson, report))
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn delete_lesson(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        let course_id = self.roots.database().delete_lesson(id).await?;
        let report = self.roots.republish(course_id, PublishMode::Leaf).await?;
        Ok(Published::new(id, report))
    }
}
