// ABOUTME: Grammar question service covering roots and their two-level question children
// ABOUTME: Thin facade over the shared root and question-children services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::questions::QuestionChildrenService;
use super::roots::{DetailRead, RootService};
use super::Published;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{GrammarQuestion, GrammarQuestionInput};
use crate::sync::Updator;
use std::sync::Arc;
use uuid::Uuid;

/// Grammar family operations
#[derive(Clone)]
pub struct GrammarService {
    roots: RootService<GrammarQuestion>,
    questions: QuestionChildrenService<GrammarQuestion>,
}

impl GrammarService {
    /// Create the service over a store and a shared updator
    #[must_use]
    pub fn new(db: Database, updator: Arc<Updator>) -> Self {
        let roots = RootService::new(db, updator);
        Self {
            questions: QuestionChildrenService::new(roots.clone()),
            roots,
        }
    }

    /// Root lifecycle operations
    #[must_use]
    pub const fn roots(&self) -> &RootService<GrammarQuestion> {
        &self.roots
    }

    /// Sub-question, answer, and option operations
    #[must_use]
    pub const fn questions(&self) -> &QuestionChildrenService<GrammarQuestion> {
        &self.questions
    }

    /// # Errors
    ///
    /// Returns a validation, database, build, or search error
    pub async fn create(&self, input: &GrammarQuestionInput) -> AppResult<Published<GrammarQuestion>> {
        self.roots.create(input).await
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, build, or search error
    pub async fn update(
        &self,
        id: Uuid,
        input: &GrammarQuestionInput,
    ) -> AppResult<Published<GrammarQuestion>> {
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
    pub async fn get_detail(&self, id: Uuid) -> AppResult<DetailRead<GrammarQuestion>> {
        self.roots.get_detail(id).await
    }

    /// # Errors
    ///
    /// Returns a database error
    pub async fn changed_since(&self, version: i64) -> AppResult<Vec<GrammarQuestion>> {
        self.roots.changed_since(version).await
    }
}
