// ABOUTME: Sub-question, answer, and option writes shared by the listening and grammar families
// ABOUTME: Each committed write republishes the owning root in leaf mode without a version bump
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::roots::{RootService, RootStore};
use super::{validation, Published};
use crate::database::QuestionTables;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Answer, AnswerInput, ChoiceOption, ChoiceOptionInput, ContentType, SubQuestion,
    SubQuestionInput,
};
use crate::sync::{PublishMode, PublishReport};
use uuid::Uuid;

/// Two-level question children of one family
pub struct QuestionChildrenService<R> {
    roots: RootService<R>,
}

impl<R> Clone for QuestionChildrenService<R> {
    fn clone(&self) -> Self {
        Self {
            roots: self.roots.clone(),
        }
    }
}

impl<R: RootStore> QuestionChildrenService<R> {
    /// Create the service on top of the family's root service
    #[must_use]
    pub const fn new(roots: RootService<R>) -> Self {
        Self { roots }
    }

    fn tables(content_type: ContentType) -> AppResult<QuestionTables> {
        QuestionTables::new(R::FAMILY, content_type)
            .ok_or_else(|| AppError::unknown_content_type(R::FAMILY, content_type.as_str()))
    }

    fn option_tables(content_type: ContentType) -> AppResult<QuestionTables> {
        let tables = Self::tables(content_type)?;
        if tables.has_answers() {
            return Err(AppError::invalid_input(format!(
                "{content_type} questions hold answers, not options"
            )));
        }
        Ok(tables)
    }

    async fn publish<T>(&self, value: T, root_id: Uuid) -> AppResult<Published<T>> {
        let report: PublishReport = self.roots.republish(root_id, PublishMode::Leaf).await?;
        Ok(Published::new(value, report))
    }

    /// Sub-questions of a root in creation order
    ///
    /// # Errors
    ///
    /// Returns an unknown-type or database error
    pub async fn sub_questions(
        &self,
        content_type: ContentType,
        root_id: Uuid,
    ) -> AppResult<Vec<SubQuestion>> {
        let tables = Self::tables(content_type)?;
        Ok(self
            .roots
            .database()
            .sub_questions_by_root(tables, root_id)
            .await?)
    }

    /// Add a sub-question to a root of `content_type`
    ///
    /// # Errors
    ///
    /// Returns a validation, not-found, type-mismatch, database, or build error
    pub async fn create_sub_question(
        &self,
        root_id: Uuid,
        content_type: ContentType,
        input: &SubQuestionInput,
    ) -> AppResult<Published<SubQuestion>> {
        validation::sub_question(input)?;
        let tables = Self::tables(content_type)?;
        self.roots.root_of_type(root_id, content_type).await?;

        let question = self
            .roots
            .database()
            .create_sub_question(tables, root_id, input)
            .await?;
        self.publish(question, root_id).await
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn update_sub_question(
        &self,
        content_type: ContentType,
        id: Uuid,
        input: &SubQuestionInput,
    ) -> AppResult<Published<SubQuestion>> {
        validation::sub_question(input)?;
        let tables = Self::tables(content_type)?;

        let question = self
            .roots
            .database()
            .update_sub_question(tables, id, input)
            .await?;
        let root_id = question.root_id;
        self.publish(question, root_id).await
    }

    /// Delete a sub-question together with its answers or options
    ///
    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn delete_sub_question(
        &self,
        content_type: ContentType,
        id: Uuid,
    ) -> AppResult<Published<Uuid>> {
        let tables = Self::tables(content_type)?;
        let root_id = self
            .roots
            .database()
            .delete_sub_question(tables, id)
            .await?;
        self.publish(id, root_id).await
    }

    /// Answers of a fill-in-the-blank sub-question
    ///
    /// # Errors
    ///
    /// Returns a database error
    pub async fn answers(&self, question_id: Uuid) -> AppResult<Vec<Answer>> {
        let tables = Self::tables(ContentType::FillInTheBlank)?;
        Ok(self
            .roots
            .database()
            .answers_by_question(tables, question_id)
            .await?)
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn create_answer(
        &self,
        question_id: Uuid,
        input: &AnswerInput,
    ) -> AppResult<Published<Answer>> {
        validation::answer(input)?;
        let tables = Self::tables(ContentType::FillInTheBlank)?;

        let (answer, root_id) = self
            .roots
            .database()
            .create_answer(tables, question_id, input)
            .await?;
        self.publish(answer, root_id).await
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn update_answer(
        &self,
        id: Uuid,
        input: &AnswerInput,
    ) -> AppResult<Published<Answer>> {
        validation::answer(input)?;
        let tables = Self::tables(ContentType::FillInTheBlank)?;

        let (answer, root_id) = self
            .roots
            .database()
            .update_answer(tables, id, input)
            .await?;
        self.publish(answer, root_id).await
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn delete_answer(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        let tables = Self::tables(ContentType::FillInTheBlank)?;
        let root_id = self.roots.database().delete_answer(tables, id).await?;
        self.publish(id, root_id).await
    }

    /// Options of a choice sub-question
    ///
    /// # Errors
    ///
    /// Returns a type or database error
    pub async fn options(
        &self,
        content_type: ContentType,
        question_id: Uuid,
    ) -> AppResult<Vec<ChoiceOption>> {
        let tables = Self::option_tables(content_type)?;
        Ok(self
            .roots
            .database()
            .options_by_question(tables, question_id)
            .await?)
    }

    /// # Errors
    ///
    /// Returns a validation, type, not-found, database, or build error
    pub async fn create_option(
        &self,
        content_type: ContentType,
        question_id: Uuid,
        input: &ChoiceOptionInput,
    ) -> AppResult<Published<ChoiceOption>> {
        validation::choice_option(input)?;
        let tables = Self::option_tables(content_type)?;

        let (option, root_id) = self
            .roots
            .database()
            .create_option(tables, question_id, input)
            .await?;
        self.publish(option, root_id).await
    }

    /// # Errors
    ///
    /// Returns a validation, type, not-found, database, or build error
    pub async fn update_option(
        &self,
        content_type: ContentType,
        id: Uuid,
        input: &ChoiceOptionInput,
    ) -> AppResult<Published<ChoiceOption>> {
        validation::choice_option(input)?;
        let tables = Self::option_tables(content_type)?;

        let (option, root_id) = self
            .roots
            .database()
            .update_option(tables, id, input)
            .await?;
        self.publish(option, root_id).await
    }

    /// # Errors
    ///
    /// Returns a type, not-found, database, or build error
    pub async fn delete_option(
        &self,
        content_type: ContentType,
        id: Uuid,
    ) -> AppResult<Published<Uuid>> {
        let tables = Self::option_tables(content_type)?;
        let root_id = self.roots.database().delete_option(tables, id).await?;
        self.publish(id, root_id).await
    }
}
