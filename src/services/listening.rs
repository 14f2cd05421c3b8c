// ABOUTME: Listening question service covering roots, question children, map labels, and matching pairs
// ABOUTME: Flat-row writes check the root type before committing, then republish in leaf mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::questions::QuestionChildrenService;
use super::roots::{DetailRead, RootService};
use super::{validation, Published};
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{
    ContentType, ListeningQuestion, ListeningQuestionInput, MapLabel, MapLabelInput, MatchingPair,
    MatchingPairInput,
};
use crate::sync::{PublishMode, Updator};
use std::sync::Arc;
use uuid::Uuid;

/// Listening family operations
#[derive(Clone)]
pub struct ListeningService {
    roots: RootService<ListeningQuestion>,
    questions: QuestionChildrenService<ListeningQuestion>,
}

impl ListeningService {
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
    pub const fn roots(&self) -> &RootService<ListeningQuestion> {
        &self.roots
    }

    /// Sub-question, answer, and option operations
    #[must_use]
    pub const fn questions(&self) -> &QuestionChildrenService<ListeningQuestion> {
        &self.questions
    }

    /// # Errors
    ///
    /// Returns a validation, database, build, or search error
    pub async fn create(
        &self,
        input: &ListeningQuestionInput,
    ) -> AppResult<Published<ListeningQuestion>> {
        self.roots.create(input).await
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, build, or search error
    pub async fn update(
        &self,
        id: Uuid,
        input: &ListeningQuestionInput,
    ) -> AppResult<Published<ListeningQuestion>> {
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
    pub async fn get_detail(&self, id: Uuid) -> AppResult<DetailRead<ListeningQuestion>> {
        self.roots.get_detail(id).await
    }

    /// # Errors
    ///
    /// Returns a database error
    pub async fn changed_since(&self, version: i64) -> AppResult<Vec<ListeningQuestion>> {
        self.roots.changed_since(version).await
    }

    /// Label rows of a map-labelling question
    ///
    /// # Errors
    ///
    /// Returns a database error
    pub async fn map_labels(&self, root_id: Uuid) -> AppResult<Vec<MapLabel>> {
        Ok(self.roots.database().map_labels_by_root(root_id).await?)
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, type-mismatch, database, or build error
    pub async fn create_map_label(
        &self,
        root_id: Uuid,
        input: &MapLabelInput,
    ) -> AppResult<Published<MapLabel>> {
        validation::map_label(input)?;
        self.roots
            .root_of_type(root_id, ContentType::MapLabelling)
            .await?;

        let label = self
            .roots
            .database()
            .create_map_label(root_id, input)
            .await?;
        let report = self.roots.republish(root_id, PublishMode::Leaf).await?;
        Ok(Published::new(label, report))
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn update_map_label(
        &self,
        id: Uuid,
        input: &MapLabelInput,
    ) -> AppResult<Published<MapLabel>> {
        validation::map_label(input)?;
        let label = self.roots.database().update_map_label(id, input).await?;
        let report = self
            .roots
            .republish(label.root_id, PublishMode::Leaf)
            .await?;
        Ok(Published::new(label, report))
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn delete_map_label(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        let root_id = self.roots.database().delete_map_label(id).await?;
        let report = self.roots.republish(root_id, PublishMode::Leaf).await?;
        Ok(Published::new(id, report))
    }

    /// Rows of a matching question
    ///
    /// # Errors
    ///
    /// Returns a database error
    pub async fn matching_pairs(&self, root_id: Uuid) -> AppResult<Vec<MatchingPair>> {
        Ok(self.roots.database().matching_pairs_by_root(root_id).await?)
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, type-mismatch, database, or build error
    pub async fn create_matching_pair(
        &self,
        root_id: Uuid,
        input: &MatchingPairInput,
    ) -> AppResult<Published<MatchingPair>> {
        validation::matching_pair(input)?;
        self.roots
            .root_of_type(root_id, ContentType::Matching)
            .await?;

        let pair = self
            .roots
            .database()
            .create_matching_pair(root_id, input)
            .await?;
        let report = self.roots.republish(root_id, PublishMode::Leaf).await?;
        Ok(Published::new(pair, report))
    }

    /// # Errors
    ///
    /// Returns a validation, not-found, database, or build error
    pub async fn update_matching_pair(
        &self,
        id: Uuid,
        input: &MatchingPairInput,
    ) -> AppResult<Published<MatchingPair>> {
        validation::matching_pair(input)?;
        let pair = self
            .roots
            .database()
            .update_matching_pair(id, input)
            .await?;
        let report = self
            .roots
            .republish(pair.root_id, PublishMode::Leaf)
            .await?;
        Ok(Published::new(pair, report))
    }

    /// # Errors
    ///
    /// Returns a not-found, database, or build error
    pub async fn delete_matching_pair(&self, id: Uuid) -> AppResult<Published<Uuid>> {
        let root_id = self.roots.database().delete_matching_pair(id).await?;
        let report = self.roots.republish(root_id, PublishMode::Leaf).await?;
        Ok(Published::new(id, report))
    }
}
