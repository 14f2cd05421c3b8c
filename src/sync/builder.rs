// ABOUTME: Detail builder dispatching each root to the child loader registered for its type
// ABOUTME: Unknown or unregistered type tags are hard errors, never an empty aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::loaders::{
    BookCourseLoader, ChildLoader, LessonsLoader, MapLabellingLoader, MatchingLoader,
    TwoLevelLoader,
};
use crate::database::repositories::ChildRepository;
use crate::database::QuestionTables;
use crate::errors::{AppError, AppResult};
use crate::models::{ContentFamily, ContentType, Detail, RootEntity};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of child loaders keyed by family and type
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<(ContentFamily, ContentType), Arc<dyn ChildLoader>>,
}

impl LoaderRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a loader for every supported family and type
    #[must_use]
    pub fn with_defaults(repo: &Arc<dyn ChildRepository>) -> Self {
        let mut registry = Self::new();

        for family in [ContentFamily::Listening, ContentFamily::Grammar] {
            for tables in QuestionTables::for_family(family) {
                registry.register(
                    family,
                    tables.content_type(),
                    Arc::new(TwoLevelLoader::new(repo.clone(), tables)),
                );
            }
        }

        registry.register(
            ContentFamily::Listening,
            ContentType::MapLabelling,
            Arc::new(MapLabellingLoader::new(repo.clone())),
        );
        registry.register(
            ContentFamily::Listening,
            ContentType::Matching,
            Arc::new(MatchingLoader::new(repo.clone())),
        );
        registry.register(
            ContentFamily::Course,
            ContentType::Book,
            Arc::new(BookCourseLoader::new(repo.clone())),
        );
        registry.register(
            ContentFamily::Course,
            ContentType::Other,
            Arc::new(LessonsLoader::new(repo.clone())),
        );

        registry
    }

    /// Register or replace the loader for a family and type
    pub fn register(
        &mut self,
        family: ContentFamily,
        content_type: ContentType,
        loader: Arc<dyn ChildLoader>,
    ) {
        self.loaders.insert((family, content_type), loader);
    }

    /// Loader for a family and type
    #[must_use]
    pub fn get(
        &self,
        family: ContentFamily,
        content_type: ContentType,
    ) -> Option<&Arc<dyn ChildLoader>> {
        self.loaders.get(&(family, content_type))
    }
}

/// Builds the detail aggregate of a root. Pure read.
#[derive(Clone)]
pub struct DetailBuilder {
    registry: LoaderRegistry,
}

impl DetailBuilder {
    /// Create a builder over a loader registry
    #[must_use]
    pub const fn new(registry: LoaderRegistry) -> Self {
        Self { registry }
    }

    /// Load the children of `root` and assemble its aggregate
    ///
    /// # Errors
    ///
    /// Returns `UnknownContentType` if the root's type tag is not recognized
    /// for its family or has no registered loader, or the repository error
    /// with the root id and operation attached
    pub async fn build<R: RootEntity>(&self, root: R) -> AppResult<Detail<R>> {
        let root_id = root.id();
        let unknown = || {
            AppError::unknown_content_type(R::FAMILY, root.type_tag())
                .with_resource_id(root_id.to_string())
                .with_operation("build_detail")
        };

        let content_type = R::FAMILY.resolve_type(root.type_tag()).ok_or_else(unknown)?;
        let loader = self
            .registry
            .get(R::FAMILY, content_type)
            .ok_or_else(unknown)?;

        let branch = loader.load(root_id).await.map_err(|e| {
            AppError::from(e)
                .with_resource_id(root_id.to_string())
                .with_operation("build_detail")
        })?;

        debug!(
            content.family = %R::FAMILY,
            content.root_id = %root_id,
            content.kind = %content_type,
            "Detail built"
        );
        Ok(Detail::new(root, branch))
    }
}
