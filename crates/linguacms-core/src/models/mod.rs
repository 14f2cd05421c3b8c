// ABOUTME: Content models shared by storage, synchronization, and services
// ABOUTME: Defines content families, type discriminators, and the RootEntity trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

/// Leaf rows owned by root entities
pub mod children;
/// Course root entity
pub mod course;
/// Denormalized detail aggregate and its type-specific branches
pub mod detail;
/// Grammar question root entity
pub mod grammar;
/// Listening question root entity
pub mod listening;

pub use children::{
    Answer, AnswerInput, ChoiceOption, ChoiceOptionInput, CourseBook, CourseBookInput, Lesson,
    LessonInput, MapLabel, MapLabelInput, MatchingPair, MatchingPairInput, SubQuestion,
    SubQuestionInput,
};
pub use course::{Course, CourseInput};
pub use detail::{BranchKind, Detail, DetailBranch};
pub use grammar::{GrammarQuestion, GrammarQuestionInput};
pub use listening::{ListeningQuestion, ListeningQuestionInput};

use crate::constants::{cache, content_types, search};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Family of root entities; each family has its own tables and search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFamily {
    /// Listening comprehension questions
    Listening,
    /// Grammar questions
    Grammar,
    /// Courses with books and lessons
    Course,
}

impl ContentFamily {
    /// Every family, in a stable order
    pub const ALL: [Self; 3] = [Self::Listening, Self::Grammar, Self::Course];

    /// Stable lowercase name used in logs and CLI flags
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listening => "listening",
            Self::Grammar => "grammar",
            Self::Course => "course",
        }
    }

    /// Parse from a lowercase family name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "listening" => Some(Self::Listening),
            "grammar" => Some(Self::Grammar),
            "course" | "courses" => Some(Self::Course),
            _ => None,
        }
    }

    /// Default search index uid for this family
    #[must_use]
    pub const fn default_index(self) -> &'static str {
        match self {
            Self::Listening => search::LISTENING_INDEX,
            Self::Grammar => search::GRAMMAR_INDEX,
            Self::Course => search::COURSE_INDEX,
        }
    }

    /// Type discriminators a root of this family may carry
    #[must_use]
    pub const fn supported_types(self) -> &'static [ContentType] {
        match self {
            Self::Listening => &[
                ContentType::FillInTheBlank,
                ContentType::ChoiceOne,
                ContentType::ChoiceMulti,
                ContentType::MapLabelling,
                ContentType::Matching,
            ],
            Self::Grammar => &[
                ContentType::FillInTheBlank,
                ContentType::ChoiceOne,
                ContentType::ChoiceMulti,
            ],
            Self::Course => &[ContentType::Book, ContentType::Other],
        }
    }

    /// Resolve a stored type tag for this family, rejecting tags the family does not own
    #[must_use]
    pub fn resolve_type(self, type_tag: &str) -> Option<ContentType> {
        ContentType::parse(type_tag).filter(|kind| self.supported_types().contains(kind))
    }
}

impl fmt::Display for ContentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of type discriminators across all families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    /// Sub-question with blank answers
    FillInTheBlank,
    /// Sub-question with options, exactly one intended answer
    ChoiceOne,
    /// Sub-question with options, several intended answers
    ChoiceMulti,
    /// Flat label rows
    MapLabelling,
    /// Flat matching rows
    Matching,
    /// Course with a book and lessons
    Book,
    /// Course with lessons only
    Other,
}

impl ContentType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FillInTheBlank => content_types::FILL_IN_THE_BLANK,
            Self::ChoiceOne => content_types::CHOICE_ONE,
            Self::ChoiceMulti => content_types::CHOICE_MULTI,
            Self::MapLabelling => content_types::MAP_LABELLING,
            Self::Matching => content_types::MATCHING,
            Self::Book => content_types::BOOK,
            Self::Other => content_types::OTHER,
        }
    }

    /// Parse from the database string representation.
    ///
    /// Unlike most enum parsers in this crate there is no fallback variant:
    /// an unrecognized tag is a data error the caller must surface.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            content_types::FILL_IN_THE_BLANK => Some(Self::FillInTheBlank),
            content_types::CHOICE_ONE => Some(Self::ChoiceOne),
            content_types::CHOICE_MULTI => Some(Self::ChoiceMulti),
            content_types::MAP_LABELLING => Some(Self::MapLabelling),
            content_types::MATCHING => Some(Self::Matching),
            content_types::BOOK => Some(Self::Book),
            content_types::OTHER => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory completion tag stored in cache keys and search documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// Failed the per-type minimum-content rule
    Uncomplete,
    /// Passed the per-type minimum-content rule
    Complete,
}

impl CompletionStatus {
    /// Map a classifier result onto a status
    #[must_use]
    pub const fn from_complete(is_complete: bool) -> Self {
        if is_complete {
            Self::Complete
        } else {
            Self::Uncomplete
        }
    }

    /// Key/document segment for this status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => cache::STATUS_COMPLETE,
            Self::Uncomplete => cache::STATUS_UNCOMPLETE,
        }
    }

    /// Parse a key/document segment
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            cache::STATUS_COMPLETE => Some(Self::Complete),
            cache::STATUS_UNCOMPLETE => Some(Self::Uncomplete),
            _ => None,
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level content item owning a type-specific hierarchy of children.
///
/// A root is the unit of cache and search publication. Its type tag is kept
/// as the raw stored string so that corrupt rows stay representable and are
/// rejected by the detail builder rather than silently coerced.
pub trait RootEntity:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Family this root belongs to
    const FAMILY: ContentFamily;

    /// Primary key
    fn id(&self) -> Uuid;

    /// Monotonic version used by clients for incremental sync
    fn version(&self) -> i64;

    /// Raw type discriminator as stored
    fn type_tag(&self) -> &str;

    /// Last modification time of the root row
    fn updated_at(&self) -> DateTime<Utc>;

    /// Scalar fields copied verbatim into the flattened search document
    fn search_fields(&self) -> Map<String, Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_type_rejects_foreign_tags() {
        assert_eq!(
            ContentFamily::Listening.resolve_type("MATCHING"),
            Some(ContentType::Matching)
        );
        assert_eq!(ContentFamily::Grammar.resolve_type("MATCHING"), None);
        assert_eq!(ContentFamily::Course.resolve_type("CHOICE_ONE"), None);
        assert_eq!(ContentFamily::Listening.resolve_type("ESSAY"), None);
    }

    #[test]
    fn test_status_segments() {
        assert_eq!(CompletionStatus::from_complete(true).as_str(), "complete");
        assert_eq!(CompletionStatus::from_complete(false).as_str(), "uncomplete");
        assert_eq!(
            CompletionStatus::parse("uncomplete"),
            Some(CompletionStatus::Uncomplete)
        );
        assert_eq!(CompletionStatus::parse("done"), None);
    }
}
