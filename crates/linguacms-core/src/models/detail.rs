// ABOUTME: Denormalized detail aggregate combining a root with its type-specific children
// ABOUTME: The unit written to the cache and flattened into search documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::children::{Answer, ChoiceOption, CourseBook, Lesson, MapLabel, MatchingPair, SubQuestion};
use super::{ContentType, RootEntity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transient aggregate of a root entity and the children its type owns.
///
/// Never persisted in the relational store. The branch is a tagged variant,
/// so a detail can only ever carry the children of one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "R: RootEntity")]
pub struct Detail<R> {
    /// Root fields as stored
    pub root: R,
    /// Children for the root's type
    pub branch: DetailBranch,
}

impl<R: RootEntity> Detail<R> {
    /// Assemble a detail from a root and its loaded branch
    pub const fn new(root: R, branch: DetailBranch) -> Self {
        Self { root, branch }
    }
}

/// Type-specific children of a root.
///
/// Two-level branches keep the sub-question optional: a root whose
/// sub-question has not been written yet yields `question: None` and an
/// empty child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailBranch {
    /// Sub-question with accepted answers per blank
    FillInTheBlank {
        /// First sub-question of the root, if any
        question: Option<SubQuestion>,
        /// Answers of that sub-question
        answers: Vec<Answer>,
    },
    /// Sub-question with options, one intended answer
    ChoiceOne {
        /// First sub-question of the root, if any
        question: Option<SubQuestion>,
        /// Options of that sub-question
        options: Vec<ChoiceOption>,
    },
    /// Sub-question with options, several intended answers
    ChoiceMulti {
        /// First sub-question of the root, if any
        question: Option<SubQuestion>,
        /// Options of that sub-question
        options: Vec<ChoiceOption>,
    },
    /// Flat label rows
    MapLabelling {
        /// Label rows of the root
        labels: Vec<MapLabel>,
    },
    /// Flat matching rows
    Matching {
        /// Matching rows of the root
        pairs: Vec<MatchingPair>,
    },
    /// Book course
    Book {
        /// First book of the course, if any
        book: Option<CourseBook>,
        /// Lessons of the course
        lessons: Vec<Lesson>,
    },
    /// Course without a book
    Lessons {
        /// Lessons of the course
        lessons: Vec<Lesson>,
    },
}

/// Discriminant of a [`DetailBranch`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// [`DetailBranch::FillInTheBlank`]
    FillInTheBlank,
    /// [`DetailBranch::ChoiceOne`]
    ChoiceOne,
    /// [`DetailBranch::ChoiceMulti`]
    ChoiceMulti,
    /// [`DetailBranch::MapLabelling`]
    MapLabelling,
    /// [`DetailBranch::Matching`]
    Matching,
    /// [`DetailBranch::Book`]
    Book,
    /// [`DetailBranch::Lessons`]
    Lessons,
}

impl BranchKind {
    /// Branch a root of the given type must carry
    #[must_use]
    pub const fn for_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::FillInTheBlank => Self::FillInTheBlank,
            ContentType::ChoiceOne => Self::ChoiceOne,
            ContentType::ChoiceMulti => Self::ChoiceMulti,
            ContentType::MapLabelling => Self::MapLabelling,
            ContentType::Matching => Self::Matching,
            ContentType::Book => Self::Book,
            ContentType::Other => Self::Lessons,
        }
    }
}

impl DetailBranch {
    /// Discriminant of this branch
    #[must_use]
    pub const fn kind(&self) -> BranchKind {
        match self {
            Self::FillInTheBlank { .. } => BranchKind::FillInTheBlank,
            Self::ChoiceOne { .. } => BranchKind::ChoiceOne,
            Self::ChoiceMulti { .. } => BranchKind::ChoiceMulti,
            Self::MapLabelling { .. } => BranchKind::MapLabelling,
            Self::Matching { .. } => BranchKind::Matching,
            Self::Book { .. } => BranchKind::Book,
            Self::Lessons { .. } => BranchKind::Lessons,
        }
    }

    /// Empty branch for a type, as produced when no children exist yet
    #[must_use]
    pub const fn empty(content_type: ContentType) -> Self {
        match content_type {
            ContentType::FillInTheBlank => Self::FillInTheBlank {
                question: None,
                answers: Vec::new(),
            },
            ContentType::ChoiceOne => Self::ChoiceOne {
                question: None,
                options: Vec::new(),
            },
            ContentType::ChoiceMulti => Self::ChoiceMulti {
                question: None,
                options: Vec::new(),
            },
            ContentType::MapLabelling => Self::MapLabelling { labels: Vec::new() },
            ContentType::Matching => Self::Matching { pairs: Vec::new() },
            ContentType::Book => Self::Book {
                book: None,
                lessons: Vec::new(),
            },
            ContentType::Other => Self::Lessons {
                lessons: Vec::new(),
            },
        }
    }

    /// JSON-encoded string blobs for the search document.
    ///
    /// Children are stored as serialized strings rather than nested objects
    /// so that every family shares one flat index schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a child row fails to serialize
    pub fn search_blobs(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut blobs = Map::new();
        let mut put = |field: &str, value: String| {
            blobs.insert(field.to_owned(), Value::String(value));
        };

        match self {
            Self::FillInTheBlank { question, answers } => {
                if let Some(question) = question {
                    put("fill_in_the_blank_question", serde_json::to_string(question)?);
                }
                put("fill_in_the_blank_answers", serde_json::to_string(answers)?);
            }
            Self::ChoiceOne { question, options } => {
                if let Some(question) = question {
                    put("choice_one_question", serde_json::to_string(question)?);
                }
                put("choice_one_options", serde_json::to_string(options)?);
            }
            Self::ChoiceMulti { question, options } => {
                if let Some(question) = question {
                    put("choice_multi_question", serde_json::to_string(question)?);
                }
                put("choice_multi_options", serde_json::to_string(options)?);
            }
            Self::MapLabelling { labels } => {
                put("map_labelling_labels", serde_json::to_string(labels)?);
            }
            Self::Matching { pairs } => {
                put("matching_pairs", serde_json::to_string(pairs)?);
            }
            Self::Book { book, lessons } => {
                if let Some(book) = book {
                    put("course_book", serde_json::to_string(book)?);
                }
                put("course_lessons", serde_json::to_string(lessons)?);
            }
            Self::Lessons { lessons } => {
                put("course_lessons", serde_json::to_string(lessons)?);
            }
        }

        Ok(blobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_branch_matches_type() {
        for content_type in [
            ContentType::FillInTheBlank,
            ContentType::ChoiceOne,
            ContentType::ChoiceMulti,
            ContentType::MapLabelling,
            ContentType::Matching,
            ContentType::Book,
            ContentType::Other,
        ] {
            assert_eq!(
                DetailBranch::empty(content_type).kind(),
                BranchKind::for_type(content_type)
            );
        }
    }

    #[test]
    fn test_search_blobs_are_strings() {
        let question_id = Uuid::new_v4();
        let branch = DetailBranch::ChoiceOne {
            question: None,
            options: vec![ChoiceOption {
                id: Uuid::new_v4(),
                question_id,
                content: "a cat".into(),
                is_correct: true,
            }],
        };

        let blobs = branch.search_blobs().unwrap();
        assert!(!blobs.contains_key("choice_one_question"));
        let options = blobs["choice_one_options"].as_str().unwrap();
        assert!(options.contains("a cat"));
    }
}
