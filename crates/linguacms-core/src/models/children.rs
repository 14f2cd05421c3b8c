// ABOUTME: Leaf rows owned by root entities (sub-questions, answers, options, rows, lessons)
// ABOUTME: Each row references its immediate parent by foreign key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type-specific question stem owned directly by a root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestion {
    /// Unique identifier
    pub id: Uuid,
    /// Owning root entity
    pub root_id: Uuid,
    /// Stem text, may contain blank markers
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Accepted answer for one blank of a fill-in-the-blank sub-question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Unique identifier
    pub id: Uuid,
    /// Owning sub-question
    pub question_id: Uuid,
    /// Accepted answer text
    pub content: String,
    /// Blank index, zero-based
    pub position: i32,
}

/// Option of a choice sub-question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Unique identifier
    pub id: Uuid,
    /// Owning sub-question
    pub question_id: Uuid,
    /// Option text
    pub content: String,
    /// Whether selecting this option is correct
    pub is_correct: bool,
}

/// One label of a map-labelling question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLabel {
    /// Unique identifier
    pub id: Uuid,
    /// Owning listening question
    pub root_id: Uuid,
    /// Label marker shown on the map
    pub label: String,
    /// Expected answer
    pub answer: String,
    /// Display order
    pub position: i32,
}

/// One row of a matching question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    /// Unique identifier
    pub id: Uuid,
    /// Owning listening question
    pub root_id: Uuid,
    /// Left-hand prompt
    pub prompt: String,
    /// Right-hand answer
    pub answer: String,
    /// Display order
    pub position: i32,
}

/// Book metadata of a `BOOK` course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBook {
    /// Unique identifier
    pub id: Uuid,
    /// Owning course
    pub course_id: Uuid,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Publisher, if known
    pub publisher: Option<String>,
}

/// Lesson of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier
    pub id: Uuid,
    /// Owning course
    pub course_id: Uuid,
    /// Lesson title
    pub title: String,
    /// Lesson body
    pub content: String,
    /// Display order
    pub position: i32,
}

/// Write payload for a sub-question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestionInput {
    /// Stem text
    pub content: String,
}

/// Write payload for a fill-in-the-blank answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    /// Accepted answer text
    pub content: String,
    /// Blank index, zero-based
    pub position: i32,
}

/// Write payload for a choice option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOptionInput {
    /// Option text
    pub content: String,
    /// Whether selecting this option is correct
    pub is_correct: bool,
}

/// Write payload for a map label row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLabelInput {
    /// Label marker
    pub label: String,
    /// Expected answer
    pub answer: String,
    /// Display order
    pub position: i32,
}

/// Write payload for a matching row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPairInput {
    /// Left-hand prompt
    pub prompt: String,
    /// Right-hand answer
    pub answer: String,
    /// Display order
    pub position: i32,
}

/// Write payload for a course book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBookInput {
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Publisher, if known
    pub publisher: Option<String>,
}

/// Write payload for a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonInput {
    /// Lesson title
    pub title: String,
    /// Lesson body
    pub content: String,
    /// Display order
    pub position: i32,
}
