// ABOUTME: Input validation for root and child writes, run before any backend call
// ABOUTME: Blank required fields, unknown type tags, and negative positions are rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::errors::{AppError, AppResult};
use crate::models::{
    AnswerInput, ChoiceOptionInput, ContentFamily, ContentType, CourseBookInput, CourseInput,
    GrammarQuestionInput, LessonInput, ListeningQuestionInput, MapLabelInput, MatchingPairInput,
    RootEntity, SubQuestionInput,
};

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}

fn require_position(field: &str, position: i32) -> AppResult<()> {
    if position < 0 {
        return Err(AppError::invalid_input(format!(
            "Field '{field}' must not be negative, got {position}"
        )));
    }
    Ok(())
}

/// Resolve a type tag for a family
///
/// # Errors
///
/// Returns `UnknownContentType` when the tag is not one of the family's types
pub fn content_type(family: ContentFamily, type_tag: &str) -> AppResult<ContentType> {
    family
        .resolve_type(type_tag)
        .ok_or_else(|| AppError::unknown_content_type(family, type_tag))
}

/// Ensure a stored root is of the type a child write targets
///
/// # Errors
///
/// Returns `InvalidInput` when the root's type differs from `expected`
pub fn ensure_root_type<R: RootEntity>(root: &R, expected: ContentType) -> AppResult<()> {
    if R::FAMILY.resolve_type(root.type_tag()) == Some(expected) {
        return Ok(());
    }
    Err(AppError::invalid_input(format!(
        "{} {} is of type '{}', not '{expected}'",
        R::FAMILY,
        root.id(),
        root.type_tag()
    ))
    .with_resource_id(root.id().to_string()))
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn listening_question(input: &ListeningQuestionInput) -> AppResult<ContentType> {
    require("title", &input.title)?;
    require("audio_url", &input.audio_url)?;
    content_type(ContentFamily::Listening, &input.question_type)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn grammar_question(input: &GrammarQuestionInput) -> AppResult<ContentType> {
    require("title", &input.title)?;
    require("instruction", &input.instruction)?;
    content_type(ContentFamily::Grammar, &input.question_type)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn course(input: &CourseInput) -> AppResult<ContentType> {
    require("name", &input.name)?;
    content_type(ContentFamily::Course, &input.course_type)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn sub_question(input: &SubQuestionInput) -> AppResult<()> {
    require("content", &input.content)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn answer(input: &AnswerInput) -> AppResult<()> {
    require("content", &input.content)?;
    require_position("position", input.position)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn choice_option(input: &ChoiceOptionInput) -> AppResult<()> {
    require("content", &input.content)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn map_label(input: &MapLabelInput) -> AppResult<()> {
    require("label", &input.label)?;
    require("answer", &input.answer)?;
    require_position("position", input.position)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn matching_pair(input: &MatchingPairInput) -> AppResult<()> {
    require("prompt", &input.prompt)?;
    require("answer", &input.answer)?;
    require_position("position", input.position)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn course_book(input: &CourseBookInput) -> AppResult<()> {
    require("title", &input.title)?;
    require("author", &input.author)
}

/// # Errors
///
/// Returns a validation error for the first offending field
pub fn lesson(input: &LessonInput) -> AppResult<()> {
    require("title", &input.title)?;
    require_position("position", input.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn listening(question_type: &str) -> ListeningQuestionInput {
        ListeningQuestionInput {
            title: "Airport announcement".into(),
            audio_url: "https://cdn.example.com/a.mp3".into(),
            transcript: None,
            question_type: question_type.into(),
            tags: vec![],
        }
    }

    #[test]
    fn test_listening_accepts_known_type() {
        assert_eq!(
            listening_question(&listening("MATCHING")).unwrap(),
            ContentType::Matching
        );
    }

    #[test]
    fn test_grammar_rejects_listening_only_type() {
        let input = GrammarQuestionInput {
            title: "Past simple".into(),
            instruction: "Pick one".into(),
            level: "B1".into(),
            question_type: "MAP_LABELLING".into(),
            tags: vec![],
        };
        let err = grammar_question(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownContentType);
    }

    #[test]
    fn test_blank_title_is_missing_field() {
        let mut input = listening("CHOICE_ONE");
        input.title = "   ".into();
        let err = listening_question(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_negative_position_rejected() {
        let err = answer(&AnswerInput {
            content: "went".into(),
            position: -1,
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
