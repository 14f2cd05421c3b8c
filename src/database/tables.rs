// ABOUTME: Static table names for every family and two-level question type
// ABOUTME: Lets one set of queries serve listening and grammar sub-question tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::models::{ContentFamily, ContentType};

/// Root table of a family
#[must_use]
pub const fn root_table(family: ContentFamily) -> &'static str {
    match family {
        ContentFamily::Listening => "listening_questions",
        ContentFamily::Grammar => "grammar_questions",
        ContentFamily::Course => "courses",
    }
}

/// Table pair of a two-level question type: sub-questions and their answers or options.
///
/// Only constructible for listening/grammar with `FILL_IN_THE_BLANK`,
/// `CHOICE_ONE`, or `CHOICE_MULTI`, so every accessor maps to a real table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionTables {
    family: ContentFamily,
    content_type: ContentType,
}

impl QuestionTables {
    const TWO_LEVEL: [ContentType; 3] = [
        ContentType::FillInTheBlank,
        ContentType::ChoiceOne,
        ContentType::ChoiceMulti,
    ];

    /// Tables for a family and type, `None` if the pair has no sub-question level
    #[must_use]
    pub fn new(family: ContentFamily, content_type: ContentType) -> Option<Self> {
        let question_family = matches!(family, ContentFamily::Listening | ContentFamily::Grammar);
        (question_family && Self::TWO_LEVEL.contains(&content_type)).then_some(Self {
            family,
            content_type,
        })
    }

    /// Every two-level table pair of a family
    #[must_use]
    pub fn for_family(family: ContentFamily) -> Vec<Self> {
        Self::TWO_LEVEL
            .iter()
            .filter_map(|content_type| Self::new(family, *content_type))
            .collect()
    }

    /// Owning family
    #[must_use]
    pub const fn family(self) -> ContentFamily {
        self.family
    }

    /// Question type served by these tables
    #[must_use]
    pub const fn content_type(self) -> ContentType {
        self.content_type
    }

    /// Whether the child table holds answers rather than options
    #[must_use]
    pub const fn has_answers(self) -> bool {
        matches!(self.content_type, ContentType::FillInTheBlank)
    }

    /// Root table the sub-questions reference
    #[must_use]
    pub const fn root_table(self) -> &'static str {
        root_table(self.family)
    }

    /// Sub-question table
    #[must_use]
    pub const fn sub_question_table(self) -> &'static str {
        match (self.family, self.content_type) {
            (ContentFamily::Listening, ContentType::FillInTheBlank) => {
                "listening_fill_in_the_blank_questions"
            }
            (ContentFamily::Listening, ContentType::ChoiceOne) => "listening_choice_one_questions",
            (ContentFamily::Listening, _) => "listening_choice_multi_questions",
            (_, ContentType::FillInTheBlank) => "grammar_fill_in_the_blank_questions",
            (_, ContentType::ChoiceOne) => "grammar_choice_one_questions",
            (_, _) => "grammar_choice_multi_questions",
        }
    }

    /// Answer or option table
    #[must_use]
    pub const fn child_table(self) -> &'static str {
        match (self.family, self.content_type) {
            (ContentFamily::Listening, ContentType::FillInTheBlank) => {
                "listening_fill_in_the_blank_answers"
            }
            (ContentFamily::Listening, ContentType::ChoiceOne) => "listening_choice_one_options",
            (ContentFamily::Listening, _) => "listening_choice_multi_options",
            (_, ContentType::FillInTheBlank) => "grammar_fill_in_the_blank_answers",
            (_, ContentType::ChoiceOne) => "grammar_choice_one_options",
            (_, _) => "grammar_choice_multi_options",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_two_level_pairs_construct() {
        assert!(QuestionTables::new(ContentFamily::Listening, ContentType::Matching).is_none());
        assert!(QuestionTables::new(ContentFamily::Course, ContentType::ChoiceOne).is_none());
        assert_eq!(QuestionTables::for_family(ContentFamily::Grammar).len(), 3);
        assert!(QuestionTables::for_family(ContentFamily::Course).is_empty());
    }

    #[test]
    fn test_table_names_are_family_scoped() {
        let listening =
            QuestionTables::new(ContentFamily::Listening, ContentType::ChoiceMulti).unwrap();
        let grammar =
            QuestionTables::new(ContentFamily::Grammar, ContentType::FillInTheBlank).unwrap();

        assert_eq!(listening.sub_question_table(), "listening_choice_multi_questions");
        assert_eq!(listening.child_table(), "listening_choice_multi_options");
        assert_eq!(grammar.child_table(), "grammar_fill_in_the_blank_answers");
        assert!(grammar.has_answers());
        assert_eq!(grammar.root_table(), "grammar_questions");
    }
}
