// ABOUTME: Completion classifier deciding whether a detail aggregate has its minimum content
// ABOUTME: Pure function of the aggregate; advisory only, never enforced on writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use crate::constants::completion::{
    CHOICE_MULTI_MIN_CORRECT, CHOICE_MULTI_MIN_OPTIONS, CHOICE_ONE_MIN_OPTIONS,
    COURSE_MIN_LESSONS, GRAMMAR_MIN_BLANK_ANSWERS, LISTENING_MIN_BLANK_ANSWERS,
    MAP_LABELLING_MIN_ROWS, MATCHING_MIN_ROWS,
};
use crate::models::{BranchKind, ChoiceOption, ContentFamily, Detail, DetailBranch, RootEntity};

const fn min_blank_answers(family: ContentFamily) -> usize {
    match family {
        ContentFamily::Listening => LISTENING_MIN_BLANK_ANSWERS,
        ContentFamily::Grammar | ContentFamily::Course => GRAMMAR_MIN_BLANK_ANSWERS,
    }
}

fn count_correct(options: &[ChoiceOption]) -> (usize, usize) {
    let correct = options.iter().filter(|option| option.is_correct).count();
    (correct, options.len() - correct)
}

/// Whether `detail` meets the minimum-content rule of its root's type.
///
/// An unrecognized type tag, or a branch that does not match the type,
/// is never complete.
#[must_use]
pub fn is_complete<R: RootEntity>(detail: &Detail<R>) -> bool {
    let Some(content_type) = R::FAMILY.resolve_type(detail.root.type_tag()) else {
        return false;
    };
    if detail.branch.kind() != BranchKind::for_type(content_type) {
        return false;
    }

    match &detail.branch {
        DetailBranch::FillInTheBlank { question, answers } => {
            question.is_some() && answers.len() >= min_blank_answers(R::FAMILY)
        }
        DetailBranch::ChoiceOne { question, options } => {
            let (correct, incorrect) = count_correct(options);
            question.is_some()
                && options.len() >= CHOICE_ONE_MIN_OPTIONS
                && correct >= 1
                && incorrect >= 1
        }
        DetailBranch::ChoiceMulti { question, options } => {
            let (correct, incorrect) = count_correct(options);
            question.is_some()
                && options.len() >= CHOICE_MULTI_MIN_OPTIONS
                && correct >= CHOICE_MULTI_MIN_CORRECT
                && incorrect >= 1
        }
        DetailBranch::MapLabelling { labels } => labels.len() >= MAP_LABELLING_MIN_ROWS,
        DetailBranch::Matching { pairs } => pairs.len() >= MATCHING_MIN_ROWS,
        DetailBranch::Book { book, lessons } => {
            book.is_some() && lessons.len() >= COURSE_MIN_LESSONS
        }
        DetailBranch::Lessons { lessons } => lessons.len() >= COURSE_MIN_LESSONS,
    }
}
