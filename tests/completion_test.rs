// ABOUTME: Tests for the completion classifier over hand-built detail aggregates
// ABOUTME: Covers each type's minimum-content rule, monotonicity, and mismatched branches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use linguacms::models::{
    Answer, ChoiceOption, Course, CourseBook, Detail, DetailBranch, GrammarQuestion, Lesson,
    ListeningQuestion, MapLabel, MatchingPair, SubQuestion,
};
use linguacms::sync::is_complete;
use uuid::Uuid;

fn listening(question_type: &str) -> ListeningQuestion {
    let now = Utc::now();
    ListeningQuestion {
        id: Uuid::new_v4(),
        title: "Weather forecast".to_owned(),
        audio_url: "https://cdn.example.com/weather.mp3".to_owned(),
        transcript: None,
        question_type: question_type.to_owned(),
        tags: vec![],
        version: 1,
        created_at: now,
        updated_at: now,
    }
}

fn grammar(question_type: &str) -> GrammarQuestion {
    let now = Utc::now();
    GrammarQuestion {
        id: Uuid::new_v4(),
        title: "Articles".to_owned(),
        instruction: "Choose a, an or the".to_owned(),
        level: "A1".to_owned(),
        question_type: question_type.to_owned(),
        tags: vec![],
        version: 1,
        created_at: now,
        updated_at: now,
    }
}

fn course(course_type: &str) -> Course {
    let now = Utc::now();
    Course {
        id: Uuid::new_v4(),
        name: "Business English".to_owned(),
        description: "Meetings and email".to_owned(),
        level: "B2".to_owned(),
        course_type: course_type.to_owned(),
        tags: vec![],
        version: 1,
        created_at: now,
        updated_at: now,
    }
}

fn question(root_id: Uuid) -> SubQuestion {
    let now = Utc::now();
    SubQuestion {
        id: Uuid::new_v4(),
        root_id,
        content: "It will be ___ tomorrow".to_owned(),
        created_at: now,
        updated_at: now,
    }
}

fn answers(question_id: Uuid, count: usize) -> Vec<Answer> {
    (0..count)
        .map(|i| Answer {
            id: Uuid::new_v4(),
            question_id,
            content: format!("answer {i}"),
            position: i32::try_from(i).unwrap(),
        })
        .collect()
}

fn options(question_id: Uuid, correct: usize, incorrect: usize) -> Vec<ChoiceOption> {
    (0..correct + incorrect)
        .map(|i| ChoiceOption {
            id: Uuid::new_v4(),
            question_id,
            content: format!("option {i}"),
            is_correct: i < correct,
        })
        .collect()
}

fn labels(root_id: Uuid, count: usize) -> Vec<MapLabel> {
    (0..count)
        .map(|i| MapLabel {
            id: Uuid::new_v4(),
            root_id,
            label: format!("{i}"),
            answer: "bank".to_owned(),
            position: i32::try_from(i).unwrap(),
        })
        .collect()
}

fn pairs(root_id: Uuid, count: usize) -> Vec<MatchingPair> {
    (0..count)
        .map(|i| MatchingPair {
            id: Uuid::new_v4(),
            root_id,
            prompt: format!("speaker {i}"),
            answer: "agrees".to_owned(),
            position: i32::try_from(i).unwrap(),
        })
        .collect()
}

fn lessons(course_id: Uuid, count: usize) -> Vec<Lesson> {
    (0..count)
        .map(|i| Lesson {
            id: Uuid::new_v4(),
            course_id,
            title: format!("Lesson {i}"),
            content: "Body".to_owned(),
            position: i32::try_from(i).unwrap(),
        })
        .collect()
}

fn fill_in_the_blank<R>(root: R, root_id: Uuid, answer_count: usize) -> Detail<R>
where
    R: linguacms::models::RootEntity,
{
    let question = question(root_id);
    let answers = answers(question.id, answer_count);
    Detail::new(
        root,
        DetailBranch::FillInTheBlank {
            question: Some(question),
            answers,
        },
    )
}

#[test]
fn test_listening_blank_needs_two_answers() {
    let root = listening("FILL_IN_THE_BLANK");
    let id = root.id;

    assert!(!is_complete(&fill_in_the_blank(root.clone(), id, 1)));
    assert!(is_complete(&fill_in_the_blank(root, id, 2)));
}

#[test]
fn test_grammar_blank_needs_one_answer() {
    let root = grammar("FILL_IN_THE_BLANK");
    let id = root.id;

    assert!(!is_complete(&fill_in_the_blank(root.clone(), id, 0)));
    assert!(is_complete(&fill_in_the_blank(root, id, 1)));
}

#[test]
fn test_blank_without_sub_question_is_uncomplete() {
    let detail = Detail::new(
        grammar("FILL_IN_THE_BLANK"),
        DetailBranch::FillInTheBlank {
            question: None,
            answers: answers(Uuid::new_v4(), 3),
        },
    );
    assert!(!is_complete(&detail));
}

#[test]
fn test_choice_one_rules() {
    let root = listening("CHOICE_ONE");
    let sub = question(root.id);
    let build = |correct, incorrect| {
        Detail::new(
            root.clone(),
            DetailBranch::ChoiceOne {
                question: Some(sub.clone()),
                options: options(sub.id, correct, incorrect),
            },
        )
    };

    assert!(is_complete(&build(1, 1)));
    assert!(is_complete(&build(1, 3)));
    // Needs both a correct and an incorrect option
    assert!(!is_complete(&build(2, 0)));
    assert!(!is_complete(&build(0, 2)));
    assert!(!is_complete(&build(1, 0)));
}

#[test]
fn test_choice_multi_rules() {
    let root = grammar("CHOICE_MULTI");
    let sub = question(root.id);
    let build = |correct, incorrect| {
        Detail::new(
            root.clone(),
            DetailBranch::ChoiceMulti {
                question: Some(sub.clone()),
                options: options(sub.id, correct, incorrect),
            },
        )
    };

    assert!(is_complete(&build(2, 1)));
    assert!(!is_complete(&build(1, 2)));
    assert!(!is_complete(&build(3, 0)));
    assert!(!is_complete(&build(2, 0)));
}

#[test]
fn test_flat_listening_rules() {
    let map = listening("MAP_LABELLING");
    let map_id = map.id;
    assert!(!is_complete(&Detail::new(
        map.clone(),
        DetailBranch::MapLabelling {
            labels: labels(map_id, 1)
        }
    )));
    assert!(is_complete(&Detail::new(
        map,
        DetailBranch::MapLabelling {
            labels: labels(map_id, 2)
        }
    )));

    let matching = listening("MATCHING");
    let matching_id = matching.id;
    assert!(!is_complete(&Detail::new(
        matching.clone(),
        DetailBranch::Matching { pairs: vec![] }
    )));
    assert!(is_complete(&Detail::new(
        matching,
        DetailBranch::Matching {
            pairs: pairs(matching_id, 2)
        }
    )));
}

#[test]
fn test_course_rules() {
    let book_course = course("BOOK");
    let id = book_course.id;
    let book = CourseBook {
        id: Uuid::new_v4(),
        course_id: id,
        title: "Business Result".to_owned(),
        author: "K. Hughes".to_owned(),
        publisher: Some("OUP".to_owned()),
    };

    assert!(!is_complete(&Detail::new(
        book_course.clone(),
        DetailBranch::Book {
            book: None,
            lessons: lessons(id, 3)
        }
    )));
    assert!(!is_complete(&Detail::new(
        book_course.clone(),
        DetailBranch::Book {
            book: Some(book.clone()),
            lessons: vec![]
        }
    )));
    assert!(is_complete(&Detail::new(
        book_course,
        DetailBranch::Book {
            book: Some(book),
            lessons: lessons(id, 1)
        }
    )));

    let other = course("OTHER");
    let other_id = other.id;
    assert!(is_complete(&Detail::new(
        other,
        DetailBranch::Lessons {
            lessons: lessons(other_id, 1)
        }
    )));
}

#[test]
fn test_unknown_type_is_never_complete() {
    let root = listening("ESSAY");
    let id = root.id;
    assert!(!is_complete(&fill_in_the_blank(root, id, 10)));
}

#[test]
fn test_branch_not_matching_type_is_never_complete() {
    let root = listening("MATCHING");
    let id = root.id;
    assert!(!is_complete(&Detail::new(
        root,
        DetailBranch::MapLabelling {
            labels: labels(id, 5)
        }
    )));
}

#[test]
fn test_adding_required_children_never_flips_to_uncomplete() {
    let root = listening("FILL_IN_THE_BLANK");
    let id = root.id;

    let mut was_complete = false;
    for count in 0..6 {
        let complete = is_complete(&fill_in_the_blank(root.clone(), id, count));
        assert!(complete || !was_complete, "regressed at {count} answers");
        was_complete = complete;
    }
    assert!(was_complete);
}
