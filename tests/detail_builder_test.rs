// ABOUTME: Integration tests for the detail builder and its child loaders
// ABOUTME: Covers per-type dispatch, the first-sub-question rule, unknown types, and repository failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{course_input, create_test_database, grammar_input, listening_input, BrokenRepository};
use linguacms::database::repositories::{ChildRepository, ChildRepositoryImpl};
use linguacms::database::{Database, QuestionTables};
use linguacms::errors::ErrorCode;
use linguacms::models::{
    AnswerInput, ChoiceOptionInput, ContentFamily, ContentType, CourseBookInput, DetailBranch,
    LessonInput, MapLabelInput, MatchingPairInput, SubQuestionInput,
};
use linguacms::sync::{DetailBuilder, LoaderRegistry};
use std::sync::Arc;

fn builder_for(database: &Database) -> DetailBuilder {
    let repo: Arc<dyn ChildRepository> = Arc::new(ChildRepositoryImpl::new(database.clone()));
    DetailBuilder::new(LoaderRegistry::with_defaults(&repo))
}

fn sub_question(content: &str) -> SubQuestionInput {
    SubQuestionInput {
        content: content.to_owned(),
    }
}

#[tokio::test]
async fn test_root_without_children_builds_empty_branch() {
    let database = create_test_database().await;
    let builder = builder_for(&database);

    let root = database
        .create_listening_question(&listening_input("FILL_IN_THE_BLANK"))
        .await
        .unwrap();
    let detail = builder.build(root.clone()).await.unwrap();

    assert_eq!(detail.root, root);
    assert_eq!(
        detail.branch,
        DetailBranch::FillInTheBlank {
            question: None,
            answers: vec![],
        }
    );
}

#[tokio::test]
async fn test_only_first_sub_question_is_surfaced() {
    let database = create_test_database().await;
    let builder = builder_for(&database);
    let tables = QuestionTables::new(ContentFamily::Listening, ContentType::FillInTheBlank).unwrap();

    let root = database
        .create_listening_question(&listening_input("FILL_IN_THE_BLANK"))
        .await
        .unwrap();
    let first = database
        .create_sub_question(tables, root.id, &sub_question("The train leaves at ___"))
        .await
        .unwrap();
    let second = database
        .create_sub_question(tables, root.id, &sub_question("Platform ___"))
        .await
        .unwrap();

    for (position, content) in [(0, "9:15"), (1, "nine fifteen")] {
        database
            .create_answer(
                tables,
                first.id,
                &AnswerInput {
                    content: content.to_owned(),
                    position,
                },
            )
            .await
            .unwrap();
    }
    database
        .create_answer(
            tables,
            second.id,
            &AnswerInput {
                content: "4".to_owned(),
                position: 0,
            },
        )
        .await
        .unwrap();

    let detail = builder.build(root).await.unwrap();
    match detail.branch {
        DetailBranch::FillInTheBlank { question, answers } => {
            assert_eq!(question.unwrap().id, first.id);
            assert_eq!(answers.len(), 2);
            assert!(answers.iter().all(|answer| answer.question_id == first.id));
            assert_eq!(answers[0].content, "9:15");
        }
        other => panic!("unexpected branch {other:?}"),
    }
}

#[tokio::test]
async fn test_grammar_choice_multi_loads_options() {
    let database = create_test_database().await;
    let builder = builder_for(&database);
    let tables = QuestionTables::new(ContentFamily::Grammar, ContentType::ChoiceMulti).unwrap();

    let root = database
        .create_grammar_question(&grammar_input("CHOICE_MULTI"))
        .await
        .unwrap();
    let question = database
        .create_sub_question(tables, root.id, &sub_question("Pick the irregular verbs"))
        .await
        .unwrap();
    for (content, is_correct) in [("go", true), ("walk", false), ("eat", true)] {
        database
            .create_option(
                tables,
                question.id,
                &ChoiceOptionInput {
                    content: content.to_owned(),
                    is_correct,
                },
            )
            .await
            .unwrap();
    }

    let detail = builder.build(root).await.unwrap();
    match detail.branch {
        DetailBranch::ChoiceMulti { question, options } => {
            assert!(question.is_some());
            assert_eq!(options.len(), 3);
            assert_eq!(options.iter().filter(|option| option.is_correct).count(), 2);
        }
        other => panic!("unexpected branch {other:?}"),
    }
}

#[tokio::test]
async fn test_flat_listening_branches() {
    let database = create_test_database().await;
    let builder = builder_for(&database);

    let map = database
        .create_listening_question(&listening_input("MAP_LABELLING"))
        .await
        .unwrap();
    database
        .create_map_label(
            map.id,
            &MapLabelInput {
                label: "A".to_owned(),
                answer: "ticket office".to_owned(),
                position: 0,
            },
        )
        .await
        .unwrap();

    let matching = database
        .create_listening_question(&listening_input("MATCHING"))
        .await
        .unwrap();
    database
        .create_matching_pair(
            matching.id,
            &MatchingPairInput {
                prompt: "Speaker 1".to_owned(),
                answer: "is late".to_owned(),
                position: 0,
            },
        )
        .await
        .unwrap();

    let map_detail = builder.build(map).await.unwrap();
    assert!(matches!(
        map_detail.branch,
        DetailBranch::MapLabelling { ref labels } if labels.len() == 1
    ));

    let matching_detail = builder.build(matching).await.unwrap();
    assert!(matches!(
        matching_detail.branch,
        DetailBranch::Matching { ref pairs } if pairs.len() == 1
    ));
}

#[tokio::test]
async fn test_course_branches() {
    let database = create_test_database().await;
    let builder = builder_for(&database);
    let lesson = LessonInput {
        title: "At the airport".to_owned(),
        content: "Check-in phrases".to_owned(),
        position: 0,
    };

    let book_course = database.create_course(&course_input("BOOK")).await.unwrap();
    database
        .create_course_book(
            book_course.id,
            &CourseBookInput {
                title: "Travel English".to_owned(),
                author: "J. Smith".to_owned(),
                publisher: None,
            },
        )
        .await
        .unwrap();
    database.create_lesson(book_course.id, &lesson).await.unwrap();

    let other_course = database.create_course(&course_input("OTHER")).await.unwrap();
    database.create_lesson(other_course.id, &lesson).await.unwrap();

    match builder.build(book_course).await.unwrap().branch {
        DetailBranch::Book { book, lessons } => {
            assert_eq!(book.unwrap().title, "Travel English");
            assert_eq!(lessons.len(), 1);
        }
        other => panic!("unexpected branch {other:?}"),
    }

    assert!(matches!(
        builder.build(other_course).await.unwrap().branch,
        DetailBranch::Lessons { ref lessons } if lessons.len() == 1
    ));
}

#[tokio::test]
async fn test_unknown_stored_type_is_hard_error() {
    let database = create_test_database().await;
    let builder = builder_for(&database);

    let root = database
        .create_listening_question(&listening_input("ESSAY"))
        .await
        .unwrap();
    let err = builder.build(root.clone()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::UnknownContentType);
    assert_eq!(err.context.resource_id, Some(root.id.to_string()));
    assert_eq!(err.context.operation.as_deref(), Some("build_detail"));
}

#[tokio::test]
async fn test_type_of_another_family_is_rejected() {
    let database = create_test_database().await;
    let builder = builder_for(&database);

    // MATCHING is only a listening type
    let root = database
        .create_grammar_question(&grammar_input("MATCHING"))
        .await
        .unwrap();

    let err = builder.build(root).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownContentType);
}

#[tokio::test]
async fn test_unregistered_type_is_hard_error() {
    let database = create_test_database().await;
    let builder = DetailBuilder::new(LoaderRegistry::new());

    let root = database.create_course(&course_input("BOOK")).await.unwrap();
    let err = builder.build(root).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::UnknownContentType);
}

#[tokio::test]
async fn test_repository_failure_is_wrapped() {
    let database = create_test_database().await;
    let repo: Arc<dyn ChildRepository> = Arc::new(BrokenRepository);
    let builder = DetailBuilder::new(LoaderRegistry::with_defaults(&repo));

    let root = database
        .create_listening_question(&listening_input("CHOICE_ONE"))
        .await
        .unwrap();
    let err = builder.build(root.clone()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::DatabaseError);
    assert!(err.message.contains("disk I/O error"));
    assert_eq!(err.context.resource_id, Some(root.id.to_string()));
}

#[tokio::test]
async fn test_detail_round_trips_through_json() {
    let database = create_test_database().await;
    let builder = builder_for(&database);

    let course = database.create_course(&course_input("OTHER")).await.unwrap();
    database
        .create_lesson(
            course.id,
            &LessonInput {
                title: "Directions".to_owned(),
                content: "Left, right, straight on".to_owned(),
                position: 0,
            },
        )
        .await
        .unwrap();

    let detail = builder.build(course).await.unwrap();
    let json = serde_json::to_string(&detail).unwrap();
    let decoded = serde_json::from_str(&json).unwrap();

    assert_eq!(detail, decoded);
}
