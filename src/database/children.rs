// ABOUTME: Child row persistence: sub-questions, answers, options, flat rows, books, lessons
// ABOUTME: Every write resolves and returns the owning root id for republication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use super::roots::{get_datetime, get_uuid};
use super::tables::root_table;
use super::{Database, DatabaseError, QuestionTables};
use crate::models::{
    Answer, AnswerInput, ChoiceOption, ChoiceOptionInput, ContentFamily, CourseBook,
    CourseBookInput, Lesson, LessonInput, MapLabel, MapLabelInput, MatchingPair,
    MatchingPairInput, SubQuestion, SubQuestionInput,
};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

type Tx<'a> = Transaction<'a, Sqlite>;

fn row_to_sub_question(row: &SqliteRow) -> Result<SubQuestion, DatabaseError> {
    Ok(SubQuestion {
        id: get_uuid(row, "id")?,
        root_id: get_uuid(row, "root_id")?,
        content: row.try_get("content")?,
        created_at: get_datetime(row, "created_at")?,
        updated_at: get_datetime(row, "updated_at")?,
    })
}

fn row_to_answer(row: &SqliteRow) -> Result<Answer, DatabaseError> {
    Ok(Answer {
        id: get_uuid(row, "id")?,
        question_id: get_uuid(row, "question_id")?,
        content: row.try_get("content")?,
        position: row.try_get("position")?,
    })
}

fn row_to_option(row: &SqliteRow) -> Result<ChoiceOption, DatabaseError> {
    Ok(ChoiceOption {
        id: get_uuid(row, "id")?,
        question_id: get_uuid(row, "question_id")?,
        content: row.try_get("content")?,
        is_correct: row.try_get("is_correct")?,
    })
}

fn row_to_map_label(row: &SqliteRow) -> Result<MapLabel, DatabaseError> {
    Ok(MapLabel {
        id: get_uuid(row, "id")?,
        root_id: get_uuid(row, "root_id")?,
        label: row.try_get("label")?,
        answer: row.try_get("answer")?,
        position: row.try_get("position")?,
    })
}

fn row_to_matching_pair(row: &SqliteRow) -> Result<MatchingPair, DatabaseError> {
    Ok(MatchingPair {
        id: get_uuid(row, "id")?,
        root_id: get_uuid(row, "root_id")?,
        prompt: row.try_get("prompt")?,
        answer: row.try_get("answer")?,
        position: row.try_get("position")?,
    })
}

fn row_to_book(row: &SqliteRow) -> Result<CourseBook, DatabaseError> {
    Ok(CourseBook {
        id: get_uuid(row, "id")?,
        course_id: get_uuid(row, "course_id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        publisher: row.try_get("publisher")?,
    })
}

fn row_to_lesson(row: &SqliteRow) -> Result<Lesson, DatabaseError> {
    Ok(Lesson {
        id: get_uuid(row, "id")?,
        course_id: get_uuid(row, "course_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        position: row.try_get("position")?,
    })
}

/// Fail with not-found unless `id` exists in `table`
async fn ensure_exists(
    tx: &mut Tx<'_>,
    table: &str,
    entity: &'static str,
    id: Uuid,
) -> Result<(), DatabaseError> {
    let found = sqlx::query(&format!("SELECT 1 FROM {table} WHERE id = ?"))
        .bind(id.to_string())
        .fetch_optional(&mut **tx)
        .await?;

    found
        .map(|_| ())
        .ok_or_else(|| DatabaseError::not_found(entity, id))
}

/// Read one column holding a parent id from the row addressed by `id`
async fn parent_of(
    tx: &mut Tx<'_>,
    query: &str,
    entity: &'static str,
    id: Uuid,
) -> Result<Uuid, DatabaseError> {
    let row = sqlx::query(query)
        .bind(id.to_string())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found(entity, id))?;

    get_uuid(&row, "parent_id")
}

/// Root id owning a sub-question
async fn sub_question_root(
    tx: &mut Tx<'_>,
    tables: QuestionTables,
    question_id: Uuid,
) -> Result<Uuid, DatabaseError> {
    let query = format!(
        "SELECT root_id AS parent_id FROM {} WHERE id = ?",
        tables.sub_question_table()
    );
    parent_of(tx, &query, "sub_question", question_id).await
}

/// Root id owning an answer or option, through its sub-question
async fn leaf_root(
    tx: &mut Tx<'_>,
    tables: QuestionTables,
    entity: &'static str,
    leaf_id: Uuid,
) -> Result<Uuid, DatabaseError> {
    let query = format!(
        "SELECT q.root_id AS parent_id FROM {child} c JOIN {sub} q ON q.id = c.question_id WHERE c.id = ?",
        child = tables.child_table(),
        sub = tables.sub_question_table(),
    );
    parent_of(tx, &query, entity, leaf_id).await
}

fn require_answers(tables: QuestionTables) -> Result<(), DatabaseError> {
    if tables.has_answers() {
        Ok(())
    } else {
        Err(DatabaseError::QueryError {
            context: format!("{} has no answers", tables.sub_question_table()),
        })
    }
}

fn require_options(tables: QuestionTables) -> Result<(), DatabaseError> {
    if tables.has_answers() {
        Err(DatabaseError::QueryError {
            context: format!("{} has no options", tables.sub_question_table()),
        })
    } else {
        Ok(())
    }
}

impl Database {
    // ================================
    // Sub-questions
    // ================================

    /// Sub-questions of a root, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn sub_questions_by_root(
        &self,
        tables: QuestionTables,
        root_id: Uuid,
    ) -> Result<Vec<SubQuestion>, DatabaseError> {
        let query = format!(
            "SELECT id, root_id, content, created_at, updated_at FROM {} WHERE root_id = ? ORDER BY created_at ASC, rowid ASC",
            tables.sub_question_table()
        );

        let rows = sqlx::query(&query)
            .bind(root_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_sub_question).collect()
    }

    /// Insert a sub-question under a root
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the root does not exist
    pub async fn create_sub_question(
        &self,
        tables: QuestionTables,
        root_id: Uuid,
        input: &SubQuestionInput,
    ) -> Result<SubQuestion, DatabaseError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        ensure_exists(&mut tx, tables.root_table(), "root", root_id).await?;

        let row = sqlx::query(&format!(
            "INSERT INTO {} (id, root_id, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?)
             RETURNING id, root_id, content, created_at, updated_at",
            tables.sub_question_table()
        ))
        .bind(id.to_string())
        .bind(root_id.to_string())
        .bind(&input.content)
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_sub_question(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    /// Update a sub-question's content
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the sub-question does not exist
    pub async fn update_sub_question(
        &self,
        tables: QuestionTables,
        id: Uuid,
        input: &SubQuestionInput,
    ) -> Result<SubQuestion, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!(
            "UPDATE {} SET content = ?, updated_at = ? WHERE id = ?
             RETURNING id, root_id, content, created_at, updated_at",
            tables.sub_question_table()
        ))
        .bind(&input.content)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("sub_question", id))?;

        let updated = row_to_sub_question(&row)?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a sub-question and its answers or options, returning the root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the sub-question does not exist
    pub async fn delete_sub_question(
        &self,
        tables: QuestionTables,
        id: Uuid,
    ) -> Result<Uuid, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let root_id = sub_question_root(&mut tx, tables, id).await?;

        sqlx::query(&format!(
            "DELETE FROM {} WHERE id = ?",
            tables.sub_question_table()
        ))
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(root_id)
    }

    // ================================
    // Answers
    // ================================

    /// Answers of a fill-in-the-blank sub-question by blank position
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn answers_by_question(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, DatabaseError> {
        require_answers(tables)?;
        let query = format!(
            "SELECT id, question_id, content, position FROM {} WHERE question_id = ? ORDER BY position ASC, rowid ASC",
            tables.child_table()
        );

        let rows = sqlx::query(&query)
            .bind(question_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_answer).collect()
    }

    /// Insert an answer, returning it with the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the sub-question does not exist
    pub async fn create_answer(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
        input: &AnswerInput,
    ) -> Result<(Answer, Uuid), DatabaseError> {
        require_answers(tables)?;
        let mut tx = self.pool.begin().await?;
        let root_id = sub_question_root(&mut tx, tables, question_id).await?;

        let row = sqlx::query(&format!(
            "INSERT INTO {} (id, question_id, content, position) VALUES (?, ?, ?, ?)
             RETURNING id, question_id, content, position",
            tables.child_table()
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(question_id.to_string())
        .bind(&input.content)
        .bind(input.position)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_answer(&row)?;
        tx.commit().await?;
        Ok((created, root_id))
    }

    /// Update an answer, returning it with the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the answer does not exist
    pub async fn update_answer(
        &self,
        tables: QuestionTables,
        id: Uuid,
        input: &AnswerInput,
    ) -> Result<(Answer, Uuid), DatabaseError> {
        require_answers(tables)?;
        let mut tx = self.pool.begin().await?;
        let root_id = leaf_root(&mut tx, tables, "answer", id).await?;

        let row = sqlx::query(&format!(
            "UPDATE {} SET content = ?, position = ? WHERE id = ?
             RETURNING id, question_id, content, position",
            tables.child_table()
        ))
        .bind(&input.content)
        .bind(input.position)
        .bind(id.to_string())
        .fetch_one(&mut *tx)
        .await?;

        let updated = row_to_answer(&row)?;
        tx.commit().await?;
        Ok((updated, root_id))
    }

    /// Delete an answer, returning the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the answer does not exist
    pub async fn delete_answer(
        &self,
        tables: QuestionTables,
        id: Uuid,
    ) -> Result<Uuid, DatabaseError> {
        require_answers(tables)?;
        self.delete_leaf(tables, "answer", id).await
    }

    // ================================
    // Options
    // ================================

    /// Options of a choice sub-question in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn options_by_question(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
    ) -> Result<Vec<ChoiceOption>, DatabaseError> {
        require_options(tables)?;
        let query = format!(
            "SELECT id, question_id, content, is_correct FROM {} WHERE question_id = ? ORDER BY rowid ASC",
            tables.child_table()
        );

        let rows = sqlx::query(&query)
            .bind(question_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_option).collect()
    }

    /// Insert an option, returning it with the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the sub-question does not exist
    pub async fn create_option(
        &self,
        tables: QuestionTables,
        question_id: Uuid,
        input: &ChoiceOptionInput,
    ) -> Result<(ChoiceOption, Uuid), DatabaseError> {
        require_options(tables)?;
        let mut tx = self.pool.begin().await?;
        let root_id = sub_question_root(&mut tx, tables, question_id).await?;

        let row = sqlx::query(&format!(
            "INSERT INTO {} (id, question_id, content, is_correct) VALUES (?, ?, ?, ?)
             RETURNING id, question_id, content, is_correct",
            tables.child_table()
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(question_id.to_string())
        .bind(&input.content)
        .bind(input.is_correct)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_option(&row)?;
        tx.commit().await?;
        Ok((created, root_id))
    }

    /// Update an option, returning it with the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the option does not exist
    pub async fn update_option(
        &self,
        tables: QuestionTables,
        id: Uuid,
        input: &ChoiceOptionInput,
    ) -> Result<(ChoiceOption, Uuid), DatabaseError> {
        require_options(tables)?;
        let mut tx = self.pool.begin().await?;
        let root_id = leaf_root(&mut tx, tables, "option", id).await?;

        let row = sqlx::query(&format!(
            "UPDATE {} SET content = ?, is_correct = ? WHERE id = ?
             RETURNING id, question_id, content, is_correct",
            tables.child_table()
        ))
        .bind(&input.content)
        .bind(input.is_correct)
        .bind(id.to_string())
        .fetch_one(&mut *tx)
        .await?;

        let updated = row_to_option(&row)?;
        tx.commit().await?;
        Ok((updated, root_id))
    }

    /// Delete an option, returning the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the option does not exist
    pub async fn delete_option(
        &self,
        tables: QuestionTables,
        id: Uuid,
    ) -> Result<Uuid, DatabaseError> {
        require_options(tables)?;
        self.delete_leaf(tables, "option", id).await
    }

    async fn delete_leaf(
        &self,
        tables: QuestionTables,
        entity: &'static str,
        id: Uuid,
    ) -> Result<Uuid, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let root_id = leaf_root(&mut tx, tables, entity, id).await?;

        sqlx::query(&format!("DELETE FROM {} WHERE id = ?", tables.child_table()))
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(root_id)
    }

    // ================================
    // Map labels
    // ================================

    /// Label rows of a map-labelling question by position
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn map_labels_by_root(&self, root_id: Uuid) -> Result<Vec<MapLabel>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, root_id, label, answer, position FROM listening_map_labels
            WHERE root_id = ? ORDER BY position ASC, rowid ASC
            ",
        )
        .bind(root_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_map_label).collect()
    }

    /// Insert a label row
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the listening question does not exist
    pub async fn create_map_label(
        &self,
        root_id: Uuid,
        input: &MapLabelInput,
    ) -> Result<MapLabel, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        ensure_exists(
            &mut tx,
            root_table(ContentFamily::Listening),
            "listening_question",
            root_id,
        )
        .await?;

        let row = sqlx::query(
            r"
            INSERT INTO listening_map_labels (id, root_id, label, answer, position)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, root_id, label, answer, position
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(root_id.to_string())
        .bind(&input.label)
        .bind(&input.answer)
        .bind(input.position)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_map_label(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    /// Update a label row
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the row does not exist
    pub async fn update_map_label(
        &self,
        id: Uuid,
        input: &MapLabelInput,
    ) -> Result<MapLabel, DatabaseError> {
        let row = sqlx::query(
            r"
            UPDATE listening_map_labels SET label = ?, answer = ?, position = ? WHERE id = ?
            RETURNING id, root_id, label, answer, position
            ",
        )
        .bind(&input.label)
        .bind(&input.answer)
        .bind(input.position)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("map_label", id))?;

        row_to_map_label(&row)
    }

    /// Delete a label row, returning the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the row does not exist
    pub async fn delete_map_label(&self, id: Uuid) -> Result<Uuid, DatabaseError> {
        self.delete_flat_row(
            "SELECT root_id AS parent_id FROM listening_map_labels WHERE id = ?",
            "DELETE FROM listening_map_labels WHERE id = ?",
            "map_label",
            id,
        )
        .await
    }

    // ================================
    // Matching pairs
    // ================================

    /// Matching rows of a matching question by position
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn matching_pairs_by_root(
        &self,
        root_id: Uuid,
    ) -> Result<Vec<MatchingPair>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, root_id, prompt, answer, position FROM listening_matching_pairs
            WHERE root_id = ? ORDER BY position ASC, rowid ASC
            ",
        )
        .bind(root_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_matching_pair).collect()
    }

    /// Insert a matching row
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the listening question does not exist
    pub async fn create_matching_pair(
        &self,
        root_id: Uuid,
        input: &MatchingPairInput,
    ) -> Result<MatchingPair, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        ensure_exists(
            &mut tx,
            root_table(ContentFamily::Listening),
            "listening_question",
            root_id,
        )
        .await?;

        let row = sqlx::query(
            r"
            INSERT INTO listening_matching_pairs (id, root_id, prompt, answer, position)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, root_id, prompt, answer, position
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(root_id.to_string())
        .bind(&input.prompt)
        .bind(&input.answer)
        .bind(input.position)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_matching_pair(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    /// Update a matching row
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the row does not exist
    pub async fn update_matching_pair(
        &self,
        id: Uuid,
        input: &MatchingPairInput,
    ) -> Result<MatchingPair, DatabaseError> {
        let row = sqlx::query(
            r"
            UPDATE listening_matching_pairs SET prompt = ?, answer = ?, position = ? WHERE id = ?
            RETURNING id, root_id, prompt, answer, position
            ",
        )
        .bind(&input.prompt)
        .bind(&input.answer)
        .bind(input.position)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("matching_pair", id))?;

        row_to_matching_pair(&row)
    }

    /// Delete a matching row, returning the owning root id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the row does not exist
    pub async fn delete_matching_pair(&self, id: Uuid) -> Result<Uuid, DatabaseError> {
        self.delete_flat_row(
            "SELECT root_id AS parent_id FROM listening_matching_pairs WHERE id = ?",
            "DELETE FROM listening_matching_pairs WHERE id = ?",
            "matching_pair",
            id,
        )
        .await
    }

    // ================================
    // Course books
    // ================================

    /// Books of a course in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn books_by_course(&self, course_id: Uuid) -> Result<Vec<CourseBook>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, course_id, title, author, publisher FROM course_books
            WHERE course_id = ? ORDER BY rowid ASC
            ",
        )
        .bind(course_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_book).collect()
    }

    /// Insert a book
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the course does not exist
    pub async fn create_course_book(
        &self,
        course_id: Uuid,
        input: &CourseBookInput,
    ) -> Result<CourseBook, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        ensure_exists(&mut tx, root_table(ContentFamily::Course), "course", course_id).await?;

        let row = sqlx::query(
            r"
            INSERT INTO course_books (id, course_id, title, author, publisher)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, course_id, title, author, publisher
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(course_id.to_string())
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.publisher)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_book(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    /// Update a book
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the book does not exist
    pub async fn update_course_book(
        &self,
        id: Uuid,
        input: &CourseBookInput,
    ) -> Result<CourseBook, DatabaseError> {
        let row = sqlx::query(
            r"
            UPDATE course_books SET title = ?, author = ?, publisher = ? WHERE id = ?
            RETURNING id, course_id, title, author, publisher
            ",
        )
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.publisher)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("course_book", id))?;

        row_to_book(&row)
    }

    /// Delete a book, returning the owning course id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the book does not exist
    pub async fn delete_course_book(&self, id: Uuid) -> Result<Uuid, DatabaseError> {
        self.delete_flat_row(
            "SELECT course_id AS parent_id FROM course_books WHERE id = ?",
            "DELETE FROM course_books WHERE id = ?",
            "course_book",
            id,
        )
        .await
    }

    // ================================
    // Lessons
    // ================================

    /// Lessons of a course by position
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn lessons_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, course_id, title, content, position FROM course_lessons
            WHERE course_id = ? ORDER BY position ASC, rowid ASC
            ",
        )
        .bind(course_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_lesson).collect()
    }

    /// Insert a lesson
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the course does not exist
    pub async fn create_lesson(
        &self,
        course_id: Uuid,
        input: &LessonInput,
    ) -> Result<Lesson, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        ensure_exists(&mut tx, root_table(ContentFamily::Course), "course", course_id).await?;

        let row = sqlx::query(
            r"
            INSERT INTO course_lessons (id, course_id, title, content, position)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, course_id, title, content, position
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(course_id.to_string())
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.position)
        .fetch_one(&mut *tx)
        .await?;

        let created = row_to_lesson(&row)?;
        tx.commit().await?;
        Ok(created)
    }

    /// Update a lesson
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the lesson does not exist
    pub async fn update_lesson(&self, id: Uuid, input: &LessonInput) -> Result<Lesson, DatabaseError> {
        let row = sqlx::query(
            r"
            UPDATE course_lessons SET title = ?, content = ?, position = ? WHERE id = ?
            RETURNING id, course_id, title, content, position
            ",
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.position)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("lesson", id))?;

        row_to_lesson(&row)
    }

    /// Delete a lesson, returning the owning course id
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the lesson does not exist
    pub async fn delete_lesson(&self, id: Uuid) -> Result<Uuid, DatabaseError> {
        self.delete_flat_row(
            "SELECT course_id AS parent_id FROM course_lessons WHERE id = ?",
            "DELETE FROM course_lessons WHERE id = ?",
            "lesson",
            id,
        )
        .await
    }

    async fn delete_flat_row(
        &self,
        parent_query: &str,
        delete_query: &str,
        entity: &'static str,
        id: Uuid,
    ) -> Result<Uuid, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let root_id = parent_of(&mut tx, parent_query, entity, id).await?;

        sqlx::query(delete_query)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(root_id)
    }
}
