// ABOUTME: Structured error types for database operations
// ABOUTME: Distinguishes not-found from query, constraint, and decoding failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lingua CMS

use thiserror::Error;

/// Errors produced by repositories and the relational store.
///
/// Absence of children is never an error (repositories return an empty
/// `Vec`); only a missing root or addressed row yields [`DatabaseError::NotFound`].
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Addressed row does not exist
    #[error("{entity_type} '{entity_id}' not found")]
    NotFound {
        /// Table-level entity name
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// Query failed to execute
    #[error("query failed: {context}")]
    QueryError {
        /// Description of the failing query
        context: String,
    },

    /// Unique or foreign key constraint rejected the write
    #[error("constraint violation: {context}")]
    ConstraintViolation {
        /// Description of the violated constraint
        context: String,
    },

    /// Pool or connection failure
    #[error("connection error: {context}")]
    ConnectionError {
        /// Description of the connection problem
        context: String,
    },

    /// Stored value could not be decoded
    #[error("invalid stored value: {context}")]
    SerializationError {
        /// Description of the bad value
        context: String,
    },
}

impl DatabaseError {
    /// Build a not-found error for an entity id
    pub fn not_found(entity_type: &'static str, entity_id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            entity_id: entity_id.to_string(),
        }
    }

    /// Whether this error signals a missing row
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError {
            context: error.to_string(),
        }
    }
}

impl From<uuid::Error> for DatabaseError {
    fn from(error: uuid::Error) -> Self {
        Self::SerializationError {
            context: format!("invalid uuid: {error}"),
        }
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(error: chrono::ParseError) -> Self {
        Self::SerializationError {
            context: format!("invalid datetime: {error}"),
        }
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound {
                entity_type: "row",
                entity_id: String::new(),
            },
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                    Self::ConstraintViolation {
                        context: db_err.to_string(),
                    }
                } else {
                    Self::QueryError {
                        context: db_err.to_string(),
                    }
                }
            }
            sqlx::Error::PoolTimedOut => Self::ConnectionError {
                context: "connection pool timed out".to_owned(),
            },
            sqlx::Error::PoolClosed => Self::ConnectionError {
                context: "connection pool closed".to_owned(),
            },
            sqlx::Error::Io(io_err) => Self::ConnectionError {
                context: io_err.to_string(),
            },
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
