// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for datekey.
//!
//! # Overview
//!
//! - [`TypeError`]: raised by column type adapters during conversion
//! - [`MappingError`]: raised while hydrating entities from storage values
//! - [`StoreError`]: raised by a [`Connection`](crate::store::Connection)
//! - [`SessionError`]: everything a [`Session`](crate::session::Session)
//!   surfaces to the application
//!
//! Errors are raised synchronously and never retried internally.

use thiserror::Error;

/// Which side of the mapping supplied an offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSide {
    /// Value came from application code (entity field, filter).
    Application,

    /// Value came from the relational store (fetched row).
    Storage
}

impl ValueSide {
    /// Lowercase tag used in messages and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Storage => "storage"
        }
    }
}

impl std::fmt::Display for ValueSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion failure inside a column type adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The value cannot be represented by the target type.
    #[error("could not convert {side} value {value} to {type_name}")]
    InvalidType {
        /// Name of the adapter that rejected the value.
        type_name: &'static str,

        /// Debug rendering of the offending value.
        value: String,

        /// Where the value came from.
        side: ValueSide
    }
}

impl TypeError {
    /// Build an [`TypeError::InvalidType`].
    pub fn invalid_type(
        type_name: &'static str,
        value: &impl std::fmt::Debug,
        side: ValueSide
    ) -> Self {
        Self::InvalidType {
            type_name,
            value: format!("{value:?}"),
            side
        }
    }

    /// Side that supplied the rejected value.
    pub const fn side(&self) -> ValueSide {
        match self {
            Self::InvalidType {
                side, ..
            } => *side
        }
    }
}

/// Failure while turning storage values into entity fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field received a value of an incompatible kind.
    #[error("field `{field}` expected {expected}, got {found}")]
    Mismatch {
        /// Rust field name.
        field:    &'static str,
        /// Expected kind.
        expected: &'static str,
        /// Rendering of the value received.
        found:    String
    },

    /// Row width does not match the entity metadata.
    #[error("entity `{entity}` expects {expected} columns, got {found}")]
    ColumnCount {
        /// Entity name.
        entity:   &'static str,
        /// Declared column count.
        expected: usize,
        /// Received column count.
        found:    usize
    }
}

/// Failure reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Statement references a table that does not exist.
    #[error("relation \"{0}\" does not exist")]
    UnknownTable(String),

    /// Table already exists on create.
    #[error("relation \"{0}\" already exists")]
    TableExists(String),

    /// Statement references a column that does not exist.
    #[error("column \"{column}\" of relation \"{table}\" does not exist")]
    UnknownColumn {
        /// Table name.
        table:  String,
        /// Column name.
        column: String
    },

    /// Insert or update would duplicate a primary key.
    #[error("duplicate key value violates unique constraint \"{0}_pkey\"")]
    DuplicateKey(String),

    /// Non-null column received null.
    #[error("null value in column \"{column}\" of relation \"{table}\"")]
    NotNull {
        /// Table name.
        table:  String,
        /// Column name.
        column: String
    },

    /// Date column received something that is not a calendar date.
    #[error("invalid input syntax for type date: {0}")]
    InvalidDate(String)
}

/// Everything a session can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Column type adapter rejected a value.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Entity hydration failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Store rejected a statement.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Filter references a column the entity does not declare.
    #[error("entity `{entity}` has no column `{column}`")]
    UnknownColumn {
        /// Entity name.
        entity: &'static str,
        /// Column name used in the filter.
        column: String
    },

    /// `find_one_or_fail` matched nothing.
    #[error("{entity} not found ({filter})")]
    NotFound {
        /// Entity name.
        entity: &'static str,
        /// Rendered filter.
        filter: String
    },

    /// Handle no longer refers to a managed entity.
    #[error("handle for `{0}` is detached from the session")]
    Detached(&'static str),

    /// Flushed update or delete matched no row by its primary key.
    #[error("{verb} of {entity} matched no row by its primary key")]
    Stale {
        /// Entity name.
        entity: &'static str,
        /// Statement verb.
        verb:   &'static str
    }
}

impl SessionError {
    /// Check if this is a not-found error.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a type conversion error.
    pub const fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    /// Check if a flushed row was missing from the store.
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_type_display() {
        let err = TypeError::invalid_type("DateType", &"2024-6-19", ValueSide::Application);
        assert_eq!(
            err.to_string(),
            "could not convert application value \"2024-6-19\" to DateType"
        );
        assert_eq!(err.side(), ValueSide::Application);
    }

    #[test]
    fn value_side_tags() {
        assert_eq!(ValueSide::Application.as_str(), "application");
        assert_eq!(ValueSide::Storage.to_string(), "storage");
    }

    #[test]
    fn session_error_from_type() {
        let err: SessionError =
            TypeError::invalid_type("DateType", &"x", ValueSide::Storage).into();
        assert!(err.is_type());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("storage"));
    }

    #[test]
    fn stale_display() {
        let err = SessionError::Stale {
            entity: "User",
            verb:   "update"
        };
        assert!(err.is_stale());
        assert_eq!(err.to_string(), "update of User matched no row by its primary key");
    }

    #[test]
    fn store_error_messages() {
        assert_eq!(
            StoreError::DuplicateKey("user".into()).to_string(),
            "duplicate key value violates unique constraint \"user_pkey\""
        );
        assert!(
            StoreError::InvalidDate("x".into())
                .to_string()
                .contains("type date")
        );
    }
}
