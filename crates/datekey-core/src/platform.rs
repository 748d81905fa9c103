// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL platform (dialect) configuration.
//!
//! [`Platform`] controls identifier quoting, parameter placeholders and the
//! type declarations used in DDL.
//!
//! | Platform | Placeholders | Date column | Text column |
//! |----------|--------------|-------------|-------------|
//! | PostgreSQL | `$1, $2, ...` | `date` | `varchar(n)` |
//! | SQLite | `?` | `text` | `text` |

use std::str::FromStr;

use serde::Deserialize;

use crate::value::ValueKind;

/// Default `varchar` length for text columns without an explicit length.
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;

/// SQL platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// PostgreSQL.
    #[default]
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,

    /// SQLite. Dates are stored as text.
    Sqlite
}

impl Platform {
    /// Quote an identifier.
    #[must_use]
    pub fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Placeholder for the parameter at `index` (1-based).
    #[must_use]
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Self::Postgres => format!("${index}"),
            Self::Sqlite => "?".to_string()
        }
    }

    /// Declaration of a calendar date column.
    ///
    /// `length` is accepted for parity with other declarations; neither
    /// platform uses it for dates.
    #[must_use]
    pub fn date_type_declaration(&self, _length: Option<u32>) -> String {
        match self {
            Self::Postgres => "date".to_string(),
            Self::Sqlite => "text".to_string()
        }
    }

    /// Declaration of a plain column of `kind`.
    #[must_use]
    pub fn type_declaration(&self, kind: ValueKind, length: Option<u32>) -> String {
        match (self, kind) {
            (Self::Postgres, ValueKind::Bool) => "boolean".to_string(),
            (Self::Postgres, ValueKind::Int) => "int".to_string(),
            (Self::Postgres, ValueKind::Text) => {
                format!("varchar({})", length.unwrap_or(DEFAULT_VARCHAR_LENGTH))
            }
            (Self::Postgres, ValueKind::Temporal) => "timestamptz".to_string(),
            (Self::Sqlite, ValueKind::Bool | ValueKind::Int) => "integer".to_string(),
            (Self::Sqlite, ValueKind::Text | ValueKind::Temporal) => "text".to_string()
        }
    }

    /// Check whether `declaration` names a calendar date column.
    #[must_use]
    pub fn is_date_declaration(&self, declaration: &str) -> bool {
        matches!(self, Self::Postgres) && declaration.eq_ignore_ascii_case("date")
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown platform `{other}`"))
        }
    }
}
