// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column type adapter contract.
//!
//! A [`ColumnType`] sits between an entity field and its column. The session
//! calls it for every value it sends to the store (INSERT values, UPDATE SET
//! values, and WHERE values alike) and for every value it reads back.
//!
//! ```text
//!            to_storage                       from_storage
//! Value ───────────────► storage Value ─────────────────► Value
//!                         (store)
//! ```
//!
//! # Implementing
//!
//! Every method has a pass-through default, so an adapter only overrides what
//! it changes:
//!
//! ```rust
//! use datekey_core::{ColumnType, TypeError, Value, ValueSide};
//!
//! #[derive(Debug)]
//! struct Uppercase;
//!
//! impl ColumnType for Uppercase {
//!     fn name(&self) -> &'static str {
//!         "Uppercase"
//!     }
//!
//!     fn to_storage(&self, value: Value) -> Result<Value, TypeError> {
//!         match value {
//!             Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
//!             Value::Null => Ok(Value::Null),
//!             other => Err(TypeError::invalid_type(self.name(), &other, ValueSide::Application))
//!         }
//!     }
//! }
//!
//! assert_eq!(Uppercase.to_storage(Value::Text("a".into())).unwrap(), Value::Text("A".into()));
//! ```

use std::fmt::Debug;

use crate::{error::TypeError, meta::ColumnMeta, platform::Platform, value::Value};

/// How two values of a column are compared during change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareAs {
    /// Compare storage values as they are.
    #[default]
    Native,

    /// Encode both sides and compare their string forms.
    String
}

/// Conversion hooks for a custom-typed column.
pub trait ColumnType: Send + Sync + Debug {
    /// Adapter name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Convert an application value into its storage form.
    ///
    /// Must be referentially transparent: the session calls it for INSERT,
    /// UPDATE SET and WHERE values and relies on identical output.
    fn to_storage(&self, value: Value) -> Result<Value, TypeError> {
        Ok(value)
    }

    /// Convert a fetched storage value into its application form.
    fn from_storage(&self, value: Value) -> Result<Value, TypeError> {
        Ok(value)
    }

    /// Representation used to compare two values of this type.
    fn compare_as(&self) -> CompareAs {
        CompareAs::Native
    }

    /// Whether storage values may be compared directly.
    ///
    /// When `false`, change detection goes through [`Self::compare_as`].
    fn ensure_comparable(&self) -> bool {
        true
    }

    /// SQL type declaration of the column.
    fn column_type(&self, column: &ColumnMeta, platform: Platform) -> String {
        platform.type_declaration(column.kind, column.length)
    }

    /// External JSON representation.
    fn to_json(&self, value: Value, _platform: Platform) -> Result<serde_json::Value, TypeError> {
        self.to_storage(value).map(|v| v.to_json())
    }
}

/// Comparable form of a storage value under `column_type`'s rules.
///
/// Two values are considered unchanged when their comparable forms are equal.
pub fn comparable_form(
    column_type: Option<&dyn ColumnType>,
    value: &Value
) -> Result<Value, TypeError> {
    let Some(ct) = column_type else {
        return Ok(value.clone());
    };
    if ct.ensure_comparable() {
        return Ok(value.clone());
    }
    match ct.compare_as() {
        CompareAs::Native => Ok(value.clone()),
        CompareAs::String => match ct.to_storage(value.clone())? {
            Value::Null => Ok(Value::Null),
            Value::Text(s) => Ok(Value::Text(s)),
            other => Ok(Value::Text(other.to_sql_literal()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ValueSide,
        value::{TemporalValue, ValueKind}
    };

    #[derive(Debug)]
    struct Passthrough;

    impl ColumnType for Passthrough {
        fn name(&self) -> &'static str {
            "Passthrough"
        }
    }

    #[derive(Debug)]
    struct DayOnly;

    impl ColumnType for DayOnly {
        fn name(&self) -> &'static str {
            "DayOnly"
        }

        fn to_storage(&self, value: Value) -> Result<Value, TypeError> {
            match value {
                Value::Temporal(t) => Ok(Value::Text(t.date_naive().to_string())),
                Value::Text(_) | Value::Null => Ok(value),
                other => Err(TypeError::invalid_type(
                    "DayOnly",
                    &other,
                    ValueSide::Application
                ))
            }
        }

        fn compare_as(&self) -> CompareAs {
            CompareAs::String
        }

        fn ensure_comparable(&self) -> bool {
            false
        }
    }

    fn at(rfc3339: &str) -> TemporalValue {
        TemporalValue::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn defaults_pass_through() {
        let v = Value::Int(7);
        assert_eq!(Passthrough.to_storage(v.clone()).unwrap(), v);
        assert_eq!(Passthrough.from_storage(v.clone()).unwrap(), v);
        assert_eq!(Passthrough.compare_as(), CompareAs::Native);
        assert!(Passthrough.ensure_comparable());
        assert_eq!(
            Passthrough.to_json(v, Platform::Postgres).unwrap(),
            serde_json::json!(7)
        );
    }

    #[test]
    fn default_column_type_uses_platform() {
        let column = ColumnMeta::new("name", "name", ValueKind::Text);
        assert_eq!(
            Passthrough.column_type(&column, Platform::Postgres),
            "varchar(255)"
        );
    }

    #[test]
    fn comparable_form_without_type_is_identity() {
        let v = Value::Text("x".into());
        assert_eq!(comparable_form(None, &v).unwrap(), v);
    }

    #[test]
    fn string_comparison_ignores_time_of_day() {
        let morning = Value::Temporal(at("2024-06-19T08:00:00+00:00"));
        let evening = Value::Temporal(at("2024-06-19T20:00:00+00:00"));
        assert_ne!(morning, evening);
        assert_eq!(
            comparable_form(Some(&DayOnly), &morning).unwrap(),
            comparable_form(Some(&DayOnly), &evening).unwrap()
        );
    }

    #[test]
    fn comparable_form_propagates_type_errors() {
        assert!(comparable_form(Some(&DayOnly), &Value::Bool(true)).is_err());
    }
}
