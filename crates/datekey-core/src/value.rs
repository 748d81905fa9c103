// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamic value model shared by entities, column types and stores.
//!
//! Entity fields are lowered to [`Value`] before they reach a column type
//! adapter, and stores only ever see the adapter's output. The union is closed,
//! so adapters dispatch with an exhaustive `match` instead of runtime type
//! checks.
//!
//! ```text
//! entity field ──ToValue──► Value ──ColumnType::to_storage──► store
//! entity field ◄─FromValue── Value ◄─ColumnType::from_storage── store
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::{calendar::CalendarDate, error::MappingError};

/// Absolute instant that remembers the offset it was constructed in.
///
/// The calendar fields of the original offset are what a date column stores.
pub type TemporalValue = DateTime<FixedOffset>;

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (`NULL`).
    Null,

    /// Boolean.
    Bool(bool),

    /// Signed integer.
    Int(i64),

    /// Text, including canonical `YYYY-MM-DD` dates.
    Text(String),

    /// In-memory temporal value.
    Temporal(TemporalValue)
}

impl Value {
    /// Check for `NULL`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None
        }
    }

    /// Kind of this value; `None` for `NULL`.
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Temporal(_) => Some(ValueKind::Temporal)
        }
    }

    /// Render as a SQL literal.
    ///
    /// Temporal values are rendered as UTC ISO 8601 with millisecond precision,
    /// the way a generic driver stringifies an instant.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Text(s) => quote_literal(s),
            Self::Temporal(t) => quote_literal(
                &t.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        }
    }

    /// Plain JSON rendering for values without a custom column type.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Temporal(t) => serde_json::Value::String(t.to_rfc3339())
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Coarse kind of a column, used for DDL of plain columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `boolean`
    Bool,
    /// `int` / `bigint`
    Int,
    /// `varchar` / `text`
    Text,
    /// `timestamptz`
    Temporal
}

impl ValueKind {
    /// Human readable name for mapping errors.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Text => "text",
            Self::Temporal => "temporal"
        }
    }
}

/// Lower a Rust field into a [`Value`].
pub trait ToValue {
    /// Produce the value without consuming the field.
    fn to_value(&self) -> Value;
}

/// Lift a [`Value`] back into a Rust field.
pub trait FromValue: Sized {
    /// Convert, naming `field` in the error.
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError>;
}

fn mismatch(field: &'static str, expected: &'static str, found: &Value) -> MappingError {
    MappingError::Mismatch {
        field,
        expected,
        found: format!("{found:?}")
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(field, "bool", &other))
        }
    }
}

macro_rules! int_value {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| mismatch(field, stringify!($ty), &value)),
                    other => Err(mismatch(field, stringify!($ty), &other))
                }
            }
        }
    )*};
}

int_value!(i16, i32, i64, u16, u32);

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FromValue for String {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch(field, "text", &other))
        }
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    /// Keeps the wall-clock fields of `Tz`, so local midnight stays on its
    /// calendar date.
    fn to_value(&self) -> Value {
        Value::Temporal(self.fixed_offset())
    }
}

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        match value {
            Value::Temporal(t) => Ok(t),
            other => Err(mismatch(field, "temporal", &other))
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        DateTime::<FixedOffset>::from_value(value, field).map(|t| into_zone(t, &Utc))
    }
}

impl FromValue for DateTime<Local> {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        DateTime::<FixedOffset>::from_value(value, field).map(|t| into_zone(t, &Local))
    }
}

/// Move `t` into `zone`.
///
/// Midnight in the value's own offset is a calendar date (date columns decode
/// to that shape) and becomes midnight of the same date in `zone`. Any other
/// value keeps its instant.
fn into_zone<Tz: TimeZone>(t: TemporalValue, zone: &Tz) -> DateTime<Tz> {
    if t.time() != NaiveTime::MIN {
        return t.with_timezone(zone);
    }
    t.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(zone.clone())
        .earliest()
        .unwrap_or_else(|| t.with_timezone(zone))
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Text(CalendarDate::from(*self).to_string())
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        match value {
            Value::Temporal(t) => Ok(t.date_naive()),
            Value::Text(ref s) => s
                .parse::<CalendarDate>()
                .map(NaiveDate::from)
                .map_err(|_| mismatch(field, "date", &value)),
            other => Err(mismatch(field, "date", &other))
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value, field: &'static str) -> Result<Self, MappingError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, field).map(Some)
        }
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}
