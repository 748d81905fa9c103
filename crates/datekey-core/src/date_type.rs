// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Calendar date column type.
//!
//! [`DateType`] stores a [`TemporalValue`] as a `YYYY-MM-DD` string. The
//! string is built from the calendar fields of the offset the value was
//! constructed in, so local midnight on 2024-06-19 is stored as `2024-06-19`
//! whatever the offset is.
//!
//! # Formats
//!
//! | Format | Local midnight 2024-06-19 at UTC+3 | Notes |
//! |--------|-------------------------------------|-------|
//! | [`DateFormat::Calendar`] | `2024-06-19` | default |
//! | [`DateFormat::UtcInstant`] | `2024-06-18` | legacy, shifts by the offset |
//!
//! The legacy format reproduces adapters that slice the date out of a UTC ISO
//! timestamp. It is kept for regression tests of stored data written that way.
//!
//! # Example
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use datekey_core::{ColumnType, DateType, Value};
//!
//! let riga = FixedOffset::east_opt(3 * 3600).unwrap();
//! let midnight = riga.with_ymd_and_hms(2024, 6, 19, 0, 0, 0).unwrap();
//!
//! let stored = DateType::new().to_storage(Value::Temporal(midnight)).unwrap();
//! assert_eq!(stored, Value::Text("2024-06-19".into()));
//! ```

use chrono::{DateTime, FixedOffset, NaiveTime, Offset, Utc};

use crate::{
    calendar::{self, CalendarDate},
    column_type::{ColumnType, CompareAs},
    error::{TypeError, ValueSide},
    meta::ColumnMeta,
    platform::Platform,
    value::{TemporalValue, Value}
};

const NAME: &str = "DateType";

/// Rule used to turn a temporal value into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateFormat {
    /// Calendar fields in the value's own offset.
    #[default]
    Calendar,

    /// Calendar fields of the UTC instant.
    UtcInstant
}

/// Column type for calendar dates stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateType {
    format:        DateFormat,
    decode_offset: FixedOffset
}

impl Default for DateType {
    fn default() -> Self {
        Self::new()
    }
}

impl DateType {
    /// Calendar-field date type decoding to UTC midnight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            format:        DateFormat::Calendar,
            decode_offset: Utc.fix()
        }
    }

    /// Legacy date type that formats through the UTC instant.
    #[must_use]
    pub fn utc_normalized() -> Self {
        Self {
            format: DateFormat::UtcInstant,
            ..Self::new()
        }
    }

    /// Offset in which decoded dates start at midnight.
    #[must_use]
    pub const fn with_decode_offset(mut self, offset: FixedOffset) -> Self {
        self.decode_offset = offset;
        self
    }

    /// Formatting rule.
    #[must_use]
    pub const fn format(&self) -> DateFormat {
        self.format
    }

    /// Calendar date of `value` under this type's format.
    #[must_use]
    pub fn calendar_date(&self, value: &TemporalValue) -> CalendarDate {
        match self.format {
            DateFormat::Calendar => value.date_naive().into(),
            DateFormat::UtcInstant => value.with_timezone(&Utc).date_naive().into()
        }
    }

    /// Encode an application value as a canonical date string.
    ///
    /// # Errors
    ///
    /// [`TypeError::InvalidType`] with [`ValueSide::Application`] for
    /// non-canonical text, for dates whose year does not fit four digits and
    /// for values that are neither text nor temporal.
    pub fn encode(&self, value: Value) -> Result<Value, TypeError> {
        let encoded = match value {
            Value::Null => Value::Null,
            Value::Temporal(ref t) => {
                let date = self.calendar_date(t);
                if !date.is_canonical_year() {
                    return Err(TypeError::invalid_type(NAME, &value, ValueSide::Application));
                }
                Value::Text(date.to_string())
            }
            Value::Text(ref s) if calendar::is_canonical(s) => value,
            other => return Err(TypeError::invalid_type(NAME, &other, ValueSide::Application))
        };
        Ok(encoded)
    }

    /// Decode a storage value into a temporal value.
    ///
    /// Canonical dates decode to midnight in the decode offset; RFC 3339
    /// timestamps decode to their instant.
    ///
    /// # Errors
    ///
    /// [`TypeError::InvalidType`] with [`ValueSide::Storage`] when the text is
    /// not a date or timestamp, or the value is of another kind.
    pub fn decode(&self, value: Value) -> Result<Value, TypeError> {
        match value {
            Value::Null | Value::Temporal(_) => Ok(value),
            Value::Text(ref s) => self
                .parse(s)
                .map(Value::Temporal)
                .ok_or_else(|| TypeError::invalid_type(NAME, &value, ValueSide::Storage)),
            other => Err(TypeError::invalid_type(NAME, &other, ValueSide::Storage))
        }
    }

    fn parse(&self, s: &str) -> Option<TemporalValue> {
        if calendar::is_canonical(s) {
            let date: CalendarDate = s.parse().ok()?;
            return date
                .naive()
                .and_time(NaiveTime::MIN)
                .and_local_timezone(self.decode_offset)
                .single();
        }
        DateTime::parse_from_rfc3339(s).ok()
    }
}

impl ColumnType for DateType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn to_storage(&self, value: Value) -> Result<Value, TypeError> {
        let encoded = self.encode(value)?;
        tracing::trace!(type_name = NAME, output = %encoded, "encoded date");
        Ok(encoded)
    }

    fn from_storage(&self, value: Value) -> Result<Value, TypeError> {
        self.decode(value)
    }

    fn compare_as(&self) -> CompareAs {
        CompareAs::String
    }

    fn ensure_comparable(&self) -> bool {
        false
    }

    fn column_type(&self, column: &ColumnMeta, platform: Platform) -> String {
        platform.date_type_declaration(column.length)
    }

    fn to_json(&self, value: Value, _platform: Platform) -> Result<serde_json::Value, TypeError> {
        self.encode(value).map(|v| v.to_json())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::value::ValueKind;

    fn local_midnight(offset_hours: i32, y: i32, m: u32, d: u32) -> Value {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        Value::Temporal(offset.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn encodes_local_midnight_in_any_offset() {
        for hours in [0, 3, -5, 14, -12] {
            assert_eq!(
                DateType::new().encode(local_midnight(hours, 2024, 6, 19)).unwrap(),
                text("2024-06-19"),
                "offset {hours}"
            );
        }
    }

    #[test]
    fn legacy_format_shifts_east_of_utc() {
        let legacy = DateType::utc_normalized();
        assert_eq!(legacy.format(), DateFormat::UtcInstant);
        assert_eq!(
            legacy.encode(local_midnight(3, 2024, 6, 19)).unwrap(),
            text("2024-06-18")
        );
        assert_eq!(
            legacy.encode(local_midnight(-5, 2024, 6, 19)).unwrap(),
            text("2024-06-19")
        );
    }

    #[test]
    fn canonical_text_passes_through() {
        assert_eq!(
            DateType::new().encode(text("2024-06-19")).unwrap(),
            text("2024-06-19")
        );
    }

    #[test]
    fn null_passes_through_both_ways() {
        assert_eq!(DateType::new().encode(Value::Null).unwrap(), Value::Null);
        assert_eq!(DateType::new().decode(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn rejects_unpadded_application_text() {
        let err = DateType::new().encode(text("2024-6-19")).unwrap_err();
        assert_eq!(err.side(), ValueSide::Application);
        assert!(matches!(err, TypeError::InvalidType { type_name: "DateType", .. }));
    }

    #[test]
    fn rejects_non_date_application_values() {
        for value in [Value::Int(20240619), Value::Bool(true)] {
            let err = DateType::new().encode(value).unwrap_err();
            assert_eq!(err.side(), ValueSide::Application);
        }
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        let far = Value::Temporal(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap().fixed_offset());
        let err = DateType::new().encode(far).unwrap_err();
        assert_eq!(err.side(), ValueSide::Application);

        let before_zero = local_midnight(0, -1, 6, 19);
        let err = DateType::new().encode(before_zero).unwrap_err();
        assert_eq!(err.side(), ValueSide::Application);

        assert_eq!(
            DateType::new().encode(local_midnight(0, 9999, 12, 31)).unwrap(),
            text("9999-12-31")
        );
    }

    #[test]
    fn rejects_garbage_from_storage() {
        let err = DateType::new().decode(text("not-a-date")).unwrap_err();
        assert_eq!(err.side(), ValueSide::Storage);
        let err = DateType::new().decode(text("2023-02-29")).unwrap_err();
        assert_eq!(err.side(), ValueSide::Storage);
        let err = DateType::new().decode(Value::Int(1)).unwrap_err();
        assert_eq!(err.side(), ValueSide::Storage);
    }

    #[test]
    fn decodes_to_midnight_in_decode_offset() {
        let riga = FixedOffset::east_opt(3 * 3600).unwrap();
        let decoded = DateType::new()
            .with_decode_offset(riga)
            .decode(text("2024-06-19"))
            .unwrap();
        assert_eq!(decoded, local_midnight(3, 2024, 6, 19));
    }

    #[test]
    fn decodes_rfc3339_instants() {
        let decoded = DateType::new()
            .decode(text("2024-06-18T21:00:00.000Z"))
            .unwrap();
        let Value::Temporal(t) = decoded else {
            panic!("expected temporal");
        };
        assert_eq!(t.with_timezone(&Utc).to_rfc3339(), "2024-06-18T21:00:00+00:00");
    }

    #[test]
    fn temporal_storage_value_passes_through_decode() {
        let v = local_midnight(3, 2024, 6, 19);
        assert_eq!(DateType::new().decode(v.clone()).unwrap(), v);
    }

    #[test]
    fn hints() {
        let ty = DateType::new();
        assert_eq!(ty.compare_as(), CompareAs::String);
        assert!(!ty.ensure_comparable());
        let column = ColumnMeta::new("date", "date", ValueKind::Temporal);
        assert_eq!(ty.column_type(&column, Platform::Postgres), "date");
        assert_eq!(ty.column_type(&column, Platform::Sqlite), "text");
    }

    #[test]
    fn json_matches_storage() {
        let json = DateType::new()
            .to_json(local_midnight(3, 2024, 6, 19), Platform::Postgres)
            .unwrap();
        assert_eq!(json, serde_json::json!("2024-06-19"));
        assert_eq!(
            DateType::new().to_json(Value::Null, Platform::Postgres).unwrap(),
            serde_json::Value::Null
        );
    }

    fn arb_date() -> impl Strategy<Value = CalendarDate> {
        (1i32..=9999, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| CalendarDate::from_ymd(y, m, d).unwrap())
    }

    proptest! {
        #[test]
        fn canonical_round_trip(date in arb_date(), hours in -12i32..=14) {
            let ty = DateType::new()
                .with_decode_offset(FixedOffset::east_opt(hours * 3600).unwrap());
            let s = text(&date.to_string());
            let decoded = ty.decode(s.clone()).unwrap();
            prop_assert_eq!(ty.encode(decoded).unwrap(), s);
        }

        #[test]
        fn local_midnight_is_offset_invariant(date in arb_date(), minutes in -720i32..=840) {
            let offset = FixedOffset::east_opt(minutes * 60).unwrap();
            let midnight = date
                .naive()
                .and_time(NaiveTime::MIN)
                .and_local_timezone(offset)
                .single()
                .unwrap();
            prop_assert_eq!(
                DateType::new().encode(Value::Temporal(midnight)).unwrap(),
                text(&date.to_string())
            );
        }

        #[test]
        fn encode_is_referentially_transparent(date in arb_date(), hours in -12i32..=14, secs in 0u32..86_400) {
            let offset = FixedOffset::east_opt(hours * 3600).unwrap();
            let t = date
                .naive()
                .and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap())
                .and_local_timezone(offset)
                .single()
                .unwrap();
            let ty = DateType::new();
            let first = ty.to_storage(Value::Temporal(t)).unwrap();
            let second = ty.to_storage(Value::Temporal(t)).unwrap();
            prop_assert_eq!(first.clone(), second);
            prop_assert_eq!(first, text(&date.to_string()));
        }
    }
}
