// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Calendar dates and their canonical `YYYY-MM-DD` form.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Check that `s` matches `^\d{4}-\d{2}-\d{2}$`.
///
/// Only the shape is checked; `2024-02-30` is canonical but not a valid date.
pub fn is_canonical(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit()
        })
}

/// Error parsing a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarDateError {
    /// Input is not shaped `YYYY-MM-DD`.
    #[error("`{0}` is not formatted as YYYY-MM-DD")]
    Format(String),

    /// Input is shaped correctly but names no Gregorian day.
    #[error("`{0}` is not a valid calendar date")]
    OutOfRange(String)
}

/// Date without time of day or offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Underlying chrono date.
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Check that the year fits the four digits of `YYYY-MM-DD`.
    pub fn is_canonical_year(&self) -> bool {
        (0..=9999).contains(&self.0.year())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_canonical(s) {
            return Err(CalendarDateError::Format(s.to_string()));
        }
        // Shape is fixed, so the slices are ASCII digits.
        let field = |range: std::ops::Range<usize>| s[range].parse::<u32>().unwrap_or(0);
        let year = field(0..4) as i32;
        Self::from_ymd(year, field(5..7), field(8..10))
            .ok_or_else(|| CalendarDateError::OutOfRange(s.to_string()))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
