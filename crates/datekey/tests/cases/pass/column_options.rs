// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, FixedOffset};
use datekey::{DateType, Entity};

/// Column names, lengths, nullability and adapter expressions.
#[derive(Entity)]
pub struct BookingSlot {
    #[primary_key]
    #[column(name = "slot_id")]
    pub id: i64,

    #[column(type = DateType::utc_normalized(), name = "booked_on")]
    pub day: DateTime<FixedOffset>,

    #[column(length = 40)]
    pub title: String,

    #[column(nullable)]
    pub note: String,

    pub comment: Option<String>,

    pub confirmed: bool,
}

fn main() {
    let meta = BookingSlot::meta();
    assert_eq!(meta.table, "booking_slot");
    assert_eq!(meta.column_names(), vec!["slot_id", "booked_on", "title", "note", "comment", "confirmed"]);
    assert_eq!(meta.column("title").and_then(|c| c.length), Some(40));
    assert!(meta.column("note").unwrap().nullable);
    assert!(meta.column("comment").unwrap().nullable);
    assert!(meta.column("booked_on").unwrap().column_type().is_some());
}
