// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::NaiveDate;
use datekey::{DateType, Entity, Value};

/// Calendar-only field type.
#[derive(Entity)]
#[entity(table = "holiday")]
pub struct Holiday {
    #[primary_key]
    #[column(type = DateType)]
    pub day: NaiveDate,

    pub name: String,
}

fn main() {
    let holiday = Holiday {
        day: NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
        name: "Midsummer".into(),
    };
    assert_eq!(holiday.to_values()[0], Value::Text("2024-06-24".into()));
}
