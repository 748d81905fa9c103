// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Local};
use datekey::{DateType, Entity, ValueKind};

/// Entity keyed by an id and a local calendar date.
#[derive(Entity, Debug, Clone)]
#[entity(table = "user")]
pub struct User {
    #[primary_key]
    pub id: i32,

    #[primary_key]
    #[column(type = DateType)]
    pub date: DateTime<Local>,

    pub name: String,
}

fn main() {
    let meta = User::meta();
    assert_eq!(meta.name, "User");
    assert_eq!(meta.table, "user");
    assert_eq!(meta.primary_key().count(), 2);
    assert_eq!(meta.columns[1].kind, ValueKind::Temporal);

    let user = User {
        id: 1,
        date: Local::now(),
        name: "Foo".into(),
    };
    let values = user.to_values();
    assert_eq!(values.len(), 3);
    let copy = User::from_values(values).unwrap();
    assert_eq!(copy.id, 1);
}
