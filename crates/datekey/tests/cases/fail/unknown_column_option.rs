// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use datekey::Entity;

#[derive(Entity)]
pub struct Item {
    #[column(unique)]
    pub name: String,
    #[primary_key]
    pub id: i32,
}

fn main() {}
