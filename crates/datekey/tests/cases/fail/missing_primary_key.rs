// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use datekey::Entity;

/// Entity without a #[primary_key] field should fail.
#[derive(Entity)]
pub struct Item {
    pub name: String,
    pub value: i32,
}

fn main() {}
