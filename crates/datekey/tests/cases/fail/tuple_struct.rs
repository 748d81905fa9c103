// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use datekey::Entity;

/// Tuple structs have no column names.
#[derive(Entity)]
pub struct Item(i64, String);

fn main() {}
