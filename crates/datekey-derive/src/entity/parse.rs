// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing.
//!
//! - [`EntityDef`]: entity-level `#[entity(...)]` plus all fields
//! - [`FieldDef`]: one field with `#[primary_key]` and `#[column(...)]`

mod entity;
mod field;

pub use entity::EntityDef;
pub use field::FieldDef;
