// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! External JSON representation of entities.

use crate::{error::TypeError, meta::Entity, platform::Platform};

/// Serialize `entity` to a JSON object keyed by field name.
///
/// Columns with a custom type are rendered through
/// [`ColumnType::to_json`](crate::column_type::ColumnType::to_json), so a
/// date column shows up as `"2024-06-19"`.
///
/// # Errors
///
/// Propagates the column type's conversion error.
pub fn to_json<E: Entity>(entity: &E, platform: Platform) -> Result<serde_json::Value, TypeError> {
    let meta = E::meta();
    let mut object = serde_json::Map::with_capacity(meta.columns.len());
    for (column, value) in meta.columns.iter().zip(entity.to_values()) {
        let json = match column.column_type() {
            Some(ct) => ct.to_json(value, platform)?,
            None => value.to_json()
        };
        object.insert(column.field.to_string(), json);
    }
    Ok(serde_json::Value::Object(object))
}
