// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata.
//!
//! [`Entity`] is implemented by `#[derive(Entity)]` (or by hand) and describes
//! how a struct maps onto a table. Columns are listed in field declaration
//! order; [`Entity::to_values`] and [`Entity::from_values`] use the same order.
//!
//! ```text
//! EntityMeta
//! ├── name: "User"
//! ├── table: "user"
//! └── columns
//!     ├── ColumnMeta { name: "id",   kind: Int,      primary }
//!     ├── ColumnMeta { name: "date", kind: Temporal, primary, column_type: DateType }
//!     └── ColumnMeta { name: "name", kind: Text }
//! ```

use std::sync::Arc;

use crate::{column_type::ColumnType, error::MappingError, value::Value, value::ValueKind};

/// Column description.
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    /// Column name in the table.
    pub name: &'static str,

    /// Rust field name.
    pub field: &'static str,

    /// Kind used for plain DDL.
    pub kind: ValueKind,

    /// Part of the primary key.
    pub primary: bool,

    /// Accepts `NULL`.
    pub nullable: bool,

    /// Length hint for the type declaration.
    pub length: Option<u32>,

    /// Custom column type adapter.
    pub column_type: Option<Arc<dyn ColumnType>>
}

impl ColumnMeta {
    /// Plain non-null column.
    pub fn new(name: &'static str, field: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            field,
            kind,
            primary: false,
            nullable: false,
            length: None,
            column_type: None
        }
    }

    /// Mark as part of the primary key.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Allow `NULL`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the length hint.
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Attach a column type adapter.
    #[must_use]
    pub fn with_type(mut self, column_type: impl ColumnType + 'static) -> Self {
        self.column_type = Some(Arc::new(column_type));
        self
    }

    /// Borrow the adapter, if any.
    pub fn column_type(&self) -> Option<&dyn ColumnType> {
        self.column_type.as_deref()
    }
}

/// Table description for an entity.
#[derive(Debug, Clone)]
pub struct EntityMeta {
    /// Entity (struct) name.
    pub name: &'static str,

    /// Table name.
    pub table: &'static str,

    /// Columns in field order.
    pub columns: Vec<ColumnMeta>
}

impl EntityMeta {
    /// Create metadata.
    pub fn new(name: &'static str, table: &'static str, columns: Vec<ColumnMeta>) -> Self {
        Self {
            name,
            table,
            columns
        }
    }

    /// Primary key columns in declaration order.
    pub fn primary_key(&self) -> impl Iterator<Item = (usize, &ColumnMeta)> {
        self.columns.iter().enumerate().filter(|(_, c)| c.primary)
    }

    /// Look a column up by name.
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Check a row's width against the metadata.
    pub fn check_width(&self, found: usize) -> Result<(), MappingError> {
        if found == self.columns.len() {
            Ok(())
        } else {
            Err(MappingError::ColumnCount {
                entity: self.name,
                expected: self.columns.len(),
                found
            })
        }
    }
}

/// A struct mapped onto a table.
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
///
/// use datekey_core::{ColumnMeta, Entity, EntityMeta, FromValue, MappingError, ToValue, Value, ValueKind};
///
/// struct Tag {
///     id:    i32,
///     label: String
/// }
///
/// impl Entity for Tag {
///     fn meta() -> &'static EntityMeta {
///         static META: OnceLock<EntityMeta> = OnceLock::new();
///         META.get_or_init(|| {
///             EntityMeta::new("Tag", "tag", vec![
///                 ColumnMeta::new("id", "id", ValueKind::Int).primary(),
///                 ColumnMeta::new("label", "label", ValueKind::Text),
///             ])
///         })
///     }
///
///     fn to_values(&self) -> Vec<Value> {
///         vec![self.id.to_value(), self.label.to_value()]
///     }
///
///     fn from_values(values: Vec<Value>) -> Result<Self, MappingError> {
///         Self::meta().check_width(values.len())?;
///         let mut values = values.into_iter();
///         Ok(Self {
///             id:    i32::from_value(values.next().unwrap_or(Value::Null), "id")?,
///             label: String::from_value(values.next().unwrap_or(Value::Null), "label")?
///         })
///     }
/// }
///
/// assert_eq!(Tag::meta().primary_key().count(), 1);
/// ```
pub trait Entity: Sized + Send + Sync + 'static {
    /// Static table description.
    fn meta() -> &'static EntityMeta;

    /// Field values in column order.
    fn to_values(&self) -> Vec<Value>;

    /// Rebuild from values in column order.
    fn from_values(values: Vec<Value>) -> Result<Self, MappingError>;
}
