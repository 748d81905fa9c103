// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! Field markers are parsed by hand:
//!
//! ```rust,ignore
//! #[primary_key]                    // FieldDef::primary_key = true
//! pub id: i32,
//!
//! #[column(type = DateType)]        // ColumnConfig
//! pub date: DateTime<Local>,
//! ```

mod column;

pub use column::ColumnConfig;
use syn::{Field, Ident, Type};

use crate::utils::types::{self, Kind};

/// Field definition with all parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Part of the primary key.
    pub primary_key: bool,

    /// `#[column(...)]` options.
    pub column: ColumnConfig
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// - Tuple struct field
    /// - `#[primary_key]` with arguments
    /// - Malformed or unknown `#[column(...)]` options
    /// - Nullable primary key
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;

        let mut primary_key = false;
        let mut column = ColumnConfig::default();

        for attr in &field.attrs {
            if attr.path().is_ident("primary_key") {
                attr.meta.require_path_only()?;
                primary_key = true;
            } else if attr.path().is_ident("column") {
                column = ColumnConfig::from_attr(attr)?;
            }
        }

        let def = Self {
            ident,
            ty: field.ty.clone(),
            primary_key,
            column
        };

        if def.primary_key && def.is_nullable() {
            return Err(
                darling::Error::custom("primary key columns cannot be nullable")
                    .with_span(&def.ident)
            );
        }

        Ok(def)
    }

    /// Field name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Column name, using the custom name if set.
    #[must_use]
    pub fn column_name(&self) -> String {
        self.column.name.clone().unwrap_or_else(|| self.name_str())
    }

    /// Check if this field is part of the primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Check if the column accepts `NULL`.
    ///
    /// `Option<T>` fields are nullable without `#[column(nullable)]`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.column.nullable || types::is_option(&self.ty)
    }

    /// Value kind used for plain DDL.
    #[must_use]
    pub fn kind(&self) -> Kind {
        types::value_kind(&self.ty)
    }
}
