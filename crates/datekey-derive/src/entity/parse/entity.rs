// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level parsing.
//!
//! `#[entity(...)]` is parsed with darling; fields are parsed by
//! [`FieldDef::from_field`].
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | snake_case struct name | Table name |

use std::collections::HashSet;

use convert_case::{Case, Casing};
use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident};

use super::field::FieldDef;

/// Entity-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityAttrs {
    ident: Ident,

    generics: Generics,

    /// Table name. Defaults to the snake_case struct name.
    #[darling(default)]
    table: Option<String>
}

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier (e.g., `User`).
    pub ident: Ident,

    /// Table name.
    pub table: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple or unit struct
    /// - Generic struct
    /// - Unknown `#[entity(...)]` or `#[column(...)]` options
    /// - No `#[primary_key]` field
    /// - Two fields mapped to the same column
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let named = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => &named.named,
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let attrs = EntityAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(
                darling::Error::custom("Entity cannot be derived for generic structs")
                    .with_span(&attrs.generics)
            );
        }

        let mut errors = darling::Error::accumulator();
        let fields: Vec<FieldDef> = named
            .iter()
            .filter_map(|field| errors.handle(FieldDef::from_field(field)))
            .collect();

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.column_name()) {
                errors.push(
                    darling::Error::custom(format!(
                        "column `{}` is declared more than once",
                        field.column_name()
                    ))
                    .with_span(&field.ident)
                );
            }
        }

        if !fields.is_empty() && !fields.iter().any(FieldDef::is_primary_key) {
            errors.push(
                darling::Error::custom("Entity requires at least one #[primary_key] field")
                    .with_span(&input.ident)
            );
        }
        errors.finish()?;

        let table = attrs
            .table
            .unwrap_or_else(|| attrs.ident.to_string().to_case(Case::Snake));

        Ok(Self {
            ident: attrs.ident,
            table,
            fields
        })
    }

    /// Struct name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Primary key fields in declaration order.
    pub fn primary_keys(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_primary_key())
    }
}
