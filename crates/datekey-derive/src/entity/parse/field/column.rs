// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column-level configuration.
//!
//! # Supported Attributes
//!
//! | Attribute | Example | Effect |
//! |-----------|---------|--------|
//! | `type` | `#[column(type = DateType)]` | Adapter built with `Default` |
//! | `type` | `#[column(type = DateType::utc_normalized())]` | Adapter built from the expression |
//! | `name` | `#[column(name = "user_name")]` | Custom column name |
//! | `length` | `#[column(length = 100)]` | `varchar(100)` on PostgreSQL |
//! | `nullable` | `#[column(nullable)]` | Allow NULL |

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, LitInt, LitStr, Path};

/// Column type adapter given in `#[column(type = ...)]`.
#[derive(Debug, Clone)]
pub enum ColumnType {
    /// Type path, constructed with `Default::default()`.
    Path(Path),

    /// Constructor expression.
    Expr(Expr)
}

impl ColumnType {
    /// Expression that builds the adapter.
    #[must_use]
    pub fn constructor(&self) -> TokenStream {
        match self {
            Self::Path(path) => quote! { <#path as ::core::default::Default>::default() },
            Self::Expr(expr) => quote! { #expr }
        }
    }
}

/// Column configuration parsed from `#[column(...)]`.
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    /// Column type adapter.
    pub column_type: Option<ColumnType>,

    /// Custom column name. Defaults to the field name.
    pub name: Option<String>,

    /// Length hint for the type declaration.
    pub length: Option<u32>,

    /// Explicitly allow NULL for non-Option types.
    pub nullable: bool
}

impl ColumnConfig {
    /// Parse column config from a `#[column(...)]` attribute.
    ///
    /// # Errors
    ///
    /// Unknown options, missing values and malformed literals.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut config = Self::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type") {
                let expr: Expr = meta.value()?.parse()?;
                config.column_type = Some(match expr {
                    Expr::Path(path) if path.qself.is_none() && path.attrs.is_empty() => {
                        ColumnType::Path(path.path)
                    }
                    other => ColumnType::Expr(other)
                });
            } else if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                config.name = Some(value.value());
            } else if meta.path.is_ident("length") {
                let value: LitInt = meta.value()?.parse()?;
                config.length = Some(value.base10_parse()?);
            } else if meta.path.is_ident("nullable") {
                config.nullable = true;
            } else {
                return Err(meta.error(
                    "unknown column option, expected `type`, `name`, `length` or `nullable`"
                ));
            }
            Ok(())
        })?;

        Ok(config)
    }
}
