// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Entity::meta` generation.
//!
//! The metadata is built on first use and cached in a `OnceLock`:
//!
//! ```rust,ignore
//! fn meta() -> &'static ::datekey_core::EntityMeta {
//!     static META: OnceLock<EntityMeta> = OnceLock::new();
//!     META.get_or_init(|| EntityMeta::new("User", "user", vec![
//!         ColumnMeta::new("id", "id", ValueKind::Int).primary(),
//!         ColumnMeta::new("date", "date", ValueKind::Temporal)
//!             .primary()
//!             .with_type(<DateType as Default>::default()),
//!         ColumnMeta::new("name", "name", ValueKind::Text),
//!     ]))
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef};

/// Generate `fn meta()`.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let name = entity.name_str();
    let table = &entity.table;
    let columns = entity.fields.iter().map(column_meta);

    quote! {
        fn meta() -> &'static ::datekey_core::EntityMeta {
            static META: ::std::sync::OnceLock<::datekey_core::EntityMeta> =
                ::std::sync::OnceLock::new();
            META.get_or_init(|| {
                ::datekey_core::EntityMeta::new(#name, #table, ::std::vec![#(#columns),*])
            })
        }
    }
}

fn column_meta(field: &FieldDef) -> TokenStream {
    let column = field.column_name();
    let field_name = field.name_str();
    let kind = field.kind().to_tokens();

    let mut tokens = quote! { ::datekey_core::ColumnMeta::new(#column, #field_name, #kind) };
    if field.is_primary_key() {
        tokens.extend(quote! { .primary() });
    }
    if field.is_nullable() {
        tokens.extend(quote! { .nullable() });
    }
    if let Some(length) = field.column.length {
        tokens.extend(quote! { .length(#length) });
    }
    if let Some(column_type) = &field.column.column_type {
        let constructor = column_type.constructor();
        tokens.extend(quote! { .with_type(#constructor) });
    }
    tokens
}
