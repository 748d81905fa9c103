// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/      → Attribute parsing (EntityDef, FieldDef, ColumnConfig)
//! │
//! ├── meta.rs     → Entity::meta (static EntityMeta)
//! └── values.rs   → Entity::to_values / Entity::from_values
//! ```
//!
//! # Generated Code
//!
//! For an entity like:
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! pub struct User {
//!     #[primary_key]
//!     pub id: i32,
//!     pub name: String,
//! }
//! ```
//!
//! the macro emits a single `impl ::datekey_core::Entity for User`.

mod meta;
pub mod parse;
mod values;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(&entity).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: &EntityDef) -> TokenStream2 {
    let ident = &entity.ident;
    let meta = meta::generate(entity);
    let to_values = values::generate_to_values(entity);
    let from_values = values::generate_from_values(entity);

    quote! {
        impl ::datekey_core::Entity for #ident {
            #meta
            #to_values
            #from_values
        }
    }
}
