// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Procedural macro behind `datekey`.
//!
//! Use the `datekey` crate, which re-exports [`Entity`](macro@Entity)
//! together with the runtime the generated code depends on.
//!
//! # Attribute Quick Reference
//!
//! ## Entity-Level `#[entity(...)]`
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(table = "user")] // Optional: defaults to the snake_case struct name
//! pub struct User { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct User {
//!     #[primary_key]
//!     pub id: i32,
//!
//!     #[primary_key]
//!     #[column(type = DateType)]        // Column type adapter (path or expression)
//!     pub date: DateTime<Local>,
//!
//!     #[column(name = "full_name", length = 100)]
//!     pub name: String,
//!
//!     #[column(nullable)]               // Implied for Option<T>
//!     pub note: Option<String>,
//! }
//! ```

mod entity;
mod utils;

use proc_macro::TokenStream;

/// Derive `datekey_core::Entity` for a struct with named fields.
///
/// # Generated Code
///
/// | Item | Description |
/// |------|-------------|
/// | `Entity::meta` | Static table description, built once |
/// | `Entity::to_values` | Field values in declaration order |
/// | `Entity::from_values` | Hydration with per-field type errors |
///
/// # Entity Attributes
///
/// | Attribute | Required | Default | Description |
/// |-----------|----------|---------|-------------|
/// | `table` | No | snake_case struct name | Table name |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[primary_key]` | Part of the (possibly composite) primary key |
/// | `#[column(type = T)]` | Column type adapter; a path uses `T::default()` |
/// | `#[column(type = expr)]` | Column type adapter built from an expression |
/// | `#[column(name = "col")]` | Column name (defaults to the field name) |
/// | `#[column(length = N)]` | Length hint for the type declaration |
/// | `#[column(nullable)]` | Accept `NULL` |
///
/// # Example
///
/// ```rust,ignore
/// use chrono::{DateTime, Local};
/// use datekey::{DateType, Entity};
///
/// #[derive(Entity)]
/// #[entity(table = "user")]
/// pub struct User {
///     #[primary_key]
///     pub id: i32,
///
///     #[primary_key]
///     #[column(type = DateType)]
///     pub date: DateTime<Local>,
///
///     pub name: String,
/// }
/// ```
///
/// # Errors
///
/// Compilation fails for enums, unions, tuple and generic structs, for
/// entities without a `#[primary_key]` field, and for unknown options.
#[proc_macro_derive(Entity, attributes(entity, primary_key, column))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
