// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field type inspection.
//!
//! The value kind only drives DDL for columns without a type adapter:
//!
//! | Rust type | Kind |
//! |-----------|------|
//! | `bool` | `Bool` |
//! | `i16`, `i32`, `i64`, `u16`, `u32` | `Int` |
//! | `DateTime<Tz>` | `Temporal` |
//! | anything else | `Text` |

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// Mirror of `datekey_core::ValueKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Text.
    Text,
    /// Instant.
    Temporal
}

impl Kind {
    /// Path to the matching `ValueKind` variant.
    #[must_use]
    pub fn to_tokens(self) -> TokenStream {
        match self {
            Self::Bool => quote! { ::datekey_core::ValueKind::Bool },
            Self::Int => quote! { ::datekey_core::ValueKind::Int },
            Self::Text => quote! { ::datekey_core::ValueKind::Text },
            Self::Temporal => quote! { ::datekey_core::ValueKind::Temporal }
        }
    }
}

/// Check if the type is `Option<T>`.
#[must_use]
pub fn is_option(ty: &Type) -> bool {
    option_inner(ty).is_some()
}

/// `T` of `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None
    }
}

/// Value kind of a field type, looking through `Option`.
#[must_use]
pub fn value_kind(ty: &Type) -> Kind {
    let ty = option_inner(ty).unwrap_or(ty);
    let Type::Path(type_path) = ty else {
        return Kind::Text;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return Kind::Text;
    };
    match segment.ident.to_string().as_str() {
        "bool" => Kind::Bool,
        "i16" | "i32" | "i64" | "u16" | "u32" => Kind::Int,
        "DateTime" => Kind::Temporal,
        _ => Kind::Text
    }
}
