// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Entity::to_values` / `Entity::from_values` generation.
//!
//! Values travel in field declaration order, matching the column order of
//! the generated metadata.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::EntityDef;

/// Generate `fn to_values(&self)`.
pub fn generate_to_values(entity: &EntityDef) -> TokenStream {
    let values = entity.fields.iter().map(|field| {
        let ident = &field.ident;
        quote! { ::datekey_core::ToValue::to_value(&self.#ident) }
    });

    quote! {
        fn to_values(&self) -> ::std::vec::Vec<::datekey_core::Value> {
            ::std::vec![#(#values),*]
        }
    }
}

/// Generate `fn from_values(values)`.
pub fn generate_from_values(entity: &EntityDef) -> TokenStream {
    let assignments = entity.fields.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        let name = field.name_str();
        quote! {
            #ident: <#ty as ::datekey_core::FromValue>::from_value(
                values.next().unwrap_or(::datekey_core::Value::Null),
                #name
            )?
        }
    });

    quote! {
        fn from_values(
            values: ::std::vec::Vec<::datekey_core::Value>
        ) -> ::core::result::Result<Self, ::datekey_core::MappingError> {
            <Self as ::datekey_core::Entity>::meta().check_width(values.len())?;
            let mut values = values.into_iter();
            ::core::result::Result::Ok(Self {
                #(#assignments),*
            })
        }
    }
}
