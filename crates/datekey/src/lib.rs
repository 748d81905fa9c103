// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # datekey
//!
//! One crate, all features. Re-exports:
//! - [`Entity`](macro@Entity) derive macro from `datekey-derive`
//! - All types from `datekey-core` ([`DateType`], [`Session`],
//!   [`MemoryStore`], ...)

pub use datekey_core::*;
pub use datekey_derive::Entity;
