// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use datekey_core::prelude::*;
//!
//! let store = MemoryStore::new(Platform::Postgres);
//! let session = Session::new(store, OrmOptions::new());
//! assert_eq!(session.managed(), 0);
//! ```

pub use crate::{
    ColumnType, Connection, DateType, DebugOptions, Entity, Filter, Handle, MemoryStore,
    OrmOptions, Platform, Session, SessionError, Value, async_trait
};
