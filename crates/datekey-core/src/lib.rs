// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core runtime for datekey.
//!
//! This crate holds the calendar date column type and the small persistence
//! engine it plugs into. Code generated by `#[derive(Entity)]` refers to it by
//! absolute path; it can also be used directly with hand-written [`Entity`]
//! implementations.
//!
//! # Overview
//!
//! - [`DateType`]: calendar date column type (`YYYY-MM-DD` in storage)
//! - [`ColumnType`]: hooks the engine calls for custom-typed columns
//! - [`Session`]: identity map and unit of work
//! - [`MemoryStore`]: in-memory relational store behind [`Connection`]
//! - [`prelude`]: Convenient re-exports
//!
//! # Module Structure
//!
//! ```text
//! datekey-core
//! ├── value        Value, ToValue, FromValue
//! ├── calendar     CalendarDate
//! ├── column_type  ColumnType, CompareAs
//! ├── date_type    DateType
//! ├── meta         Entity, EntityMeta, ColumnMeta
//! ├── platform     Platform
//! ├── statement    Statement, rendering
//! ├── store        Connection, MemoryStore
//! ├── schema       SchemaGenerator
//! ├── session      Session, Filter, Handle
//! ├── serialize    to_json
//! ├── options      OrmOptions, DebugOptions
//! ├── log          QueryLog
//! └── error        TypeError, StoreError, MappingError, SessionError
//! ```
//!
//! # Example
//!
//! ```rust
//! use datekey_core::{ColumnType, DateType, Value};
//! use chrono::{FixedOffset, TimeZone};
//!
//! let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
//! let midnight = moscow.with_ymd_and_hms(2024, 6, 19, 0, 0, 0).unwrap();
//!
//! let stored = DateType::new().to_storage(Value::Temporal(midnight)).unwrap();
//! assert_eq!(stored, Value::Text("2024-06-19".into()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod column_type;
pub mod date_type;
pub mod error;
pub mod log;
pub mod meta;
pub mod options;
pub mod platform;
pub mod prelude;
pub mod schema;
pub mod serialize;
pub mod session;
pub mod statement;
pub mod store;
pub mod value;

/// Re-export async_trait for `Connection` implementations.
pub use async_trait::async_trait;
pub use calendar::CalendarDate;
pub use column_type::{ColumnType, CompareAs, comparable_form};
pub use date_type::{DateFormat, DateType};
pub use error::{MappingError, SessionError, StoreError, TypeError, ValueSide};
pub use log::{LoggedQuery, QueryLog};
pub use meta::{ColumnMeta, Entity, EntityMeta};
pub use options::{DebugOptions, OrmOptions};
pub use platform::Platform;
pub use schema::SchemaGenerator;
pub use session::{Filter, Handle, Session};
pub use statement::{Condition, RenderedQuery, Statement};
pub use store::{Connection, MemoryStore, QueryResult, Row};
pub use value::{FromValue, TemporalValue, ToValue, Value, ValueKind};
