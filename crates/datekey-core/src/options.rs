// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Session configuration.
//!
//! Options are built in code or deserialized:
//!
//! ```rust
//! use datekey_core::{OrmOptions, Platform};
//!
//! let options = OrmOptions::from_json(r#"{ "platform": "postgres", "debug": ["query", "query-params"] }"#).unwrap();
//! assert_eq!(options.platform, Platform::Postgres);
//! assert!(options.debug.query_params);
//! ```

use serde::{Deserialize, Deserializer};

use crate::platform::Platform;

/// Which queries are emitted through `tracing`.
///
/// Every executed statement is recorded in the session's
/// [`QueryLog`](crate::log::QueryLog) regardless of these flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugOptions {
    /// Emit executed SQL at `debug` level.
    pub query:        bool,
    /// Inline parameters into the emitted SQL.
    pub query_params: bool
}

impl DebugOptions {
    /// Emit queries with inlined parameters.
    pub const fn all() -> Self {
        Self {
            query:        true,
            query_params: true
        }
    }
}

impl<'de> Deserialize<'de> for DebugOptions {
    /// Accepts `true`/`false` or a list of `"query"` / `"query-params"`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            List(Vec<String>)
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(true) => Ok(Self::all()),
            Repr::Flag(false) => Ok(Self::default()),
            Repr::List(items) => {
                let mut options = Self::default();
                for item in items {
                    match item.as_str() {
                        "query" => options.query = true,
                        "query-params" | "query_params" => options.query_params = true,
                        other => {
                            return Err(serde::de::Error::unknown_variant(other, &[
                                "query",
                                "query-params"
                            ]));
                        }
                    }
                }
                Ok(options)
            }
        }
    }
}

/// Options for a [`Session`](crate::session::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct OrmOptions {
    /// SQL platform.
    pub platform: Platform,

    /// Debug output.
    pub debug: DebugOptions
}

impl OrmOptions {
    /// Default options (PostgreSQL, no debug output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the platform.
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set debug output.
    #[must_use]
    pub const fn debug(mut self, debug: DebugOptions) -> Self {
        self.debug = debug;
        self
    }

    /// Parse options from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or unknown values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
