// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Executed query log.

use crate::{options::DebugOptions, platform::Platform, statement::Statement, value::Value};

/// One executed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedQuery {
    /// SQL with placeholders.
    pub sql:    String,
    /// Bound parameters.
    pub params: Vec<Value>,
    /// SQL with parameters inlined.
    pub inline: String
}

/// Statements executed by a session, oldest first.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    entries: Vec<LoggedQuery>
}

impl QueryLog {
    /// Record `statement` and emit it according to `debug`.
    pub fn record(&mut self, statement: &Statement, platform: Platform, debug: DebugOptions) {
        let rendered = statement.render(platform);
        let inline = statement.render_inline(platform);
        if debug.query {
            if debug.query_params {
                tracing::debug!(target: "datekey::query", verb = statement.verb(), "{inline}");
            } else {
                tracing::debug!(target: "datekey::query", verb = statement.verb(), "{}", rendered.sql);
            }
        }
        self.entries.push(LoggedQuery {
            sql: rendered.sql,
            params: rendered.params,
            inline
        });
    }

    /// All entries.
    pub fn entries(&self) -> &[LoggedQuery] {
        &self.entries
    }

    /// Inlined SQL of all entries.
    pub fn inline(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.inline.as_str()).collect()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&LoggedQuery> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_both_renderings() {
        let mut log = QueryLog::default();
        let stmt = Statement::Delete {
            table:      "user".into(),
            conditions: vec![crate::statement::Condition::eq("id", Value::Int(1))]
        };
        log.record(&stmt, Platform::Postgres, DebugOptions::default());
        let entry = log.last().unwrap();
        assert_eq!(entry.sql, r#"delete from "user" where "id" = $1"#);
        assert_eq!(entry.inline, r#"delete from "user" where "id" = 1"#);
        assert_eq!(entry.params, vec![Value::Int(1)]);
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
    }
}
