// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relational store seam and the in-memory implementation.
//!
//! # Overview
//!
//! - [`Connection`]: async trait every store implements
//! - [`MemoryStore`]: tables held in memory, safe to share across sessions
//! - [`Row`] / [`QueryResult`]: what a statement returns
//!
//! The in-memory store behaves like a strict relational database for the
//! parts the session relies on: primary keys are unique, unknown columns and
//! `NULL`s in non-null columns are rejected, and on PostgreSQL `date` columns
//! only accept `YYYY-MM-DD` text. A zone-shifted ISO timestamp used as a date
//! key is an error, not a silent miss.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    calendar::CalendarDate,
    error::StoreError,
    platform::Platform,
    statement::{Condition, Statement, TableDef},
    value::Value
};

/// A fetched row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values:  Vec<Value>
}

impl Row {
    /// Build a row from parallel column and value lists.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self {
            columns,
            values
        }
    }

    /// Value of `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Result of executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Statement without a result set.
    Done {
        /// Rows affected.
        affected: usize
    },

    /// Result set.
    Rows(Vec<Row>)
}

impl QueryResult {
    /// Rows affected, or rows returned.
    pub fn affected(&self) -> usize {
        match self {
            Self::Done {
                affected
            } => *affected,
            Self::Rows(rows) => rows.len()
        }
    }

    /// Take the result set; empty for statements without one.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Self::Done {
                ..
            } => Vec::new(),
            Self::Rows(rows) => rows
        }
    }
}

/// A relational store.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute one statement.
    async fn execute(&self, statement: &Statement) -> Result<QueryResult, StoreError>;
}

#[async_trait]
impl<C: Connection + ?Sized> Connection for Arc<C> {
    async fn execute(&self, statement: &Statement) -> Result<QueryResult, StoreError> {
        (**self).execute(statement).await
    }
}

#[derive(Debug, Clone)]
struct Table {
    def:  TableDef,
    /// Per column: declared as a calendar date.
    date: Vec<bool>,
    /// Positions of primary key columns.
    pk:   Vec<usize>,
    rows: Vec<Vec<Value>>
}

impl Table {
    fn new(def: TableDef, platform: Platform) -> Self {
        let date = def
            .columns
            .iter()
            .map(|c| platform.is_date_declaration(&c.declaration))
            .collect();
        let pk = def
            .primary_key
            .iter()
            .filter_map(|name| def.columns.iter().position(|c| &c.name == name))
            .collect();
        Self {
            def,
            date,
            pk,
            rows: Vec::new()
        }
    }

    fn position(&self, column: &str) -> Result<usize, StoreError> {
        self.def
            .columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| StoreError::UnknownColumn {
                table:  self.def.name.clone(),
                column: column.to_string()
            })
    }

    /// Validate `value` for the column at `index`.
    fn check(&self, index: usize, value: &Value) -> Result<(), StoreError> {
        let column = &self.def.columns[index];
        if value.is_null() {
            if column.nullable {
                return Ok(());
            }
            return Err(StoreError::NotNull {
                table:  self.def.name.clone(),
                column: column.name.clone()
            });
        }
        if self.date[index] {
            let valid = value
                .as_text()
                .is_some_and(|s| s.parse::<CalendarDate>().is_ok());
            if !valid {
                return Err(StoreError::InvalidDate(value.to_sql_literal()));
            }
        }
        Ok(())
    }

    fn resolve(&self, conditions: &[Condition]) -> Result<Vec<(usize, Value)>, StoreError> {
        conditions
            .iter()
            .map(|c| {
                let index = self.position(&c.column)?;
                if self.date[index] && !c.value.is_null() {
                    self.check(index, &c.value)?;
                }
                Ok((index, c.value.clone()))
            })
            .collect()
    }

    fn key_of(&self, row: &[Value]) -> Vec<Value> {
        self.pk.iter().map(|&i| row[i].clone()).collect()
    }

    fn has_key(&self, key: &[Value], skip: Option<usize>) -> bool {
        self.rows
            .iter()
            .enumerate()
            .any(|(i, row)| Some(i) != skip && self.key_of(row) == key)
    }

    fn to_row(&self, values: &[Value]) -> Row {
        Row::new(
            self.def.columns.iter().map(|c| c.name.clone()).collect(),
            values.to_vec()
        )
    }
}

fn table_mut<'a>(
    tables: &'a mut HashMap<String, Table>,
    name: &str
) -> Result<&'a mut Table, StoreError> {
    tables
        .get_mut(name)
        .ok_or_else(|| StoreError::UnknownTable(name.to_string()))
}

fn matches(row: &[Value], filter: &[(usize, Value)]) -> bool {
    filter.iter().all(|(i, v)| &row[*i] == v)
}

/// In-memory relational store.
///
/// Cheap to share: wrap it in an [`Arc`] and hand clones to several sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    platform: Platform,
    tables:   RwLock<HashMap<String, Table>>
}

impl MemoryStore {
    /// Empty store for `platform`.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            tables: RwLock::new(HashMap::new())
        }
    }

    /// Platform whose type rules the store enforces.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// All rows of `table`, in insertion order.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownTable`] if the table does not exist.
    pub fn rows(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read();
        let t = tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        Ok(t.rows.iter().map(|r| t.to_row(r)).collect())
    }

    /// Check whether `table` exists.
    pub fn has_table(&self, table: &str) -> bool {
        self.tables.read().contains_key(table)
    }

    fn apply(&self, statement: &Statement) -> Result<QueryResult, StoreError> {
        let mut guard = self.tables.write();
        let tables = &mut *guard;

        match statement {
            Statement::CreateTable(def) => {
                if tables.contains_key(&def.name) {
                    return Err(StoreError::TableExists(def.name.clone()));
                }
                tables.insert(def.name.clone(), Table::new(def.clone(), self.platform));
                Ok(QueryResult::Done {
                    affected: 0
                })
            }
            Statement::DropTable {
                table
            } => {
                tables.remove(table);
                Ok(QueryResult::Done {
                    affected: 0
                })
            }
            Statement::Insert {
                table,
                columns,
                values
            } => {
                let t = table_mut(tables, table)?;
                let mut row = vec![Value::Null; t.def.columns.len()];
                for (column, value) in columns.iter().zip(values) {
                    row[t.position(column)?] = value.clone();
                }
                for (i, value) in row.iter().enumerate() {
                    t.check(i, value)?;
                }
                if t.has_key(&t.key_of(&row), None) {
                    return Err(StoreError::DuplicateKey(t.def.name.clone()));
                }
                t.rows.push(row);
                Ok(QueryResult::Done {
                    affected: 1
                })
            }
            Statement::Select {
                table,
                conditions,
                limit,
                ..
            } => {
                let t = table_mut(tables, table)?;
                let filter = t.resolve(conditions)?;
                let rows = t
                    .rows
                    .iter()
                    .filter(|r| matches(r, &filter))
                    .take(limit.unwrap_or(usize::MAX))
                    .map(|r| t.to_row(r))
                    .collect();
                Ok(QueryResult::Rows(rows))
            }
            Statement::Update {
                table,
                set,
                conditions
            } => {
                let t = table_mut(tables, table)?;
                let filter = t.resolve(conditions)?;
                let mut assignments = Vec::with_capacity(set.len());
                for (column, value) in set {
                    let index = t.position(column)?;
                    t.check(index, value)?;
                    assignments.push((index, value.clone()));
                }
                let targets: Vec<usize> = (0..t.rows.len())
                    .filter(|&i| matches(&t.rows[i], &filter))
                    .collect();
                for &i in &targets {
                    let mut updated = t.rows[i].clone();
                    for (index, value) in &assignments {
                        updated[*index] = value.clone();
                    }
                    if t.has_key(&t.key_of(&updated), Some(i)) {
                        return Err(StoreError::DuplicateKey(t.def.name.clone()));
                    }
                    t.rows[i] = updated;
                }
                Ok(QueryResult::Done {
                    affected: targets.len()
                })
            }
            Statement::Delete {
                table,
                conditions
            } => {
                let t = table_mut(tables, table)?;
                let filter = t.resolve(conditions)?;
                let before = t.rows.len();
                t.rows.retain(|r| !matches(r, &filter));
                Ok(QueryResult::Done {
                    affected: before - t.rows.len()
                })
            }
        }
    }
}

#[async_trait]
impl Connection for MemoryStore {
    async fn execute(&self, statement: &Statement) -> Result<QueryResult, StoreError> {
        let result = self.apply(statement);
        if let Err(ref err) = result {
            tracing::warn!(table = statement.table(), verb = statement.verb(), %err, "statement failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::ColumnDef;

    fn user_table() -> Statement {
        let column = |name: &str, declaration: &str| ColumnDef {
            name:        name.into(),
            declaration: declaration.into(),
            nullable:    false
        };
        Statement::CreateTable(TableDef {
            name:        "user".into(),
            columns:     vec![
                column("id", "int"),
                column("date", "date"),
                column("name", "varchar(255)"),
            ],
            primary_key: vec!["id".into(), "date".into()]
        })
    }

    fn insert(id: i64, date: &str, name: &str) -> Statement {
        Statement::Insert {
            table:   "user".into(),
            columns: vec!["id".into(), "date".into(), "name".into()],
            values:  vec![Value::Int(id), Value::Text(date.into()), Value::Text(name.into())]
        }
    }

    fn key(id: i64, date: Value) -> Vec<Condition> {
        vec![Condition::eq("id", Value::Int(id)), Condition::eq("date", date)]
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new(Platform::Postgres);
        store.execute(&user_table()).await.unwrap();
        store.execute(&insert(123, "2024-06-19", "Foo")).await.unwrap();
        store
    }

    #[tokio::test]
    async fn select_by_composite_key() {
        let store = seeded().await;
        let rows = store
            .execute(&Statement::Select {
                table:      "user".into(),
                alias:      "u0".into(),
                conditions: key(123, Value::Text("2024-06-19".into())),
                limit:      Some(1)
            })
            .await
            .unwrap()
            .into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&Value::Text("Foo".into())));
    }

    #[tokio::test]
    async fn shifted_date_misses() {
        let store = seeded().await;
        let result = store
            .execute(&Statement::Select {
                table:      "user".into(),
                alias:      "u0".into(),
                conditions: key(123, Value::Text("2024-06-18".into())),
                limit:      None
            })
            .await
            .unwrap();
        assert_eq!(result.affected(), 0);
    }

    #[tokio::test]
    async fn iso_timestamp_is_not_a_date() {
        let store = seeded().await;
        let err = store
            .execute(&Statement::Update {
                table:      "user".into(),
                set:        vec![("name".into(), Value::Text("Bar".into()))],
                conditions: key(123, Value::Text("2024-06-18T21:00:00.000Z".into()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn duplicate_key_rejected() {
        let store = seeded().await;
        let err = store
            .execute(&insert(123, "2024-06-19", "Again"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateKey("user".into()));
        store.execute(&insert(123, "2024-06-20", "Next day")).await.unwrap();
        assert_eq!(store.rows("user").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_count_rows() {
        let store = seeded().await;
        let updated = store
            .execute(&Statement::Update {
                table:      "user".into(),
                set:        vec![("name".into(), Value::Text("Bar".into()))],
                conditions: key(123, Value::Text("2024-06-19".into()))
            })
            .await
            .unwrap();
        assert_eq!(updated.affected(), 1);
        assert_eq!(
            store.rows("user").unwrap()[0].get("name"),
            Some(&Value::Text("Bar".into()))
        );
        let deleted = store
            .execute(&Statement::Delete {
                table:      "user".into(),
                conditions: key(123, Value::Text("2024-06-19".into()))
            })
            .await
            .unwrap();
        assert_eq!(deleted.affected(), 1);
        assert!(store.rows("user").unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_null_and_unknown_column() {
        let store = seeded().await;
        let err = store
            .execute(&Statement::Insert {
                table:   "user".into(),
                columns: vec!["id".into(), "date".into()],
                values:  vec![Value::Int(1), Value::Text("2024-01-01".into())]
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotNull { .. }));
        let err = store
            .execute(&Statement::Delete {
                table:      "user".into(),
                conditions: vec![Condition::eq("nope", Value::Int(1))]
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownColumn { .. }));
    }

    #[tokio::test]
    async fn create_twice_and_drop() {
        let store = seeded().await;
        assert_eq!(
            store.execute(&user_table()).await.unwrap_err(),
            StoreError::TableExists("user".into())
        );
        store
            .execute(&Statement::DropTable {
                table: "user".into()
            })
            .await
            .unwrap();
        assert!(!store.has_table("user"));
        assert!(matches!(store.rows("user"), Err(StoreError::UnknownTable(_))));
    }

    #[tokio::test]
    async fn sqlite_dates_are_plain_text() {
        let store = MemoryStore::new(Platform::Sqlite);
        let Statement::CreateTable(mut def) = user_table() else {
            unreachable!()
        };
        def.columns[1].declaration = "text".into();
        store.execute(&Statement::CreateTable(def)).await.unwrap();
        store
            .execute(&insert(1, "2024-06-18T21:00:00.000Z", "Foo"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn shared_through_arc() {
        let store = Arc::new(seeded().await);
        let conn: Arc<dyn Connection> = store.clone();
        conn.execute(&insert(7, "2024-01-01", "Other")).await.unwrap();
        assert_eq!(store.rows("user").unwrap().len(), 2);
    }
}
