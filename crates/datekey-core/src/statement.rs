// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured SQL statements.
//!
//! The session builds [`Statement`]s out of storage values (already passed
//! through column type adapters) and hands them to a
//! [`Connection`](crate::store::Connection). Rendering is only needed for
//! drivers and logs.
//!
//! # SQL Patterns
//!
//! ```sql
//! -- INSERT
//! insert into "user" ("id", "date", "name") values ($1, $2, $3)
//!
//! -- SELECT
//! select "u0".* from "user" as "u0" where "u0"."id" = $1 and "u0"."date" = $2 limit 1
//!
//! -- UPDATE
//! update "user" set "name" = $1 where "id" = $2 and "date" = $3
//!
//! -- DELETE
//! delete from "user" where "id" = $1 and "date" = $2
//! ```

use crate::{platform::Platform, value::Value};

/// Column in a `create table` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name.
    pub name:        String,
    /// SQL type declaration.
    pub declaration: String,
    /// Accepts `NULL`.
    pub nullable:    bool
}

/// Table layout for `create table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    /// Table name.
    pub name:        String,
    /// Columns in order.
    pub columns:     Vec<ColumnDef>,
    /// Primary key column names in order.
    pub primary_key: Vec<String>
}

/// Equality condition `column = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Column name.
    pub column: String,
    /// Storage value.
    pub value:  Value
}

impl Condition {
    /// Build a condition.
    pub fn eq(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            value
        }
    }
}

/// A statement the session sends to a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `create table`.
    CreateTable(TableDef),

    /// `drop table if exists`.
    DropTable {
        /// Table name.
        table: String
    },

    /// `insert into ... values ...`.
    Insert {
        /// Table name.
        table:   String,
        /// Column names.
        columns: Vec<String>,
        /// Storage values, one per column.
        values:  Vec<Value>
    },

    /// `select alias.* from ... where ... limit ...`.
    Select {
        /// Table name.
        table:      String,
        /// Table alias.
        alias:      String,
        /// Conjunction of equality conditions.
        conditions: Vec<Condition>,
        /// Row limit.
        limit:      Option<usize>
    },

    /// `update ... set ... where ...`.
    Update {
        /// Table name.
        table:      String,
        /// Column assignments.
        set:        Vec<(String, Value)>,
        /// Conjunction of equality conditions.
        conditions: Vec<Condition>
    },

    /// `delete from ... where ...`.
    Delete {
        /// Table name.
        table:      String,
        /// Conjunction of equality conditions.
        conditions: Vec<Condition>
    }
}

/// SQL text with positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    /// SQL with placeholders.
    pub sql:    String,
    /// Parameters in placeholder order.
    pub params: Vec<Value>
}

impl Statement {
    /// Table the statement targets.
    pub fn table(&self) -> &str {
        match self {
            Self::CreateTable(def) => &def.name,
            Self::DropTable {
                table
            }
            | Self::Insert {
                table, ..
            }
            | Self::Select {
                table, ..
            }
            | Self::Update {
                table, ..
            }
            | Self::Delete {
                table, ..
            } => table
        }
    }

    /// Short verb for logs.
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::CreateTable(_) => "create",
            Self::DropTable {
                ..
            } => "drop",
            Self::Insert {
                ..
            } => "insert",
            Self::Select {
                ..
            } => "select",
            Self::Update {
                ..
            } => "update",
            Self::Delete {
                ..
            } => "delete"
        }
    }

    /// Render with placeholders.
    pub fn render(&self, platform: Platform) -> RenderedQuery {
        let mut params = Vec::new();
        let sql = self.write(platform, &mut |value: &Value| {
            params.push(value.clone());
            platform.placeholder(params.len())
        });
        RenderedQuery {
            sql,
            params
        }
    }

    /// Render with parameters inlined as literals.
    pub fn render_inline(&self, platform: Platform) -> String {
        self.write(platform, &mut Value::to_sql_literal)
    }

    fn write(&self, platform: Platform, bind: &mut dyn FnMut(&Value) -> String) -> String {
        let q = |ident: &str| platform.quote_ident(ident);
        match self {
            Self::CreateTable(def) => {
                let mut parts: Vec<String> = def
                    .columns
                    .iter()
                    .map(|c| {
                        let null = if c.nullable { "null" } else { "not null" };
                        format!("{} {} {}", q(c.name.as_str()), c.declaration, null)
                    })
                    .collect();
                if !def.primary_key.is_empty() {
                    let pk: Vec<String> = def.primary_key.iter().map(|c| q(c.as_str())).collect();
                    parts.push(format!(
                        "constraint {} primary key ({})",
                        q(format!("{}_pkey", def.name).as_str()),
                        pk.join(", ")
                    ));
                }
                format!("create table {} ({})", q(def.name.as_str()), parts.join(", "))
            }
            Self::DropTable {
                table
            } => match platform {
                Platform::Postgres => format!("drop table if exists {} cascade", q(table.as_str())),
                Platform::Sqlite => format!("drop table if exists {}", q(table.as_str()))
            },
            Self::Insert {
                table,
                columns,
                values
            } => {
                let cols: Vec<String> = columns.iter().map(|c| q(c.as_str())).collect();
                let vals: Vec<String> = values.iter().map(|v| bind(v)).collect();
                format!(
                    "insert into {} ({}) values ({})",
                    q(table.as_str()),
                    cols.join(", "),
                    vals.join(", ")
                )
            }
            Self::Select {
                table,
                alias,
                conditions,
                limit
            } => {
                let mut sql = format!("select {}.* from {} as {}", q(alias.as_str()), q(table.as_str()), q(alias.as_str()));
                sql.push_str(&where_clause(conditions, Some(alias.as_str()), &q, bind));
                if let Some(limit) = limit {
                    sql.push_str(&format!(" limit {limit}"));
                }
                sql
            }
            Self::Update {
                table,
                set,
                conditions
            } => {
                let assignments: Vec<String> = set
                    .iter()
                    .map(|(column, value)| format!("{} = {}", q(column.as_str()), bind(value)))
                    .collect();
                format!(
                    "update {} set {}{}",
                    q(table.as_str()),
                    assignments.join(", "),
                    where_clause(conditions, None, &q, bind)
                )
            }
            Self::Delete {
                table,
                conditions
            } => format!(
                "delete from {}{}",
                q(table.as_str()),
                where_clause(conditions, None, &q, bind)
            )
        }
    }
}

fn where_clause(
    conditions: &[Condition],
    alias: Option<&str>,
    q: &dyn Fn(&str) -> String,
    bind: &mut dyn FnMut(&Value) -> String
) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = conditions
        .iter()
        .map(|c| {
            let column = match alias {
                Some(alias) => format!("{}.{}", q(alias), q(c.column.as_str())),
                None => q(c.column.as_str())
            };
            format!("{} = {}", column, bind(&c.value))
        })
        .collect();
    format!(" where {}", parts.join(" and "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Vec<Condition> {
        vec![
            Condition::eq("id", Value::Int(123)),
            Condition::eq("date", Value::Text("2024-06-19".into())),
        ]
    }

    #[test]
    fn insert_inline() {
        let stmt = Statement::Insert {
            table:   "user".into(),
            columns: vec!["id".into(), "date".into(), "name".into()],
            values:  vec![
                Value::Int(123),
                Value::Text("2024-06-19".into()),
                Value::Text("Foo".into()),
            ]
        };
        assert_eq!(
            stmt.render_inline(Platform::Postgres),
            r#"insert into "user" ("id", "date", "name") values (123, '2024-06-19', 'Foo')"#
        );
        let rendered = stmt.render(Platform::Postgres);
        assert_eq!(
            rendered.sql,
            r#"insert into "user" ("id", "date", "name") values ($1, $2, $3)"#
        );
        assert_eq!(rendered.params.len(), 3);
    }

    #[test]
    fn select_inline() {
        let stmt = Statement::Select {
            table:      "user".into(),
            alias:      "u0".into(),
            conditions: key(),
            limit:      Some(1)
        };
        assert_eq!(
            stmt.render_inline(Platform::Postgres),
            r#"select "u0".* from "user" as "u0" where "u0"."id" = 123 and "u0"."date" = '2024-06-19' limit 1"#
        );
    }

    #[test]
    fn update_numbers_where_after_set() {
        let stmt = Statement::Update {
            table:      "user".into(),
            set:        vec![("name".into(), Value::Text("Bar".into()))],
            conditions: key()
        };
        assert_eq!(
            stmt.render(Platform::Postgres).sql,
            r#"update "user" set "name" = $1 where "id" = $2 and "date" = $3"#
        );
        assert_eq!(
            stmt.render_inline(Platform::Postgres),
            r#"update "user" set "name" = 'Bar' where "id" = 123 and "date" = '2024-06-19'"#
        );
        assert_eq!(
            stmt.render(Platform::Sqlite).sql,
            r#"update "user" set "name" = ? where "id" = ? and "date" = ?"#
        );
    }

    #[test]
    fn create_and_drop() {
        let stmt = Statement::CreateTable(TableDef {
            name:        "user".into(),
            columns:     vec![
                ColumnDef {
                    name:        "id".into(),
                    declaration: "int".into(),
                    nullable:    false
                },
                ColumnDef {
                    name:        "date".into(),
                    declaration: "date".into(),
                    nullable:    false
                },
            ],
            primary_key: vec!["id".into(), "date".into()]
        });
        assert_eq!(
            stmt.render_inline(Platform::Postgres),
            r#"create table "user" ("id" int not null, "date" date not null, constraint "user_pkey" primary key ("id", "date"))"#
        );
        let drop = Statement::DropTable {
            table: "user".into()
        };
        assert_eq!(
            drop.render_inline(Platform::Postgres),
            r#"drop table if exists "user" cascade"#
        );
        assert_eq!(drop.verb(), "drop");
        assert_eq!(drop.table(), "user");
    }

    #[test]
    fn delete_without_conditions() {
        let stmt = Statement::Delete {
            table:      "user".into(),
            conditions: Vec::new()
        };
        assert_eq!(stmt.render_inline(Platform::Sqlite), r#"delete from "user""#);
    }
}
