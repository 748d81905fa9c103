// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! DDL generation from entity metadata.
//!
//! Custom columns ask their [`ColumnType`](crate::column_type::ColumnType) for
//! the declaration; plain columns use the platform's mapping for their kind.
//!
//! | Column | PostgreSQL | SQLite |
//! |--------|------------|--------|
//! | `i32` | `int` | `integer` |
//! | `String` | `varchar(255)` | `text` |
//! | `DateType` | `date` | `text` |

use crate::{
    meta::{ColumnMeta, EntityMeta},
    platform::Platform,
    statement::{ColumnDef, Statement, TableDef}
};

/// Builds `create table` / `drop table` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaGenerator {
    platform: Platform
}

impl SchemaGenerator {
    /// Generator for `platform`.
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform
        }
    }

    /// SQL type declaration of `column`.
    pub fn declaration(&self, column: &ColumnMeta) -> String {
        match column.column_type() {
            Some(ct) => ct.column_type(column, self.platform),
            None => self.platform.type_declaration(column.kind, column.length)
        }
    }

    /// Table layout of `meta`.
    pub fn table_def(&self, meta: &EntityMeta) -> TableDef {
        TableDef {
            name:        meta.table.to_string(),
            columns:     meta
                .columns
                .iter()
                .map(|c| ColumnDef {
                    name:        c.name.to_string(),
                    declaration: self.declaration(c),
                    nullable:    c.nullable
                })
                .collect(),
            primary_key: meta.primary_key().map(|(_, c)| c.name.to_string()).collect()
        }
    }

    /// `create table` for `meta`.
    pub fn create_table(&self, meta: &EntityMeta) -> Statement {
        Statement::CreateTable(self.table_def(meta))
    }

    /// `drop table if exists` for `meta`.
    pub fn drop_table(&self, meta: &EntityMeta) -> Statement {
        Statement::DropTable {
            table: meta.table.to_string()
        }
    }

    /// `create table` SQL text for `meta`.
    pub fn create_sql(&self, meta: &EntityMeta) -> String {
        self.create_table(meta).render_inline(self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{date_type::DateType, value::ValueKind};

    fn user_meta() -> EntityMeta {
        EntityMeta::new("User", "user", vec![
            ColumnMeta::new("id", "id", ValueKind::Int).primary(),
            ColumnMeta::new("date", "date", ValueKind::Temporal)
                .primary()
                .with_type(DateType::new()),
            ColumnMeta::new("name", "name", ValueKind::Text),
        ])
    }

    #[test]
    fn postgres_ddl() {
        let sql = SchemaGenerator::new(Platform::Postgres).create_sql(&user_meta());
        assert_eq!(
            sql,
            r#"create table "user" ("id" int not null, "date" date not null, "name" varchar(255) not null, constraint "user_pkey" primary key ("id", "date"))"#
        );
    }

    #[test]
    fn sqlite_ddl() {
        let sql = SchemaGenerator::new(Platform::Sqlite).create_sql(&user_meta());
        assert_eq!(
            sql,
            r#"create table "user" ("id" integer not null, "date" text not null, "name" text not null, constraint "user_pkey" primary key ("id", "date"))"#
        );
    }

    #[test]
    fn nullable_and_length() {
        let meta = EntityMeta::new("Note", "note", vec![
            ColumnMeta::new("id", "id", ValueKind::Int).primary(),
            ColumnMeta::new("body", "body", ValueKind::Text)
                .length(40)
                .nullable(),
        ]);
        let def = SchemaGenerator::new(Platform::Postgres).table_def(&meta);
        assert_eq!(def.columns[1].declaration, "varchar(40)");
        assert!(def.columns[1].nullable);
        assert_eq!(def.primary_key, vec!["id".to_string()]);
    }

    #[test]
    fn drop_statement() {
        let generator = SchemaGenerator::new(Platform::Sqlite);
        assert_eq!(
            generator.drop_table(&user_meta()).render_inline(Platform::Sqlite),
            r#"drop table if exists "user""#
        );
    }
}
