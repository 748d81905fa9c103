// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Unit of work.
//!
//! A [`Session`] tracks entities between loads and writes. New entities are
//! inserted on [`Session::flush`]; loaded entities are diffed against the
//! values they were loaded with and only changed columns are updated.
//!
//! # Write Path
//!
//! Every value that reaches the store passes through the column's
//! [`ColumnType::to_storage`](crate::column_type::ColumnType::to_storage):
//!
//! ```text
//! insert values ──┐
//! update set ─────┼──► ColumnType::to_storage ──► Statement ──► Connection
//! find filters ───┘
//! update where ──────► primary key snapshot (stored form from the same path)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut session = Session::new(MemoryStore::default(), OrmOptions::new());
//! session.refresh_schema::<User>().await?;
//!
//! session.create(User { id: 123, date, name: "Foo".into() });
//! session.flush().await?;
//!
//! let user = session.find_one_or_fail::<User>(Filter::new().eq("id", 123).eq("date", date)).await?;
//! session.get_mut(&user)?.name = "Bar".into();
//! session.flush().await?;
//! ```

use std::{any::Any, collections::HashMap, fmt, marker::PhantomData};

use crate::{
    column_type::comparable_form,
    error::{SessionError, TypeError},
    log::QueryLog,
    meta::{ColumnMeta, Entity, EntityMeta},
    options::OrmOptions,
    schema::SchemaGenerator,
    serialize,
    statement::{Condition, Statement},
    store::{Connection, QueryResult},
    value::{ToValue, Value}
};

/// Equality filter for lookups.
///
/// Columns are matched by column name or field name. Values are converted
/// with the column's type adapter before they reach the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>
}

impl Filter {
    /// Empty filter (matches any row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value`.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl ToValue) -> Self {
        self.conditions.push((column.into(), value.to_value()));
        self
    }

    /// Check for no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (column, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{column} = {value}")?;
        }
        Ok(())
    }
}

/// Reference to an entity managed by a [`Session`].
///
/// Handles stay valid until [`Session::clear`].
pub struct Handle<E> {
    index:      usize,
    generation: u64,
    _entity:    PhantomData<fn() -> E>
}

impl<E> Handle<E> {
    const fn new(index: usize, generation: u64) -> Self {
        Self {
            index,
            generation,
            _entity: PhantomData
        }
    }
}

impl<E> Clone for Handle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Handle<E> {}

impl<E> PartialEq for Handle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<E> Eq for Handle<E> {}

impl<E> fmt::Debug for Handle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("index", &self.index)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Type-erased managed entity.
trait Managed: Send + Sync {
    fn entity_meta(&self) -> &'static EntityMeta;
    fn current_values(&self) -> Vec<Value>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Entity> Managed for E {
    fn entity_meta(&self) -> &'static EntityMeta {
        <E as Entity>::meta()
    }

    fn current_values(&self) -> Vec<Value> {
        self.to_values()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

enum State {
    /// Not yet inserted.
    New,

    /// In the store. `original` holds application values as of the last
    /// sync, `snapshot` the stored form of the same row.
    Persisted {
        original: Vec<Value>,
        snapshot: Vec<Value>
    },

    /// Scheduled for deletion.
    Removed {
        snapshot: Vec<Value>
    }
}

struct Entry {
    entity: Box<dyn Managed>,
    state:  State
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Insert,
    Update,
    Delete
}

enum Settle {
    Persist {
        original: Vec<Value>,
        snapshot: Vec<Value>
    },
    Forget
}

/// Statement for one entry and the state to move to once it succeeds.
struct Planned {
    entity:    &'static str,
    statement: Statement,
    settle:    Settle
}

/// Identity map and unit of work over a [`Connection`].
pub struct Session<C> {
    connection: C,
    options:    OrmOptions,
    entries:    Vec<Option<Entry>>,
    identity:   HashMap<String, usize>,
    generation: u64,
    log:        QueryLog
}

impl<C: Connection> Session<C> {
    /// Create a session.
    pub fn new(connection: C, options: OrmOptions) -> Self {
        Self {
            connection,
            options,
            entries: Vec::new(),
            identity: HashMap::new(),
            generation: 0,
            log: QueryLog::default()
        }
    }

    /// Session options.
    pub const fn options(&self) -> &OrmOptions {
        &self.options
    }

    /// Underlying connection.
    pub const fn connection(&self) -> &C {
        &self.connection
    }

    /// Statements executed so far.
    pub const fn query_log(&self) -> &QueryLog {
        &self.log
    }

    /// Forget logged statements.
    pub fn clear_query_log(&mut self) {
        self.log.clear();
    }

    /// Number of managed entities.
    pub fn managed(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Execute a statement, recording it in the query log.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the store rejects the statement.
    pub async fn execute(&mut self, statement: &Statement) -> Result<QueryResult, SessionError> {
        self.log
            .record(statement, self.options.platform, self.options.debug);
        Ok(self.connection.execute(statement).await?)
    }

    /// Drop and recreate the table of `E`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the store rejects the DDL.
    pub async fn refresh_schema<E: Entity>(&mut self) -> Result<(), SessionError> {
        let generator = SchemaGenerator::new(self.options.platform);
        let meta = E::meta();
        self.execute(&generator.drop_table(meta)).await?;
        self.execute(&generator.create_table(meta)).await?;
        tracing::info!(entity = meta.name, table = meta.table, "schema refreshed");
        Ok(())
    }

    /// Register a new entity. Nothing is written until [`Session::flush`].
    pub fn create<E: Entity>(&mut self, entity: E) -> Handle<E> {
        self.attach(entity, State::New)
    }

    /// Borrow a managed entity.
    ///
    /// # Errors
    ///
    /// [`SessionError::Detached`] after [`Session::clear`], after removal,
    /// or for a handle of another session.
    pub fn get<E: Entity>(&self, handle: &Handle<E>) -> Result<&E, SessionError> {
        self.live(handle.index, handle.generation)
            .and_then(|entry| entry.entity.as_any().downcast_ref::<E>())
            .ok_or(SessionError::Detached(E::meta().name))
    }

    /// Mutably borrow a managed entity. Changes are written on flush.
    ///
    /// # Errors
    ///
    /// Same as [`Session::get`].
    pub fn get_mut<E: Entity>(&mut self, handle: &Handle<E>) -> Result<&mut E, SessionError> {
        if self.live(handle.index, handle.generation).is_none() {
            return Err(SessionError::Detached(E::meta().name));
        }
        self.entries
            .get_mut(handle.index)
            .and_then(Option::as_mut)
            .and_then(|entry| entry.entity.as_any_mut().downcast_mut::<E>())
            .ok_or(SessionError::Detached(E::meta().name))
    }

    /// Schedule a managed entity for deletion on flush.
    ///
    /// # Errors
    ///
    /// Same as [`Session::get`].
    pub fn remove<E: Entity>(&mut self, handle: &Handle<E>) -> Result<(), SessionError> {
        self.get(handle)?;
        let slot = &mut self.entries[handle.index];
        // A never-flushed entity is dropped without a statement.
        if let Some(Entry {
            entity,
            state: State::Persisted {
                snapshot, ..
            }
        }) = slot.take()
        {
            *slot = Some(Entry {
                entity,
                state: State::Removed {
                    snapshot
                }
            });
        }
        Ok(())
    }

    /// Find the first row matching `filter`.
    ///
    /// A row that is already managed is returned through its existing handle.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownColumn`] for a filter on an undeclared column
    /// - [`SessionError::Type`] when a filter value cannot be converted
    /// - [`SessionError::Store`] / [`SessionError::Mapping`] from the load
    pub async fn find_one<E: Entity>(
        &mut self,
        filter: Filter
    ) -> Result<Option<Handle<E>>, SessionError> {
        let meta = E::meta();
        let statement = Statement::Select {
            table:      meta.table.to_string(),
            alias:      alias_for(meta.table),
            conditions: conditions(meta, &filter)?,
            limit:      Some(1)
        };
        let Some(row) = self.execute(&statement).await?.into_rows().into_iter().next() else {
            return Ok(None);
        };

        meta.check_width(row.columns().len())?;
        let snapshot: Vec<Value> = meta
            .columns
            .iter()
            .map(|c| row.get(c.name).cloned().unwrap_or(Value::Null))
            .collect();

        let key = identity_key(meta, &snapshot);
        if let Some(&index) = self.identity.get(&key) {
            let handle = Handle::new(index, self.generation);
            return Ok(self.get(&handle).is_ok().then_some(handle));
        }

        let entity = E::from_values(decode_row(meta, snapshot.clone())?)?;
        let original = entity.to_values();
        let handle = self.attach(entity, State::Persisted {
            original,
            snapshot
        });
        self.identity.insert(key, handle.index);
        Ok(Some(handle))
    }

    /// Like [`Session::find_one`], failing when nothing matches.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] when no row matches, plus the errors of
    /// [`Session::find_one`].
    pub async fn find_one_or_fail<E: Entity>(
        &mut self,
        filter: Filter
    ) -> Result<Handle<E>, SessionError> {
        let description = filter.to_string();
        self.find_one(filter)
            .await?
            .ok_or_else(|| SessionError::NotFound {
                entity: E::meta().name,
                filter: description
            })
    }

    /// Write pending changes: inserts, then updates, then deletes.
    ///
    /// # Errors
    ///
    /// Stops at the first conversion or store error, or with
    /// [`SessionError::Stale`] when an update or delete matches no row by its
    /// key. Statements already executed are not rolled back; the failing
    /// entity keeps its pending state.
    pub async fn flush(&mut self) -> Result<(), SessionError> {
        let mut counts = [0usize; 3];
        for (n, phase) in [Phase::Insert, Phase::Update, Phase::Delete].into_iter().enumerate() {
            for index in 0..self.entries.len() {
                let Some(Planned {
                    entity,
                    statement,
                    settle
                }) = self.plan(index, phase)?
                else {
                    continue;
                };
                let result = self.execute(&statement).await?;
                if phase != Phase::Insert && result.affected() == 0 {
                    return Err(SessionError::Stale {
                        entity,
                        verb: statement.verb()
                    });
                }
                self.settle(index, settle);
                counts[n] += 1;
            }
        }
        tracing::debug!(
            inserted = counts[0],
            updated = counts[1],
            deleted = counts[2],
            "flushed"
        );
        Ok(())
    }

    /// Detach every managed entity. Existing handles become invalid.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.identity.clear();
        self.generation += 1;
    }

    /// External JSON representation of `entity`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Type`] when a column type rejects a value.
    pub fn to_json<E: Entity>(&self, entity: &E) -> Result<serde_json::Value, SessionError> {
        Ok(serialize::to_json(entity, self.options.platform)?)
    }

    fn attach<E: Entity>(&mut self, entity: E, state: State) -> Handle<E> {
        let index = self.entries.len();
        self.entries.push(Some(Entry {
            entity: Box::new(entity),
            state
        }));
        Handle::new(index, self.generation)
    }

    fn live(&self, index: usize, generation: u64) -> Option<&Entry> {
        if generation != self.generation {
            return None;
        }
        self.entries
            .get(index)
            .and_then(Option::as_ref)
            .filter(|entry| !matches!(entry.state, State::Removed { .. }))
    }

    fn plan(&self, index: usize, phase: Phase) -> Result<Option<Planned>, SessionError> {
        let Some(entry) = self.entries.get(index).and_then(Option::as_ref) else {
            return Ok(None);
        };
        let meta = entry.entity.entity_meta();
        let table = meta.table.to_string();

        match (&entry.state, phase) {
            (State::New, Phase::Insert) => {
                let current = entry.entity.current_values();
                let snapshot = encode_row(meta, current.clone())?;
                let statement = Statement::Insert {
                    table,
                    columns: meta.columns.iter().map(|c| c.name.to_string()).collect(),
                    values: snapshot.clone()
                };
                Ok(Some(Planned {
                    entity: meta.name,
                    statement,
                    settle: Settle::Persist {
                        original: current,
                        snapshot
                    }
                }))
            }
            (
                State::Persisted {
                    original,
                    snapshot
                },
                Phase::Update
            ) => {
                let current = entry.entity.current_values();
                let mut next = snapshot.clone();
                let mut set = Vec::new();
                for (i, (column, (before, after))) in meta
                    .columns
                    .iter()
                    .zip(original.iter().zip(&current))
                    .enumerate()
                {
                    let ct = column.column_type();
                    if comparable_form(ct, before)? == comparable_form(ct, after)? {
                        continue;
                    }
                    let stored = encode(column, after.clone())?;
                    next[i] = stored.clone();
                    set.push((column.name.to_string(), stored));
                }
                if set.is_empty() {
                    return Ok(None);
                }
                let statement = Statement::Update {
                    table,
                    set,
                    conditions: key_conditions(meta, snapshot)
                };
                Ok(Some(Planned {
                    entity: meta.name,
                    statement,
                    settle: Settle::Persist {
                        original: current,
                        snapshot: next
                    }
                }))
            }
            (
                State::Removed {
                    snapshot
                },
                Phase::Delete
            ) => {
                let statement = Statement::Delete {
                    table,
                    conditions: key_conditions(meta, snapshot)
                };
                Ok(Some(Planned {
                    entity: meta.name,
                    statement,
                    settle: Settle::Forget
                }))
            }
            _ => Ok(None)
        }
    }

    fn settle(&mut self, index: usize, settle: Settle) {
        let Some(slot) = self.entries.get_mut(index) else {
            return;
        };
        let Some(entry) = slot.as_mut() else {
            return;
        };
        let meta = entry.entity.entity_meta();
        if let State::Persisted {
            snapshot, ..
        }
        | State::Removed {
            snapshot
        } = &entry.state
        {
            self.identity.remove(&identity_key(meta, snapshot));
        }
        match settle {
            Settle::Persist {
                original,
                snapshot
            } => {
                self.identity.insert(identity_key(meta, &snapshot), index);
                entry.state = State::Persisted {
                    original,
                    snapshot
                };
            }
            Settle::Forget => *slot = None
        }
    }
}

impl<C> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("managed", &self.entries.iter().flatten().count())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

fn encode(column: &ColumnMeta, value: Value) -> Result<Value, TypeError> {
    match column.column_type() {
        Some(ct) => ct.to_storage(value),
        None => Ok(value)
    }
}

fn encode_row(meta: &EntityMeta, values: Vec<Value>) -> Result<Vec<Value>, TypeError> {
    meta.columns
        .iter()
        .zip(values)
        .map(|(column, value)| encode(column, value))
        .collect()
}

fn decode_row(meta: &EntityMeta, values: Vec<Value>) -> Result<Vec<Value>, TypeError> {
    meta.columns
        .iter()
        .zip(values)
        .map(|(column, value)| match column.column_type() {
            Some(ct) => ct.from_storage(value),
            None => Ok(value)
        })
        .collect()
}

fn conditions(meta: &EntityMeta, filter: &Filter) -> Result<Vec<Condition>, SessionError> {
    filter
        .conditions
        .iter()
        .map(|(name, value)| {
            let column = meta
                .column(name)
                .or_else(|| meta.columns.iter().find(|c| c.field == name.as_str()))
                .ok_or_else(|| SessionError::UnknownColumn {
                    entity: meta.name,
                    column: name.clone()
                })?;
            Ok(Condition::eq(column.name, encode(column, value.clone())?))
        })
        .collect()
}

fn key_conditions(meta: &EntityMeta, snapshot: &[Value]) -> Vec<Condition> {
    meta.primary_key()
        .map(|(i, c)| Condition::eq(c.name, snapshot.get(i).cloned().unwrap_or(Value::Null)))
        .collect()
}

fn identity_key(meta: &EntityMeta, snapshot: &[Value]) -> String {
    let key: Vec<String> = meta
        .primary_key()
        .map(|(i, _)| snapshot.get(i).map_or_else(|| "null".to_string(), Value::to_sql_literal))
        .collect();
    format!("{}:{}", meta.table, key.join(","))
}

/// `"user"` -> `"u0"`.
fn alias_for(table: &str) -> String {
    let first = table
        .chars()
        .find(char::is_ascii_alphabetic)
        .map_or('e', |c| c.to_ascii_lowercase());
    format!("{first}0")
}
