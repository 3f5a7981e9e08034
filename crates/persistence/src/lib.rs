// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Absence Board.
//!
//! This crate defines the [`RemoteStore`] contract the write coordinator talks
//! to and two implementations of it:
//!
//! - [`SqliteStore`]: Diesel on `SQLite`, file-based or shared in-memory,
//!   migrated with embedded migrations at startup
//! - [`InMemoryStore`]: a plain map with failure injection for tests and demos
//!
//! ## Record Identity
//!
//! A day entry is identified by `(tenant, person id | "__global__", year,
//! month 0-11, day)`. Writes are upserts on that key and deletes of a missing
//! key succeed, so repeating any write is harmless.
//!
//! ## Testing Philosophy
//!
//! - Standard tests run against isolated in-memory `SQLite` databases
//! - Every `SqliteStore::new_in_memory()` call gets its own database

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use absence_board_domain::TenantId;
use async_trait::async_trait;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

mod backend;
mod diesel_schema;
mod error;
mod memory;
mod mutations;
mod queries;
mod records;
mod store;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use error::PersistenceError;
pub use memory::{InMemoryStore, RemoteCall};
pub use records::{DayEntryKey, DayEntryRecord, PersonRecord, YearConfigurationRecord};
pub use store::RemoteStore;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `RemoteStore` backed by a `SQLite` database through Diesel.
///
/// Diesel calls are synchronous. Each one runs on the blocking thread pool
/// with the single connection locked, so concurrent writes from the
/// coordinator are serialized without stalling the async workers.
pub struct SqliteStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqliteStore {
    /// Creates a store with a fresh, shared in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_absence_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Creates a store with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the connection on the blocking thread pool.
    async fn with_connection<T, F>(&self, op: F) -> Result<T, PersistenceError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError> + Send + 'static,
    {
        let conn: Arc<Mutex<SqliteConnection>> = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard: MutexGuard<'_, SqliteConnection> =
                conn.lock().unwrap_or_else(PoisonError::into_inner);
            op(&mut guard)
        })
        .await
        .map_err(|err| PersistenceError::TaskFailed(err.to_string()))?
    }
}

#[async_trait]
impl RemoteStore for SqliteStore {
    async fn upsert(
        &self,
        tenant: &TenantId,
        record: &DayEntryRecord,
    ) -> Result<(), PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        let record: DayEntryRecord = record.clone();
        self.with_connection(move |conn| {
            mutations::day_entries::upsert_day_entry(conn, &tenant_id, &record)
        })
        .await
    }

    async fn upsert_many(
        &self,
        tenant: &TenantId,
        records: &[DayEntryRecord],
    ) -> Result<(), PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        let records: Vec<DayEntryRecord> = records.to_vec();
        self.with_connection(move |conn| {
            mutations::day_entries::upsert_day_entries(conn, &tenant_id, &records)
        })
        .await
    }

    async fn delete(&self, tenant: &TenantId, key: &DayEntryKey) -> Result<(), PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        let key: DayEntryKey = key.clone();
        self.with_connection(move |conn| {
            mutations::day_entries::delete_day_entry(conn, &tenant_id, &key)
        })
        .await
    }

    async fn query_by_year(
        &self,
        tenant: &TenantId,
        year: i32,
    ) -> Result<Vec<DayEntryRecord>, PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        self.with_connection(move |conn| {
            queries::day_entries::query_by_year(conn, &tenant_id, year)
        })
        .await
    }

    async fn list_persons(&self, tenant: &TenantId) -> Result<Vec<PersonRecord>, PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        self.with_connection(move |conn| queries::persons::list_persons(conn, &tenant_id))
            .await
    }

    async fn upsert_person(
        &self,
        tenant: &TenantId,
        person: &PersonRecord,
    ) -> Result<(), PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        let person: PersonRecord = person.clone();
        self.with_connection(move |conn| {
            mutations::persons::upsert_person(conn, &tenant_id, &person)
        })
        .await
    }

    async fn delete_person(
        &self,
        tenant: &TenantId,
        person_id: &str,
    ) -> Result<(), PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        let person_id: String = person_id.to_string();
        self.with_connection(move |conn| {
            mutations::persons::delete_person(conn, &tenant_id, &person_id)
        })
        .await
    }

    async fn get_year_configuration(
        &self,
        tenant: &TenantId,
        year: i32,
    ) -> Result<Option<YearConfigurationRecord>, PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        self.with_connection(move |conn| {
            queries::year_configurations::get_year_configuration(conn, &tenant_id, year)
        })
        .await
    }

    async fn upsert_year_configuration(
        &self,
        tenant: &TenantId,
        config: &YearConfigurationRecord,
    ) -> Result<(), PersistenceError> {
        let tenant_id: String = tenant.value().to_string();
        let config: YearConfigurationRecord = config.clone();
        self.with_connection(move |conn| {
            mutations::year_configurations::upsert_year_configuration(conn, &tenant_id, &config)
        })
        .await
    }
}
