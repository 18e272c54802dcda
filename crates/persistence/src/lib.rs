// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` record store for contract line synthesis.
//!
//! This crate implements the [`DataService`] boundary over a single generic
//! `records` table built with Diesel. Every entity (bids, products,
//! contract lines, lien deadline rows) is stored as one row whose typed
//! attributes and formatted values are JSON columns.
//!
//! ## Database Backend
//!
//! `SQLite` is the only backend. In-memory databases serve tests and one-off
//! runs; file databases enable WAL mode.
//!
//! ## Atomicity
//!
//! Each create, update and guarded create runs in its own transaction.
//! Guarded creates use an immediate transaction so the claim check and both
//! writes hold the database write lock together, which makes the bid claim
//! safe across processes sharing a database file.

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

use contract_line::{
    ClaimGuard, DataService, GuardedCreate, QueryExpression, ServiceError,
};
use contract_line_domain::{Record, RecordId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::data_models::RecordRow;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod import;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use import::parse_records;

/// A [`DataService`] backed by a `SQLite` database.
pub struct SqliteDataService {
    conn: SqliteConnection,
}

impl SqliteDataService {
    /// Creates a data service over a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_records_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a data service over a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Inserts records in one transaction. Either all are stored or none.
    ///
    /// # Errors
    ///
    /// Returns an error if any record cannot be stored.
    pub fn import_records(&mut self, records: &[Record]) -> Result<Vec<RecordId>, PersistenceError> {
        let ids: Vec<RecordId> = self.conn.transaction(|conn| {
            records
                .iter()
                .map(|record| mutations::insert_record(conn, record))
                .collect::<Result<Vec<RecordId>, PersistenceError>>()
        })?;

        info!(count = ids.len(), "Imported records");
        Ok(ids)
    }

    /// Reads a JSON array of records from a file and imports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the import
    /// fails.
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<RecordId>, PersistenceError> {
        let records: Vec<Record> = import::read_records(path.as_ref())?;
        self.import_records(&records)
    }

    /// Loads one record by entity and identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn get_record(
        &mut self,
        logical_name: &str,
        id: RecordId,
    ) -> Result<Option<Record>, PersistenceError> {
        let row: Option<RecordRow> = queries::find_record(&mut self.conn, logical_name, id)?;
        row.as_ref().map(RecordRow::decode).transpose()
    }

    /// Loads every record of an entity in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_records(&mut self, logical_name: &str) -> Result<Vec<Record>, PersistenceError> {
        queries::load_entity(&mut self.conn, logical_name)
    }

    /// Counts the stored records of an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_records(&mut self, logical_name: &str) -> Result<i64, PersistenceError> {
        queries::count_records(&mut self.conn, logical_name)
    }
}

impl DataService for SqliteDataService {
    fn query(&mut self, query: &QueryExpression) -> Result<Vec<Record>, ServiceError> {
        let results: Vec<Record> = queries::load_matching(&mut self.conn, query)?;
        debug!(entity = %query.entity, count = results.len(), "Query evaluated");
        Ok(results)
    }

    fn create(&mut self, record: &Record) -> Result<RecordId, ServiceError> {
        let id: RecordId = self
            .conn
            .transaction(|conn| mutations::insert_record(conn, record))?;
        Ok(id)
    }

    fn update(&mut self, record: &Record) -> Result<(), ServiceError> {
        self.conn
            .transaction(|conn| mutations::update_record(conn, record))?;
        Ok(())
    }

    fn create_guarded(
        &mut self,
        record: &Record,
        guard: &ClaimGuard,
    ) -> Result<GuardedCreate, ServiceError> {
        let outcome: GuardedCreate = self
            .conn
            .immediate_transaction(|conn| mutations::claim_and_insert(conn, record, guard))?;
        Ok(outcome)
    }
}

impl std::fmt::Debug for SqliteDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDataService").finish_non_exhaustive()
    }
}
