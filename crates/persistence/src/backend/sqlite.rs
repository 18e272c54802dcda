// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and preparing `SQLite` connections for the record store.
//!
//! Everything here is raw PRAGMA or migration plumbing; record reads and
//! writes belong in `queries/` and `mutations/`.

use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations for the `records` table.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

/// Applies any migrations the database has not seen yet.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(count = applied.len(), "Applied record store migrations");
    Ok(())
}

/// Opens the database at `database_url`, sets the busy timeout and brings
/// the schema up to date.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or the schema
/// cannot be migrated.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening record store");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // NOTE: PRAGMA is raw SQL (Diesel has no PRAGMA DSL)
    diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    run_migrations(&mut conn)?;

    Ok(conn)
}

/// Switches a file database to write-ahead logging.
///
/// # Errors
///
/// Returns an error if the PRAGMA fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (Diesel has no PRAGMA DSL)
    let row: JournalModeRow = diesel::sql_query("PRAGMA journal_mode = WAL")
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    debug!(journal_mode = %row.journal_mode, "Journal mode set");
    Ok(())
}
