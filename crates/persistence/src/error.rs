// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contract_line::ServiceError;
use contract_line_domain::RecordId;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// The requested record was not found.
    RecordNotFound { logical_name: String, id: RecordId },
    /// A record with this identifier is already stored.
    DuplicateRecord(RecordId),
    /// A stored or supplied identifier is not a valid record identifier.
    InvalidRecordId(String),
    /// A record that must carry an identifier did not.
    MissingRecordId(String),
    /// The import file could not be read or parsed.
    ImportFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::RecordNotFound { logical_name, id } => {
                write!(f, "Record not found: {logical_name}/{id}")
            }
            Self::DuplicateRecord(id) => write!(f, "Record {id} already exists"),
            Self::InvalidRecordId(msg) => write!(f, "Invalid record identifier: {msg}"),
            Self::MissingRecordId(logical_name) => {
                write!(f, "'{logical_name}' record has no identifier")
            }
            Self::ImportFailed(msg) => write!(f, "Import failed: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for ServiceError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::RecordNotFound { logical_name, id } => {
                Self::NotFound { logical_name, id }
            }
            PersistenceError::DuplicateRecord(id) => Self::AlreadyExists(id),
            PersistenceError::MissingRecordId(logical_name) => Self::MissingId(logical_name),
            other => Self::Backend(other.to_string()),
        }
    }
}
