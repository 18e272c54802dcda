// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed data import.
//!
//! An import file is a JSON array of records:
//!
//! ```json
//! [
//!   {
//!     "logical_name": "product",
//!     "id": "9b0c...",
//!     "attributes": { "name": { "type": "text", "value": "Gold" } }
//!   }
//! ]
//! ```
//!
//! `id` and `formatted_values` are optional.

use std::path::Path;

use contract_line_domain::Record;
use tracing::debug;

use crate::error::PersistenceError;

/// Parses a JSON array of records.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<Record>, PersistenceError> {
    serde_json::from_str(json).map_err(|e| PersistenceError::ImportFailed(e.to_string()))
}

pub fn read_records(path: &Path) -> Result<Vec<Record>, PersistenceError> {
    debug!(path = %path.display(), "Reading import file");
    let json: String = std::fs::read_to_string(path)
        .map_err(|e| PersistenceError::ImportFailed(format!("{}: {e}", path.display())))?;
    parse_records(&json)
}
