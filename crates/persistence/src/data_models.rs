// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::str::FromStr;

use contract_line_domain::{AttributeValue, Record, RecordId};
use diesel::prelude::*;

use crate::diesel_schema::records;
use crate::error::PersistenceError;

/// Diesel Queryable struct for stored records.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = records)]
pub struct RecordRow {
    pub record_seq: i64,
    pub record_id: String,
    pub logical_name: String,
    pub attributes_json: String,
    pub formatted_json: String,
    pub version: i64,
}

/// Diesel Insertable struct for new records.
#[derive(Debug, Insertable)]
#[diesel(table_name = records)]
pub struct NewRecordRow {
    pub record_id: String,
    pub logical_name: String,
    pub attributes_json: String,
    pub formatted_json: String,
}

impl NewRecordRow {
    /// Encodes a record under the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be serialized.
    pub fn encode(record: &Record, id: RecordId) -> Result<Self, PersistenceError> {
        Ok(Self {
            record_id: id.to_string(),
            logical_name: record.logical_name().to_string(),
            attributes_json: serde_json::to_string(record.attributes())?,
            formatted_json: serde_json::to_string(record.formatted_values())?,
        })
    }
}

impl RecordRow {
    /// Decodes the stored row back into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier or either JSON column is corrupt.
    pub fn decode(&self) -> Result<Record, PersistenceError> {
        let id: RecordId = RecordId::from_str(&self.record_id)
            .map_err(|e| PersistenceError::InvalidRecordId(e.to_string()))?;
        let attributes: BTreeMap<String, AttributeValue> =
            serde_json::from_str(&self.attributes_json)?;
        let formatted: BTreeMap<String, String> = serde_json::from_str(&self.formatted_json)?;

        let mut record: Record = Record::with_id(&self.logical_name, id);
        for (name, value) in attributes {
            record.set(&name, value);
        }
        for (name, value) in &formatted {
            record.set_formatted(name, value);
        }
        Ok(record)
    }
}
