// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record mutations.

use contract_line::{ClaimGuard, GuardedCreate};
use contract_line_domain::{AttributeValue, Record, RecordId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::data_models::{NewRecordRow, RecordRow};
use crate::diesel_schema::records;
use crate::error::PersistenceError;
use crate::queries::records::{find_record, record_exists};

/// Inserts a new record.
///
/// A caller-assigned identifier is kept; otherwise one is generated.
///
/// # Errors
///
/// Returns an error if the identifier is already stored or the insert fails.
pub fn insert_record(
    conn: &mut SqliteConnection,
    record: &Record,
) -> Result<RecordId, PersistenceError> {
    let id: RecordId = record.id().unwrap_or_else(RecordId::generate);
    if record_exists(conn, id)? {
        return Err(PersistenceError::DuplicateRecord(id));
    }

    let row: NewRecordRow = NewRecordRow::encode(record, id)?;
    diesel::insert_into(records::table)
        .values(&row)
        .execute(conn)?;

    debug!(logical_name = record.logical_name(), %id, "Inserted record");
    Ok(id)
}

/// Merges a record's attributes into the stored record with the same
/// identifier and bumps its version.
///
/// # Errors
///
/// Returns an error if the record has no identifier, does not exist, or
/// changed underneath this update.
pub fn update_record(conn: &mut SqliteConnection, record: &Record) -> Result<(), PersistenceError> {
    let id: RecordId = record
        .id()
        .ok_or_else(|| PersistenceError::MissingRecordId(record.logical_name().to_string()))?;
    let row: RecordRow =
        find_record(conn, record.logical_name(), id)?.ok_or_else(|| {
            PersistenceError::RecordNotFound {
                logical_name: record.logical_name().to_string(),
                id,
            }
        })?;

    let mut stored: Record = row.decode()?;
    stored.merge_from(record);
    let encoded: NewRecordRow = NewRecordRow::encode(&stored, id)?;

    let updated: usize = diesel::update(records::table)
        .filter(records::record_seq.eq(row.record_seq))
        .filter(records::version.eq(row.version))
        .set((
            records::attributes_json.eq(&encoded.attributes_json),
            records::formatted_json.eq(&encoded.formatted_json),
            records::version.eq(row.version + 1),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::QueryFailed(format!(
            "record {id} changed during update"
        )));
    }

    debug!(logical_name = record.logical_name(), %id, version = row.version + 1, "Updated record");
    Ok(())
}

/// Inserts `record` if the guard attribute still holds its expected value,
/// then sets it to the claimed value.
///
/// Must run inside a write transaction so the check and both writes are
/// one atomic step.
///
/// # Errors
///
/// Returns an error if the guard record does not exist or a write fails.
pub fn claim_and_insert(
    conn: &mut SqliteConnection,
    record: &Record,
    guard: &ClaimGuard,
) -> Result<GuardedCreate, PersistenceError> {
    let row: RecordRow =
        find_record(conn, &guard.entity, guard.id)?.ok_or_else(|| {
            PersistenceError::RecordNotFound {
                logical_name: guard.entity.clone(),
                id: guard.id,
            }
        })?;
    let current: Option<AttributeValue> = row.decode()?.get(&guard.attribute).cloned();
    if current.as_ref() != Some(&guard.expected) {
        info!(entity = %guard.entity, id = %guard.id, attribute = %guard.attribute, "Claim already taken");
        return Ok(GuardedCreate::Conflict { current });
    }

    let id: RecordId = insert_record(conn, record)?;

    let mut claim: Record = Record::with_id(&guard.entity, guard.id);
    claim.set(&guard.attribute, guard.claimed.clone());
    update_record(conn, &claim)?;

    Ok(GuardedCreate::Created(id))
}
