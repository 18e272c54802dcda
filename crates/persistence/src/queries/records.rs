// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record queries.
//!
//! Entity selection, ordering and text or boolean equality conditions run in
//! SQL, the conditions through `json_extract` over the attribute column.
//! Row caps and column projection are finished in memory by
//! [`QueryExpression::evaluate`], which also re-checks every condition.

use contract_line::QueryExpression;
use contract_line_domain::{AttributeValue, Record, RecordId};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Integer, Text};
use tracing::debug;

use crate::data_models::RecordRow;
use crate::diesel_schema::records;
use crate::error::PersistenceError;

/// Loads every record of an entity in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn load_entity(
    conn: &mut SqliteConnection,
    logical_name: &str,
) -> Result<Vec<Record>, PersistenceError> {
    let rows: Vec<RecordRow> = records::table
        .filter(records::logical_name.eq(logical_name))
        .order(records::record_seq.asc())
        .select(RecordRow::as_select())
        .load(conn)?;

    debug!(logical_name, count = rows.len(), "Loaded records");

    rows.iter().map(RecordRow::decode).collect()
}

/// Runs a query, filtering in SQL where the condition allows it.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn load_matching(
    conn: &mut SqliteConnection,
    query: &QueryExpression,
) -> Result<Vec<Record>, PersistenceError> {
    let mut statement = records::table
        .filter(records::logical_name.eq(query.entity.as_str()))
        .order(records::record_seq.asc())
        .select(RecordRow::as_select())
        .into_boxed();

    let mut pushed: usize = 0;
    for condition in &query.conditions {
        let Some(path) = value_path(&condition.attribute) else {
            continue;
        };
        match &condition.value {
            AttributeValue::Text(value) => {
                statement = statement.filter(
                    sql::<Bool>("json_extract(attributes_json, ")
                        .bind::<Text, _>(path)
                        .sql(") = ")
                        .bind::<Text, _>(value.clone()),
                );
            }
            AttributeValue::Boolean(value) => {
                statement = statement.filter(
                    sql::<Bool>("json_extract(attributes_json, ")
                        .bind::<Text, _>(path)
                        .sql(") = ")
                        .bind::<Integer, _>(i32::from(*value)),
                );
            }
            _ => continue,
        }
        pushed += 1;
    }

    let rows: Vec<RecordRow> = statement.load(conn)?;
    debug!(
        entity = %query.entity,
        conditions = query.conditions.len(),
        pushed,
        count = rows.len(),
        "Loaded candidate records"
    );

    let candidates: Vec<Record> = rows
        .iter()
        .map(RecordRow::decode)
        .collect::<Result<Vec<Record>, PersistenceError>>()?;
    Ok(query.evaluate(candidates))
}

/// The JSON path of an attribute's stored value, for attribute names that
/// need no quoting.
fn value_path(attribute: &str) -> Option<String> {
    let plain: bool = !attribute.is_empty()
        && attribute
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    plain.then(|| format!("$.{attribute}.value"))
}

/// Retrieves one record by entity and identifier.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the record is not found.
pub fn find_record(
    conn: &mut SqliteConnection,
    logical_name: &str,
    id: RecordId,
) -> Result<Option<RecordRow>, PersistenceError> {
    let result: Result<RecordRow, diesel::result::Error> = records::table
        .filter(records::logical_name.eq(logical_name))
        .filter(records::record_id.eq(id.to_string()))
        .select(RecordRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts the stored records of an entity.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_records(
    conn: &mut SqliteConnection,
    logical_name: &str,
) -> Result<i64, PersistenceError> {
    Ok(records::table
        .filter(records::logical_name.eq(logical_name))
        .count()
        .get_result(conn)?)
}

/// Returns whether any record carries the identifier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn record_exists(conn: &mut SqliteConnection, id: RecordId) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        records::table.filter(records::record_id.eq(id.to_string())),
    ))
    .get_result(conn)?)
}
