// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::log::WorkflowLog;
use crate::service::{DataService, QueryExpression};
use contract_line_domain::schema::lien_deadline;
use contract_line_domain::{Date, DomainError, FieldParse, Record, parse_integer};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::debug;

const SECONDS_PER_DAY: i64 = 86_400;

/// Inputs for computing a lien deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LienDeadlineParameters {
    /// The jurisdiction key of the job's location.
    pub location_state: String,
    pub final_date_of_work: Date,
}

/// A computed lien deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LienDeadline {
    pub location_state: String,
    pub final_date_of_work: Date,
    /// The day offset as read from the reference row. Unparsable offsets
    /// count as zero days.
    pub sub_deadline_days: FieldParse<i64>,
    pub deadline: Date,
}

/// Looks up the jurisdiction's day offset and adds it to the final date of
/// work.
///
/// # Errors
///
/// Returns an error if the query fails, no row exists for the state, or the
/// resulting date is out of range.
pub fn calculate_lien_deadline<S, L>(
    service: &mut S,
    params: &LienDeadlineParameters,
    log: &mut L,
) -> Result<LienDeadline, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let query: QueryExpression = QueryExpression::new(lien_deadline::ENTITY)
        .columns(&[lien_deadline::SUB_DEADLINE_DAYS])
        .where_equal(lien_deadline::LOCATION_STATE, params.location_state.as_str())
        .top(1);
    let rows: Vec<Record> = service.query(&query)?;
    log.write_line(&format!("Lien Deadline By State Count: {}", rows.len()));

    let Some(row) = rows.first() else {
        return Err(CoreError::LienDeadlineNotFound {
            location_state: params.location_state.clone(),
        });
    };

    let sub_deadline_days: FieldParse<i64> =
        parse_integer(row.formatted(lien_deadline::SUB_DEADLINE_DAYS));
    let days: i64 = sub_deadline_days.value_or_default();
    if let FieldParse::Malformed(raw) = &sub_deadline_days {
        debug!(state = %params.location_state, raw = %raw, "Unparsable lien day offset");
        log.write_line(&format!(
            "Unparsable sub deadline days '{raw}' for state {}; using 0",
            params.location_state
        ));
    }
    log.write_line(&format!("Lien Sub Deadline Days: {days}"));

    // Duration::days panics past i64 seconds
    let deadline: Date = days
        .checked_mul(SECONDS_PER_DAY)
        .map(Duration::seconds)
        .and_then(|offset| params.final_date_of_work.checked_add(offset))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!(
                "adding {days} days to {}",
                params.final_date_of_work
            ),
        })?;
    log.write_line(&format!("Calculated Lien Deadline Date: {deadline}"));

    Ok(LienDeadline {
        location_state: params.location_state.clone(),
        final_date_of_work: params.final_date_of_work,
        sub_deadline_days,
        deadline,
    })
}
