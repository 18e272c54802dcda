// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::log::WorkflowLog;
use crate::service::{DataService, QueryExpression};
use contract_line_domain::Record;
use contract_line_domain::schema::bid;
use tracing::debug;

/// Builds the query for child bids of a contract that are neither master
/// bids nor already converted into a contract line.
#[must_use]
pub fn eligible_bids_query(contract_number: &str) -> QueryExpression {
    QueryExpression::new(bid::ENTITY)
        .columns(&[
            bid::ID,
            bid::LEVEL,
            bid::TITLE,
            bid::NUMBER,
            bid::SITE,
            bid::SITE_GUID,
            bid::GUID,
            bid::AMOUNT,
            bid::LINE_CREATED,
        ])
        .where_equal(bid::IS_MASTER, false)
        .where_equal(bid::LINE_CREATED, false)
        .where_equal(bid::CONTRACT_NUMBER, contract_number)
}

/// Returns every eligible bid for the contract. No row cap is applied.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_eligible_bids<S, L>(
    service: &mut S,
    contract_number: &str,
    log: &mut L,
) -> Result<Vec<Record>, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let query: QueryExpression = eligible_bids_query(contract_number);
    let bids: Vec<Record> = service.query(&query)?;

    debug!(contract_number, count = bids.len(), "Found eligible bids");
    log.write_line(&format!("Bids Related to Service Contract: {}", bids.len()));

    Ok(bids)
}
