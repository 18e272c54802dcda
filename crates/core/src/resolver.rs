// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::log::WorkflowLog;
use crate::service::{DataService, QueryExpression};
use contract_line_domain::schema::{bid, product};
use contract_line_domain::{EntityReference, Record};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The outcome of looking a reference up by a non-unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    NoMatch,
    UniqueMatch {
        reference: EntityReference,
    },
    /// More than one record matched. `first` is the first in the store's
    /// default order.
    AmbiguousMatch {
        first: EntityReference,
        count: usize,
    },
}

impl Resolution {
    /// Classifies query results. Records without an identifier are ignored.
    #[must_use]
    pub fn from_matches(records: &[Record]) -> Self {
        let references: Vec<EntityReference> =
            records.iter().filter_map(Record::to_reference).collect();
        let count: usize = references.len();

        match references.into_iter().next() {
            None => Self::NoMatch,
            Some(reference) if count == 1 => Self::UniqueMatch { reference },
            Some(first) => Self::AmbiguousMatch { first, count },
        }
    }

    /// The reference to write, if any.
    ///
    /// Ambiguous matches still select the first record, which keeps the
    /// observable result stable; callers report the ambiguity separately.
    #[must_use]
    pub const fn selected(&self) -> Option<&EntityReference> {
        match self {
            Self::NoMatch => None,
            Self::UniqueMatch { reference } => Some(reference),
            Self::AmbiguousMatch { first, .. } => Some(first),
        }
    }

    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousMatch { .. })
    }
}

/// Resolves a catalog product by exact name equality with the bid's level
/// label. A bid without a level label resolves to [`Resolution::NoMatch`]
/// without querying.
///
/// # Errors
///
/// Returns an error if the catalog query fails.
pub fn resolve_product<S, L>(
    service: &mut S,
    level: Option<&str>,
    log: &mut L,
) -> Result<Resolution, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let Some(level) = level else {
        log.write_line("No level selected; product left unset");
        return Ok(Resolution::NoMatch);
    };

    let query: QueryExpression = QueryExpression::new(product::ENTITY)
        .columns(&[product::ID, product::NAME])
        .where_equal(product::NAME, level);
    let products: Vec<Record> = service.query(&query)?;
    log.write_line(&format!("Product Count: {}", products.len()));

    let resolution: Resolution = Resolution::from_matches(&products);
    match &resolution {
        Resolution::NoMatch => {}
        Resolution::UniqueMatch { reference } => {
            log.write_line(&format!("product GUID is: {}", reference.id));
        }
        Resolution::AmbiguousMatch { first, count } => {
            warn!(level, count, "Level label matches several products");
            log.write_line(&format!(
                "Ambiguous product '{level}': {count} matches, using first product GUID {}",
                first.id
            ));
        }
    }

    Ok(resolution)
}

/// Looks the originating bid up again by its bid number.
///
/// # Errors
///
/// Returns an error if the bid query fails.
pub fn resolve_bid_reference<S, L>(
    service: &mut S,
    bid_number: &str,
    log: &mut L,
) -> Result<Resolution, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let query: QueryExpression = QueryExpression::new(bid::ENTITY)
        .columns(&[bid::ID, bid::NUMBER])
        .where_equal(bid::NUMBER, bid_number);
    let bids: Vec<Record> = service.query(&query)?;

    let resolution: Resolution = Resolution::from_matches(&bids);
    match &resolution {
        Resolution::NoMatch => {
            log.write_line(&format!("No child bid found for bid number {bid_number}"));
        }
        Resolution::UniqueMatch { reference } => {
            log.write_line("Adding Related Child Bid");
            log.write_line(&format!("related child bid GUID = {}", reference.id));
        }
        Resolution::AmbiguousMatch { first, count } => {
            warn!(bid_number, count, "Bid number matches several bids");
            log.write_line(&format!(
                "Ambiguous bid number '{bid_number}': {count} matches, using first bid GUID {}",
                first.id
            ));
        }
    }

    Ok(resolution)
}
