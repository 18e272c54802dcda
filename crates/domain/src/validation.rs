// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bid::BidRecord;
use crate::numeric::{CurrencyFormat, FieldParse, parse_currency};
use crate::types::RecordId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Why a bid was excluded from contract line synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The bid carries no site reference.
    MissingSiteReference,
    /// The bid carries no bid number.
    MissingBidNumber,
    /// The site reference is present but is not a record identifier.
    InvalidSiteReference {
        /// The unparsable value.
        value: String,
    },
    /// The bid record itself has no identifier.
    MissingBidId,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSiteReference => write!(f, "Missing site reference for child bid"),
            Self::MissingBidNumber => write!(f, "Missing bid number for child bid"),
            Self::InvalidSiteReference { value } => {
                write!(f, "Invalid site reference '{value}' for child bid")
            }
            Self::MissingBidId => write!(f, "Missing record identifier for child bid"),
        }
    }
}

/// A bid that passed validation, with its fields in typed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedBid {
    pub id: RecordId,
    pub title: Option<String>,
    pub bid_number: String,
    pub site: RecordId,
    pub level: Option<String>,
    /// The parsed amount. A missing or malformed amount is kept as such so
    /// callers can price at zero and still report the fallback.
    pub amount: FieldParse<Decimal>,
}

impl ValidatedBid {
    /// The price to write on the contract line (zero when unparsable).
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.amount.value_or_default()
    }
}

/// Decides whether a bid may be turned into a contract line.
///
/// Every required-field check runs, so a bid lacking both a site reference
/// and a bid number reports both reasons. Numeric fields are never a reason
/// to skip.
///
/// # Errors
///
/// Returns every [`SkipReason`] that applies when the bid cannot proceed.
pub fn validate_bid(
    bid: &BidRecord,
    currency: &CurrencyFormat,
) -> Result<ValidatedBid, Vec<SkipReason>> {
    let mut reasons: Vec<SkipReason> = Vec::new();

    let site: Option<RecordId> = match &bid.site_reference {
        None => {
            reasons.push(SkipReason::MissingSiteReference);
            None
        }
        Some(value) => match RecordId::from_str(value) {
            Ok(site) => Some(site),
            Err(_) => {
                reasons.push(SkipReason::InvalidSiteReference {
                    value: value.clone(),
                });
                None
            }
        },
    };

    if bid.bid_number.is_none() {
        reasons.push(SkipReason::MissingBidNumber);
    }

    if bid.id.is_none() {
        reasons.push(SkipReason::MissingBidId);
    }

    match (bid.id, &bid.bid_number, site) {
        (Some(id), Some(bid_number), Some(site)) if reasons.is_empty() => Ok(ValidatedBid {
            id,
            title: bid.title.clone(),
            bid_number: bid_number.clone(),
            site,
            level: bid.level.clone(),
            amount: parse_currency(bid.amount_text.as_deref(), currency),
        }),
        _ => Err(reasons),
    }
}
