// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::resolver::Resolution;
use contract_line_domain::{Decimal, FieldParse, RecordId, SkipReason};
use serde::{Deserialize, Serialize};

/// Where a single bid is in the synthesis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidState {
    Discovered,
    Validated,
    ProductResolved,
    /// The contract line exists but may still lack its back-references.
    Created,
    Linked,
    Skipped,
}

impl BidState {
    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Discovered` → `Validated` | `Skipped`
    /// - `Validated` → `ProductResolved`
    /// - `ProductResolved` → `Created` | `Linked` | `Skipped`
    /// - `Created` → `Linked`
    ///
    /// `ProductResolved` → `Linked` is the single-write path; the skip from
    /// `ProductResolved` is a lost bid claim.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Discovered, Self::Validated | Self::Skipped)
                | (Self::Validated, Self::ProductResolved)
                | (
                    Self::ProductResolved,
                    Self::Created | Self::Linked | Self::Skipped
                )
                | (Self::Created, Self::Linked)
        )
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Linked | Self::Skipped)
    }
}

/// A condition worth surfacing that did not stop a line from being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The amount text could not be parsed; the line is priced at zero.
    MalformedAmount { raw: String },
    /// The bid had no amount; the line is priced at zero.
    MissingAmount,
    ProductNotFound,
    AmbiguousProduct { count: usize },
    RelatedBidNotFound,
    AmbiguousRelatedBid { count: usize },
}

impl Diagnostic {
    /// Collects the diagnostics implied by a line's inputs and lookups.
    #[must_use]
    pub fn collect(
        amount: &FieldParse<Decimal>,
        product: &Resolution,
        related_bid: &Resolution,
    ) -> Vec<Self> {
        let mut diagnostics: Vec<Self> = Vec::new();
        match amount {
            FieldParse::Parsed(_) => {}
            FieldParse::Missing => diagnostics.push(Self::MissingAmount),
            FieldParse::Malformed(raw) => {
                diagnostics.push(Self::MalformedAmount { raw: raw.clone() });
            }
        }
        match product {
            Resolution::NoMatch => diagnostics.push(Self::ProductNotFound),
            Resolution::UniqueMatch { .. } => {}
            Resolution::AmbiguousMatch { count, .. } => {
                diagnostics.push(Self::AmbiguousProduct { count: *count });
            }
        }
        match related_bid {
            Resolution::NoMatch => diagnostics.push(Self::RelatedBidNotFound),
            Resolution::UniqueMatch { .. } => {}
            Resolution::AmbiguousMatch { count, .. } => {
                diagnostics.push(Self::AmbiguousRelatedBid { count: *count });
            }
        }
        diagnostics
    }
}

/// What was written for one bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractLineSummary {
    pub contract_line_id: RecordId,
    pub bid_id: RecordId,
    pub bid_number: String,
    pub price: Decimal,
    pub amount: FieldParse<Decimal>,
    pub product: Resolution,
    pub related_bid: Resolution,
    pub site: RecordId,
    pub diagnostics: Vec<Diagnostic>,
}

/// The terminal result for one discovered bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BidOutcome {
    /// A contract line was created and fully linked.
    Linked(ContractLineSummary),
    /// Required fields were missing; nothing was written.
    Skipped {
        bid: String,
        bid_id: Option<RecordId>,
        reasons: Vec<SkipReason>,
    },
    /// Another run converted the bid first; nothing was written.
    AlreadyClaimed { bid: String, bid_id: RecordId },
}

impl BidOutcome {
    #[must_use]
    pub const fn state(&self) -> BidState {
        match self {
            Self::Linked(_) => BidState::Linked,
            Self::Skipped { .. } | Self::AlreadyClaimed { .. } => BidState::Skipped,
        }
    }
}

/// The result of one invocation over a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub contract_number: String,
    /// How many eligible bids the finder returned.
    pub discovered: usize,
    pub outcomes: Vec<BidOutcome>,
}

impl WorkflowReport {
    #[must_use]
    pub fn new(contract_number: &str, discovered: usize) -> Self {
        Self {
            contract_number: contract_number.to_string(),
            discovered,
            outcomes: Vec::with_capacity(discovered),
        }
    }

    /// Summaries of every line created in this run, in bid order.
    #[must_use]
    pub fn contract_lines(&self) -> Vec<&ContractLineSummary> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                BidOutcome::Linked(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.contract_lines().len()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, BidOutcome::Skipped { .. }))
            .count()
    }

    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, BidOutcome::AlreadyClaimed { .. }))
            .count()
    }
}
