// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contract_line_domain::{CurrencyFormat, Date, EntityReference, Record, ValidatedBid};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Injects subtype-specific attributes into a contract line before it is
/// persisted.
pub type ExtraFieldsFn = dyn Fn(&mut Record, &ValidatedBid) + Send + Sync;

/// How a contract line and its back-references reach the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PersistenceMode {
    /// The identifier is assigned before persistence so the complete record,
    /// back-references included, is written with a single create.
    #[default]
    Atomic,
    /// Create first, then update with the self identifier and links. A failed
    /// update leaves a resumable `PendingLink`.
    TwoPhase,
}

/// Everything that varies between kinds of contract line.
///
/// # Fields
///
/// * `target_type` - Entity name of the record to create
/// * `parent_field_name` - Attribute that links the line to its parent
/// * `parent_reference` - The parent the line belongs to
/// * `extra_fields` - Subtype hook run on each line before persistence
#[derive(Clone)]
pub struct ContractLineConfig {
    pub target_type: String,
    pub parent_field_name: String,
    pub parent_reference: EntityReference,
    pub extra_fields: Arc<ExtraFieldsFn>,
    pub persistence: PersistenceMode,
    /// Claim each source bid atomically with the create so concurrent or
    /// repeated runs cannot produce a second line for it.
    pub claim_source_bids: bool,
    pub currency: CurrencyFormat,
}

impl ContractLineConfig {
    /// Creates a configuration with no extra fields, atomic persistence and
    /// bid claiming enabled.
    #[must_use]
    pub fn new(
        target_type: &str,
        parent_field_name: &str,
        parent_reference: EntityReference,
    ) -> Self {
        Self {
            target_type: target_type.to_string(),
            parent_field_name: parent_field_name.to_string(),
            parent_reference,
            extra_fields: Arc::new(|_: &mut Record, _: &ValidatedBid| {}),
            persistence: PersistenceMode::default(),
            claim_source_bids: true,
            currency: CurrencyFormat::default(),
        }
    }

    #[must_use]
    pub fn with_extra_fields<F>(mut self, extra_fields: F) -> Self
    where
        F: Fn(&mut Record, &ValidatedBid) + Send + Sync + 'static,
    {
        self.extra_fields = Arc::new(extra_fields);
        self
    }

    #[must_use]
    pub const fn with_persistence(mut self, persistence: PersistenceMode) -> Self {
        self.persistence = persistence;
        self
    }

    /// Leaves source bids untouched; repeated runs may then duplicate lines.
    #[must_use]
    pub const fn without_bid_claims(mut self) -> Self {
        self.claim_source_bids = false;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }
}

impl std::fmt::Debug for ContractLineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractLineConfig")
            .field("target_type", &self.target_type)
            .field("parent_field_name", &self.parent_field_name)
            .field("parent_reference", &self.parent_reference)
            .field("persistence", &self.persistence)
            .field("claim_source_bids", &self.claim_source_bids)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

/// Contract-level values supplied by the caller for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractParameters {
    /// Correlates child bids with the contract.
    pub contract_number: String,
    pub start_date: Date,
    pub end_date: Date,
    /// The billing party written onto every line.
    pub bill_to: EntityReference,
}
