// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract line synthesis.
//!
//! Given a contract number, [`add_contract_lines`] finds the contract's
//! pending child bids, validates each, resolves the catalog product for its
//! level, and writes one linked contract line per bid through a
//! host-supplied [`DataService`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod error;
mod finder;
mod lien_deadline;
mod log;
mod resolver;
mod service;
mod state;
mod synthesizer;
mod workflow;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use config::{ContractLineConfig, ContractParameters, ExtraFieldsFn, PersistenceMode};
pub use error::CoreError;
pub use finder::{eligible_bids_query, find_eligible_bids};
pub use lien_deadline::{LienDeadline, LienDeadlineParameters, calculate_lien_deadline};
pub use log::{MemoryLog, TracingLog, WorkflowLog};
pub use resolver::{Resolution, resolve_bid_reference, resolve_product};
pub use service::{
    ClaimGuard, ColumnSet, Condition, DataService, GuardedCreate, QueryExpression, ServiceError,
};
pub use state::{BidOutcome, BidState, ContractLineSummary, Diagnostic, WorkflowReport};
pub use synthesizer::{
    PendingLink, Synthesis, bid_claim, build_contract_line, resume_linking, synthesize,
};
pub use workflow::add_contract_lines;
