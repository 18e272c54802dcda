// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{ContractLineConfig, ContractParameters, PersistenceMode};
use crate::error::CoreError;
use crate::finder::find_eligible_bids;
use crate::log::WorkflowLog;
use crate::resolver::{Resolution, resolve_product};
use crate::service::DataService;
use crate::state::{BidOutcome, BidState, ContractLineSummary, Diagnostic, WorkflowReport};
use crate::synthesizer::{Synthesis, synthesize};
use contract_line_domain::{BidRecord, FieldParse, Record, ValidatedBid, validate_bid};
use tracing::{debug, info, info_span};

/// Tracks one bid through the pipeline.
struct BidProgress {
    label: String,
    state: BidState,
}

impl BidProgress {
    const fn new(label: String) -> Self {
        Self {
            label,
            state: BidState::Discovered,
        }
    }

    fn advance(&mut self, next: BidState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid bid transition {:?} -> {next:?}",
            self.state
        );
        debug!(bid = %self.label, from = ?self.state, to = ?next, "Bid state transition");
        self.state = next;
    }
}

/// Creates a contract line for every eligible, valid child bid of a contract.
///
/// Bids are processed one at a time in the order the data service returns
/// them. A bid that fails validation is skipped and the batch continues. A
/// data service failure aborts the run: lines created for earlier bids stay
/// in place and later bids are not attempted.
///
/// # Arguments
///
/// * `service` - The data service to query and write through
/// * `config` - What kind of contract line to create
/// * `params` - The contract-level values for this invocation
/// * `log` - Sink for progress lines
///
/// # Errors
///
/// Returns an error if any query or write fails.
pub fn add_contract_lines<S, L>(
    service: &mut S,
    config: &ContractLineConfig,
    params: &ContractParameters,
    log: &mut L,
) -> Result<WorkflowReport, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let span = info_span!("add_contract_lines", contract_number = %params.contract_number);
    let _entered = span.enter();

    let bids: Vec<Record> = find_eligible_bids(service, &params.contract_number, log)?;
    let mut report: WorkflowReport = WorkflowReport::new(&params.contract_number, bids.len());

    for record in &bids {
        let outcome: BidOutcome = process_bid(service, config, params, record, log)?;
        report.outcomes.push(outcome);
    }

    info!(
        discovered = report.discovered,
        created = report.created_count(),
        skipped = report.skipped_count(),
        claimed = report.claimed_count(),
        "Contract line synthesis complete"
    );

    Ok(report)
}

fn process_bid<S, L>(
    service: &mut S,
    config: &ContractLineConfig,
    params: &ContractParameters,
    record: &Record,
    log: &mut L,
) -> Result<BidOutcome, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let bid: BidRecord = BidRecord::from_record(record);
    let mut progress: BidProgress = BidProgress::new(bid.label());

    let validated: ValidatedBid = match validate_bid(&bid, &config.currency) {
        Ok(validated) => validated,
        Err(reasons) => {
            for reason in &reasons {
                log.write_line(&reason.to_string());
            }
            progress.advance(BidState::Skipped);
            return Ok(BidOutcome::Skipped {
                bid: progress.label,
                bid_id: bid.id,
                reasons,
            });
        }
    };
    progress.advance(BidState::Validated);

    log_validated(&validated, log);

    let product: Resolution = resolve_product(service, validated.level.as_deref(), log)?;
    progress.advance(BidState::ProductResolved);

    match synthesize(service, config, params, &validated, &product, log)? {
        Synthesis::AlreadyClaimed => {
            progress.advance(BidState::Skipped);
            Ok(BidOutcome::AlreadyClaimed {
                bid: progress.label,
                bid_id: validated.id,
            })
        }
        Synthesis::Linked {
            contract_line_id,
            related_bid,
        } => {
            if config.persistence == PersistenceMode::TwoPhase {
                progress.advance(BidState::Created);
            }
            progress.advance(BidState::Linked);
            let diagnostics: Vec<Diagnostic> =
                Diagnostic::collect(&validated.amount, &product, &related_bid);
            Ok(BidOutcome::Linked(ContractLineSummary {
                contract_line_id,
                bid_id: validated.id,
                bid_number: validated.bid_number.clone(),
                price: validated.price(),
                amount: validated.amount.clone(),
                product,
                related_bid,
                site: validated.site,
                diagnostics,
            }))
        }
    }
}

fn log_validated<L>(validated: &ValidatedBid, log: &mut L)
where
    L: WorkflowLog + ?Sized,
{
    log.write_line(&format!("bidNumber = {}", validated.bid_number));
    log.write_line(&format!(
        "bidTitle = {}",
        validated.title.as_deref().unwrap_or_default()
    ));
    log.write_line(&format!("bidPrice = {}", validated.price()));
    if let FieldParse::Malformed(raw) = &validated.amount {
        log.write_line(&format!(
            "Unparsable amount '{raw}' for bid {}; priced at zero",
            validated.bid_number
        ));
    }
    log.write_line(&format!(
        "bidLevel = {}",
        validated.level.as_deref().unwrap_or_default()
    ));
}
