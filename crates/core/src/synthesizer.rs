// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Builds and persists contract lines.
//!
//! A contract line carries three links that point away from it (parent,
//! product, billing party) and three that tie it back to where it came from
//! (its own identifier as text, the originating bid, the site). In
//! [`PersistenceMode::Atomic`] the identifier is chosen up front and all six
//! are written by one create. In [`PersistenceMode::TwoPhase`] the store
//! picks the identifier, so the back-links follow in an update; if that
//! update fails the caller gets a [`PendingLink`] it can hand to
//! [`resume_linking`].

use crate::config::{ContractLineConfig, ContractParameters, PersistenceMode};
use crate::error::CoreError;
use crate::log::WorkflowLog;
use crate::resolver::{Resolution, resolve_bid_reference};
use crate::service::{ClaimGuard, DataService, GuardedCreate};
use contract_line_domain::schema::{bid, contract_line, site};
use contract_line_domain::{AttributeValue, EntityReference, Record, RecordId, ValidatedBid};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The back-links of a created contract line that have yet to be written.
///
/// Applying a `PendingLink` is idempotent: it only sets attributes to fixed
/// values, so a failed update may be retried any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLink {
    pub contract_line: EntityReference,
    /// Used to look the originating bid up again when `related_bid` is unset.
    pub bid_number: String,
    pub related_bid: Option<EntityReference>,
    pub site: EntityReference,
}

impl PendingLink {
    /// Writes the back-link attributes onto `record`.
    pub fn apply_to(&self, record: &mut Record) {
        record.set(
            contract_line::SELF_ID,
            self.contract_line.id.to_string(),
        );
        if let Some(related_bid) = &self.related_bid {
            record.set(contract_line::RELATED_BID, related_bid.clone());
        }
        record.set(contract_line::SITE, self.site.clone());
    }

    /// The update that completes the contract line.
    #[must_use]
    pub fn to_update(&self) -> Record {
        let mut record: Record =
            Record::with_id(&self.contract_line.logical_name, self.contract_line.id);
        self.apply_to(&mut record);
        record
    }
}

/// The result of synthesizing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    Linked {
        contract_line_id: RecordId,
        related_bid: Resolution,
    },
    /// The source bid's claim was lost to another run.
    AlreadyClaimed,
}

/// Assembles the contract-level, pricing and product fields of a line and
/// runs the subtype hook.
#[must_use]
pub fn build_contract_line(
    config: &ContractLineConfig,
    params: &ContractParameters,
    validated: &ValidatedBid,
    product: &Resolution,
) -> Record {
    let mut record: Record = Record::new(&config.target_type);
    record.set(&config.parent_field_name, config.parent_reference.clone());
    if let Some(title) = &validated.title {
        record.set(contract_line::TITLE, title.as_str());
    }
    record.set(contract_line::ACTIVE_ON, params.start_date);
    record.set(contract_line::EXPIRES_ON, params.end_date);
    record.set(contract_line::CUSTOMER, params.bill_to.clone());
    record.set(
        contract_line::PRICE,
        AttributeValue::Money(validated.price()),
    );

    (config.extra_fields)(&mut record, validated);

    if let Some(reference) = product.selected() {
        record.set(contract_line::PRODUCT, reference.clone());
    }

    record
}

/// The claim placed on a source bid when `claim_source_bids` is enabled.
#[must_use]
pub fn bid_claim(bid_id: RecordId) -> ClaimGuard {
    ClaimGuard {
        entity: bid::ENTITY.to_string(),
        id: bid_id,
        attribute: bid::LINE_CREATED.to_string(),
        expected: AttributeValue::Boolean(false),
        claimed: AttributeValue::Boolean(true),
    }
}

/// Creates the line for one validated bid and links it to the originating
/// bid and the site.
///
/// # Errors
///
/// Returns an error if a lookup or write fails. In two-phase mode a failed
/// link update is reported as [`CoreError::LinkingIncomplete`].
pub fn synthesize<S, L>(
    service: &mut S,
    config: &ContractLineConfig,
    params: &ContractParameters,
    validated: &ValidatedBid,
    product: &Resolution,
    log: &mut L,
) -> Result<Synthesis, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    let mut record: Record = build_contract_line(config, params, validated, product);

    match config.persistence {
        PersistenceMode::Atomic => {
            let contract_line_id: RecordId = RecordId::generate();
            record.set_id(contract_line_id);

            let related_bid: Resolution =
                resolve_bid_reference(service, &validated.bid_number, log)?;
            let pending: PendingLink = pending_link(
                config,
                contract_line_id,
                validated,
                &related_bid,
                log,
            );
            pending.apply_to(&mut record);

            let Some(created) = create_line(service, config, validated, &record)? else {
                log.write_line(&format!(
                    "Bid {} was already converted; no contract line created",
                    validated.bid_number
                ));
                return Ok(Synthesis::AlreadyClaimed);
            };
            log.write_line(&format!("Contract Line GUID: {created}"));
            info!(contract_line_id = %created, bid_number = %validated.bid_number, "Created contract line");

            Ok(Synthesis::Linked {
                contract_line_id: created,
                related_bid,
            })
        }
        PersistenceMode::TwoPhase => {
            let Some(contract_line_id) = create_line(service, config, validated, &record)? else {
                log.write_line(&format!(
                    "Bid {} was already converted; no contract line created",
                    validated.bid_number
                ));
                return Ok(Synthesis::AlreadyClaimed);
            };
            log.write_line(&format!("Contract Line GUID: {contract_line_id}"));
            info!(contract_line_id = %contract_line_id, bid_number = %validated.bid_number, "Created contract line, linking");

            let related_bid: Resolution =
                match resolve_bid_reference(service, &validated.bid_number, log) {
                    Ok(resolution) => resolution,
                    Err(err) => {
                        let pending: PendingLink = PendingLink {
                            contract_line: EntityReference::new(
                                &config.target_type,
                                contract_line_id,
                            ),
                            bid_number: validated.bid_number.clone(),
                            related_bid: None,
                            site: EntityReference::new(site::ENTITY, validated.site),
                        };
                        return Err(incomplete(pending, err));
                    }
                };
            let pending: PendingLink = pending_link(
                config,
                contract_line_id,
                validated,
                &related_bid,
                log,
            );

            service
                .update(&pending.to_update())
                .map_err(|source| CoreError::LinkingIncomplete {
                    pending: Box::new(pending.clone()),
                    source,
                })?;

            Ok(Synthesis::Linked {
                contract_line_id,
                related_bid,
            })
        }
    }
}

/// Retries the link update of a line left incomplete by a two-phase run.
///
/// The originating bid is looked up again if it was never resolved.
///
/// # Errors
///
/// Returns an error if the lookup or the update fails again.
pub fn resume_linking<S, L>(
    service: &mut S,
    pending: &PendingLink,
    log: &mut L,
) -> Result<PendingLink, CoreError>
where
    S: DataService + ?Sized,
    L: WorkflowLog + ?Sized,
{
    debug!(contract_line_id = %pending.contract_line.id, "Resuming contract line linking");

    let mut completed: PendingLink = pending.clone();
    if completed.related_bid.is_none() {
        let related_bid: Resolution = resolve_bid_reference(service, &pending.bid_number, log)?;
        completed.related_bid = related_bid.selected().cloned();
    }

    service.update(&completed.to_update())?;
    log.write_line(&format!(
        "Linked contract line {}",
        completed.contract_line.id
    ));
    Ok(completed)
}

fn pending_link<L>(
    config: &ContractLineConfig,
    contract_line_id: RecordId,
    validated: &ValidatedBid,
    related_bid: &Resolution,
    log: &mut L,
) -> PendingLink
where
    L: WorkflowLog + ?Sized,
{
    log.write_line("Adding Related Site");
    log.write_line(&format!("Site Guid is: {}", validated.site));

    PendingLink {
        contract_line: EntityReference::new(&config.target_type, contract_line_id),
        bid_number: validated.bid_number.clone(),
        related_bid: related_bid.selected().cloned(),
        site: EntityReference::new(site::ENTITY, validated.site),
    }
}

/// Creates the record, claiming the source bid first when configured.
/// Returns `None` when the claim was lost.
fn create_line<S>(
    service: &mut S,
    config: &ContractLineConfig,
    validated: &ValidatedBid,
    record: &Record,
) -> Result<Option<RecordId>, CoreError>
where
    S: DataService + ?Sized,
{
    if !config.claim_source_bids {
        return Ok(Some(service.create(record)?));
    }

    match service.create_guarded(record, &bid_claim(validated.id))? {
        GuardedCreate::Created(id) => Ok(Some(id)),
        GuardedCreate::Conflict { current } => {
            debug!(bid_id = %validated.id, ?current, "Bid claim lost");
            Ok(None)
        }
    }
}

fn incomplete(pending: PendingLink, source: CoreError) -> CoreError {
    match source {
        CoreError::Service(source) => CoreError::LinkingIncomplete {
            pending: Box::new(pending),
            source,
        },
        other => other,
    }
}
