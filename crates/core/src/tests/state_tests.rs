// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BidOutcome, BidState, ContractLineSummary, Diagnostic, Resolution, WorkflowReport,
};
use contract_line_domain::schema::product;
use contract_line_domain::{Decimal, EntityReference, FieldParse, RecordId, SkipReason};

fn summary(diagnostics: Vec<Diagnostic>) -> ContractLineSummary {
    ContractLineSummary {
        contract_line_id: RecordId::generate(),
        bid_id: RecordId::generate(),
        bid_number: String::from("B-1"),
        price: Decimal::new(500, 0),
        amount: FieldParse::Parsed(Decimal::new(500, 0)),
        product: Resolution::NoMatch,
        related_bid: Resolution::NoMatch,
        site: RecordId::generate(),
        diagnostics,
    }
}

#[test]
fn test_valid_transitions() {
    assert!(BidState::Discovered.can_transition_to(BidState::Validated));
    assert!(BidState::Discovered.can_transition_to(BidState::Skipped));
    assert!(BidState::Validated.can_transition_to(BidState::ProductResolved));
    assert!(BidState::ProductResolved.can_transition_to(BidState::Linked));
    assert!(BidState::ProductResolved.can_transition_to(BidState::Created));
    assert!(BidState::ProductResolved.can_transition_to(BidState::Skipped));
    assert!(BidState::Created.can_transition_to(BidState::Linked));
}

#[test]
fn test_invalid_transitions() {
    assert!(!BidState::Discovered.can_transition_to(BidState::Linked));
    assert!(!BidState::Validated.can_transition_to(BidState::Skipped));
    assert!(!BidState::Created.can_transition_to(BidState::Skipped));
    assert!(!BidState::Linked.can_transition_to(BidState::Created));
    assert!(!BidState::Skipped.can_transition_to(BidState::Validated));
}

#[test]
fn test_terminal_states() {
    assert!(BidState::Linked.is_terminal());
    assert!(BidState::Skipped.is_terminal());
    assert!(!BidState::Created.is_terminal());
    assert!(!BidState::Discovered.is_terminal());
}

#[test]
fn test_diagnostics_for_clean_line() {
    let reference: EntityReference = EntityReference::new(product::ENTITY, RecordId::generate());
    let found: Resolution = Resolution::UniqueMatch { reference };

    let diagnostics: Vec<Diagnostic> =
        Diagnostic::collect(&FieldParse::Parsed(Decimal::ONE), &found, &found);

    assert!(diagnostics.is_empty());
}

#[test]
fn test_diagnostics_collect_every_problem() {
    let first: EntityReference = EntityReference::new(product::ENTITY, RecordId::generate());
    let ambiguous: Resolution = Resolution::AmbiguousMatch { first, count: 2 };

    let diagnostics: Vec<Diagnostic> = Diagnostic::collect(
        &FieldParse::Malformed(String::from("TBD")),
        &ambiguous,
        &Resolution::NoMatch,
    );

    assert_eq!(
        diagnostics,
        vec![
            Diagnostic::MalformedAmount {
                raw: String::from("TBD")
            },
            Diagnostic::AmbiguousProduct { count: 2 },
            Diagnostic::RelatedBidNotFound,
        ]
    );
}

#[test]
fn test_report_counts() {
    let mut report: WorkflowReport = WorkflowReport::new("SC-100", 3);
    report.outcomes.push(BidOutcome::Linked(summary(Vec::new())));
    report.outcomes.push(BidOutcome::Skipped {
        bid: String::from("B-2"),
        bid_id: None,
        reasons: vec![SkipReason::MissingSiteReference],
    });
    report.outcomes.push(BidOutcome::AlreadyClaimed {
        bid: String::from("B-3"),
        bid_id: RecordId::generate(),
    });

    assert_eq!(report.created_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.claimed_count(), 1);
    assert_eq!(report.contract_lines()[0].bid_number, "B-1");
    assert!(report.outcomes.iter().all(|o| o.state().is_terminal()));
}

#[test]
fn test_outcome_serializes_with_tag() {
    let outcome: BidOutcome = BidOutcome::Skipped {
        bid: String::from("B-2"),
        bid_id: None,
        reasons: vec![SkipReason::MissingBidNumber],
    };

    let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["outcome"], "skipped");
    assert_eq!(json["bid"], "B-2");
}
