// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::InMemoryService;
use crate::{
    CoreError, LienDeadline, LienDeadlineParameters, MemoryLog, calculate_lien_deadline,
};
use contract_line_domain::schema::lien_deadline;
use contract_line_domain::{DomainError, FieldParse, Record, RecordId};
use time::macros::date;

fn deadline_row(state: &str, days: &str) -> Record {
    let mut record: Record = Record::with_id(lien_deadline::ENTITY, RecordId::generate());
    record.set(lien_deadline::LOCATION_STATE, state);
    record.set_formatted(lien_deadline::SUB_DEADLINE_DAYS, days);
    record
}

fn params(state: &str) -> LienDeadlineParameters {
    LienDeadlineParameters {
        location_state: state.to_string(),
        final_date_of_work: date!(2026 - 03 - 15),
    }
}

#[test]
fn test_deadline_adds_state_offset() {
    let mut service: InMemoryService = InMemoryService::with_records(vec![
        deadline_row("TX", "45"),
        deadline_row("CA", "90"),
    ]);
    let mut log: MemoryLog = MemoryLog::new();

    let deadline: LienDeadline =
        calculate_lien_deadline(&mut service, &params("CA"), &mut log).unwrap();

    assert_eq!(deadline.sub_deadline_days, FieldParse::Parsed(90));
    assert_eq!(deadline.deadline, date!(2026 - 06 - 13));
    assert_eq!(
        log.lines(),
        [
            "Lien Deadline By State Count: 1",
            "Lien Sub Deadline Days: 90",
            "Calculated Lien Deadline Date: 2026-06-13",
        ]
    );
}

#[test]
fn test_deadline_uses_first_row_only() {
    let mut service: InMemoryService = InMemoryService::with_records(vec![
        deadline_row("TX", "30"),
        deadline_row("TX", "60"),
    ]);

    let deadline: LienDeadline =
        calculate_lien_deadline(&mut service, &params("TX"), &mut MemoryLog::new()).unwrap();

    assert_eq!(deadline.deadline, date!(2026 - 04 - 14));
    assert_eq!(service.queries[0].top_count, Some(1));
}

#[test]
fn test_unparsable_offset_counts_as_zero_days() {
    let mut service: InMemoryService =
        InMemoryService::with_records(vec![deadline_row("NV", "ninety")]);

    let deadline: LienDeadline =
        calculate_lien_deadline(&mut service, &params("NV"), &mut MemoryLog::new()).unwrap();

    assert!(deadline.sub_deadline_days.is_malformed());
    assert_eq!(deadline.deadline, deadline.final_date_of_work);
}

#[test]
fn test_unknown_state_is_an_error() {
    let mut service: InMemoryService =
        InMemoryService::with_records(vec![deadline_row("TX", "45")]);
    let mut log: MemoryLog = MemoryLog::new();

    let result: Result<LienDeadline, CoreError> =
        calculate_lien_deadline(&mut service, &params("WA"), &mut log);

    assert_eq!(
        result,
        Err(CoreError::LienDeadlineNotFound {
            location_state: String::from("WA")
        })
    );
    assert_eq!(log.lines(), ["Lien Deadline By State Count: 0"]);
}

#[test]
fn test_out_of_range_deadline_is_an_error() {
    let mut service: InMemoryService =
        InMemoryService::with_records(vec![deadline_row("TX", "999999999")]);

    let result: Result<LienDeadline, CoreError> =
        calculate_lien_deadline(&mut service, &params("TX"), &mut MemoryLog::new());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DateArithmeticOverflow { .. }
        ))
    ));
}

#[test]
fn test_offset_beyond_duration_range_is_an_error() {
    let mut service: InMemoryService =
        InMemoryService::with_records(vec![deadline_row("TX", "9000000000000000000")]);

    let result: Result<LienDeadline, CoreError> =
        calculate_lien_deadline(&mut service, &params("TX"), &mut MemoryLog::new());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DateArithmeticOverflow { .. }
        ))
    ));
}

#[test]
fn test_unparsable_offset_is_written_to_the_log() {
    let mut service: InMemoryService =
        InMemoryService::with_records(vec![deadline_row("NV", "ninety")]);
    let mut log: MemoryLog = MemoryLog::new();

    calculate_lien_deadline(&mut service, &params("NV"), &mut log).unwrap();

    assert_eq!(
        log.lines(),
        [
            "Lien Deadline By State Count: 1",
            "Unparsable sub deadline days 'ninety' for state NV; using 0",
            "Lien Sub Deadline Days: 0",
            "Calculated Lien Deadline Date: 2026-03-15",
        ]
    );
}
