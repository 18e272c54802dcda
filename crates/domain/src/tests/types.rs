// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AttributeValue, DomainError, EntityReference, Record, RecordId, parse_date};
use std::str::FromStr;

#[test]
fn test_record_id_parses_hyphenated_and_braced_forms() {
    let plain: RecordId = RecordId::from_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap();
    let braced: RecordId = RecordId::from_str("{6F9619FF-8B86-D011-B42D-00C04FC964FF}").unwrap();
    assert_eq!(plain, braced);
    assert_eq!(plain.to_string(), "6f9619ff-8b86-d011-b42d-00c04fc964ff");
}

#[test]
fn test_record_id_rejects_garbage() {
    let result: Result<RecordId, DomainError> = RecordId::from_str("not-a-guid");
    assert!(matches!(
        result,
        Err(DomainError::InvalidRecordId { value, .. }) if value == "not-a-guid"
    ));
}

#[test]
fn test_record_id_display_round_trips() {
    let id: RecordId = RecordId::generate();
    let parsed: RecordId = RecordId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_record_accessors_ignore_mistyped_values() {
    let mut record: Record = Record::new("opportunity");
    record.set("name", "Level A Plan");
    record.set("ismasterbid", false);

    assert_eq!(record.get_text("name"), Some("Level A Plan"));
    assert_eq!(record.get_text("ismasterbid"), None);
    assert_eq!(
        record.get("ismasterbid").and_then(AttributeValue::as_bool),
        Some(false)
    );
}

#[test]
fn test_record_merge_overwrites_only_given_attributes() {
    let mut stored: Record = Record::new("contractdetail");
    stored.set("title", "Old");
    stored.set("price", AttributeValue::Money(crate::Decimal::ONE));

    let mut patch: Record = Record::new("contractdetail");
    patch.set("title", "New");
    patch.set_formatted("price", "$1.00");

    stored.merge_from(&patch);

    assert_eq!(stored.get_text("title"), Some("New"));
    assert_eq!(
        stored.get("price").and_then(AttributeValue::as_money),
        Some(crate::Decimal::ONE)
    );
    assert_eq!(stored.formatted("price"), Some("$1.00"));
}

#[test]
fn test_record_retain_columns() {
    let mut record: Record = Record::new("product");
    record.set("name", "Gold");
    record.set("description", "Top tier");
    record.retain_columns(&[String::from("name")]);

    assert!(record.contains("name"));
    assert!(!record.contains("description"));
}

#[test]
fn test_record_serializes_typed_attributes() {
    let site: RecordId = RecordId::generate();
    let mut record: Record = Record::with_id("contractdetail", RecordId::generate());
    record.set("siteid", EntityReference::new("account", site));
    record.set("activeon", time::macros::date!(2026 - 01 - 01));

    let json: String = serde_json::to_string(&record).unwrap();
    let back: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
    assert_eq!(
        back.get_reference("siteid").map(|reference| reference.id),
        Some(site)
    );
}

#[test]
fn test_dates_serialize_as_iso_text() {
    let value: AttributeValue = AttributeValue::Date(time::macros::date!(2026 - 12 - 31));

    let json: serde_json::Value = serde_json::to_value(&value).unwrap();

    assert_eq!(json["type"], "date");
    assert_eq!(json["value"], "2026-12-31");
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date(" 2026-01-01 ").unwrap(),
        time::macros::date!(2026 - 01 - 01)
    );
    assert!(matches!(
        parse_date("01/01/2026"),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(parse_date("2026-02-30").is_err());
}
