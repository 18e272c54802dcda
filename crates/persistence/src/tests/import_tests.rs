// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_test_product;
use crate::{PersistenceError, SqliteDataService, parse_records};
use contract_line_domain::schema::{bid, product};
use contract_line_domain::{AttributeValue, Record, RecordId};
use std::str::FromStr;

const SEED: &str = r#"[
  {
    "logical_name": "opportunity",
    "id": "5b0c7a52-0d8f-4f5b-a4a7-8f8f2d0e6a11",
    "attributes": {
      "name": { "type": "text", "value": "Level A Plan" },
      "ismasterbid": { "type": "boolean", "value": false },
      "firstcontractlinecreated": { "type": "boolean", "value": false },
      "svccontractnbr": { "type": "text", "value": "SC-100" },
      "opportunitynbr": { "type": "text", "value": "B-1" },
      "siteguid": { "type": "text", "value": "3a1f3c84-5d3e-4b7e-9a51-0d7f2c6a9e10" }
    },
    "formatted_values": {
      "contractamount": "$1,200.00",
      "selectedlevel": "Gold"
    }
  },
  {
    "logical_name": "product",
    "attributes": { "name": { "type": "text", "value": "Gold" } }
  }
]"#;

#[test]
fn test_parse_records_reads_ids_attributes_and_formatted_values() {
    let records: Vec<Record> = parse_records(SEED).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].id(),
        Some(RecordId::from_str("5b0c7a52-0d8f-4f5b-a4a7-8f8f2d0e6a11").unwrap())
    );
    assert_eq!(records[0].get(bid::IS_MASTER), Some(&AttributeValue::Boolean(false)));
    assert_eq!(records[0].formatted(bid::AMOUNT), Some("$1,200.00"));
    assert_eq!(records[1].id(), None);
}

#[test]
fn test_parse_records_rejects_malformed_json() {
    let result: Result<Vec<Record>, PersistenceError> = parse_records("{ not json");

    assert!(matches!(result, Err(PersistenceError::ImportFailed(_))));
}

#[test]
fn test_import_stores_all_records() {
    let mut service: SqliteDataService = SqliteDataService::new_in_memory().unwrap();

    let ids: Vec<RecordId> = service.import_records(&parse_records(SEED).unwrap()).unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(service.count_records(bid::ENTITY).unwrap(), 1);
    assert_eq!(service.count_records(product::ENTITY).unwrap(), 1);
}

#[test]
fn test_import_is_all_or_nothing() {
    let mut service: SqliteDataService = SqliteDataService::new_in_memory().unwrap();
    let duplicate: Record = create_test_product("Gold");

    let result: Result<Vec<RecordId>, PersistenceError> = service.import_records(&[
        create_test_product("Silver"),
        duplicate.clone(),
        duplicate,
    ]);

    assert!(matches!(result, Err(PersistenceError::DuplicateRecord(_))));
    assert_eq!(service.count_records(product::ENTITY).unwrap(), 0);
}

#[test]
fn test_import_file_missing_path() {
    let mut service: SqliteDataService = SqliteDataService::new_in_memory().unwrap();

    let result: Result<Vec<RecordId>, PersistenceError> =
        service.import_file("/nonexistent/contract-line-seed.json");

    assert!(matches!(result, Err(PersistenceError::ImportFailed(_))));
}
