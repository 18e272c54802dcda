// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod import_tests;

use contract_line::{ContractLineConfig, ContractParameters};
use contract_line_domain::schema::{bid, product};
use contract_line_domain::{EntityReference, Record, RecordId};
use time::macros::date;

pub const SITE_GUID: &str = "3a1f3c84-5d3e-4b7e-9a51-0d7f2c6a9e10";

pub fn create_test_bid(bid_number: &str, amount: &str, level: &str) -> Record {
    let mut record: Record = Record::with_id(bid::ENTITY, RecordId::generate());
    record.set(bid::TITLE, "Level A Plan");
    record.set(bid::CONTRACT_NUMBER, "SC-100");
    record.set(bid::IS_MASTER, false);
    record.set(bid::LINE_CREATED, false);
    record.set(bid::NUMBER, bid_number);
    record.set(bid::SITE_GUID, SITE_GUID);
    record.set_formatted(bid::AMOUNT, amount);
    record.set_formatted(bid::LEVEL, level);
    record
}

pub fn create_test_product(name: &str) -> Record {
    let mut record: Record = Record::with_id(product::ENTITY, RecordId::generate());
    record.set(product::NAME, name);
    record
}

pub fn create_test_config() -> ContractLineConfig {
    ContractLineConfig::new(
        "contractdetail",
        "contractid",
        EntityReference::new("contract", RecordId::generate()),
    )
}

pub fn create_test_params() -> ContractParameters {
    ContractParameters {
        contract_number: String::from("SC-100"),
        start_date: date!(2026 - 01 - 01),
        end_date: date!(2026 - 12 - 31),
        bill_to: EntityReference::new("account", RecordId::generate()),
    }
}
