// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ClaimGuard, ContractLineConfig, ContractParameters, DataService, GuardedCreate,
    QueryExpression, ServiceError,
};
use contract_line_domain::schema::{bid, product};
use contract_line_domain::{EntityReference, Record, RecordId};
use std::str::FromStr;
use time::macros::date;

pub const SITE_GUID: &str = "3a1f3c84-5d3e-4b7e-9a51-0d7f2c6a9e10";
pub const CONTRACT_LINE_TYPE: &str = "contractdetail";
pub const PARENT_FIELD: &str = "contractid";

/// A data service over a `Vec` with switchable failures.
#[derive(Debug, Default)]
pub struct InMemoryService {
    pub records: Vec<Record>,
    pub queries: Vec<QueryExpression>,
    pub creates: usize,
    pub updates: usize,
    /// Fail every create once this many creates have succeeded.
    pub fail_creates_after: Option<usize>,
    pub fail_updates: bool,
    /// Fail queries against this entity.
    pub fail_queries_on: Option<String>,
}

impl InMemoryService {
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    pub fn records_of(&self, entity: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.logical_name() == entity)
            .collect()
    }

    fn position(&self, entity: &str, id: RecordId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.logical_name() == entity && record.id() == Some(id))
    }
}

impl DataService for InMemoryService {
    fn query(&mut self, query: &QueryExpression) -> Result<Vec<Record>, ServiceError> {
        if self.fail_queries_on.as_deref() == Some(query.entity.as_str()) {
            return Err(ServiceError::Backend(format!(
                "query on {} refused",
                query.entity
            )));
        }
        self.queries.push(query.clone());
        Ok(query.evaluate(self.records.iter().cloned()))
    }

    fn create(&mut self, record: &Record) -> Result<RecordId, ServiceError> {
        if self
            .fail_creates_after
            .is_some_and(|limit| self.creates >= limit)
        {
            return Err(ServiceError::Backend(String::from("create refused")));
        }
        let id: RecordId = record.id().unwrap_or_else(RecordId::generate);
        if self.find(id).is_some() {
            return Err(ServiceError::AlreadyExists(id));
        }
        let mut stored: Record = record.clone();
        stored.set_id(id);
        self.records.push(stored);
        self.creates += 1;
        Ok(id)
    }

    fn update(&mut self, record: &Record) -> Result<(), ServiceError> {
        if self.fail_updates {
            return Err(ServiceError::Backend(String::from("update refused")));
        }
        let id: RecordId = record
            .id()
            .ok_or_else(|| ServiceError::MissingId(record.logical_name().to_string()))?;
        let index: usize =
            self.position(record.logical_name(), id)
                .ok_or_else(|| ServiceError::NotFound {
                    logical_name: record.logical_name().to_string(),
                    id,
                })?;
        self.records[index].merge_from(record);
        self.updates += 1;
        Ok(())
    }

    fn create_guarded(
        &mut self,
        record: &Record,
        guard: &ClaimGuard,
    ) -> Result<GuardedCreate, ServiceError> {
        let index: usize =
            self.position(&guard.entity, guard.id)
                .ok_or_else(|| ServiceError::NotFound {
                    logical_name: guard.entity.clone(),
                    id: guard.id,
                })?;
        let current = self.records[index].get(&guard.attribute).cloned();
        if current.as_ref() != Some(&guard.expected) {
            return Ok(GuardedCreate::Conflict { current });
        }
        let id: RecordId = self.create(record)?;
        self.records[index].set(&guard.attribute, guard.claimed.clone());
        Ok(GuardedCreate::Created(id))
    }
}

pub fn site_id() -> RecordId {
    RecordId::from_str(SITE_GUID).unwrap()
}

pub fn create_test_bid(
    contract_number: &str,
    title: &str,
    amount: &str,
    level: &str,
    bid_number: Option<&str>,
    site_guid: Option<&str>,
) -> Record {
    let mut record: Record = Record::with_id(bid::ENTITY, RecordId::generate());
    record.set(bid::TITLE, title);
    record.set(bid::CONTRACT_NUMBER, contract_number);
    record.set(bid::IS_MASTER, false);
    record.set(bid::LINE_CREATED, false);
    record.set_formatted(bid::AMOUNT, amount);
    record.set_formatted(bid::LEVEL, level);
    if let Some(bid_number) = bid_number {
        record.set(bid::NUMBER, bid_number);
    }
    if let Some(site_guid) = site_guid {
        record.set(bid::SITE_GUID, site_guid);
    }
    record
}

pub fn create_gold_bid() -> Record {
    create_test_bid(
        "SC-100",
        "Level A Plan",
        "$1,200.00",
        "Gold",
        Some("B-1"),
        Some(SITE_GUID),
    )
}

pub fn create_test_product(name: &str) -> Record {
    let mut record: Record = Record::with_id(product::ENTITY, RecordId::generate());
    record.set(product::NAME, name);
    record
}

pub fn create_test_config() -> ContractLineConfig {
    ContractLineConfig::new(
        CONTRACT_LINE_TYPE,
        PARENT_FIELD,
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
