// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The data service boundary.
//!
//! Workflows never talk to storage directly. They describe reads as
//! [`QueryExpression`]s and writes as [`Record`]s and hand both to a
//! [`DataService`] implementation supplied by the host.

use contract_line_domain::{AttributeValue, Record, RecordId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a data service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The addressed record does not exist.
    #[error("record {logical_name}/{id} not found")]
    NotFound {
        logical_name: String,
        id: RecordId,
    },

    /// A record with the requested identifier already exists.
    #[error("record {0} already exists")]
    AlreadyExists(RecordId),

    /// An update was issued for a record without an identifier.
    #[error("cannot update a '{0}' record without an identifier")]
    MissingId(String),

    /// Any backend failure (connection, serialization, constraint).
    #[error("data service failure: {0}")]
    Backend(String),
}

/// Which attributes a query returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSet {
    All,
    Columns(Vec<String>),
}

/// An equality filter on one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub attribute: String,
    pub value: AttributeValue,
}

/// A read against one entity: a column set, AND-ed equality conditions and
/// an optional cap on the number of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExpression {
    pub entity: String,
    pub columns: ColumnSet,
    pub conditions: Vec<Condition>,
    pub top_count: Option<usize>,
}

impl QueryExpression {
    /// Starts a query returning every column of `entity`.
    #[must_use]
    pub fn new(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            columns: ColumnSet::All,
            conditions: Vec::new(),
            top_count: None,
        }
    }

    /// Restricts the returned attributes.
    #[must_use]
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = ColumnSet::Columns(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Adds an equality condition.
    #[must_use]
    pub fn where_equal(mut self, attribute: &str, value: impl Into<AttributeValue>) -> Self {
        self.conditions.push(Condition {
            attribute: attribute.to_string(),
            value: value.into(),
        });
        self
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub const fn top(mut self, count: usize) -> Self {
        self.top_count = Some(count);
        self
    }

    /// Returns whether `record` satisfies the entity and every condition.
    ///
    /// An absent attribute never equals anything.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        record.logical_name() == self.entity
            && self
                .conditions
                .iter()
                .all(|condition| record.get(&condition.attribute) == Some(&condition.value))
    }

    /// Filters, caps and projects candidate records, preserving their order.
    ///
    /// Backends that cannot push conditions down to storage load the
    /// entity's records in their default order and finish the query here.
    #[must_use]
    pub fn evaluate<I>(&self, candidates: I) -> Vec<Record>
    where
        I: IntoIterator<Item = Record>,
    {
        let matching = candidates
            .into_iter()
            .filter(|record| self.matches(record));
        let capped: Vec<Record> = match self.top_count {
            Some(count) => matching.take(count).collect(),
            None => matching.collect(),
        };

        match &self.columns {
            ColumnSet::All => capped,
            ColumnSet::Columns(columns) => capped
                .into_iter()
                .map(|mut record| {
                    record.retain_columns(columns);
                    record
                })
                .collect(),
        }
    }
}

/// A compare-and-set precondition attached to a create.
///
/// The create happens only if `attribute` on the guard record still equals
/// `expected`; in the same atomic step the attribute is set to `claimed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimGuard {
    pub entity: String,
    pub id: RecordId,
    pub attribute: String,
    pub expected: AttributeValue,
    pub claimed: AttributeValue,
}

/// The result of a guarded create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardedCreate {
    /// The guard held; the record was created with this identifier.
    Created(RecordId),
    /// The guard record no longer carried the expected value. Nothing was
    /// written.
    Conflict {
        /// What the guard attribute held instead.
        current: Option<AttributeValue>,
    },
}

/// Query execution and record persistence supplied by the host.
///
/// Calls are blocking and are issued one at a time.
pub trait DataService {
    /// Runs a query and returns matching records in the store's default order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn query(&mut self, query: &QueryExpression) -> Result<Vec<Record>, ServiceError>;

    /// Persists a new record and returns its identifier.
    ///
    /// A caller-assigned identifier on `record` is honored.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is taken or the backend fails.
    fn create(&mut self, record: &Record) -> Result<RecordId, ServiceError>;

    /// Merges the attributes of `record` into the stored record with the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no identifier, does not exist, or
    /// the backend fails.
    fn update(&mut self, record: &Record) -> Result<(), ServiceError>;

    /// Creates `record` only if `guard` holds, atomically claiming the guard
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if the guard record does not exist or the backend
    /// fails. A failed precondition is not an error.
    fn create_guarded(
        &mut self,
        record: &Record,
        guard: &ClaimGuard,
    ) -> Result<GuardedCreate, ServiceError>;
}
