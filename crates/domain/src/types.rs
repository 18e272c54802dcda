// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::Date;
use uuid::Uuid;

/// The identifier of a persisted record.
///
/// Identifiers are globally unique and may be assigned either by the data
/// service on create or by the caller ahead of persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::InvalidRecordId {
                value: s.to_string(),
                error: e.to_string(),
            })
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed pointer to another record: its entity name plus its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// The logical entity name of the referenced record (e.g. `account`).
    pub logical_name: String,
    /// The referenced record's identifier.
    pub id: RecordId,
}

impl EntityReference {
    /// Creates a new reference.
    #[must_use]
    pub fn new(logical_name: &str, id: RecordId) -> Self {
        Self {
            logical_name: logical_name.to_string(),
            id,
        }
    }
}

impl std::fmt::Display for EntityReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.logical_name, self.id)
    }
}

/// A typed attribute value stored on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Money(Decimal),
    Date(Date),
    Reference(EntityReference),
}

impl AttributeValue {
    /// Returns the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the money payload, if this is a money value.
    #[must_use]
    pub const fn as_money(&self) -> Option<Decimal> {
        match self {
            Self::Money(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the referenced record, if this is a reference value.
    #[must_use]
    pub const fn as_reference(&self) -> Option<&EntityReference> {
        match self {
            Self::Reference(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Date> for AttributeValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<EntityReference> for AttributeValue {
    fn from(value: EntityReference) -> Self {
        Self::Reference(value)
    }
}

/// A generic record: a logical entity name, an optional identifier, typed
/// attributes, and the display-formatted text of selected attributes.
///
/// Formatted values mirror what the data service renders for users (for
/// example a money field as `"$1,200.00"`). Some source fields are only
/// reliably available in that form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    logical_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    formatted_values: BTreeMap<String, String>,
}

impl Record {
    /// Creates an empty, unpersisted record of the given entity.
    #[must_use]
    pub fn new(logical_name: &str) -> Self {
        Self {
            logical_name: logical_name.to_string(),
            id: None,
            attributes: BTreeMap::new(),
            formatted_values: BTreeMap::new(),
        }
    }

    /// Creates an empty record carrying a known identifier.
    #[must_use]
    pub fn with_id(logical_name: &str, id: RecordId) -> Self {
        let mut record: Self = Self::new(logical_name);
        record.id = Some(id);
        record
    }

    #[must_use]
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    #[must_use]
    pub const fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub const fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Returns a reference to this record, if it has an identifier.
    #[must_use]
    pub fn to_reference(&self) -> Option<EntityReference> {
        self.id
            .map(|id| EntityReference::new(&self.logical_name, id))
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.attributes.get(attribute)
    }

    /// Returns a text attribute, treating any other value type as absent.
    #[must_use]
    pub fn get_text(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(AttributeValue::as_text)
    }

    /// Returns a reference attribute, treating any other value type as absent.
    #[must_use]
    pub fn get_reference(&self, attribute: &str) -> Option<&EntityReference> {
        self.get(attribute).and_then(AttributeValue::as_reference)
    }

    pub fn set(&mut self, attribute: &str, value: impl Into<AttributeValue>) {
        self.attributes.insert(attribute.to_string(), value.into());
    }

    pub fn remove(&mut self, attribute: &str) -> Option<AttributeValue> {
        self.attributes.remove(attribute)
    }

    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// Returns the display-formatted text of an attribute.
    #[must_use]
    pub fn formatted(&self, attribute: &str) -> Option<&str> {
        self.formatted_values.get(attribute).map(String::as_str)
    }

    pub fn set_formatted(&mut self, attribute: &str, value: &str) {
        self.formatted_values
            .insert(attribute.to_string(), value.to_string());
    }

    #[must_use]
    pub const fn formatted_values(&self) -> &BTreeMap<String, String> {
        &self.formatted_values
    }

    /// Merges another record's attributes and formatted values into this one.
    ///
    /// Attributes present on `other` overwrite those on `self`; attributes
    /// absent from `other` are left untouched.
    pub fn merge_from(&mut self, other: &Self) {
        for (name, value) in &other.attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
        for (name, value) in &other.formatted_values {
            self.formatted_values.insert(name.clone(), value.clone());
        }
    }

    /// Keeps only the listed attributes and formatted values.
    pub fn retain_columns(&mut self, columns: &[String]) {
        self.attributes.retain(|name, _| columns.contains(name));
        self.formatted_values.retain(|name, _| columns.contains(name));
    }
}

/// Parses an ISO 8601 calendar date such as `2026-01-01`.
///
/// # Errors
///
/// Returns an error if the text is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(
        value.trim(),
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
