// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::bid;
use crate::types::{AttributeValue, Record, RecordId};
use serde::{Deserialize, Serialize};

/// The fields of a child bid that contract line synthesis reads.
///
/// Extraction never fails: absent or mistyped attributes become `None` and
/// are judged later by [`crate::validate_bid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    /// The bid's record identifier.
    pub id: Option<RecordId>,
    /// Display title, copied onto the contract line.
    pub title: Option<String>,
    /// The amount as display text (e.g. `"$1,200.00"`).
    pub amount_text: Option<String>,
    /// The selected tier or level label (e.g. `"Gold"`).
    pub level: Option<String>,
    /// The human-facing bid number used for back-lookup.
    pub bid_number: Option<String>,
    /// The site reference in string form.
    pub site_reference: Option<String>,
}

impl BidRecord {
    /// Reads a bid out of a generic record.
    ///
    /// Amount and level come from the formatted values. When a formatted
    /// value is absent the typed attribute is used instead.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let amount_text: Option<String> = record
            .formatted(bid::AMOUNT)
            .map(str::to_string)
            .or_else(|| {
                record
                    .get(bid::AMOUNT)
                    .and_then(AttributeValue::as_money)
                    .map(|value| value.to_string())
            });
        let level: Option<String> = record
            .formatted(bid::LEVEL)
            .or_else(|| record.get_text(bid::LEVEL))
            .map(str::to_string);

        Self {
            id: record.id(),
            title: record.get_text(bid::TITLE).map(str::to_string),
            amount_text,
            level,
            bid_number: non_blank(record.get_text(bid::NUMBER)),
            site_reference: non_blank(record.get_text(bid::SITE_GUID)),
        }
    }

    /// Returns a label for log lines, preferring the bid number.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.bid_number, self.id) {
            (Some(number), _) => number.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::from("<unidentified>"),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}
