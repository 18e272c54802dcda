// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod bid;
mod error;
mod numeric;
pub mod schema;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use bid::BidRecord;
pub use error::DomainError;
pub use numeric::{CurrencyFormat, FieldParse, parse_currency, parse_integer};
pub use types::{AttributeValue, EntityReference, Record, RecordId, parse_date};
pub use validation::{SkipReason, ValidatedBid, validate_bid};

// Re-exported so downstream crates name money and dates with the same types.
pub use rust_decimal::Decimal;
pub use time::Date;
