// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lenient parsing of display-formatted numeric fields.
//!
//! Source records expose some numbers only as formatted text (`"$1,200.00"`,
//! `"45"`). A field that fails to parse never fails the workflow: callers use
//! [`FieldParse::value_or_default`] and read [`FieldParse::is_malformed`] to
//! report the fallback separately from a legitimate zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The result of parsing an optional formatted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FieldParse<T> {
    /// The field parsed cleanly.
    Parsed(T),
    /// The field was absent or blank.
    Missing,
    /// The field was present but could not be parsed; carries the raw text.
    Malformed(String),
}

impl<T: Copy + Default> FieldParse<T> {
    /// Returns the parsed value, or the type's default (zero) otherwise.
    #[must_use]
    pub fn value_or_default(&self) -> T {
        match self {
            Self::Parsed(value) => *value,
            Self::Missing | Self::Malformed(_) => T::default(),
        }
    }
}

impl<T> FieldParse<T> {
    /// Returns whether the field was present but unparsable.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Returns whether the field was absent or blank.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Culture settings for currency text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// The currency symbol, e.g. `$`.
    pub symbol: String,
    /// Thousands separator in the integral part.
    pub group_separator: char,
    /// Separator between integral and fractional parts.
    pub decimal_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: String::from("$"),
            group_separator: ',',
            decimal_separator: '.',
        }
    }
}

/// Parses a currency amount such as `"$1,200.00"`, `"-$5"` or `"($12.50)"`.
///
/// Accepted: surrounding whitespace, one leading or trailing sign, or
/// parentheses for a negative amount, the currency symbol before or after
/// the number, group separators in the integral part, and a single decimal
/// separator.
#[must_use]
pub fn parse_currency(raw: Option<&str>, format: &CurrencyFormat) -> FieldParse<Decimal> {
    let Some(raw) = raw else {
        return FieldParse::Missing;
    };
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return FieldParse::Missing;
    }

    match parse_currency_text(trimmed, format) {
        Some(value) => FieldParse::Parsed(value),
        None => FieldParse::Malformed(raw.to_string()),
    }
}

fn parse_currency_text(text: &str, format: &CurrencyFormat) -> Option<Decimal> {
    let mut body: &str = text;
    let mut negative: bool = false;
    let mut in_parentheses: bool = false;

    if let Some(inner) = body.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        negative = true;
        in_parentheses = true;
        body = inner.trim();
    }

    let mut seen_symbol: bool = false;
    let mut seen_sign: bool = false;

    // Leading symbol and sign, in either order.
    loop {
        if !seen_symbol && !format.symbol.is_empty() {
            if let Some(rest) = body.strip_prefix(format.symbol.as_str()) {
                seen_symbol = true;
                body = rest.trim_start();
                continue;
            }
        }
        if !seen_sign {
            if let Some(rest) = body.strip_prefix('-') {
                seen_sign = true;
                negative = !negative;
                body = rest.trim_start();
                continue;
            }
            if let Some(rest) = body.strip_prefix('+') {
                seen_sign = true;
                body = rest.trim_start();
                continue;
            }
        }
        break;
    }

    // Trailing symbol and sign.
    loop {
        if !seen_symbol && !format.symbol.is_empty() {
            if let Some(rest) = body.strip_suffix(format.symbol.as_str()) {
                seen_symbol = true;
                body = rest.trim_end();
                continue;
            }
        }
        if !seen_sign {
            if let Some(rest) = body.strip_suffix('-') {
                seen_sign = true;
                negative = !negative;
                body = rest.trim_end();
                continue;
            }
            if let Some(rest) = body.strip_suffix('+') {
                seen_sign = true;
                body = rest.trim_end();
                continue;
            }
        }
        break;
    }

    // A sign inside parentheses is not a valid currency form.
    if in_parentheses && seen_sign {
        return None;
    }

    let cleaned: String = normalize_digits(body, format)?;
    let value: Decimal = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

/// Strips group separators and rewrites the decimal separator to `.`.
fn normalize_digits(body: &str, format: &CurrencyFormat) -> Option<String> {
    let mut cleaned: String = String::with_capacity(body.len());
    let mut in_fraction: bool = false;
    let mut digit_count: usize = 0;

    for ch in body.chars() {
        if ch.is_ascii_digit() {
            cleaned.push(ch);
            digit_count += 1;
        } else if ch == format.decimal_separator && !in_fraction {
            in_fraction = true;
            cleaned.push('.');
        } else if ch != format.group_separator || in_fraction || digit_count == 0 {
            // Group separators are only accepted between integral digits.
            return None;
        }
    }

    if digit_count == 0 {
        return None;
    }
    if cleaned.ends_with('.') {
        cleaned.pop();
    }
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    Some(cleaned)
}

/// Parses a plain integer such as `"45"` or `"-3"`.
///
/// Group separators are not accepted.
#[must_use]
pub fn parse_integer(raw: Option<&str>) -> FieldParse<i64> {
    let Some(raw) = raw else {
        return FieldParse::Missing;
    };
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return FieldParse::Missing;
    }
    trimmed
        .parse::<i64>()
        .map_or_else(|_| FieldParse::Malformed(raw.to_string()), FieldParse::Parsed)
}
