// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations against the record store.
//!
//! Callers run each public mutation inside a transaction.

pub mod records;

pub use records::{claim_and_insert, insert_record, update_record};
