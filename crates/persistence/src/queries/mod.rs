// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries against the record store.

pub mod records;

pub use records::{count_records, find_record, load_entity, load_matching};
