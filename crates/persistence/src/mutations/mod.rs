// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Idempotent writes.
//!
//! Inserts use `ON CONFLICT ... DO UPDATE` on the natural key, so repeating
//! a write leaves the database unchanged.

pub mod day_entries;
pub mod persons;
pub mod year_configurations;
