// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every query is scoped by tenant and returns record shapes, never rows.

pub mod day_entries;
pub mod persons;
pub mod year_configurations;
