// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resolution of the status a person effectively has on a day.
//!
//! A person-specific entry always wins over the global entry for the same
//! day. Every read path goes through [`effective_status`].

use crate::state::DayStatusStore;
use absence_board_domain::{DayDate, PersonId, StatusValue};

/// The status shown for a person on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectiveDayStatus {
    /// The resolved status; `None` when neither scope has an entry.
    pub status: Option<StatusValue>,
    /// Whether the status came from the global entry.
    pub is_inherited: bool,
}

impl EffectiveDayStatus {
    /// The empty status.
    pub const NONE: Self = Self {
        status: None,
        is_inherited: false,
    };

    /// A status taken from a person-specific entry.
    #[must_use]
    pub const fn specific(status: StatusValue) -> Self {
        Self {
            status: Some(status),
            is_inherited: false,
        }
    }

    /// A status taken from the global entry.
    #[must_use]
    pub const fn inherited(status: StatusValue) -> Self {
        Self {
            status: Some(status),
            is_inherited: true,
        }
    }

    /// Returns whether the day has any status.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.status.is_some()
    }
}

/// Resolves the effective status of a person on a day.
///
/// 1. A person-specific entry is returned as not inherited.
/// 2. Otherwise a global entry is returned as inherited.
/// 3. Otherwise the day has no status.
#[must_use]
pub fn effective_status(
    store: &DayStatusStore,
    person_id: &PersonId,
    date: DayDate,
) -> EffectiveDayStatus {
    if let Some(status) = store.get(person_id, date) {
        return EffectiveDayStatus::specific(status);
    }

    store
        .get_global(date)
        .map_or(EffectiveDayStatus::NONE, EffectiveDayStatus::inherited)
}
