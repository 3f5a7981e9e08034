// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remaining vacation calculation.
//!
//! This module provides read-only arithmetic over a year's entitlement and
//! the number of effective vacation days recorded for a person.

use crate::types::YearConfiguration;
use serde::{Deserialize, Serialize};

/// Result of the remaining vacation calculation for one person and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBalance {
    /// Days the person is entitled to.
    pub entitlement_days: u16,
    /// Effective vacation days recorded in the year.
    pub used_days: u16,
    /// `entitlement_days - used_days`; negative when overdrawn.
    pub remaining_days: i32,
    /// Whether all vacation has been used (`remaining_days == 0`).
    pub is_exhausted: bool,
    /// Whether more vacation was recorded than granted.
    pub is_overdrawn: bool,
}

/// Calculates the vacation balance for a person.
///
/// `used_days` counts effective vacation days on weekdays; weekend days are
/// never recorded through the click path.
#[must_use]
pub fn calculate_vacation_balance(config: &YearConfiguration, used_days: u16) -> VacationBalance {
    let remaining_days: i32 =
        i32::from(config.vacation_entitlement_days) - i32::from(used_days);

    VacationBalance {
        entitlement_days: config.vacation_entitlement_days,
        used_days,
        remaining_days,
        is_exhausted: remaining_days == 0,
        is_overdrawn: remaining_days < 0,
    }
}
