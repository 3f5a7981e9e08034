// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::resolution::{EffectiveDayStatus, effective_status};
use crate::state::DayStatusStore;
use absence_board_domain::{DayDate, PersonId, StatusValue, is_weekend, next_status};

/// The person-specific write a click results in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickPlan {
    /// The person whose day was clicked.
    pub person_id: PersonId,
    /// The clicked day.
    pub date: DayDate,
    /// The effective status before the click.
    pub current: EffectiveDayStatus,
    /// The person-specific status to write; `None` deletes the person entry.
    pub next: Option<StatusValue>,
}

/// Returns whether a click on the given day can change anything.
#[must_use]
pub fn is_cyclable(date: DayDate) -> bool {
    !is_weekend(date.date().weekday())
}

/// Plans the write triggered by clicking a person's day.
///
/// Weekend days are not cyclable and yield `None`. Clicks only ever target
/// the person scope; an inherited global entry stays untouched.
#[must_use]
pub fn plan_click(store: &DayStatusStore, person_id: &PersonId, date: DayDate) -> Option<ClickPlan> {
    if !is_cyclable(date) {
        return None;
    }

    let current: EffectiveDayStatus = effective_status(store, person_id, date);
    let next: Option<StatusValue> = next_status(current.status, current.is_inherited);

    Some(ClickPlan {
        person_id: person_id.clone(),
        date,
        current,
        next,
    })
}
