// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only views over the loaded state.
//!
//! All views resolve days through [`effective_status`], so global entries are
//! counted for every person without a specific entry. Counts only include
//! weekdays; weekend cells are shown but never counted.

use crate::error::CoreError;
use crate::policy::is_cyclable;
use crate::resolution::{EffectiveDayStatus, effective_status};
use crate::state::AppState;
use crate::validate_loaded_year;
use absence_board_domain::{
    CalendarDay, DayDate, Person, PersonId, StatusValue, VacationBalance,
    calculate_vacation_balance, days_in_month, month_name,
};
use time::Month;

/// Number of days per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Vacation days.
    pub vacation: u16,
    /// Training session days.
    pub training_session: u16,
    /// Continuing education days.
    pub continuing_education: u16,
    /// Internal team days.
    pub internal_team_day: u16,
    /// Holidays.
    pub holiday: u16,
}

impl StatusCounts {
    /// Counts one more day with the given status.
    pub const fn record(&mut self, status: StatusValue) {
        let slot: &mut u16 = match status {
            StatusValue::Vacation => &mut self.vacation,
            StatusValue::TrainingSession => &mut self.training_session,
            StatusValue::ContinuingEducation => &mut self.continuing_education,
            StatusValue::InternalTeamDay => &mut self.internal_team_day,
            StatusValue::Holiday => &mut self.holiday,
        };
        *slot = slot.saturating_add(1);
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn get(&self, status: StatusValue) -> u16 {
        match status {
            StatusValue::Vacation => self.vacation,
            StatusValue::TrainingSession => self.training_session,
            StatusValue::ContinuingEducation => self.continuing_education,
            StatusValue::InternalTeamDay => self.internal_team_day,
            StatusValue::Holiday => self.holiday,
        }
    }

    /// Returns the number of days with any status.
    #[must_use]
    pub fn total(&self) -> u32 {
        StatusValue::ALL
            .iter()
            .map(|status| u32::from(self.get(*status)))
            .sum()
    }

    /// Adds another set of counts to this one.
    pub fn merge(&mut self, other: &Self) {
        for status in StatusValue::ALL {
            let slot: u16 = self.get(status).saturating_add(other.get(status));
            match status {
                StatusValue::Vacation => self.vacation = slot,
                StatusValue::TrainingSession => self.training_session = slot,
                StatusValue::ContinuingEducation => self.continuing_education = slot,
                StatusValue::InternalTeamDay => self.internal_team_day = slot,
                StatusValue::Holiday => self.holiday = slot,
            }
        }
    }
}

/// Counts the effective statuses of a person over the weekdays of a month.
///
/// # Errors
///
/// Returns an error if the person is unknown or the month cannot be built.
pub fn month_counts(
    state: &AppState,
    person_id: &PersonId,
    month: Month,
) -> Result<StatusCounts, CoreError> {
    if !state.has_person(person_id) {
        return Err(CoreError::PersonNotFound(person_id.value().to_string()));
    }

    let mut counts: StatusCounts = StatusCounts::default();
    for day in days_in_month(month, state.year)? {
        if day.is_weekend {
            continue;
        }
        if let Some(status) =
            effective_status(&state.store, person_id, DayDate::from_date(day.date)).status
        {
            counts.record(status);
        }
    }
    Ok(counts)
}

/// Counts the effective statuses of a person over the weekdays of the loaded year.
///
/// # Errors
///
/// Returns an error if the person is unknown.
pub fn year_counts(state: &AppState, person_id: &PersonId) -> Result<StatusCounts, CoreError> {
    let mut counts: StatusCounts = StatusCounts::default();
    let mut month: Month = Month::January;
    loop {
        counts.merge(&month_counts(state, person_id, month)?);
        if month == Month::December {
            break;
        }
        month = month.next();
    }
    Ok(counts)
}

/// Monthly totals of one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonMonthSummary {
    /// The person.
    pub person_id: PersonId,
    /// The display name.
    pub name: String,
    /// Weekday counts per status.
    pub counts: StatusCounts,
}

/// Yearly totals and remaining vacation of one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonYearSummary {
    /// The person.
    pub person_id: PersonId,
    /// The display name.
    pub name: String,
    /// Weekday counts per status.
    pub counts: StatusCounts,
    /// Remaining vacation derived from the year configuration.
    pub balance: VacationBalance,
}

/// Builds the monthly totals of every person, in display order.
///
/// # Errors
///
/// Returns an error if the month cannot be built.
pub fn month_summary(state: &AppState, month: Month) -> Result<Vec<PersonMonthSummary>, CoreError> {
    state
        .persons_in_order()
        .into_iter()
        .map(|person| {
            Ok(PersonMonthSummary {
                person_id: person.id.clone(),
                name: person.name.clone(),
                counts: month_counts(state, &person.id, month)?,
            })
        })
        .collect()
}

/// Builds the yearly totals of every person, in display order.
///
/// # Errors
///
/// Returns an error if a month of the loaded year cannot be built.
pub fn year_summary(state: &AppState) -> Result<Vec<PersonYearSummary>, CoreError> {
    state
        .persons_in_order()
        .into_iter()
        .map(|person| {
            let counts: StatusCounts = year_counts(state, &person.id)?;
            Ok(PersonYearSummary {
                person_id: person.id.clone(),
                name: person.name.clone(),
                counts,
                balance: calculate_vacation_balance(&state.year_configuration, counts.vacation),
            })
        })
        .collect()
}

/// A person with a status on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAbsence {
    /// The person.
    pub person_id: PersonId,
    /// The display name.
    pub name: String,
    /// The effective status; always set.
    pub effective: EffectiveDayStatus,
}

/// Lists every person with an effective status on a day, in display order.
///
/// # Errors
///
/// Returns an error if the date is outside the loaded year.
pub fn daily_summary(state: &AppState, date: DayDate) -> Result<Vec<DailyAbsence>, CoreError> {
    validate_loaded_year(state, date)?;

    Ok(state
        .persons_in_order()
        .into_iter()
        .filter_map(|person: &Person| {
            let effective: EffectiveDayStatus = effective_status(&state.store, &person.id, date);
            effective.is_set().then(|| DailyAbsence {
                person_id: person.id.clone(),
                name: person.name.clone(),
                effective,
            })
        })
        .collect())
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// The day.
    pub day: CalendarDay,
    /// The resolved status.
    pub effective: EffectiveDayStatus,
    /// Whether a click on this cell changes anything.
    pub is_cyclable: bool,
}

/// One person's row in the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// The person.
    pub person_id: PersonId,
    /// The display name.
    pub name: String,
    /// One cell per day of the month.
    pub cells: Vec<GridCell>,
}

/// The calendar view of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// The year.
    pub year: i32,
    /// The month.
    pub month: Month,
    /// The German month name.
    pub month_name: &'static str,
    /// The days of the month.
    pub days: Vec<CalendarDay>,
    /// One row per person, in display order.
    pub rows: Vec<GridRow>,
}

/// Builds the calendar grid of a month of the loaded year.
///
/// # Errors
///
/// Returns an error if the month cannot be built.
pub fn month_grid(state: &AppState, month: Month) -> Result<MonthGrid, CoreError> {
    let days: Vec<CalendarDay> = days_in_month(month, state.year)?;

    let rows: Vec<GridRow> = state
        .persons_in_order()
        .into_iter()
        .map(|person| GridRow {
            person_id: person.id.clone(),
            name: person.name.clone(),
            cells: days
                .iter()
                .map(|day| {
                    let date: DayDate = DayDate::from_date(day.date);
                    GridCell {
                        day: *day,
                        effective: effective_status(&state.store, &person.id, date),
                        is_cyclable: is_cyclable(date),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(MonthGrid {
        year: state.year,
        month,
        month_name: month_name(month),
        days,
        rows,
    })
}
