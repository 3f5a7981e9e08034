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

mod aggregation;
mod apply;
mod command;
mod error;
mod policy;
mod resolution;
mod state;

#[cfg(test)]
mod tests;

use absence_board_domain::{DayDate, DayEntry, Person, TenantId, YearConfiguration};

// Re-export public types and functions
pub use aggregation::{
    DailyAbsence, GridCell, GridRow, MonthGrid, PersonMonthSummary, PersonYearSummary,
    StatusCounts, daily_summary, month_counts, month_grid, month_summary, year_counts,
    year_summary,
};
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use policy::{ClickPlan, is_cyclable, plan_click};
pub use resolution::{EffectiveDayStatus, effective_status};
pub use state::{AppState, DayChange, DayStatusStore, TransitionResult};

/// Builds the state of a year from data fetched from the remote store.
///
/// Entries that do not belong to `year` are dropped; a query scoped by year
/// never returns them, so this only guards against inconsistent data.
///
/// # Arguments
///
/// * `tenant_id` - The tenant the data belongs to
/// * `year` - The year that was loaded
/// * `persons` - All persons of the tenant
/// * `year_configuration` - The stored configuration, if the year was ever configured
/// * `entries` - The day entries of the year
#[must_use]
pub fn load_state(
    tenant_id: TenantId,
    year: i32,
    persons: Vec<Person>,
    year_configuration: Option<YearConfiguration>,
    entries: Vec<DayEntry>,
) -> AppState {
    let mut state: AppState = AppState::new(tenant_id, year);
    state.persons = persons;
    if let Some(config) = year_configuration {
        state.year_configuration = config;
    }
    state.store.load(
        entries
            .into_iter()
            .filter(|entry: &DayEntry| entry.date.year() == year),
    );
    state
}

/// Validates that a date belongs to the loaded year.
///
/// # Errors
///
/// Returns `CoreError::YearNotLoaded` for dates of any other year.
pub const fn validate_loaded_year(state: &AppState, date: DayDate) -> Result<(), CoreError> {
    if date.year() != state.year {
        return Err(CoreError::YearNotLoaded {
            requested: date.year(),
            loaded: state.year,
        });
    }
    Ok(())
}
