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

mod calendar;
mod error;
mod holidays;
mod status;
mod types;
mod vacation_balance;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    CalendarDay, days_in_month, is_weekend, month_from_index, month_index, month_name,
    month_name_by_index, weekday_from_index, weekday_name, weekday_name_by_index,
    working_days_in_month,
};
pub use holidays::{PublicHoliday, easter_sunday, public_holidays};
pub use status::{StatusValue, next_status};
pub use vacation_balance::{VacationBalance, calculate_vacation_balance};

// Re-export public types
pub use error::DomainError;
pub use types::{
    DayDate, DayEntry, EntryScope, GLOBAL_PERSON_SENTINEL, GlobalDayKey, Person, PersonDayKey,
    PersonId, TenantId, YearConfiguration,
};
pub use validation::{
    validate_person_fields, validate_person_unique, validate_year, validate_year_configuration,
};
