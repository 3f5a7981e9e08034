// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar math.
//!
//! Pure functions over the proleptic Gregorian calendar: the days of a month,
//! weekend flags, and the German month and weekday names shown in the UI.
//! Month indices on the wire are zero-based (January = 0) and weekday indices
//! start at Sunday = 0.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month, Weekday};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

/// A single day of a month as rendered in the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The calendar date.
    pub date: Date,
    /// The day of the month (1-31).
    pub day_number: u8,
    /// The weekday of the date.
    pub weekday: Weekday,
    /// Whether the date falls on a Saturday or Sunday.
    pub is_weekend: bool,
}

impl CalendarDay {
    /// Builds the calendar view of a date.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        let weekday: Weekday = date.weekday();
        Self {
            date,
            day_number: date.day(),
            weekday,
            is_weekend: is_weekend(weekday),
        }
    }
}

/// Returns whether a weekday is a Saturday or Sunday.
#[must_use]
pub const fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Saturday | Weekday::Sunday)
}

/// Returns every day of a month in order.
///
/// # Errors
///
/// Returns an error if the year is outside the range supported by `time`.
pub fn days_in_month(month: Month, year: i32) -> Result<Vec<CalendarDay>, DomainError> {
    let first: Date = Date::from_calendar_date(year, month, 1).map_err(|_| {
        DomainError::InvalidDateComponents {
            year,
            month: month_index(month),
            day: 1,
        }
    })?;

    Ok(std::iter::successors(Some(first), |date| date.next_day())
        .take_while(|date| date.month() == month)
        .map(CalendarDay::from_date)
        .collect())
}

/// Counts the Monday-to-Friday days of a month.
///
/// # Errors
///
/// Returns an error if the year is outside the range supported by `time`.
pub fn working_days_in_month(month: Month, year: i32) -> Result<usize, DomainError> {
    Ok(days_in_month(month, year)?
        .iter()
        .filter(|day| !day.is_weekend)
        .count())
}

/// Converts a zero-based month index into a `Month`.
///
/// # Errors
///
/// Returns `DomainError::OutOfRange` if the index is greater than 11.
pub fn month_from_index(index: u8) -> Result<Month, DomainError> {
    MONTHS
        .get(usize::from(index))
        .copied()
        .ok_or(DomainError::OutOfRange {
            kind: "month",
            index,
            max: 11,
        })
}

/// Returns the zero-based index of a month.
#[must_use]
pub const fn month_index(month: Month) -> u8 {
    month as u8 - 1
}

/// Returns the German name of a month.
#[must_use]
pub const fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Januar",
        Month::February => "Februar",
        Month::March => "März",
        Month::April => "April",
        Month::May => "Mai",
        Month::June => "Juni",
        Month::July => "Juli",
        Month::August => "August",
        Month::September => "September",
        Month::October => "Oktober",
        Month::November => "November",
        Month::December => "Dezember",
    }
}

/// Returns the German name of the month at a zero-based index.
///
/// # Errors
///
/// Returns `DomainError::OutOfRange` if the index is greater than 11.
pub fn month_name_by_index(index: u8) -> Result<&'static str, DomainError> {
    month_from_index(index).map(month_name)
}

/// Converts a weekday index (0 = Sunday) into a `Weekday`.
///
/// # Errors
///
/// Returns `DomainError::OutOfRange` if the index is greater than 6.
pub fn weekday_from_index(index: u8) -> Result<Weekday, DomainError> {
    WEEKDAYS
        .get(usize::from(index))
        .copied()
        .ok_or(DomainError::OutOfRange {
            kind: "weekday",
            index,
            max: 6,
        })
}

/// Returns the German name of a weekday.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sonntag",
        Weekday::Monday => "Montag",
        Weekday::Tuesday => "Dienstag",
        Weekday::Wednesday => "Mittwoch",
        Weekday::Thursday => "Donnerstag",
        Weekday::Friday => "Freitag",
        Weekday::Saturday => "Samstag",
    }
}

/// Returns the German name of the weekday at an index (0 = Sunday).
///
/// # Errors
///
/// Returns `DomainError::OutOfRange` if the index is greater than 6.
pub fn weekday_name_by_index(index: u8) -> Result<&'static str, DomainError> {
    weekday_from_index(index).map(weekday_name)
}
