// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationwide German public holidays.
//!
//! These are imported once per year as global `holiday` entries. Regional
//! holidays are left to manual global edits.

use crate::error::DomainError;
use serde::Serialize;
use time::{Date, Duration, Month};

/// A public holiday on a fixed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: Date,
    /// The German name of the holiday.
    pub name: &'static str,
}

/// Computes Easter Sunday with the anonymous Gregorian algorithm.
///
/// # Errors
///
/// Returns an error if the resulting date cannot be represented.
pub fn easter_sunday(year: i32) -> Result<Date, DomainError> {
    let a: i32 = year.rem_euclid(19);
    let b: i32 = year.div_euclid(100);
    let c: i32 = year.rem_euclid(100);
    let d: i32 = b / 4;
    let e: i32 = b % 4;
    let f: i32 = (b + 8) / 25;
    let g: i32 = (b - f + 1) / 3;
    let h: i32 = (19 * a + b - d - g + 15) % 30;
    let i: i32 = c / 4;
    let k: i32 = c % 4;
    let l: i32 = (32 + 2 * e + 2 * i - h - k) % 7;
    let m: i32 = (a + 11 * h + 22 * l) / 451;
    let month_number: i32 = (h + l - 7 * m + 114) / 31;
    let day_number: i32 = (h + l - 7 * m + 114) % 31 + 1;

    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("computing Easter Sunday {year}"),
    };
    let month: Month = u8::try_from(month_number)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(overflow)?;
    let day: u8 = u8::try_from(day_number).map_err(|_| overflow())?;

    Date::from_calendar_date(year, month, day).map_err(|_| overflow())
}

/// Returns the nationwide public holidays of a year in date order.
///
/// # Errors
///
/// Returns an error if any holiday date cannot be represented.
pub fn public_holidays(year: i32) -> Result<Vec<PublicHoliday>, DomainError> {
    let fixed = |month: Month, day: u8, name: &'static str| {
        Date::from_calendar_date(year, month, day)
            .map(|date| PublicHoliday { date, name })
            .map_err(|_| DomainError::DateArithmeticOverflow {
                operation: format!("computing {name} {year}"),
            })
    };

    let easter: Date = easter_sunday(year)?;
    let relative = |offset: i64, name: &'static str| {
        easter
            .checked_add(Duration::days(offset))
            .map(|date| PublicHoliday { date, name })
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("computing {name} {year}"),
            })
    };

    let mut holidays: Vec<PublicHoliday> = vec![
        fixed(Month::January, 1, "Neujahr")?,
        relative(-2, "Karfreitag")?,
        relative(1, "Ostermontag")?,
        fixed(Month::May, 1, "Tag der Arbeit")?,
        relative(39, "Christi Himmelfahrt")?,
        relative(50, "Pfingstmontag")?,
        fixed(Month::October, 3, "Tag der Deutschen Einheit")?,
        fixed(Month::December, 25, "1. Weihnachtstag")?,
        fixed(Month::December, 26, "2. Weihnachtstag")?,
    ];
    holidays.sort_by_key(|holiday| holiday.date);

    Ok(holidays)
}
