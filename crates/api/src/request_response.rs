// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `(year, month, day)` with a zero-based month, the same
//! components the persisted records use. A `null` status means "none".

use absence_board::{EffectiveDayStatus, StatusCounts};
use absence_board_domain::{DayDate, Person, StatusValue, VacationBalance};

/// A day addressed by its wire components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayRef {
    /// The year.
    pub year: i32,
    /// The zero-based month (0-11).
    pub month: u8,
    /// The day of the month (1-31).
    pub day: u8,
}

impl From<DayDate> for DayRef {
    fn from(date: DayDate) -> Self {
        Self {
            year: date.year(),
            month: date.month_index(),
            day: date.day(),
        }
    }
}

/// API response after loading a year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadYearResponse {
    /// The loaded year.
    pub year: i32,
    /// Number of persons of the tenant.
    pub person_count: usize,
    /// Number of day entries of the year.
    pub entry_count: usize,
    /// Vacation days each person is entitled to.
    pub vacation_entitlement_days: u16,
    /// Whether public holidays were imported for the year.
    pub holidays_imported: bool,
}

/// API request to create a person.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    /// The person identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Position in list displays.
    #[serde(default)]
    pub order_index: i32,
    /// The login account linked to the person.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// API request to update a person.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    /// The display name.
    pub name: String,
    /// Position in list displays.
    #[serde(default)]
    pub order_index: i32,
    /// The login account linked to the person.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Person information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfo {
    /// The person identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Position in list displays.
    pub order_index: i32,
    /// The login account linked to the person.
    pub user_id: Option<String>,
}

impl From<&Person> for PersonInfo {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.value().to_string(),
            name: person.name.clone(),
            order_index: person.order_index,
            user_id: person.user_id.clone(),
        }
    }
}

/// API response for listing persons.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPersonsResponse {
    /// The persons in display order.
    pub persons: Vec<PersonInfo>,
}

/// API response after removing a person.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePersonResponse {
    /// The removed person.
    pub id: String,
    /// Number of day entries removed with the person.
    pub removed_entries: usize,
}

/// API request to click a person's day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickDayRequest {
    /// The person whose day is clicked.
    pub person_id: String,
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The day of the month.
    pub day: u8,
}

/// API request to set a person's day explicitly.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDayStatusRequest {
    /// The person whose day is set.
    pub person_id: String,
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The day of the month.
    pub day: u8,
    /// The new status; `null` deletes the person-specific entry.
    #[serde(default)]
    pub status: Option<StatusValue>,
}

/// A resolved day status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveStatusInfo {
    /// The effective status; `null` means none.
    pub status: Option<StatusValue>,
    /// Whether the status comes from the organization-wide entry.
    pub is_inherited: bool,
}

impl From<EffectiveDayStatus> for EffectiveStatusInfo {
    fn from(effective: EffectiveDayStatus) -> Self {
        Self {
            status: effective.status,
            is_inherited: effective.is_inherited,
        }
    }
}

/// API response after writing a person's day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWriteResponse {
    /// The person whose day was written.
    pub person_id: String,
    /// The day.
    #[serde(flatten)]
    pub date: DayRef,
    /// Whether anything was written; weekend clicks write nothing.
    pub changed: bool,
    /// The person-specific status before the write.
    pub previous: Option<StatusValue>,
    /// The person-specific status after the write.
    pub current: Option<StatusValue>,
    /// The resolved status after the write.
    pub effective: EffectiveStatusInfo,
}

/// API request to set or delete an organization-wide day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDayRequest {
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The day of the month.
    pub day: u8,
    /// The new status; `null` deletes the global entry.
    #[serde(default)]
    pub status: Option<StatusValue>,
}

/// API response after writing an organization-wide day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDayResponse {
    /// The day.
    #[serde(flatten)]
    pub date: DayRef,
    /// The global status before the write.
    pub previous: Option<StatusValue>,
    /// The global status after the write.
    pub current: Option<StatusValue>,
}

/// An imported public holiday.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HolidayInfo {
    /// The day.
    #[serde(flatten)]
    pub date: DayRef,
    /// The holiday name.
    pub name: String,
}

/// API response after importing public holidays.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportHolidaysResponse {
    /// The year.
    pub year: i32,
    /// The holidays written as global entries.
    pub holidays: Vec<HolidayInfo>,
}

/// API request to change the settings of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureYearRequest {
    /// Vacation days each person is entitled to.
    pub vacation_entitlement_days: u16,
}

/// The settings of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearConfigurationResponse {
    /// The year.
    pub year: i32,
    /// Vacation days each person is entitled to.
    pub vacation_entitlement_days: u16,
    /// Whether public holidays were imported.
    pub holidays_imported: bool,
}

/// A column of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayInfo {
    /// The day of the month.
    pub day: u8,
    /// The German weekday name.
    pub weekday: String,
    /// Whether the day is a Saturday or Sunday.
    pub is_weekend: bool,
}

/// A cell of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCellInfo {
    /// The day of the month.
    pub day: u8,
    /// The effective status.
    pub status: Option<StatusValue>,
    /// Whether the status comes from the organization-wide entry.
    pub is_inherited: bool,
    /// Whether clicking the cell changes it.
    pub is_cyclable: bool,
}

/// A person's row of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRowInfo {
    /// The person.
    pub person_id: String,
    /// The display name.
    pub name: String,
    /// One cell per day.
    pub cells: Vec<CalendarCellInfo>,
}

/// API response for the calendar of a month.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The German month name.
    pub month_name: String,
    /// The columns.
    pub days: Vec<CalendarDayInfo>,
    /// One row per person in display order.
    pub rows: Vec<CalendarRowInfo>,
}

/// Day counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsInfo {
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
    /// Sum of all statuses.
    pub total: u32,
}

impl From<StatusCounts> for StatusCountsInfo {
    fn from(counts: StatusCounts) -> Self {
        Self {
            vacation: counts.vacation,
            training_session: counts.training_session,
            continuing_education: counts.continuing_education,
            internal_team_day: counts.internal_team_day,
            holiday: counts.holiday,
            total: counts.total(),
        }
    }
}

/// A person's totals for a month.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonMonthInfo {
    /// The person.
    pub person_id: String,
    /// The display name.
    pub name: String,
    /// Weekday counts.
    pub counts: StatusCountsInfo,
}

/// API response for the summary of a month.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummaryResponse {
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The German month name.
    pub month_name: String,
    /// Totals per person in display order.
    pub persons: Vec<PersonMonthInfo>,
}

/// A person's totals for a year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonYearInfo {
    /// The person.
    pub person_id: String,
    /// The display name.
    pub name: String,
    /// Weekday counts.
    pub counts: StatusCountsInfo,
    /// Remaining vacation.
    pub balance: VacationBalance,
}

/// API response for the summary of a year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummaryResponse {
    /// The year.
    pub year: i32,
    /// Vacation days each person is entitled to.
    pub vacation_entitlement_days: u16,
    /// Totals per person in display order.
    pub persons: Vec<PersonYearInfo>,
}

/// A person absent on a day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAbsenceInfo {
    /// The person.
    pub person_id: String,
    /// The display name.
    pub name: String,
    /// The effective status.
    pub status: Option<StatusValue>,
    /// Whether the status comes from the organization-wide entry.
    pub is_inherited: bool,
}

/// API response for the overview of a day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    /// The day.
    #[serde(flatten)]
    pub date: DayRef,
    /// The German weekday name.
    pub weekday: String,
    /// Everyone with a status on the day, in display order.
    pub absences: Vec<DailyAbsenceInfo>,
}
