// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary of the Absence Board.
//!
//! This crate authenticates and authorizes actors, coordinates optimistic
//! person-day writes with the remote store, publishes failure notifications,
//! and maps core results onto request/response DTOs.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod coordinator;
mod csv_export;
mod error;
mod handlers;
mod notifications;
mod registry;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate};
pub use coordinator::{CoordinatorConfig, DEFAULT_DEBOUNCE, KeyPhase, WriteCoordinator};
pub use csv_export::{CSV_DELIMITER, CsvExportError, TOTAL_ROW_LABEL, export_year_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    click_day, configure_year, create_person, delete_global_day, export_year, get_calendar,
    get_daily, get_month_summary, get_year_summary, import_holidays, list_persons, load_year,
    remove_person, set_day_status, set_global_day, update_person,
};
pub use notifications::{Notification, NotificationHub};
pub use registry::BoardRegistry;
pub use request_response::{
    CalendarCellInfo, CalendarDayInfo, CalendarResponse, CalendarRowInfo, ClickDayRequest,
    ConfigureYearRequest, CreatePersonRequest, DailyAbsenceInfo, DailyResponse, DayRef,
    DayWriteResponse, EffectiveStatusInfo, GlobalDayRequest, GlobalDayResponse, HolidayInfo,
    ImportHolidaysResponse, ListPersonsResponse, LoadYearResponse, MonthSummaryResponse,
    PersonInfo, PersonMonthInfo, PersonYearInfo, RemovePersonResponse, SetDayStatusRequest,
    StatusCountsInfo, UpdatePersonRequest, YearConfigurationResponse, YearSummaryResponse,
};
