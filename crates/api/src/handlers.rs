// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler receives an already authenticated actor and scopes all
//! work to the actor's tenant. Person-specific day writes go through the
//! tenant's [`WriteCoordinator`]; the administrative paths persist first and
//! update the loaded state once the remote store accepted the write.

use absence_board::{
    AppState, Command, DayChange, DailyAbsence, EffectiveDayStatus, MonthGrid,
    PersonMonthSummary, PersonYearSummary, TransitionResult, daily_summary, effective_status,
    month_grid, month_summary, year_summary,
};
use absence_board_domain::{
    DayDate, Person, PersonId, PublicHoliday, StatusValue, YearConfiguration, month_from_index,
    month_name, public_holidays, validate_person_fields, validate_year,
    validate_year_configuration, weekday_name,
};
use absence_board_persistence::{
    DayEntryKey, DayEntryRecord, PersistenceError, PersonRecord, YearConfigurationRecord,
};
use time::Month;
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::coordinator::WriteCoordinator;
use crate::csv_export::export_year_csv;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::registry::BoardRegistry;
use crate::request_response::{
    CalendarCellInfo, CalendarDayInfo, CalendarResponse, CalendarRowInfo, ClickDayRequest,
    ConfigureYearRequest, CreatePersonRequest, DailyAbsenceInfo, DailyResponse, DayRef,
    DayWriteResponse, EffectiveStatusInfo, GlobalDayRequest, GlobalDayResponse, HolidayInfo,
    ImportHolidaysResponse, ListPersonsResponse, LoadYearResponse, MonthSummaryResponse,
    PersonInfo, PersonMonthInfo, PersonYearInfo, RemovePersonResponse, SetDayStatusRequest,
    UpdatePersonRequest, YearConfigurationResponse, YearSummaryResponse,
};

/// Loads a year for the actor's tenant and makes it the current board.
///
/// Outstanding writes of the previously loaded year are flushed first.
///
/// # Errors
///
/// Returns an error if the year is invalid or the store cannot be read.
pub async fn load_year(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
) -> Result<LoadYearResponse, ApiError> {
    let board: WriteCoordinator = registry.load_year(&actor.tenant_id, year).await?;

    Ok(board.with_state(|state: &AppState| LoadYearResponse {
        year: state.year,
        person_count: state.persons.len(),
        entry_count: state.store.len(),
        vacation_entitlement_days: state.year_configuration.vacation_entitlement_days,
        holidays_imported: state.year_configuration.holidays_imported,
    }))
}

/// Lists the persons of the actor's tenant in display order.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn list_persons(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
) -> Result<ListPersonsResponse, ApiError> {
    let persons: Vec<Person> = read_persons(registry, actor).await?;
    Ok(ListPersonsResponse {
        persons: persons.iter().map(PersonInfo::from).collect(),
    })
}

/// Creates a person.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the fields are invalid,
/// the id is taken, or the store rejects the write.
pub async fn create_person(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    request: CreatePersonRequest,
) -> Result<PersonInfo, ApiError> {
    AuthorizationService::authorize_manage_persons(actor)?;

    let person_id: PersonId = PersonId::new(&request.id).map_err(translate_domain_error)?;
    let person: Person = Person::new(
        person_id,
        request.name.trim().to_string(),
        request.order_index,
        normalize_user_id(request.user_id),
    );
    validate_person_fields(&person).map_err(translate_domain_error)?;

    let existing: Vec<Person> = read_persons(registry, actor).await?;
    if existing.iter().any(|other| other.id == person.id) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_person_id"),
            message: format!("Person '{}' already exists", person.id),
        });
    }

    registry
        .store()
        .upsert_person(&actor.tenant_id, &PersonRecord::from_person(&person))
        .await
        .map_err(translate_persistence_error)?;

    if let Ok(board) = registry.board(&actor.tenant_id).await {
        board.apply_confirmed(Command::AddPerson {
            person: person.clone(),
        })?;
    }

    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        person = %person.id,
        "Created person"
    );
    Ok(PersonInfo::from(&person))
}

/// Updates the name, order and linked account of a person.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the person does not exist,
/// the fields are invalid, or the store rejects the write.
pub async fn update_person(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    person_id: &str,
    request: UpdatePersonRequest,
) -> Result<PersonInfo, ApiError> {
    AuthorizationService::authorize_manage_persons(actor)?;

    let person_id: PersonId = PersonId::new(person_id).map_err(translate_domain_error)?;
    let existing: Vec<Person> = read_persons(registry, actor).await?;
    if !existing.iter().any(|other| other.id == person_id) {
        return Err(person_not_found(&person_id));
    }

    let person: Person = Person::new(
        person_id,
        request.name.trim().to_string(),
        request.order_index,
        normalize_user_id(request.user_id),
    );
    validate_person_fields(&person).map_err(translate_domain_error)?;

    registry
        .store()
        .upsert_person(&actor.tenant_id, &PersonRecord::from_person(&person))
        .await
        .map_err(translate_persistence_error)?;

    if let Ok(board) = registry.board(&actor.tenant_id).await {
        board.apply_confirmed(Command::UpdatePerson {
            person: person.clone(),
        })?;
    }

    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        person = %person.id,
        "Updated person"
    );
    Ok(PersonInfo::from(&person))
}

/// Removes a person together with all their day entries.
///
/// Outstanding writes of the person are dropped first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the person does not exist,
/// or the store rejects the deletion.
pub async fn remove_person(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    person_id: &str,
) -> Result<RemovePersonResponse, ApiError> {
    AuthorizationService::authorize_manage_persons(actor)?;

    let person_id: PersonId = PersonId::new(person_id).map_err(translate_domain_error)?;
    let board: Option<WriteCoordinator> = registry.board(&actor.tenant_id).await.ok();
    if let Some(board) = &board {
        board.discard_person(&person_id);
    }

    registry
        .store()
        .delete_person(&actor.tenant_id, person_id.value())
        .await
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => person_not_found(&person_id),
            other => translate_persistence_error(other),
        })?;

    let removed_entries: usize = match &board {
        Some(board) if board.with_state(|state: &AppState| state.has_person(&person_id)) => board
            .apply_confirmed(Command::RemovePerson {
                person_id: person_id.clone(),
            })?
            .changes
            .len(),
        _ => 0,
    };

    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        person = %person_id,
        removed_entries,
        "Removed person"
    );
    Ok(RemovePersonResponse {
        id: person_id.value().to_string(),
        removed_entries,
    })
}

/// Advances a person's day along the click cycle.
///
/// Weekend days are reported back unchanged.
///
/// # Errors
///
/// Returns an error if the year is not loaded, the date or person is invalid,
/// or the actor may not edit the person.
pub async fn click_day(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    request: ClickDayRequest,
) -> Result<DayWriteResponse, ApiError> {
    let board: WriteCoordinator = registry
        .board_for_year(&actor.tenant_id, request.year)
        .await?;
    let date: DayDate =
        DayDate::new(request.year, request.month, request.day).map_err(translate_domain_error)?;
    let person_id: PersonId = authorize_person_days(&board, actor, &request.person_id)?;

    let change: Option<DayChange> = board.click(&person_id, date)?;
    Ok(day_write_response(&board, &person_id, date, change))
}

/// Sets a person's day to an explicit status; `None` deletes the entry.
///
/// # Errors
///
/// Returns an error if the year is not loaded, the date or person is invalid,
/// or the actor may not edit the person.
pub async fn set_day_status(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    request: SetDayStatusRequest,
) -> Result<DayWriteResponse, ApiError> {
    let board: WriteCoordinator = registry
        .board_for_year(&actor.tenant_id, request.year)
        .await?;
    let date: DayDate =
        DayDate::new(request.year, request.month, request.day).map_err(translate_domain_error)?;
    let person_id: PersonId = authorize_person_days(&board, actor, &request.person_id)?;

    let change: DayChange = board.set_status(&person_id, date, request.status)?;
    Ok(day_write_response(&board, &person_id, date, Some(change)))
}

/// Sets or deletes an organization-wide day.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the year is not loaded,
/// the date is invalid, or the store rejects the write.
pub async fn set_global_day(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    request: GlobalDayRequest,
) -> Result<GlobalDayResponse, ApiError> {
    AuthorizationService::authorize_set_global_day(actor)?;

    let board: WriteCoordinator = registry
        .board_for_year(&actor.tenant_id, request.year)
        .await?;
    let date: DayDate =
        DayDate::new(request.year, request.month, request.day).map_err(translate_domain_error)?;
    let key: DayEntryKey = DayEntryKey::global(date);

    let written: Result<(), PersistenceError> = match request.status {
        Some(status) => {
            registry
                .store()
                .upsert(&actor.tenant_id, &DayEntryRecord::new(key, status))
                .await
        }
        None => registry.store().delete(&actor.tenant_id, &key).await,
    };
    written.map_err(translate_persistence_error)?;

    let result: TransitionResult = board.apply_confirmed(Command::SetGlobalDay {
        date,
        status: request.status,
    })?;
    let previous: Option<StatusValue> = result.changes.first().and_then(|change| change.previous);

    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        %date,
        previous = ?previous,
        current = ?request.status,
        "Global day set"
    );
    Ok(GlobalDayResponse {
        date: DayRef::from(date),
        previous,
        current: request.status,
    })
}

/// Deletes an organization-wide day.
///
/// # Errors
///
/// See [`set_global_day`].
pub async fn delete_global_day(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    day: DayRef,
) -> Result<GlobalDayResponse, ApiError> {
    set_global_day(
        registry,
        actor,
        GlobalDayRequest {
            year: day.year,
            month: day.month,
            day: day.day,
            status: None,
        },
    )
    .await
}

/// Imports the nationwide public holidays of the loaded year as global
/// `holiday` entries and marks the year as imported.
///
/// The entries are written in one atomic batch, then the year flag. If the
/// flag cannot be stored, the loaded state still takes the stored entries so
/// it keeps matching the remote store, and the error is returned.
///
/// Importing twice overwrites the same entries.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the year is not loaded,
/// or the store rejects a write.
pub async fn import_holidays(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
) -> Result<ImportHolidaysResponse, ApiError> {
    AuthorizationService::authorize_import_holidays(actor)?;

    let board: WriteCoordinator = registry.board_for_year(&actor.tenant_id, year).await?;
    let holidays: Vec<PublicHoliday> = public_holidays(year).map_err(translate_domain_error)?;
    let records: Vec<DayEntryRecord> = holidays
        .iter()
        .map(|holiday| {
            DayEntryRecord::new(
                DayEntryKey::global(DayDate::from_date(holiday.date)),
                StatusValue::Holiday,
            )
        })
        .collect();

    registry
        .store()
        .upsert_many(&actor.tenant_id, &records)
        .await
        .map_err(translate_persistence_error)?;

    let mut config: YearConfiguration =
        board.with_state(|state: &AppState| state.year_configuration);
    config.holidays_imported = true;
    if let Err(err) = registry
        .store()
        .upsert_year_configuration(&actor.tenant_id, &YearConfigurationRecord::from(config))
        .await
    {
        for holiday in &holidays {
            board.apply_confirmed(Command::SetGlobalDay {
                date: DayDate::from_date(holiday.date),
                status: Some(StatusValue::Holiday),
            })?;
        }
        warn!(
            tenant = %actor.tenant_id.value(),
            year,
            error = %err,
            "Holidays stored but the import flag was not"
        );
        return Err(translate_persistence_error(err));
    }

    board.apply_confirmed(Command::ImportHolidays)?;

    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        year,
        count = holidays.len(),
        "Imported public holidays"
    );
    Ok(ImportHolidaysResponse {
        year,
        holidays: holidays
            .iter()
            .map(|holiday| HolidayInfo {
                date: DayRef::from(DayDate::from_date(holiday.date)),
                name: holiday.name.to_string(),
            })
            .collect(),
    })
}

/// Changes the vacation entitlement of a year.
///
/// The year does not have to be loaded; if it is, the loaded state follows.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the values are invalid,
/// or the store rejects the write.
pub async fn configure_year(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
    request: ConfigureYearRequest,
) -> Result<YearConfigurationResponse, ApiError> {
    AuthorizationService::authorize_configure_year(actor)?;
    validate_year(year).map_err(translate_domain_error)?;

    let board: Option<WriteCoordinator> =
        registry.board_for_year(&actor.tenant_id, year).await.ok();
    let stored: Option<YearConfiguration> = match &board {
        Some(board) => Some(board.with_state(|state: &AppState| state.year_configuration)),
        None => registry
            .store()
            .get_year_configuration(&actor.tenant_id, year)
            .await
            .map_err(translate_persistence_error)?
            .map(YearConfiguration::from),
    };

    let mut config: YearConfiguration = stored.unwrap_or_else(|| YearConfiguration::new(year));
    config.vacation_entitlement_days = request.vacation_entitlement_days;
    validate_year_configuration(&config).map_err(translate_domain_error)?;

    registry
        .store()
        .upsert_year_configuration(&actor.tenant_id, &YearConfigurationRecord::from(config))
        .await
        .map_err(translate_persistence_error)?;

    if let Some(board) = &board {
        board.apply_confirmed(Command::ConfigureYear {
            vacation_entitlement_days: request.vacation_entitlement_days,
        })?;
    }

    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        year,
        vacation_entitlement_days = config.vacation_entitlement_days,
        "Configured year"
    );
    Ok(YearConfigurationResponse {
        year,
        vacation_entitlement_days: config.vacation_entitlement_days,
        holidays_imported: config.holidays_imported,
    })
}

/// Returns the calendar grid of a month of the loaded year.
///
/// # Errors
///
/// Returns an error if the year is not loaded or the month is out of range.
pub async fn get_calendar(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
    month: u8,
) -> Result<CalendarResponse, ApiError> {
    let board: WriteCoordinator = registry.board_for_year(&actor.tenant_id, year).await?;
    let calendar_month: Month = month_from_index(month).map_err(translate_domain_error)?;
    let grid: MonthGrid = board
        .with_state(|state: &AppState| month_grid(state, calendar_month))
        .map_err(translate_core_error)?;

    Ok(CalendarResponse {
        year: grid.year,
        month,
        month_name: grid.month_name.to_string(),
        days: grid
            .days
            .iter()
            .map(|day| CalendarDayInfo {
                day: day.day_number,
                weekday: weekday_name(day.weekday).to_string(),
                is_weekend: day.is_weekend,
            })
            .collect(),
        rows: grid
            .rows
            .into_iter()
            .map(|row| CalendarRowInfo {
                person_id: row.person_id.value().to_string(),
                name: row.name,
                cells: row
                    .cells
                    .iter()
                    .map(|cell| CalendarCellInfo {
                        day: cell.day.day_number,
                        status: cell.effective.status,
                        is_inherited: cell.effective.is_inherited,
                        is_cyclable: cell.is_cyclable,
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Returns the per-person weekday counts of a month of the loaded year.
///
/// # Errors
///
/// Returns an error if the year is not loaded or the month is out of range.
pub async fn get_month_summary(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
    month: u8,
) -> Result<MonthSummaryResponse, ApiError> {
    let board: WriteCoordinator = registry.board_for_year(&actor.tenant_id, year).await?;
    let calendar_month: Month = month_from_index(month).map_err(translate_domain_error)?;
    let summaries: Vec<PersonMonthSummary> = board
        .with_state(|state: &AppState| month_summary(state, calendar_month))
        .map_err(translate_core_error)?;

    Ok(MonthSummaryResponse {
        year,
        month,
        month_name: month_name(calendar_month).to_string(),
        persons: summaries
            .into_iter()
            .map(|summary| PersonMonthInfo {
                person_id: summary.person_id.value().to_string(),
                name: summary.name,
                counts: summary.counts.into(),
            })
            .collect(),
    })
}

/// Returns the per-person yearly counts and remaining vacation.
///
/// # Errors
///
/// Returns an error if the year is not loaded.
pub async fn get_year_summary(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
) -> Result<YearSummaryResponse, ApiError> {
    let board: WriteCoordinator = registry.board_for_year(&actor.tenant_id, year).await?;
    let (entitlement, summaries): (u16, Vec<PersonYearSummary>) = board
        .with_state(|state: &AppState| {
            year_summary(state).map(|summaries| {
                (
                    state.year_configuration.vacation_entitlement_days,
                    summaries,
                )
            })
        })
        .map_err(translate_core_error)?;

    Ok(YearSummaryResponse {
        year,
        vacation_entitlement_days: entitlement,
        persons: summaries
            .into_iter()
            .map(|summary| PersonYearInfo {
                person_id: summary.person_id.value().to_string(),
                name: summary.name,
                counts: summary.counts.into(),
                balance: summary.balance,
            })
            .collect(),
    })
}

/// Lists everyone with a status on a day of the loaded year.
///
/// # Errors
///
/// Returns an error if the year is not loaded or the date is invalid.
pub async fn get_daily(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    day: DayRef,
) -> Result<DailyResponse, ApiError> {
    let board: WriteCoordinator = registry.board_for_year(&actor.tenant_id, day.year).await?;
    let date: DayDate = DayDate::new(day.year, day.month, day.day).map_err(translate_domain_error)?;
    let absences: Vec<DailyAbsence> = board
        .with_state(|state: &AppState| daily_summary(state, date))
        .map_err(translate_core_error)?;

    Ok(DailyResponse {
        date: DayRef::from(date),
        weekday: weekday_name(date.date().weekday()).to_string(),
        absences: absences
            .into_iter()
            .map(|absence| DailyAbsenceInfo {
                person_id: absence.person_id.value().to_string(),
                name: absence.name,
                status: absence.effective.status,
                is_inherited: absence.effective.is_inherited,
            })
            .collect(),
    })
}

/// Renders the CSV export of the loaded year.
///
/// # Errors
///
/// Returns an error if the year is not loaded or the export cannot be built.
pub async fn export_year(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
    year: i32,
) -> Result<String, ApiError> {
    let board: WriteCoordinator = registry.board_for_year(&actor.tenant_id, year).await?;
    let csv: String = board.with_state(export_year_csv)?;
    info!(
        tenant = %actor.tenant_id.value(),
        actor = %actor.user_id,
        year,
        bytes = csv.len(),
        "Exported year"
    );
    Ok(csv)
}

/// Reads the persons of the actor's tenant, preferring the loaded board.
async fn read_persons(
    registry: &BoardRegistry,
    actor: &AuthenticatedActor,
) -> Result<Vec<Person>, ApiError> {
    if let Ok(board) = registry.board(&actor.tenant_id).await {
        return Ok(board.with_state(|state: &AppState| {
            state.persons_in_order().into_iter().cloned().collect()
        }));
    }

    registry
        .store()
        .list_persons(&actor.tenant_id)
        .await
        .map_err(translate_persistence_error)?
        .iter()
        .map(|record| record.to_person().map_err(translate_persistence_error))
        .collect()
}

/// Resolves a person of the board and checks the actor may edit their days.
fn authorize_person_days(
    board: &WriteCoordinator,
    actor: &AuthenticatedActor,
    person_id: &str,
) -> Result<PersonId, ApiError> {
    let person_id: PersonId = PersonId::new(person_id).map_err(translate_domain_error)?;
    let person: Person = board
        .with_state(|state: &AppState| state.person(&person_id).cloned())
        .ok_or_else(|| person_not_found(&person_id))?;
    AuthorizationService::authorize_edit_person_days(actor, &person)?;
    Ok(person_id)
}

fn day_write_response(
    board: &WriteCoordinator,
    person_id: &PersonId,
    date: DayDate,
    change: Option<DayChange>,
) -> DayWriteResponse {
    let (effective, stored): (EffectiveDayStatus, Option<StatusValue>) =
        board.with_state(|state: &AppState| {
            (
                effective_status(&state.store, person_id, date),
                state.store.get(person_id, date),
            )
        });

    DayWriteResponse {
        person_id: person_id.value().to_string(),
        date: DayRef::from(date),
        changed: change.as_ref().is_some_and(|change| !change.is_noop()),
        previous: change.as_ref().map_or(stored, |change| change.previous),
        current: change.as_ref().map_or(stored, |change| change.current),
        effective: EffectiveStatusInfo::from(effective),
    }
}

fn person_not_found(person_id: &PersonId) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Person"),
        message: format!("Person '{person_id}' does not exist"),
    }
}

fn normalize_user_id(user_id: Option<String>) -> Option<String> {
    user_id
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
