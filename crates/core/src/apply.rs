// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{AppState, DayChange, TransitionResult};
use crate::validate_loaded_year;
use absence_board_domain::{
    DayDate, EntryScope, Person, PersonId, PublicHoliday, StatusValue, YearConfiguration,
    public_holidays, validate_person_fields, validate_person_unique, validate_year_configuration,
};

/// Applies a command to the state in place.
///
/// The previous value of every touched entry is captured in the same step as
/// the mutation, so callers holding the state lock get a consistent
/// before/after pair. Nothing here talks to the remote store.
///
/// # Arguments
///
/// * `state` - The state to mutate
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - The date does not belong to the loaded year
/// - The referenced person does not exist
/// - A person or year configuration violates domain rules
///
/// On error the state is left unchanged.
pub fn apply(state: &mut AppState, command: Command) -> Result<TransitionResult, CoreError> {
    let command_name: &'static str = command.name();

    let changes: Vec<DayChange> = match command {
        Command::SetPersonDay {
            person_id,
            date,
            status,
        } => {
            validate_loaded_year(state, date)?;
            ensure_person_exists(state, &person_id)?;

            let previous: Option<StatusValue> =
                state.store.write_local(&person_id, date, status);
            vec![DayChange {
                scope: EntryScope::Person(person_id),
                date,
                previous,
                current: status,
            }]
        }
        Command::SetGlobalDay { date, status } => {
            validate_loaded_year(state, date)?;

            let previous: Option<StatusValue> = state.store.write_global_local(date, status);
            vec![DayChange {
                scope: EntryScope::Global,
                date,
                previous,
                current: status,
            }]
        }
        Command::AddPerson { person } => {
            validate_person_fields(&person)?;
            validate_person_unique(&state.persons, &person.id)?;
            state.persons.push(person);
            Vec::new()
        }
        Command::UpdatePerson { person } => {
            validate_person_fields(&person)?;
            let existing: &mut Person = state
                .persons
                .iter_mut()
                .find(|candidate| candidate.id == person.id)
                .ok_or_else(|| CoreError::PersonNotFound(person.id.value().to_string()))?;
            *existing = person;
            Vec::new()
        }
        Command::RemovePerson { person_id } => {
            ensure_person_exists(state, &person_id)?;

            let removed: Vec<DayChange> = state
                .store
                .person_entries_for(&person_id)
                .map(|(date, status)| DayChange {
                    scope: EntryScope::Person(person_id.clone()),
                    date,
                    previous: Some(status),
                    current: None,
                })
                .collect();
            state.store.remove_person(&person_id);
            state.persons.retain(|person| person.id != person_id);
            removed
        }
        Command::ConfigureYear {
            vacation_entitlement_days,
        } => {
            let config: YearConfiguration = YearConfiguration {
                vacation_entitlement_days,
                ..state.year_configuration
            };
            validate_year_configuration(&config)?;
            state.year_configuration = config;
            Vec::new()
        }
        Command::ImportHolidays => {
            let holidays: Vec<PublicHoliday> = public_holidays(state.year)?;
            let mut changes: Vec<DayChange> = Vec::with_capacity(holidays.len());
            for holiday in holidays {
                let date: DayDate = DayDate::from_date(holiday.date);
                let previous: Option<StatusValue> =
                    state.store.set_global_local(date, StatusValue::Holiday);
                changes.push(DayChange {
                    scope: EntryScope::Global,
                    date,
                    previous,
                    current: Some(StatusValue::Holiday),
                });
            }
            state.year_configuration.holidays_imported = true;
            changes
        }
    };

    Ok(TransitionResult {
        command_name,
        changes,
    })
}

fn ensure_person_exists(state: &AppState, person_id: &PersonId) -> Result<(), CoreError> {
    if !state.has_person(person_id) {
        return Err(CoreError::PersonNotFound(person_id.value().to_string()));
    }
    Ok(())
}
