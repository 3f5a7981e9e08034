// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Person, PersonId, YearConfiguration};
use std::collections::HashSet;

/// Validates that a person's basic field constraints are met.
///
/// This function does NOT check for uniqueness (that requires context).
///
/// # Errors
///
/// Returns an error if the person's name is empty.
pub fn validate_person_fields(person: &Person) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if person.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that a person id is not already taken.
///
/// # Errors
///
/// Returns an error if another person already uses the id.
pub fn validate_person_unique(existing: &[Person], person_id: &PersonId) -> Result<(), DomainError> {
    let ids: HashSet<&PersonId> = existing.iter().map(|person| &person.id).collect();
    if ids.contains(person_id) {
        return Err(DomainError::DuplicatePerson(person_id.value().to_string()));
    }
    Ok(())
}

/// Validates that a year is a reasonable calendar year (1900-2200).
///
/// # Errors
///
/// Returns an error if the year is out of range.
pub fn validate_year(year: i32) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&year) {
        return Err(DomainError::InvalidYear(year));
    }
    Ok(())
}

/// Validates a year configuration.
///
/// # Errors
///
/// Returns an error if the year is out of range or the entitlement exceeds
/// the number of days in a year.
pub fn validate_year_configuration(config: &YearConfiguration) -> Result<(), DomainError> {
    validate_year(config.year)?;
    if config.vacation_entitlement_days > 366 {
        return Err(DomainError::InvalidEntitlement {
            days: config.vacation_entitlement_days,
        });
    }
    Ok(())
}
