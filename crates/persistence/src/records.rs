// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shapes exchanged with a remote store.
//!
//! A day entry is persisted as `{ personId | "__global__", year, month 0-11,
//! day 1-31, status }`. A missing record means the day has no status.

use absence_board_domain::{
    DayDate, DayEntry, EntryScope, GLOBAL_PERSON_SENTINEL, Person, PersonId, StatusValue,
    YearConfiguration,
};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Identity of a persisted day entry within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntryKey {
    /// The person id, or the global sentinel.
    pub person_id: String,
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The day of the month.
    pub day: u8,
}

impl DayEntryKey {
    /// Key of a person-specific entry.
    #[must_use]
    pub fn for_person(person_id: &PersonId, date: DayDate) -> Self {
        Self {
            person_id: person_id.value().to_string(),
            year: date.year(),
            month: date.month_index(),
            day: date.day(),
        }
    }

    /// Key of a global entry.
    #[must_use]
    pub fn global(date: DayDate) -> Self {
        Self {
            person_id: GLOBAL_PERSON_SENTINEL.to_string(),
            year: date.year(),
            month: date.month_index(),
            day: date.day(),
        }
    }

    /// Key for an entry scope.
    #[must_use]
    pub fn for_scope(scope: &EntryScope, date: DayDate) -> Self {
        match scope {
            EntryScope::Person(person_id) => Self::for_person(person_id, date),
            EntryScope::Global => Self::global(date),
        }
    }

    /// Returns whether this key addresses a global entry.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.person_id == GLOBAL_PERSON_SENTINEL
    }
}

/// A persisted day entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntryRecord {
    /// The person id, or the global sentinel.
    pub person_id: String,
    /// The year.
    pub year: i32,
    /// The zero-based month.
    pub month: u8,
    /// The day of the month.
    pub day: u8,
    /// The recorded status.
    pub status: StatusValue,
}

impl DayEntryRecord {
    /// Builds a record from a key and a status.
    #[must_use]
    pub fn new(key: DayEntryKey, status: StatusValue) -> Self {
        Self {
            person_id: key.person_id,
            year: key.year,
            month: key.month,
            day: key.day,
            status,
        }
    }

    /// Builds the record of a domain entry.
    #[must_use]
    pub fn from_entry(entry: &DayEntry) -> Self {
        Self::new(DayEntryKey::for_scope(&entry.scope, entry.date), entry.status)
    }

    /// Returns the identity of this record.
    #[must_use]
    pub fn key(&self) -> DayEntryKey {
        DayEntryKey {
            person_id: self.person_id.clone(),
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// Converts the record into a domain entry.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if the date components or the
    /// person id are not valid.
    pub fn to_entry(&self) -> Result<DayEntry, PersistenceError> {
        let date: DayDate = DayDate::new(self.year, self.month, self.day)
            .map_err(|e| PersistenceError::InvalidRecord(e.to_string()))?;

        if self.person_id == GLOBAL_PERSON_SENTINEL {
            return Ok(DayEntry::global(date, self.status));
        }

        let person_id: PersonId = PersonId::new(&self.person_id)
            .map_err(|e| PersistenceError::InvalidRecord(e.to_string()))?;
        Ok(DayEntry::person(person_id, date, self.status))
    }
}

/// A persisted person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// The person id.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Position in list displays.
    pub order_index: i32,
    /// The linked login account.
    pub user_id: Option<String>,
}

impl PersonRecord {
    /// Builds the record of a domain person.
    #[must_use]
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.value().to_string(),
            name: person.name.clone(),
            order_index: person.order_index,
            user_id: person.user_id.clone(),
        }
    }

    /// Converts the record into a domain person.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if the id is not valid.
    pub fn to_person(&self) -> Result<Person, PersistenceError> {
        let id: PersonId =
            PersonId::new(&self.id).map_err(|e| PersistenceError::InvalidRecord(e.to_string()))?;
        Ok(Person::new(
            id,
            self.name.clone(),
            self.order_index,
            self.user_id.clone(),
        ))
    }
}

/// Persisted settings of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearConfigurationRecord {
    /// The year.
    pub year: i32,
    /// Vacation days each person is entitled to.
    pub vacation_entitlement_days: u16,
    /// Whether public holidays were imported.
    pub holidays_imported: bool,
}

impl From<YearConfiguration> for YearConfigurationRecord {
    fn from(config: YearConfiguration) -> Self {
        Self {
            year: config.year,
            vacation_entitlement_days: config.vacation_entitlement_days,
            holidays_imported: config.holidays_imported,
        }
    }
}

impl From<YearConfigurationRecord> for YearConfiguration {
    fn from(record: YearConfigurationRecord) -> Self {
        Self {
            year: record.year,
            vacation_entitlement_days: record.vacation_entitlement_days,
            holidays_imported: record.holidays_imported,
        }
    }
}
