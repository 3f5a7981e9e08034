// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{month_from_index, month_index};
use crate::error::DomainError;
use crate::status::StatusValue;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Identifies the organization all persons and day entries belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTenantId(String::from(
                "Tenant id cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Identifies a person within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    /// Creates a person identifier.
    ///
    /// The reserved global sentinel cannot be used as a person id.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or equals the sentinel.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPersonId(String::from(
                "Person id cannot be empty",
            )));
        }
        if trimmed == GLOBAL_PERSON_SENTINEL {
            return Err(DomainError::InvalidPersonId(format!(
                "'{GLOBAL_PERSON_SENTINEL}' is reserved"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Person id stored on persisted records that apply to every person.
pub const GLOBAL_PERSON_SENTINEL: &str = "__global__";

/// A validated calendar date addressed by the wire components
/// `(year, month 0-11, day 1-31)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayDate(Date);

impl DayDate {
    /// Validates wire date components.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateComponents` if the combination is not
    /// a real calendar date, including a month index above 11.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidDateComponents { year, month, day };
        let calendar_month: Month = month_from_index(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, calendar_month, day)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Wraps an existing date.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Returns the underlying date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.0
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the calendar month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.0.month()
    }

    /// Returns the zero-based month index.
    #[must_use]
    pub const fn month_index(&self) -> u8 {
        month_index(self.0.month())
    }

    /// Returns the day of the month.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.0.day()
    }
}

impl std::fmt::Display for DayDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a person-specific day entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonDayKey {
    /// The person the entry belongs to.
    pub person_id: PersonId,
    /// The day of the entry.
    pub date: DayDate,
}

impl PersonDayKey {
    /// Creates a new key.
    #[must_use]
    pub const fn new(person_id: PersonId, date: DayDate) -> Self {
        Self { person_id, date }
    }
}

impl std::fmt::Display for PersonDayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.person_id, self.date)
    }
}

/// Key of an organization-wide day entry.
pub type GlobalDayKey = DayDate;

/// Whether a day entry applies to one person or to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntryScope {
    /// Applies to a single person and overrides the global entry.
    Person(PersonId),
    /// Applies to every person without a specific entry.
    Global,
}

impl EntryScope {
    /// Returns the person id, or `None` for the global scope.
    #[must_use]
    pub const fn person_id(&self) -> Option<&PersonId> {
        match self {
            Self::Person(id) => Some(id),
            Self::Global => None,
        }
    }
}

/// A stored day status. Absence of an entry means "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// The scope of the entry.
    pub scope: EntryScope,
    /// The day of the entry.
    pub date: DayDate,
    /// The recorded status.
    pub status: StatusValue,
}

impl DayEntry {
    /// Creates a person-specific entry.
    #[must_use]
    pub const fn person(person_id: PersonId, date: DayDate, status: StatusValue) -> Self {
        Self {
            scope: EntryScope::Person(person_id),
            date,
            status,
        }
    }

    /// Creates an organization-wide entry.
    #[must_use]
    pub const fn global(date: DayDate, status: StatusValue) -> Self {
        Self {
            scope: EntryScope::Global,
            date,
            status,
        }
    }
}

/// A member of the organization whose days are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The person identifier.
    pub id: PersonId,
    /// The display name.
    pub name: String,
    /// Position in list and table displays.
    pub order_index: i32,
    /// The login account linked to this person, if any.
    pub user_id: Option<String>,
}

impl Person {
    /// Creates a new `Person`.
    #[must_use]
    pub const fn new(id: PersonId, name: String, order_index: i32, user_id: Option<String>) -> Self {
        Self {
            id,
            name,
            order_index,
            user_id,
        }
    }
}

/// Per-year settings used by the remaining-vacation math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearConfiguration {
    /// The calendar year.
    pub year: i32,
    /// Vacation days each person is entitled to.
    pub vacation_entitlement_days: u16,
    /// Whether public holidays were imported as global entries.
    pub holidays_imported: bool,
}

impl YearConfiguration {
    /// Default entitlement for years that were never configured.
    pub const DEFAULT_ENTITLEMENT_DAYS: u16 = 30;

    /// Creates a configuration with the default entitlement.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self {
            year,
            vacation_entitlement_days: Self::DEFAULT_ENTITLEMENT_DAYS,
            holidays_imported: false,
        }
    }
}
