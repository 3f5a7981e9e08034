// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use absence_board_domain::{DayDate, Person, PersonId, StatusValue};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request changes to an [`crate::AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set or clear the person-specific status of a day.
    SetPersonDay {
        /// The person.
        person_id: PersonId,
        /// The day.
        date: DayDate,
        /// The new status; `None` deletes the entry.
        status: Option<StatusValue>,
    },
    /// Set or clear the organization-wide status of a day.
    SetGlobalDay {
        /// The day.
        date: DayDate,
        /// The new status; `None` deletes the entry.
        status: Option<StatusValue>,
    },
    /// Add a new person.
    AddPerson {
        /// The person to add.
        person: Person,
    },
    /// Replace the name, order or account link of an existing person.
    UpdatePerson {
        /// The person with updated fields.
        person: Person,
    },
    /// Remove a person together with all their person-specific entries.
    RemovePerson {
        /// The person to remove.
        person_id: PersonId,
    },
    /// Change the vacation entitlement of the loaded year.
    ConfigureYear {
        /// Days each person is entitled to.
        vacation_entitlement_days: u16,
    },
    /// Record the public holidays of the loaded year as global entries.
    ImportHolidays,
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetPersonDay { .. } => "SetPersonDay",
            Self::SetGlobalDay { .. } => "SetGlobalDay",
            Self::AddPerson { .. } => "AddPerson",
            Self::UpdatePerson { .. } => "UpdatePerson",
            Self::RemovePerson { .. } => "RemovePerson",
            Self::ConfigureYear { .. } => "ConfigureYear",
            Self::ImportHolidays => "ImportHolidays",
        }
    }
}
