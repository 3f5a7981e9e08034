// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use absence_board_domain::{
    DayDate, DayEntry, EntryScope, Person, PersonId, StatusValue, TenantId, YearConfiguration,
};
use std::collections::{BTreeMap, HashMap};

/// In-memory projection of the day entries loaded for one year.
///
/// Person-specific and global entries live in separate maps. Absence of a key
/// means "none"; the store never holds an explicit empty status. Writes are
/// upserts keyed by `(person, date)` or `date`, so at most one entry of each
/// scope exists per day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayStatusStore {
    person_entries: HashMap<PersonId, BTreeMap<DayDate, StatusValue>>,
    global_entries: BTreeMap<DayDate, StatusValue>,
}

impl DayStatusStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a set of entries; later entries for the same key win.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DayEntry>,
    {
        let mut store: Self = Self::new();
        store.load(entries);
        store
    }

    /// Replaces the whole projection with the given entries.
    pub fn load<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = DayEntry>,
    {
        self.person_entries.clear();
        self.global_entries.clear();
        for entry in entries {
            match entry.scope {
                EntryScope::Person(person_id) => {
                    self.set_local(person_id, entry.date, entry.status);
                }
                EntryScope::Global => {
                    self.set_global_local(entry.date, entry.status);
                }
            }
        }
    }

    /// Reads the person-specific entry only.
    #[must_use]
    pub fn get(&self, person_id: &PersonId, date: DayDate) -> Option<StatusValue> {
        self.person_entries
            .get(person_id)
            .and_then(|days| days.get(&date))
            .copied()
    }

    /// Reads the global entry only.
    #[must_use]
    pub fn get_global(&self, date: DayDate) -> Option<StatusValue> {
        self.global_entries.get(&date).copied()
    }

    /// Upserts a person-specific entry, returning the value it replaced.
    pub fn set_local(
        &mut self,
        person_id: PersonId,
        date: DayDate,
        status: StatusValue,
    ) -> Option<StatusValue> {
        self.person_entries
            .entry(person_id)
            .or_default()
            .insert(date, status)
    }

    /// Removes a person-specific entry, returning the removed value.
    pub fn delete_local(&mut self, person_id: &PersonId, date: DayDate) -> Option<StatusValue> {
        let days: &mut BTreeMap<DayDate, StatusValue> = self.person_entries.get_mut(person_id)?;
        let removed: Option<StatusValue> = days.remove(&date);
        if days.is_empty() {
            self.person_entries.remove(person_id);
        }
        removed
    }

    /// Writes `Some(status)` or deletes on `None`, returning the previous value.
    pub fn write_local(
        &mut self,
        person_id: &PersonId,
        date: DayDate,
        status: Option<StatusValue>,
    ) -> Option<StatusValue> {
        match status {
            Some(value) => self.set_local(person_id.clone(), date, value),
            None => self.delete_local(person_id, date),
        }
    }

    /// Upserts a global entry, returning the value it replaced.
    pub fn set_global_local(&mut self, date: DayDate, status: StatusValue) -> Option<StatusValue> {
        self.global_entries.insert(date, status)
    }

    /// Removes a global entry, returning the removed value.
    pub fn delete_global_local(&mut self, date: DayDate) -> Option<StatusValue> {
        self.global_entries.remove(&date)
    }

    /// Writes or deletes a global entry, returning the previous value.
    pub fn write_global_local(
        &mut self,
        date: DayDate,
        status: Option<StatusValue>,
    ) -> Option<StatusValue> {
        match status {
            Some(value) => self.set_global_local(date, value),
            None => self.delete_global_local(date),
        }
    }

    /// Removes every entry of a person, returning how many were dropped.
    pub fn remove_person(&mut self, person_id: &PersonId) -> usize {
        self.person_entries
            .remove(person_id)
            .map_or(0, |days| days.len())
    }

    /// Iterates over the person-specific entries of one person in date order.
    pub fn person_entries_for<'a>(
        &'a self,
        person_id: &PersonId,
    ) -> impl Iterator<Item = (DayDate, StatusValue)> + 'a {
        self.person_entries
            .get(person_id)
            .into_iter()
            .flat_map(|days| days.iter().map(|(date, status)| (*date, *status)))
    }

    /// Iterates over the global entries in date order.
    pub fn global_entries(&self) -> impl Iterator<Item = (DayDate, StatusValue)> + '_ {
        self.global_entries
            .iter()
            .map(|(date, status)| (*date, *status))
    }

    /// Returns every entry, globals first, then persons ordered by id and date.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DayEntry> {
        let mut entries: Vec<DayEntry> = self
            .global_entries()
            .map(|(date, status)| DayEntry::global(date, status))
            .collect();

        let mut person_ids: Vec<&PersonId> = self.person_entries.keys().collect();
        person_ids.sort();
        for person_id in person_ids {
            entries.extend(
                self.person_entries_for(person_id)
                    .map(|(date, status)| DayEntry::person(person_id.clone(), date, status)),
            );
        }

        entries
    }

    /// Returns the total number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.global_entries.len()
            + self
                .person_entries
                .values()
                .map(BTreeMap::len)
                .sum::<usize>()
    }

    /// Returns whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete application state scoped to one tenant and one year.
///
/// This replaces the UI-wide provider of the browser application: the
/// resolution rule and the aggregations only read it, while the write
/// coordinator is the sole writer of person-specific entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// The tenant all data belongs to.
    pub tenant_id: TenantId,
    /// The loaded year.
    pub year: i32,
    /// All persons of the tenant.
    pub persons: Vec<Person>,
    /// The settings of the loaded year.
    pub year_configuration: YearConfiguration,
    /// The day entries of the loaded year.
    pub store: DayStatusStore,
}

impl AppState {
    /// Creates an empty state for a tenant and year.
    #[must_use]
    pub fn new(tenant_id: TenantId, year: i32) -> Self {
        Self {
            tenant_id,
            year,
            persons: Vec::new(),
            year_configuration: YearConfiguration::new(year),
            store: DayStatusStore::new(),
        }
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn person(&self, person_id: &PersonId) -> Option<&Person> {
        self.persons.iter().find(|person| &person.id == person_id)
    }

    /// Checks if a person exists.
    #[must_use]
    pub fn has_person(&self, person_id: &PersonId) -> bool {
        self.person(person_id).is_some()
    }

    /// Returns the persons in display order: `order_index`, then name.
    #[must_use]
    pub fn persons_in_order(&self) -> Vec<&Person> {
        let mut persons: Vec<&Person> = self.persons.iter().collect();
        persons.sort_by(|a, b| {
            a.order_index
                .cmp(&b.order_index)
                .then_with(|| a.name.cmp(&b.name))
        });
        persons
    }
}

/// A single day entry changed by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayChange {
    /// Whether the person-specific or the global entry changed.
    pub scope: EntryScope,
    /// The day.
    pub date: DayDate,
    /// The status before the change.
    pub previous: Option<StatusValue>,
    /// The status after the change.
    pub current: Option<StatusValue>,
}

impl DayChange {
    /// Returns whether the change actually altered the stored value.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

/// The result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The command that was applied.
    pub command_name: &'static str,
    /// Every day entry the command touched, in application order.
    pub changes: Vec<DayChange>,
}
