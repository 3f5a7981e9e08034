// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AppState, load_state};
use absence_board_domain::{DayDate, DayEntry, Person, PersonId, StatusValue, TenantId};

pub fn person_id(value: &str) -> PersonId {
    PersonId::new(value).unwrap()
}

pub fn day(year: i32, month: u8, day: u8) -> DayDate {
    DayDate::new(year, month, day).unwrap()
}

pub fn create_test_persons() -> Vec<Person> {
    vec![
        Person::new(person_id("p-alice"), String::from("Alice"), 1, None),
        Person::new(
            person_id("p-bob"),
            String::from("Bob"),
            0,
            Some(String::from("user-bob")),
        ),
    ]
}

/// State for 2025 with Alice and Bob and no entries.
pub fn create_test_state() -> AppState {
    load_state(
        TenantId::new("acme").unwrap(),
        2025,
        create_test_persons(),
        None,
        Vec::new(),
    )
}

/// State for 2025 with the given entries.
pub fn create_state_with(entries: Vec<DayEntry>) -> AppState {
    load_state(
        TenantId::new("acme").unwrap(),
        2025,
        create_test_persons(),
        None,
        entries,
    )
}

pub fn alice_entry(date: DayDate, status: StatusValue) -> DayEntry {
    DayEntry::person(person_id("p-alice"), date, status)
}
