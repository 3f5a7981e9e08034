// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod record_tests;

use absence_board_domain::{DayDate, PersonId, StatusValue, TenantId};

use crate::{DayEntryKey, DayEntryRecord, PersonRecord};

pub fn tenant(value: &str) -> TenantId {
    TenantId::new(value).unwrap()
}

pub fn person_key(person: &str, year: i32, month: u8, day: u8) -> DayEntryKey {
    DayEntryKey::for_person(
        &PersonId::new(person).unwrap(),
        DayDate::new(year, month, day).unwrap(),
    )
}

pub fn global_key(year: i32, month: u8, day: u8) -> DayEntryKey {
    DayEntryKey::global(DayDate::new(year, month, day).unwrap())
}

pub fn record(key: DayEntryKey, status: StatusValue) -> DayEntryRecord {
    DayEntryRecord::new(key, status)
}

pub fn person_record(id: &str, name: &str, order_index: i32) -> PersonRecord {
    PersonRecord {
        id: id.to_string(),
        name: name.to_string(),
        order_index,
        user_id: None,
    }
}
