// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use absence_board::{AppState, load_state};
use absence_board_domain::{DayDate, DayEntry, Person, PersonId, StatusValue, TenantId};
use absence_board_persistence::{
    DayEntryKey, DayEntryRecord, InMemoryStore, PersonRecord, RemoteStore,
};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    AuthenticatedActor, BoardRegistry, CoordinatorConfig, DEFAULT_DEBOUNCE, NotificationHub,
    Role, WriteCoordinator,
};

/// The loaded year of every fixture.
pub const TEST_YEAR: i32 = 2025;

pub fn tenant() -> TenantId {
    TenantId::new("acme").unwrap()
}

pub fn person_id(value: &str) -> PersonId {
    PersonId::new(value).unwrap()
}

pub fn day(year: i32, month: u8, day: u8) -> DayDate {
    DayDate::new(year, month, day).unwrap()
}

/// Wednesday, 12 March 2025.
pub fn wednesday() -> DayDate {
    day(TEST_YEAR, 2, 12)
}

/// Thursday, 13 March 2025.
pub fn thursday() -> DayDate {
    day(TEST_YEAR, 2, 13)
}

/// Saturday, 15 March 2025.
pub fn saturday() -> DayDate {
    day(TEST_YEAR, 2, 15)
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin, tenant())
}

/// A member linked to Bob.
pub fn create_test_member() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("user-bob"), Role::Member, tenant())
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

/// A store holding Alice and Bob and the given day entries.
pub async fn create_seeded_store(entries: &[DayEntry]) -> Arc<InMemoryStore> {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    for person in create_test_persons() {
        store
            .upsert_person(&tenant(), &PersonRecord::from_person(&person))
            .await
            .unwrap();
    }
    for entry in entries {
        store
            .upsert(&tenant(), &DayEntryRecord::from_entry(entry))
            .await
            .unwrap();
    }
    store.clear_calls();
    store
}

/// A coordinator over the 2025 state of Alice and Bob with the given entries.
pub fn create_test_coordinator(
    store: &Arc<InMemoryStore>,
    entries: Vec<DayEntry>,
) -> WriteCoordinator {
    let state: AppState = load_state(tenant(), TEST_YEAR, create_test_persons(), None, entries);
    WriteCoordinator::new(
        state,
        Arc::clone(store) as Arc<dyn RemoteStore>,
        CoordinatorConfig::default(),
        NotificationHub::new(),
    )
}

/// A registry over a seeded store with 2025 loaded for the test tenant.
pub async fn setup_registry(entries: &[DayEntry]) -> (Arc<InMemoryStore>, BoardRegistry) {
    let store: Arc<InMemoryStore> = create_seeded_store(entries).await;
    let registry: BoardRegistry = BoardRegistry::new(
        Arc::clone(&store) as Arc<dyn RemoteStore>,
        CoordinatorConfig::default(),
    );
    registry.load_year(&tenant(), TEST_YEAR).await.unwrap();
    (store, registry)
}

/// Sleeps past the debounce window so pending writes fire.
pub async fn wait_for_debounce() {
    tokio::time::sleep(DEFAULT_DEBOUNCE + Duration::from_millis(100)).await;
}

pub fn alice_key(date: DayDate) -> DayEntryKey {
    DayEntryKey::for_person(&person_id("p-alice"), date)
}

pub fn alice_entry(date: DayDate, status: StatusValue) -> DayEntry {
    DayEntry::person(person_id("p-alice"), date, status)
}
