// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write coordinator tests: optimistic application, debouncing, rollback
//! and supersession. Time is paused so timers advance deterministically.

use absence_board::{AppState, DayChange, effective_status};
use absence_board_domain::{DayEntry, PersonDayKey, StatusValue};
use absence_board_persistence::{DayEntryRecord, InMemoryStore, RemoteCall};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::helpers::{
    TEST_YEAR, alice_entry, alice_key, create_test_coordinator, day, person_id, saturday, tenant,
    thursday, wait_for_debounce, wednesday,
};
use crate::{ApiError, KeyPhase, Notification, WriteCoordinator};

fn local_status(coordinator: &WriteCoordinator) -> Option<StatusValue> {
    coordinator.with_state(|state: &AppState| state.store.get(&person_id("p-alice"), wednesday()))
}

fn alice_wednesday() -> PersonDayKey {
    PersonDayKey::new(person_id("p-alice"), wednesday())
}

#[tokio::test(start_paused = true)]
async fn test_set_status_applies_locally_before_remote_write() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    let change: DayChange = coordinator
        .set_status(&person_id("p-alice"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();

    assert_eq!(change.previous, None);
    assert_eq!(change.current, Some(StatusValue::Vacation));
    assert_eq!(local_status(&coordinator), Some(StatusValue::Vacation));
    assert!(store.calls().is_empty());
    assert_eq!(coordinator.phase(&alice_wednesday()), KeyPhase::PendingWrite);
    assert_eq!(coordinator.pending_keys(), vec![alice_wednesday()]);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_three_writes_into_one_call() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    let alice = person_id("p-alice");

    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::TrainingSession))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Holiday))
        .unwrap();

    wait_for_debounce().await;

    assert_eq!(
        store.calls(),
        vec![RemoteCall::Upsert {
            tenant: String::from("acme"),
            record: DayEntryRecord::new(alice_key(wednesday()), StatusValue::Holiday),
        }]
    );
    assert_eq!(
        store.get(&tenant(), &alice_key(wednesday())),
        Some(StatusValue::Holiday)
    );
    assert_eq!(coordinator.phase(&alice_wednesday()), KeyPhase::Clean);
}

#[tokio::test(start_paused = true)]
async fn test_writes_to_different_keys_are_independent() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    coordinator
        .set_status(&person_id("p-alice"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    coordinator
        .set_status(&person_id("p-alice"), thursday(), Some(StatusValue::Vacation))
        .unwrap();
    coordinator
        .set_status(&person_id("p-bob"), wednesday(), Some(StatusValue::TrainingSession))
        .unwrap();

    wait_for_debounce().await;

    assert_eq!(store.calls().len(), 3);
    assert_eq!(store.entry_count(), 3);
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_write_rolls_back_and_notifies() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    let mut notifications: broadcast::Receiver<Notification> = coordinator.notifications();
    store.fail_next_writes(1);

    coordinator
        .set_status(&person_id("p-alice"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    assert_eq!(local_status(&coordinator), Some(StatusValue::Vacation));

    wait_for_debounce().await;

    assert_eq!(local_status(&coordinator), None);
    assert_eq!(coordinator.phase(&alice_wednesday()), KeyPhase::Clean);

    match notifications.try_recv().unwrap() {
        Notification::RemoteWriteFailed {
            person_id,
            year,
            month,
            day,
            attempted,
            restored,
            rolled_back,
            ..
        } => {
            assert_eq!(person_id, "p-alice");
            assert_eq!((year, month, day), (TEST_YEAR, 2, 12));
            assert_eq!(attempted, Some(StatusValue::Vacation));
            assert_eq!(restored, None);
            assert!(rolled_back);
        }
        other => panic!("Expected RemoteWriteFailed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_failed_coalesced_write_restores_value_before_the_burst() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(
        &store,
        vec![alice_entry(wednesday(), StatusValue::TrainingSession)],
    );
    store.fail_next_writes(1);
    let alice = person_id("p-alice");

    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::ContinuingEducation))
        .unwrap();
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::InternalTeamDay))
        .unwrap();

    wait_for_debounce().await;

    assert_eq!(store.calls().len(), 1);
    assert_eq!(local_status(&coordinator), Some(StatusValue::TrainingSession));
}

#[tokio::test(start_paused = true)]
async fn test_failed_write_does_not_retry() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    store.fail_next_writes(1);

    coordinator
        .set_status(&person_id("p-alice"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    wait_for_debounce().await;
    wait_for_debounce().await;

    assert_eq!(store.calls().len(), 1);
    assert_eq!(store.entry_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_none_status_deletes_the_remote_entry() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(
        &store,
        vec![alice_entry(wednesday(), StatusValue::Vacation)],
    );

    let change: DayChange = coordinator
        .set_status(&person_id("p-alice"), wednesday(), None)
        .unwrap();
    assert_eq!(change.previous, Some(StatusValue::Vacation));
    assert_eq!(change.current, None);

    wait_for_debounce().await;

    assert_eq!(
        store.calls(),
        vec![RemoteCall::Delete {
            tenant: String::from("acme"),
            key: alice_key(wednesday()),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_deleting_person_entry_reveals_global_entry() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(
        &store,
        vec![
            DayEntry::global(wednesday(), StatusValue::Holiday),
            alice_entry(wednesday(), StatusValue::Vacation),
        ],
    );

    coordinator
        .set_status(&person_id("p-alice"), wednesday(), None)
        .unwrap();

    let (status, is_inherited) = coordinator.with_state(|state: &AppState| {
        let effective = effective_status(&state.store, &person_id("p-alice"), wednesday());
        (effective.status, effective.is_inherited)
    });
    assert_eq!(status, Some(StatusValue::Holiday));
    assert!(is_inherited);
}

#[tokio::test(start_paused = true)]
async fn test_weekend_click_is_a_noop() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    let change: Option<DayChange> = coordinator.click(&person_id("p-alice"), saturday()).unwrap();

    assert_eq!(change, None);
    assert!(coordinator.pending_keys().is_empty());
    wait_for_debounce().await;
    assert!(store.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_click_cycles_through_statuses_and_back_to_none() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    let alice = person_id("p-alice");

    let mut seen: Vec<Option<StatusValue>> = Vec::new();
    for _ in 0..6 {
        let change: DayChange = coordinator.click(&alice, wednesday()).unwrap().unwrap();
        seen.push(change.current);
    }

    assert_eq!(
        seen,
        vec![
            Some(StatusValue::Vacation),
            Some(StatusValue::TrainingSession),
            Some(StatusValue::ContinuingEducation),
            Some(StatusValue::InternalTeamDay),
            Some(StatusValue::Holiday),
            None,
        ]
    );

    wait_for_debounce().await;
    assert_eq!(
        store.calls(),
        vec![RemoteCall::Delete {
            tenant: String::from("acme"),
            key: alice_key(wednesday()),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_click_on_inherited_holiday_restarts_at_vacation() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(
        &store,
        vec![DayEntry::global(wednesday(), StatusValue::Holiday)],
    );

    let change: DayChange = coordinator
        .click(&person_id("p-alice"), wednesday())
        .unwrap()
        .unwrap();

    assert_eq!(change.previous, None);
    assert_eq!(change.current, Some(StatusValue::Vacation));
    let global: Option<StatusValue> =
        coordinator.with_state(|state: &AppState| state.store.get_global(wednesday()));
    assert_eq!(global, Some(StatusValue::Holiday));
}

#[tokio::test(start_paused = true)]
async fn test_superseded_failed_write_leaves_newer_value() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    let mut notifications: broadcast::Receiver<Notification> = coordinator.notifications();
    store.set_write_delay(Duration::from_millis(500));
    store.fail_next_writes(1);
    let alice = person_id("p-alice");

    // t=0: vacation is scheduled; t=1000: it goes in flight and fails at t=1500.
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(coordinator.phase(&alice_wednesday()), KeyPhase::InFlight);

    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::TrainingSession))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(local_status(&coordinator), Some(StatusValue::TrainingSession));
    assert_eq!(coordinator.phase(&alice_wednesday()), KeyPhase::PendingWrite);
    match notifications.try_recv().unwrap() {
        Notification::RemoteWriteFailed {
            attempted,
            rolled_back,
            ..
        } => {
            assert_eq!(attempted, Some(StatusValue::Vacation));
            assert!(!rolled_back);
        }
        other => panic!("Expected RemoteWriteFailed, got {other:?}"),
    }

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(
        store.get(&tenant(), &alice_key(wednesday())),
        Some(StatusValue::TrainingSession)
    );
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_superseded_successful_write_becomes_rollback_target() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    store.set_write_delay(Duration::from_millis(500));
    let alice = person_id("p-alice");

    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // The vacation write is in flight and will succeed; the next write fails.
    store.fail_next_writes(1);
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::TrainingSession))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert_eq!(local_status(&coordinator), Some(StatusValue::Vacation));
    assert_eq!(
        store.get(&tenant(), &alice_key(wednesday())),
        Some(StatusValue::Vacation)
    );
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failure_during_slow_write_restores_value_before_the_call() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    let mut notifications: broadcast::Receiver<Notification> = coordinator.notifications();
    store.set_write_delay(Duration::from_secs(10));
    let alice = person_id("p-alice");

    // t=1000: the vacation write goes in flight and lands at t=11000.
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(coordinator.phase(&alice_wednesday()), KeyPhase::InFlight);

    store.set_write_delay(Duration::ZERO);
    store.fail_next_writes(1);
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::TrainingSession))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    assert_eq!(local_status(&coordinator), Some(StatusValue::Vacation));
    match notifications.try_recv().unwrap() {
        Notification::RemoteWriteFailed {
            attempted,
            restored,
            rolled_back,
            ..
        } => {
            assert_eq!(attempted, Some(StatusValue::TrainingSession));
            assert_eq!(restored, Some(StatusValue::Vacation));
            assert!(rolled_back);
        }
        other => panic!("Expected RemoteWriteFailed, got {other:?}"),
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(local_status(&coordinator), Some(StatusValue::Vacation));
    assert_eq!(
        store.get(&tenant(), &alice_key(wednesday())),
        Some(StatusValue::Vacation)
    );
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_both_overlapping_writes_failing_restores_durable_value() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    store.set_write_delay(Duration::from_millis(500));
    store.fail_next_writes(2);
    let alice = person_id("p-alice");

    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::TrainingSession))
        .unwrap();

    // The vacation write fails at t=1500, the training write at t=2700.
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert_eq!(local_status(&coordinator), None);
    assert_eq!(store.get(&tenant(), &alice_key(wednesday())), None);
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_flush_fires_pending_writes_immediately() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    coordinator
        .set_status(&person_id("p-alice"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    coordinator
        .set_status(&person_id("p-bob"), thursday(), Some(StatusValue::Holiday))
        .unwrap();

    let flushed: usize = coordinator.flush().await;

    assert_eq!(flushed, 2);
    assert_eq!(store.calls().len(), 2);
    assert!(coordinator.pending_keys().is_empty());

    // The aborted timers must not write a second time.
    wait_for_debounce().await;
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_discard_person_drops_pending_writes() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    coordinator
        .set_status(&person_id("p-alice"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    coordinator
        .set_status(&person_id("p-bob"), wednesday(), Some(StatusValue::Vacation))
        .unwrap();

    assert_eq!(coordinator.discard_person(&person_id("p-alice")), 1);
    wait_for_debounce().await;

    assert_eq!(store.calls().len(), 1);
    assert_eq!(store.get(&tenant(), &alice_key(wednesday())), None);
}

#[tokio::test(start_paused = true)]
async fn test_write_outside_loaded_year_is_rejected() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    let result: Result<DayChange, ApiError> = coordinator.set_status(
        &person_id("p-alice"),
        day(2026, 0, 7),
        Some(StatusValue::Vacation),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::YearNotLoaded {
            requested: 2026,
            loaded: Some(TEST_YEAR),
        }
    );
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_write_for_unknown_person_is_rejected() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());

    let result: Result<DayChange, ApiError> = coordinator.set_status(
        &person_id("p-carol"),
        wednesday(),
        Some(StatusValue::Vacation),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert!(coordinator.pending_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_closed_board_rejects_writes_until_reopened() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let coordinator: WriteCoordinator = create_test_coordinator(&store, Vec::new());
    let alice = person_id("p-alice");

    coordinator.close();
    let rejected: Result<DayChange, ApiError> =
        coordinator.set_status(&alice, wednesday(), Some(StatusValue::Vacation));
    assert_eq!(
        rejected.unwrap_err(),
        ApiError::YearNotLoaded {
            requested: TEST_YEAR,
            loaded: None,
        }
    );
    assert_eq!(local_status(&coordinator), None);

    coordinator.reopen();
    coordinator
        .set_status(&alice, wednesday(), Some(StatusValue::Vacation))
        .unwrap();
    assert_eq!(local_status(&coordinator), Some(StatusValue::Vacation));
}
