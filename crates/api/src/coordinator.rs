// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Optimistic write coordination for person-specific day entries.
//!
//! A write is applied to the in-memory state immediately and persisted to the
//! remote store after a debounce window. Every `(person, date)` key runs its
//! own state machine:
//!
//! ```text
//! Clean ──set──▶ PendingWrite ──timer──▶ InFlight ──ok──▶ Clean
//!                  │   ▲                    │
//!                  └set┘                    └─err─▶ rollback + notify ─▶ Clean
//! ```
//!
//! Each write records `previous`, the value the key had when it was issued,
//! and a failed write restores it. Two cases refine that rule:
//!
//! - Coalescing. A `set` while a key is pending aborts the timer and keeps
//!   the `previous` of the first write of the burst, not the value set by
//!   the write it replaces. The aborted writes never reached the store, so
//!   restoring the value before the burst is what keeps local and remote
//!   equal after a failure.
//! - Overlap. A `set` while a key is in flight starts a new pending write
//!   whose `previous` is the in-flight target; the in-flight call is never
//!   cancelled. When it completes it is no longer the newest write for the
//!   key. Its success leaves the newer write's `previous` as is. Its failure
//!   leaves the local value alone and points the newer write's `previous`
//!   back at the value the failed write would have replaced.
//!
//! Locks are always taken in the order `writes` then `state` and never held
//! across an `.await`.

use absence_board::{
    AppState, Command, DayChange, TransitionResult, apply, plan_click, validate_loaded_year,
};
use absence_board_domain::{DayDate, PersonDayKey, PersonId, StatusValue, TenantId};
use absence_board_persistence::{DayEntryKey, DayEntryRecord, PersistenceError, RemoteStore};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_core_error};
use crate::notifications::{Notification, NotificationHub};

/// Default debounce window for remote writes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Settings of the write coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// How long a write waits for further writes to the same key.
    pub debounce: Duration,
}

impl CoordinatorConfig {
    /// Creates a configuration with the given debounce window in milliseconds.
    #[must_use]
    pub const fn from_millis(debounce_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Observable phase of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    /// No write is outstanding.
    Clean,
    /// A write waits for its debounce timer.
    PendingWrite,
    /// A write has been handed to the remote store.
    InFlight,
}

/// State of a key with an outstanding write. `Clean` keys are absent.
#[derive(Debug)]
enum KeyState {
    PendingWrite {
        generation: u64,
        timer: JoinHandle<()>,
        target: Option<StatusValue>,
        previous: Option<StatusValue>,
    },
    InFlight {
        generation: u64,
        target: Option<StatusValue>,
        previous: Option<StatusValue>,
    },
}

impl KeyState {
    const fn generation(&self) -> u64 {
        match self {
            Self::PendingWrite { generation, .. } | Self::InFlight { generation, .. } => {
                *generation
            }
        }
    }

    const fn previous(&self) -> Option<StatusValue> {
        match self {
            Self::PendingWrite { previous, .. } | Self::InFlight { previous, .. } => *previous,
        }
    }

    const fn set_previous(&mut self, value: Option<StatusValue>) {
        match self {
            Self::PendingWrite { previous, .. } | Self::InFlight { previous, .. } => {
                *previous = value;
            }
        }
    }

    const fn phase(&self) -> KeyPhase {
        match self {
            Self::PendingWrite { .. } => KeyPhase::PendingWrite,
            Self::InFlight { .. } => KeyPhase::InFlight,
        }
    }
}

#[derive(Debug, Default)]
struct Writes {
    closed: bool,
    next_generation: u64,
    keys: HashMap<PersonDayKey, KeyState>,
}

/// A write claimed for persistence.
struct Flight {
    key: PersonDayKey,
    generation: u64,
    target: Option<StatusValue>,
    previous: Option<StatusValue>,
}

struct Inner {
    tenant_id: TenantId,
    store: Arc<dyn RemoteStore>,
    config: CoordinatorConfig,
    hub: NotificationHub,
    state: Mutex<AppState>,
    writes: Mutex<Writes>,
    idle: Notify,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writes(&self) -> MutexGuard<'_, Writes> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify_if_idle(&self, writes: &Writes) {
        if writes.keys.is_empty() {
            self.idle.notify_waiters();
        }
    }

    /// Sleeps for the debounce window, then persists the write if it is still current.
    async fn fire_after(self: Arc<Self>, key: PersonDayKey, generation: u64) {
        tokio::time::sleep(self.config.debounce).await;

        let Some(flight) = self.begin_flight(key, generation) else {
            return;
        };
        self.run_flight(flight).await;
    }

    /// Moves a pending write to `InFlight` unless it was superseded meanwhile.
    fn begin_flight(&self, key: PersonDayKey, generation: u64) -> Option<Flight> {
        let mut writes: MutexGuard<'_, Writes> = self.lock_writes();
        let entry: &mut KeyState = writes.keys.get_mut(&key)?;
        let KeyState::PendingWrite {
            generation: current,
            target,
            previous,
            ..
        } = *entry
        else {
            return None;
        };
        if current != generation {
            return None;
        }

        *entry = KeyState::InFlight {
            generation,
            target,
            previous,
        };
        drop(writes);

        Some(Flight {
            key,
            generation,
            target,
            previous,
        })
    }

    async fn run_flight(&self, flight: Flight) {
        debug!(key = %flight.key, target = ?flight.target, "Persisting day entry");
        let result: Result<(), PersistenceError> = self.persist(&flight.key, flight.target).await;
        self.settle(&flight, result);
    }

    async fn persist(
        &self,
        key: &PersonDayKey,
        target: Option<StatusValue>,
    ) -> Result<(), PersistenceError> {
        let record_key: DayEntryKey = DayEntryKey::for_person(&key.person_id, key.date);
        match target {
            Some(status) => {
                self.store
                    .upsert(&self.tenant_id, &DayEntryRecord::new(record_key, status))
                    .await
            }
            None => self.store.delete(&self.tenant_id, &record_key).await,
        }
    }

    /// Records the outcome of a remote write.
    fn settle(&self, flight: &Flight, result: Result<(), PersistenceError>) {
        let mut writes: MutexGuard<'_, Writes> = self.lock_writes();
        let is_newest: bool = writes
            .keys
            .get(&flight.key)
            .is_some_and(|entry| entry.generation() == flight.generation);

        let err: PersistenceError = match result {
            Ok(()) => {
                if is_newest {
                    writes.keys.remove(&flight.key);
                    self.notify_if_idle(&writes);
                    debug!(key = %flight.key, "Day entry persisted");
                } else {
                    debug!(key = %flight.key, "Superseded day entry persisted");
                }
                return;
            }
            Err(err) => err,
        };

        let (restored, rolled_back): (Option<StatusValue>, bool) = if is_newest {
            let previous: Option<StatusValue> = writes
                .keys
                .remove(&flight.key)
                .and_then(|entry| entry.previous());
            let mut state: MutexGuard<'_, AppState> = self.lock_state();
            // A reloaded year or a removed person must not be resurrected.
            if state.year == flight.key.date.year() && state.has_person(&flight.key.person_id) {
                state
                    .store
                    .write_local(&flight.key.person_id, flight.key.date, previous);
                (previous, true)
            } else {
                (None, false)
            }
        } else {
            // The newer write must not fall back to a value that never landed.
            if let Some(newer) = writes.keys.get_mut(&flight.key)
                && newer.previous() == flight.target
            {
                newer.set_previous(flight.previous);
            }
            (None, false)
        };
        self.notify_if_idle(&writes);
        drop(writes);

        warn!(
            tenant = %self.tenant_id.value(),
            key = %flight.key,
            attempted = ?flight.target,
            restored = ?restored,
            rolled_back,
            error = %err,
            "Remote write failed"
        );
        self.hub.publish(&Notification::remote_write_failed(
            &self.tenant_id,
            &flight.key,
            flight.target,
            restored,
            rolled_back,
            err.to_string(),
        ));
    }
}

/// Coordinates optimistic local writes with deferred remote persistence.
///
/// The coordinator owns the [`AppState`] of one tenant and year and is the
/// sole writer of its person-specific entries. Cloning shares the same state.
/// Writes must be issued from within a Tokio runtime.
#[derive(Clone)]
pub struct WriteCoordinator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for WriteCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteCoordinator")
            .field("tenant_id", &self.inner.tenant_id)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl WriteCoordinator {
    /// Creates a coordinator over a loaded state.
    ///
    /// # Arguments
    ///
    /// * `state` - The loaded state of one tenant and year
    /// * `store` - The remote store writes are persisted to
    /// * `config` - Coordinator settings
    /// * `hub` - Where failure notifications are published
    #[must_use]
    pub fn new(
        state: AppState,
        store: Arc<dyn RemoteStore>,
        config: CoordinatorConfig,
        hub: NotificationHub,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                tenant_id: state.tenant_id.clone(),
                store,
                config,
                hub,
                state: Mutex::new(state),
                writes: Mutex::new(Writes::default()),
                idle: Notify::new(),
            }),
        }
    }

    /// Returns the tenant of the coordinated state.
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.inner.tenant_id
    }

    /// Returns the loaded year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.lock_state().year
    }

    /// Returns the remote store writes go to.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.inner.store
    }

    /// Runs a read-only closure against the current state.
    pub fn with_state<R, F>(&self, read: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state: MutexGuard<'_, AppState> = self.inner.lock_state();
        read(&state)
    }

    /// Sets the person-specific status of a day; `None` deletes the entry.
    ///
    /// The local state changes before this returns; the remote write is
    /// scheduled for the end of the debounce window.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is outside the loaded year, the person
    /// is unknown, or the board was closed for a reload. Nothing is changed
    /// in that case.
    pub fn set_status(
        &self,
        person_id: &PersonId,
        date: DayDate,
        status: Option<StatusValue>,
    ) -> Result<DayChange, ApiError> {
        self.write_person_day(person_id, date, |_| Some(status))?
            .ok_or_else(|| ApiError::Internal {
                message: format!("Write to {person_id} on {date} produced no change"),
            })
    }

    /// Advances a person's day along the click cycle.
    ///
    /// Returns `None` for weekend days, which never change.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is outside the loaded year, the person
    /// is unknown, or the board was closed for a reload.
    pub fn click(&self, person_id: &PersonId, date: DayDate) -> Result<Option<DayChange>, ApiError> {
        self.write_person_day(person_id, date, |state| {
            plan_click(&state.store, person_id, date).map(|plan| plan.next)
        })
    }

    /// Applies a person-specific write and schedules its persistence.
    ///
    /// `decide` sees the state under the same lock as the mutation and
    /// returns the status to write, or `None` to leave the day untouched.
    fn write_person_day<F>(
        &self,
        person_id: &PersonId,
        date: DayDate,
        decide: F,
    ) -> Result<Option<DayChange>, ApiError>
    where
        F: FnOnce(&AppState) -> Option<Option<StatusValue>>,
    {
        let mut writes: MutexGuard<'_, Writes> = self.inner.lock_writes();
        if writes.closed {
            return Err(ApiError::YearNotLoaded {
                requested: date.year(),
                loaded: None,
            });
        }

        let change: DayChange = {
            let mut state: MutexGuard<'_, AppState> = self.inner.lock_state();
            validate_loaded_year(&state, date).map_err(translate_core_error)?;
            let Some(target) = decide(&state) else {
                debug!(person = %person_id, %date, "Day is not cyclable");
                return Ok(None);
            };
            let result: TransitionResult = apply(
                &mut state,
                Command::SetPersonDay {
                    person_id: person_id.clone(),
                    date,
                    status: target,
                },
            )
            .map_err(translate_core_error)?;
            drop(state);

            result
                .changes
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::Internal {
                    message: format!("SetPersonDay for {person_id} on {date} reported no change"),
                })?
        };

        let key: PersonDayKey = PersonDayKey::new(person_id.clone(), date);
        self.schedule(&mut writes, key, change.current, change.previous);
        drop(writes);

        info!(
            tenant = %self.inner.tenant_id.value(),
            person = %person_id,
            %date,
            previous = ?change.previous,
            current = ?change.current,
            "Day status set"
        );
        Ok(Some(change))
    }

    /// Replaces any pending write of the key with a new one.
    fn schedule(
        &self,
        writes: &mut Writes,
        key: PersonDayKey,
        target: Option<StatusValue>,
        local_previous: Option<StatusValue>,
    ) {
        let generation: u64 = writes.next_generation;
        writes.next_generation += 1;

        let previous: Option<StatusValue> = match writes.keys.remove(&key) {
            Some(KeyState::PendingWrite {
                timer, previous, ..
            }) => {
                timer.abort();
                debug!(%key, "Coalesced pending write");
                previous
            }
            Some(KeyState::InFlight { .. }) | None => local_previous,
        };

        let timer: JoinHandle<()> = tokio::spawn(Inner::fire_after(
            Arc::clone(&self.inner),
            key.clone(),
            generation,
        ));
        writes.keys.insert(
            key,
            KeyState::PendingWrite {
                generation,
                timer,
                target,
                previous,
            },
        );
    }

    /// Fires every pending write immediately and waits until no write is
    /// outstanding, including those that were already in flight.
    ///
    /// Returns how many pending writes were fired.
    pub async fn flush(&self) -> usize {
        let flights: Vec<Flight> = {
            let mut writes: MutexGuard<'_, Writes> = self.inner.lock_writes();
            let mut flights: Vec<Flight> = Vec::new();
            for (key, entry) in &mut writes.keys {
                let KeyState::PendingWrite {
                    generation,
                    target,
                    previous,
                    ..
                } = *entry
                else {
                    continue;
                };
                let replaced: KeyState = std::mem::replace(
                    entry,
                    KeyState::InFlight {
                        generation,
                        target,
                        previous,
                    },
                );
                if let KeyState::PendingWrite { timer, .. } = replaced {
                    timer.abort();
                }
                flights.push(Flight {
                    key: key.clone(),
                    generation,
                    target,
                    previous,
                });
            }
            flights
        };

        let count: usize = flights.len();
        if count > 0 {
            info!(
                tenant = %self.inner.tenant_id.value(),
                count,
                "Flushing pending writes"
            );
        }
        join_all(flights.into_iter().map(|flight| self.inner.run_flight(flight))).await;
        self.wait_idle().await;
        count
    }

    /// Waits until every key is `Clean`.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.inner.lock_writes().keys.is_empty() {
                return;
            }
            notified.await;
        }
    }

    /// Stops accepting person-specific writes.
    ///
    /// Used while the board is being replaced; writes already scheduled are
    /// unaffected and can still be flushed.
    pub fn close(&self) {
        self.inner.lock_writes().closed = true;
    }

    /// Accepts person-specific writes again after [`Self::close`].
    pub fn reopen(&self) {
        self.inner.lock_writes().closed = false;
    }

    /// Drops every outstanding write of a person.
    ///
    /// Pending timers are aborted. Calls already in flight still complete but
    /// no longer roll anything back. Returns how many keys were dropped.
    pub fn discard_person(&self, person_id: &PersonId) -> usize {
        let mut writes: MutexGuard<'_, Writes> = self.inner.lock_writes();
        let keys: Vec<PersonDayKey> = writes
            .keys
            .keys()
            .filter(|key| &key.person_id == person_id)
            .cloned()
            .collect();
        for key in &keys {
            if let Some(KeyState::PendingWrite { timer, .. }) = writes.keys.remove(key) {
                timer.abort();
            }
        }
        self.inner.notify_if_idle(&writes);
        drop(writes);
        keys.len()
    }

    /// Applies a command whose remote write already succeeded.
    ///
    /// Used by the administrative paths (persons, global days, year settings)
    /// which persist first and update the local state afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected by the state.
    pub fn apply_confirmed(&self, command: Command) -> Result<TransitionResult, ApiError> {
        let mut state: MutexGuard<'_, AppState> = self.inner.lock_state();
        apply(&mut state, command).map_err(translate_core_error)
    }

    /// Returns the phase of a key.
    #[must_use]
    pub fn phase(&self, key: &PersonDayKey) -> KeyPhase {
        self.inner
            .lock_writes()
            .keys
            .get(key)
            .map_or(KeyPhase::Clean, KeyState::phase)
    }

    /// Returns every key with an outstanding write, sorted.
    #[must_use]
    pub fn pending_keys(&self) -> Vec<PersonDayKey> {
        let mut keys: Vec<PersonDayKey> = self.inner.lock_writes().keys.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Subscribes to the notifications published by this coordinator.
    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.hub.subscribe()
    }
}
