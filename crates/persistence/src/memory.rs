// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A `RemoteStore` held entirely in memory.
//!
//! Used by tests and the demo server. Day entry writes are logged in call
//! order and can be made to fail or to take a while, which is how rollback
//! and coalescing are exercised without a network.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use absence_board_domain::{StatusValue, TenantId};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::records::{DayEntryKey, DayEntryRecord, PersonRecord, YearConfigurationRecord};
use crate::store::RemoteStore;

/// A day entry write received by an [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// An upsert.
    Upsert {
        /// The tenant.
        tenant: String,
        /// The written record.
        record: DayEntryRecord,
    },
    /// A deletion.
    Delete {
        /// The tenant.
        tenant: String,
        /// The deleted key.
        key: DayEntryKey,
    },
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<(String, DayEntryKey), StatusValue>,
    persons: BTreeMap<(String, String), PersonRecord>,
    year_configurations: BTreeMap<(String, i32), YearConfigurationRecord>,
    calls: Vec<RemoteCall>,
    passing_writes: usize,
    failing_writes: usize,
    fail_all_writes: bool,
    write_delay: Duration,
}

/// In-memory remote store with failure injection.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next `count` day entry writes fail.
    pub fn fail_next_writes(&self, count: usize) {
        self.fail_writes_after(0, count);
    }

    /// Lets the next `successes` day entry writes through, then fails `count`.
    pub fn fail_writes_after(&self, successes: usize, count: usize) {
        let mut state: MutexGuard<'_, MemoryState> = self.lock();
        state.passing_writes = successes;
        state.failing_writes = count;
    }

    /// Makes every day entry write fail until turned off again.
    pub fn fail_all_writes(&self, enabled: bool) {
        self.lock().fail_all_writes = enabled;
    }

    /// Delays every day entry write by the given duration.
    pub fn set_write_delay(&self, delay: Duration) {
        self.lock().write_delay = delay;
    }

    /// Returns the day entry writes received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Returns the stored status of a key.
    #[must_use]
    pub fn get(&self, tenant: &TenantId, key: &DayEntryKey) -> Option<StatusValue> {
        self.lock()
            .entries
            .get(&(tenant.value().to_string(), key.clone()))
            .copied()
    }

    /// Returns the number of stored day entries across all tenants.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Logs a write and decides whether it fails. Returns the delay to apply.
    fn begin_write(&self, call: RemoteCall) -> (bool, Duration) {
        let mut state: MutexGuard<'_, MemoryState> = self.lock();
        state.calls.push(call);

        let should_fail: bool = if state.fail_all_writes {
            true
        } else if state.passing_writes > 0 {
            state.passing_writes -= 1;
            false
        } else if state.failing_writes > 0 {
            state.failing_writes -= 1;
            true
        } else {
            false
        };

        (should_fail, state.write_delay)
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn upsert(
        &self,
        tenant: &TenantId,
        record: &DayEntryRecord,
    ) -> Result<(), PersistenceError> {
        let (should_fail, delay): (bool, Duration) = self.begin_write(RemoteCall::Upsert {
            tenant: tenant.value().to_string(),
            record: record.clone(),
        });

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if should_fail {
            warn!(key = ?record.key(), "Injected upsert failure");
            return Err(PersistenceError::InjectedFailure(format!(
                "upsert of {:?} rejected",
                record.key()
            )));
        }

        debug!(key = ?record.key(), status = %record.status, "Stored day entry in memory");
        self.lock()
            .entries
            .insert((tenant.value().to_string(), record.key()), record.status);
        Ok(())
    }

    async fn upsert_many(
        &self,
        tenant: &TenantId,
        records: &[DayEntryRecord],
    ) -> Result<(), PersistenceError> {
        let mut delay: Duration = Duration::ZERO;
        let mut rejected: Option<&DayEntryRecord> = None;
        for record in records {
            let (should_fail, write_delay): (bool, Duration) =
                self.begin_write(RemoteCall::Upsert {
                    tenant: tenant.value().to_string(),
                    record: record.clone(),
                });
            delay = write_delay;
            if should_fail {
                rejected = Some(record);
                break;
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(record) = rejected {
            warn!(key = ?record.key(), "Injected batch upsert failure");
            return Err(PersistenceError::InjectedFailure(format!(
                "batch upsert rejected at {:?}",
                record.key()
            )));
        }

        let mut state: MutexGuard<'_, MemoryState> = self.lock();
        for record in records {
            state
                .entries
                .insert((tenant.value().to_string(), record.key()), record.status);
        }
        drop(state);
        debug!(count = records.len(), "Stored day entries in memory");
        Ok(())
    }

    async fn delete(&self, tenant: &TenantId, key: &DayEntryKey) -> Result<(), PersistenceError> {
        let (should_fail, delay): (bool, Duration) = self.begin_write(RemoteCall::Delete {
            tenant: tenant.value().to_string(),
            key: key.clone(),
        });

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if should_fail {
            warn!(?key, "Injected delete failure");
            return Err(PersistenceError::InjectedFailure(format!(
                "delete of {key:?} rejected"
            )));
        }

        self.lock()
            .entries
            .remove(&(tenant.value().to_string(), key.clone()));
        Ok(())
    }

    async fn query_by_year(
        &self,
        tenant: &TenantId,
        year: i32,
    ) -> Result<Vec<DayEntryRecord>, PersistenceError> {
        Ok(self
            .lock()
            .entries
            .iter()
            .filter(|((entry_tenant, key), _)| entry_tenant == tenant.value() && key.year == year)
            .map(|((_, key), status)| DayEntryRecord::new(key.clone(), *status))
            .collect())
    }

    async fn list_persons(&self, tenant: &TenantId) -> Result<Vec<PersonRecord>, PersistenceError> {
        let mut persons: Vec<PersonRecord> = self
            .lock()
            .persons
            .iter()
            .filter(|((person_tenant, _), _)| person_tenant == tenant.value())
            .map(|(_, person)| person.clone())
            .collect();
        persons.sort_by(|a, b| {
            a.order_index
                .cmp(&b.order_index)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(persons)
    }

    async fn upsert_person(
        &self,
        tenant: &TenantId,
        person: &PersonRecord,
    ) -> Result<(), PersistenceError> {
        self.lock().persons.insert(
            (tenant.value().to_string(), person.id.clone()),
            person.clone(),
        );
        Ok(())
    }

    async fn delete_person(
        &self,
        tenant: &TenantId,
        person_id: &str,
    ) -> Result<(), PersistenceError> {
        let mut state: MutexGuard<'_, MemoryState> = self.lock();
        if state
            .persons
            .remove(&(tenant.value().to_string(), person_id.to_string()))
            .is_none()
        {
            return Err(PersistenceError::NotFound(format!(
                "Person '{person_id}' in tenant '{}'",
                tenant.value()
            )));
        }
        state.entries.retain(|(entry_tenant, key), _| {
            !(entry_tenant == tenant.value() && key.person_id == person_id)
        });
        drop(state);
        Ok(())
    }

    async fn get_year_configuration(
        &self,
        tenant: &TenantId,
        year: i32,
    ) -> Result<Option<YearConfigurationRecord>, PersistenceError> {
        Ok(self
            .lock()
            .year_configurations
            .get(&(tenant.value().to_string(), year))
            .copied())
    }

    async fn upsert_year_configuration(
        &self,
        tenant: &TenantId,
        config: &YearConfigurationRecord,
    ) -> Result<(), PersistenceError> {
        self.lock()
            .year_configurations
            .insert((tenant.value().to_string(), config.year), *config);
        Ok(())
    }
}
