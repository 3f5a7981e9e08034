// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-tenant boards.
//!
//! Each tenant has at most one loaded year at a time, held by a
//! [`WriteCoordinator`]. Loading another year closes the previous board to
//! new writes and flushes its outstanding ones before it is replaced.
//!
//! Reloads of one tenant are serialized by a per-tenant lock. The map of
//! boards is only locked to look up or swap a board, never across a remote
//! call, so one tenant's reload does not stall the others.

use absence_board::{AppState, load_state};
use absence_board_domain::{DayEntry, Person, TenantId, YearConfiguration, validate_year};
use absence_board_persistence::{DayEntryRecord, PersistenceError, PersonRecord, RemoteStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, broadcast};
use tracing::info;

use crate::coordinator::{CoordinatorConfig, WriteCoordinator};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::notifications::{Notification, NotificationHub};

/// Holds the loaded board of every tenant.
pub struct BoardRegistry {
    store: Arc<dyn RemoteStore>,
    config: CoordinatorConfig,
    hub: NotificationHub,
    boards: Mutex<HashMap<TenantId, WriteCoordinator>>,
    reloads: Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
}

impl BoardRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>, config: CoordinatorConfig) -> Self {
        Self {
            store,
            config,
            hub: NotificationHub::new(),
            boards: Mutex::new(HashMap::new()),
            reloads: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the remote store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    /// Returns the coordinator settings used for new boards.
    #[must_use]
    pub const fn config(&self) -> CoordinatorConfig {
        self.config
    }

    /// Subscribes to the notifications of every tenant.
    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.hub.subscribe()
    }

    /// Loads a year of a tenant from the remote store and makes it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is invalid or the store cannot be read.
    pub async fn load_year(
        &self,
        tenant_id: &TenantId,
        year: i32,
    ) -> Result<WriteCoordinator, ApiError> {
        validate_year(year).map_err(translate_domain_error)?;

        let reload_lock: Arc<Mutex<()>> = Arc::clone(
            self.reloads
                .lock()
                .await
                .entry(tenant_id.clone())
                .or_default(),
        );
        let _reloading: MutexGuard<'_, ()> = reload_lock.lock().await;

        let previous: Option<WriteCoordinator> = self.boards.lock().await.get(tenant_id).cloned();
        if let Some(previous) = &previous {
            previous.close();
            previous.flush().await;
        }

        let state: AppState = match read_state(self.store.as_ref(), tenant_id, year).await {
            Ok(state) => state,
            Err(err) => {
                if let Some(previous) = &previous {
                    previous.reopen();
                }
                return Err(translate_persistence_error(err));
            }
        };
        let entry_count: usize = state.store.len();
        let person_count: usize = state.persons.len();

        let coordinator: WriteCoordinator = WriteCoordinator::new(
            state,
            Arc::clone(&self.store),
            self.config,
            self.hub.clone(),
        );
        self.boards
            .lock()
            .await
            .insert(tenant_id.clone(), coordinator.clone());

        info!(
            tenant = %tenant_id.value(),
            year,
            persons = person_count,
            entries = entry_count,
            "Loaded year"
        );
        Ok(coordinator)
    }

    /// Returns the current board of a tenant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if no year was loaded yet.
    pub async fn board(&self, tenant_id: &TenantId) -> Result<WriteCoordinator, ApiError> {
        self.boards
            .lock()
            .await
            .get(tenant_id)
            .cloned()
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Loaded year"),
                message: format!("No year loaded for tenant '{}'", tenant_id.value()),
            })
    }

    /// Returns the current board of a tenant, requiring a specific year.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::YearNotLoaded` if another year (or none) is loaded.
    pub async fn board_for_year(
        &self,
        tenant_id: &TenantId,
        year: i32,
    ) -> Result<WriteCoordinator, ApiError> {
        let board: WriteCoordinator = self
            .board(tenant_id)
            .await
            .map_err(|_| ApiError::YearNotLoaded {
                requested: year,
                loaded: None,
            })?;
        let loaded: i32 = board.year();
        if loaded != year {
            return Err(ApiError::YearNotLoaded {
                requested: year,
                loaded: Some(loaded),
            });
        }
        Ok(board)
    }

    /// Flushes the pending writes of every tenant. Returns the number flushed.
    pub async fn flush_all(&self) -> usize {
        let boards: Vec<WriteCoordinator> = self.boards.lock().await.values().cloned().collect();
        let mut flushed: usize = 0;
        for board in boards {
            flushed += board.flush().await;
        }
        flushed
    }
}

/// Reads persons, year settings and entries of one year into a fresh state.
async fn read_state(
    store: &dyn RemoteStore,
    tenant_id: &TenantId,
    year: i32,
) -> Result<AppState, PersistenceError> {
    let persons: Vec<Person> = store
        .list_persons(tenant_id)
        .await?
        .iter()
        .map(PersonRecord::to_person)
        .collect::<Result<_, _>>()?;
    let year_configuration: Option<YearConfiguration> = store
        .get_year_configuration(tenant_id, year)
        .await?
        .map(YearConfiguration::from);
    let entries: Vec<DayEntry> = store
        .query_by_year(tenant_id, year)
        .await?
        .iter()
        .map(DayEntryRecord::to_entry)
        .collect::<Result<_, _>>()?;

    Ok(load_state(
        tenant_id.clone(),
        year,
        persons,
        year_configuration,
        entries,
    ))
}

