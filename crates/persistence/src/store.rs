// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use absence_board_domain::TenantId;
use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::records::{DayEntryKey, DayEntryRecord, PersonRecord, YearConfigurationRecord};

/// The durable store behind the in-memory projection.
///
/// All data is scoped by tenant. Writes are idempotent upserts keyed by
/// record identity; there is no version check, so the last write wins.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Creates or overwrites a day entry.
    async fn upsert(&self, tenant: &TenantId, record: &DayEntryRecord)
    -> Result<(), PersistenceError>;

    /// Creates or overwrites several day entries atomically: when an error
    /// is returned, none of the records was stored.
    async fn upsert_many(
        &self,
        tenant: &TenantId,
        records: &[DayEntryRecord],
    ) -> Result<(), PersistenceError>;

    /// Deletes a day entry. Deleting a missing entry succeeds.
    async fn delete(&self, tenant: &TenantId, key: &DayEntryKey) -> Result<(), PersistenceError>;

    /// Returns all day entries of a year, person-specific and global.
    async fn query_by_year(
        &self,
        tenant: &TenantId,
        year: i32,
    ) -> Result<Vec<DayEntryRecord>, PersistenceError>;

    /// Returns all persons of a tenant ordered by `order_index`, then name.
    async fn list_persons(&self, tenant: &TenantId) -> Result<Vec<PersonRecord>, PersistenceError>;

    /// Creates or overwrites a person.
    async fn upsert_person(
        &self,
        tenant: &TenantId,
        person: &PersonRecord,
    ) -> Result<(), PersistenceError>;

    /// Deletes a person together with all their day entries.
    async fn delete_person(&self, tenant: &TenantId, person_id: &str)
    -> Result<(), PersistenceError>;

    /// Returns the settings of a year, if it was ever configured.
    async fn get_year_configuration(
        &self,
        tenant: &TenantId,
        year: i32,
    ) -> Result<Option<YearConfigurationRecord>, PersistenceError>;

    /// Creates or overwrites the settings of a year.
    async fn upsert_year_configuration(
        &self,
        tenant: &TenantId,
        config: &YearConfigurationRecord,
    ) -> Result<(), PersistenceError>;
}
