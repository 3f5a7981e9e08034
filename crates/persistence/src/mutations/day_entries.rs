// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::debug;

use crate::diesel_schema::day_entries;
use crate::error::PersistenceError;
use crate::records::{DayEntryKey, DayEntryRecord};

/// Creates or overwrites a day entry.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tenant_id` - The tenant the entry belongs to
/// * `record` - The entry to write
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn upsert_day_entry(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    record: &DayEntryRecord,
) -> Result<(), PersistenceError> {
    debug!(
        tenant_id,
        person_id = %record.person_id,
        year = record.year,
        month = record.month,
        day = record.day,
        status = %record.status,
        "Upserting day entry"
    );

    diesel::insert_into(day_entries::table)
        .values((
            day_entries::tenant_id.eq(tenant_id),
            day_entries::person_id.eq(&record.person_id),
            day_entries::year.eq(record.year),
            day_entries::month.eq(i32::from(record.month)),
            day_entries::day.eq(i32::from(record.day)),
            day_entries::status.eq(record.status.as_str()),
        ))
        .on_conflict((
            day_entries::tenant_id,
            day_entries::person_id,
            day_entries::year,
            day_entries::month,
            day_entries::day,
        ))
        .do_update()
        .set((
            day_entries::status.eq(excluded(day_entries::status)),
            day_entries::updated_at.eq(excluded(day_entries::updated_at)),
        ))
        .execute(conn)?;

    Ok(())
}

/// Creates or overwrites several day entries in one transaction.
///
/// Either every record is written or none is.
///
/// # Errors
///
/// Returns an error if any statement fails; the transaction is rolled back.
pub fn upsert_day_entries(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    records: &[DayEntryRecord],
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        for record in records {
            upsert_day_entry(conn, tenant_id, record)?;
        }
        Ok(())
    })?;

    debug!(tenant_id, count = records.len(), "Upserted day entries");
    Ok(())
}

/// Deletes a day entry. Deleting a missing entry is not an error.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn delete_day_entry(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    key: &DayEntryKey,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        day_entries::table
            .filter(day_entries::tenant_id.eq(tenant_id))
            .filter(day_entries::person_id.eq(&key.person_id))
            .filter(day_entries::year.eq(key.year))
            .filter(day_entries::month.eq(i32::from(key.month)))
            .filter(day_entries::day.eq(i32::from(key.day))),
    )
    .execute(conn)?;

    debug!(
        tenant_id,
        person_id = %key.person_id,
        year = key.year,
        month = key.month,
        day = key.day,
        deleted,
        "Deleted day entry"
    );

    Ok(())
}
