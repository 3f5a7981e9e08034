// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::info;

use crate::diesel_schema::{day_entries, persons};
use crate::error::PersistenceError;
use crate::records::PersonRecord;

/// Creates or overwrites a person.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn upsert_person(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    person: &PersonRecord,
) -> Result<(), PersistenceError> {
    diesel::insert_into(persons::table)
        .values((
            persons::tenant_id.eq(tenant_id),
            persons::person_id.eq(&person.id),
            persons::name.eq(&person.name),
            persons::order_index.eq(person.order_index),
            persons::user_id.eq(person.user_id.as_deref()),
        ))
        .on_conflict((persons::tenant_id, persons::person_id))
        .do_update()
        .set((
            persons::name.eq(excluded(persons::name)),
            persons::order_index.eq(excluded(persons::order_index)),
            persons::user_id.eq(excluded(persons::user_id)),
        ))
        .execute(conn)?;

    info!(tenant_id, person_id = %person.id, "Saved person");
    Ok(())
}

/// Deletes a person and every day entry recorded for them.
///
/// Both deletions run in one transaction.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the person does not exist, or an
/// error if a statement fails.
pub fn delete_person(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    person_id: &str,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let deleted_entries: usize = diesel::delete(
            day_entries::table
                .filter(day_entries::tenant_id.eq(tenant_id))
                .filter(day_entries::person_id.eq(person_id)),
        )
        .execute(conn)?;

        let deleted_persons: usize = diesel::delete(
            persons::table
                .filter(persons::tenant_id.eq(tenant_id))
                .filter(persons::person_id.eq(person_id)),
        )
        .execute(conn)?;

        if deleted_persons == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Person '{person_id}' in tenant '{tenant_id}'"
            )));
        }

        info!(tenant_id, person_id, deleted_entries, "Deleted person");
        Ok(())
    })
}
