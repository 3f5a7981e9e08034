// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::persons;
use crate::error::PersistenceError;
use crate::records::PersonRecord;

/// Diesel Queryable struct for person rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = persons)]
struct PersonRow {
    person_id: String,
    name: String,
    order_index: i32,
    user_id: Option<String>,
}

/// Retrieves all persons of a tenant ordered by `order_index`, then name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_persons(
    conn: &mut SqliteConnection,
    tenant_id: &str,
) -> Result<Vec<PersonRecord>, PersistenceError> {
    debug!(tenant_id, "Listing persons");

    let rows: Vec<PersonRow> = persons::table
        .filter(persons::tenant_id.eq(tenant_id))
        .order((persons::order_index.asc(), persons::name.asc()))
        .select(PersonRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| PersonRecord {
            id: row.person_id,
            name: row.name,
            order_index: row.order_index,
            user_id: row.user_id,
        })
        .collect())
}
