// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use absence_board_domain::StatusValue;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::day_entries;
use crate::error::PersistenceError;
use crate::records::DayEntryRecord;

/// Diesel Queryable struct for day entry rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = day_entries)]
struct DayEntryRow {
    person_id: String,
    year: i32,
    month: i32,
    day: i32,
    status: String,
}

impl TryFrom<DayEntryRow> for DayEntryRecord {
    type Error = PersistenceError;

    fn try_from(row: DayEntryRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str, value: i32| {
            PersistenceError::InvalidRecord(format!(
                "{field} {value} of entry for '{}' is out of range",
                row.person_id
            ))
        };
        let month: u8 = u8::try_from(row.month).map_err(|_| invalid("month", row.month))?;
        let day: u8 = u8::try_from(row.day).map_err(|_| invalid("day", row.day))?;
        let status: StatusValue = row
            .status
            .parse()
            .map_err(|e: absence_board_domain::DomainError| {
                PersistenceError::InvalidRecord(e.to_string())
            })?;

        Ok(Self {
            person_id: row.person_id,
            year: row.year,
            month,
            day,
            status,
        })
    }
}

/// Retrieves every day entry of a tenant and year.
///
/// Entries are ordered by person id, month and day.
///
/// # Errors
///
/// Returns an error if the query fails or a row is not a valid record.
pub fn query_by_year(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    year: i32,
) -> Result<Vec<DayEntryRecord>, PersistenceError> {
    debug!(tenant_id, year, "Querying day entries");

    let rows: Vec<DayEntryRow> = day_entries::table
        .filter(day_entries::tenant_id.eq(tenant_id))
        .filter(day_entries::year.eq(year))
        .order((
            day_entries::person_id.asc(),
            day_entries::month.asc(),
            day_entries::day.asc(),
        ))
        .select(DayEntryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(DayEntryRecord::try_from).collect()
}
