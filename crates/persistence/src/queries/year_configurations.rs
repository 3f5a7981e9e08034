// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::year_configurations;
use crate::error::PersistenceError;
use crate::records::YearConfigurationRecord;

#[derive(Queryable, Selectable)]
#[diesel(table_name = year_configurations)]
struct YearConfigurationRow {
    year: i32,
    vacation_entitlement_days: i32,
    holidays_imported: i32,
}

/// Retrieves the configuration of a year.
///
/// # Errors
///
/// Returns an error if the query fails or the stored entitlement is out of range.
/// Returns `Ok(None)` if the year was never configured.
pub fn get_year_configuration(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    year: i32,
) -> Result<Option<YearConfigurationRecord>, PersistenceError> {
    let row: Option<YearConfigurationRow> = year_configurations::table
        .filter(year_configurations::tenant_id.eq(tenant_id))
        .filter(year_configurations::year.eq(year))
        .select(YearConfigurationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| {
        let vacation_entitlement_days: u16 = u16::try_from(row.vacation_entitlement_days)
            .map_err(|_| {
                PersistenceError::InvalidRecord(format!(
                    "Vacation entitlement {} of year {} is out of range",
                    row.vacation_entitlement_days, row.year
                ))
            })?;
        Ok(YearConfigurationRecord {
            year: row.year,
            vacation_entitlement_days,
            holidays_imported: row.holidays_imported != 0,
        })
    })
    .transpose()
}
