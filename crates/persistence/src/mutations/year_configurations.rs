// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::info;

use crate::diesel_schema::year_configurations;
use crate::error::PersistenceError;
use crate::records::YearConfigurationRecord;

/// Creates or overwrites the configuration of a year.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn upsert_year_configuration(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    config: &YearConfigurationRecord,
) -> Result<(), PersistenceError> {
    diesel::insert_into(year_configurations::table)
        .values((
            year_configurations::tenant_id.eq(tenant_id),
            year_configurations::year.eq(config.year),
            year_configurations::vacation_entitlement_days
                .eq(i32::from(config.vacation_entitlement_days)),
            year_configurations::holidays_imported.eq(i32::from(config.holidays_imported)),
        ))
        .on_conflict((year_configurations::tenant_id, year_configurations::year))
        .do_update()
        .set((
            year_configurations::vacation_entitlement_days
                .eq(excluded(year_configurations::vacation_entitlement_days)),
            year_configurations::holidays_imported
                .eq(excluded(year_configurations::holidays_imported)),
        ))
        .execute(conn)?;

    info!(
        tenant_id,
        year = config.year,
        vacation_entitlement_days = config.vacation_entitlement_days,
        holidays_imported = config.holidays_imported,
        "Saved year configuration"
    );
    Ok(())
}
