// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a loaded year.
//!
//! One row per person and month with the weekday counts of every status,
//! followed by a `Gesamt` row per person carrying the yearly totals and the
//! remaining vacation. Columns are separated by `;` so spreadsheet programs
//! with a German locale open the file directly.

use absence_board::{AppState, CoreError, StatusCounts, month_counts, year_counts};
use absence_board_domain::{
    StatusValue, VacationBalance, calculate_vacation_balance, month_from_index, month_name,
};
use thiserror::Error;
use time::Month;
use tracing::debug;

/// Column separator of the export.
pub const CSV_DELIMITER: u8 = b';';

/// Label of the per-person total row.
pub const TOTAL_ROW_LABEL: &str = "Gesamt";

/// Errors that can occur while building the export.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// A record could not be written.
    #[error("Failed to write CSV record: {0}")]
    Write(#[from] csv::Error),
    /// The buffered output could not be recovered from the writer.
    #[error("Failed to finish CSV output: {0}")]
    Finish(String),
    /// The output is not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    /// The counts could not be computed.
    #[error("Failed to aggregate day counts: {0}")]
    Aggregation(#[from] CoreError),
}

/// Renders the export of the loaded year.
///
/// # Errors
///
/// Returns an error if the counts cannot be computed or the output cannot be
/// written.
pub fn export_year_csv(state: &AppState) -> Result<String, CsvExportError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(Vec::new());

    let mut header: Vec<&str> = vec!["Name", "Monat"];
    header.extend(StatusValue::ALL.iter().map(StatusValue::label));
    header.push("Resturlaub");
    writer.write_record(&header)?;

    let mut rows: usize = 0;
    for person in state.persons_in_order() {
        for index in 0..12 {
            let month: Month = month_from_index(index).map_err(CoreError::from)?;
            let counts: StatusCounts = month_counts(state, &person.id, month)?;
            writer.write_record(count_row(&person.name, month_name(month), &counts, None))?;
            rows += 1;
        }

        let totals: StatusCounts = year_counts(state, &person.id)?;
        let balance: VacationBalance =
            calculate_vacation_balance(&state.year_configuration, totals.vacation);
        writer.write_record(count_row(
            &person.name,
            TOTAL_ROW_LABEL,
            &totals,
            Some(balance.remaining_days),
        ))?;
        rows += 1;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|err| CsvExportError::Finish(err.to_string()))?;
    debug!(year = state.year, rows, "Rendered CSV export");
    Ok(String::from_utf8(bytes)?)
}

fn count_row(
    name: &str,
    period: &str,
    counts: &StatusCounts,
    remaining: Option<i32>,
) -> Vec<String> {
    let mut row: Vec<String> = vec![name.to_string(), period.to_string()];
    row.extend(
        StatusValue::ALL
            .iter()
            .map(|status| counts.get(*status).to_string()),
    );
    row.push(remaining.map(|days| days.to_string()).unwrap_or_default());
    row
}
