//! Fixed-grid extract reading.

use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use dsd_model::{AccountRow, YearKey};

use crate::amount::parse_amount;
use crate::error::{IngestError, Result};
use crate::layout::{DEFAULT_YEARS, SheetLayout};

/// The parsed extract: reporting years in column order plus the account rows
/// of the data range, labels untrimmed so indentation survives to the
/// hierarchy builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetExtract {
    pub years: Vec<YearKey>,
    pub rows: Vec<AccountRow>,
}

/// Read an extract from a CSV file on disk.
pub fn read_extract_path(path: &Path, layout: &SheetLayout) -> Result<SheetExtract> {
    let file = std::fs::File::open(path)?;
    read_extract(file, layout)
}

/// Read an extract from any reader carrying the headerless CSV grid.
pub fn read_extract<R: io::Read>(reader: R, layout: &SheetLayout) -> Result<SheetExtract> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid: Vec<csv::StringRecord> = Vec::new();
    for record in csv_reader.records() {
        grid.push(record?);
    }

    let required = layout.required_columns();
    let width = grid.iter().map(csv::StringRecord::len).max().unwrap_or(0);
    if width < required {
        return Err(IngestError::TooFewColumns {
            required,
            found: width,
        });
    }

    let years = detect_years(&grid, layout)?;

    if layout.data_start_row >= grid.len() {
        return Err(IngestError::NoAccountRows);
    }
    let data_end = layout.data_end_row.min(grid.len() - 1);
    let data_rows = &grid[layout.data_start_row..=data_end];

    let mut rows: Vec<AccountRow> = Vec::with_capacity(data_rows.len());
    let mut parsed_per_year = vec![0usize; years.len()];
    for record in data_rows {
        let mut row = AccountRow::new(cell(record, layout.label_column));
        for (year_idx, (column, year)) in years.iter().enumerate() {
            let amount = parse_amount(&cell(record, *column));
            if amount.is_some() {
                parsed_per_year[year_idx] += 1;
            }
            row.amounts.insert(year.clone(), amount);
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(IngestError::NoAccountRows);
    }

    // Years where no cell parsed carry no signal; keep only the live ones.
    let mut live_years: Vec<YearKey> = Vec::with_capacity(years.len());
    for ((column, year), parsed) in years.iter().zip(&parsed_per_year) {
        if *parsed == 0 {
            warn!(
                column = %column_letter(*column),
                year = %year,
                "year column yielded no parseable amounts, dropping"
            );
            for row in &mut rows {
                row.amounts.remove(year);
            }
        } else {
            debug!(
                column = %column_letter(*column),
                year = %year,
                rows = parsed,
                "year column parsed"
            );
            live_years.push(year.clone());
        }
    }
    if live_years.is_empty() {
        return Err(IngestError::NoYearData);
    }

    info!(
        years = live_years.len(),
        rows = rows.len(),
        "extract ingested"
    );
    Ok(SheetExtract {
        years: live_years,
        rows,
    })
}

/// Map amount columns to year labels from the header row, falling back to
/// the conventional labels when the header carries none.
fn detect_years(
    grid: &[csv::StringRecord],
    layout: &SheetLayout,
) -> Result<Vec<(usize, YearKey)>> {
    let header = grid
        .get(layout.year_header_row)
        .ok_or(IngestError::MissingHeaderRow {
            row: layout.year_header_row,
        })?;

    let mut years: Vec<(usize, YearKey)> = Vec::new();
    for &column in &layout.amount_columns {
        let label = cell(header, column).trim().to_string();
        if !label.is_empty() && !label.eq_ignore_ascii_case("nan") {
            debug!(column = %column_letter(column), year = %label, "year header detected");
            years.push((column, label));
        }
    }

    if years.is_empty() {
        warn!("no year labels in header row, using default year mapping");
        years = layout
            .amount_columns
            .iter()
            .zip(DEFAULT_YEARS)
            .map(|(&column, year)| (column, year.to_string()))
            .collect();
    }
    Ok(years)
}

fn cell(record: &csv::StringRecord, column: usize) -> String {
    record.get(column).unwrap_or("").to_string()
}

/// Spreadsheet-style letter for a column index, for log readability.
fn column_letter(column: usize) -> String {
    if column < 26 {
        char::from(b'A' + column as u8).to_string()
    } else {
        format!("#{column}")
    }
}
