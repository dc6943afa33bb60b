//! Reads the ridership spreadsheet into [`RidershipRecord`]s.
//!
//! `.xlsx`/`.xlsm` workbooks are read from their first worksheet; any other
//! file is treated as a CSV export. The only coercion performed is on the
//! boarding column, which must hold a non-negative integer (or a float that
//! truncates to one). Every other problem with the file is reported as an
//! [`Error`] and is meant to be fatal.

use crate::record::{
    RidershipRecord, BOARDINGS_COLUMN, LAT_COLUMN, LON_COLUMN, REQUIRED_COLUMNS, ROUTE_COLUMN,
    STOP_COLUMN,
};
use crate::{Error, Result};
use calamine::{Data, Reader, Xlsx};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufReader},
    path::Path,
};
use tracing::{debug, info};

const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "FINAL_ETC_ROUTE_NAME")]
    route: String,
    #[serde(rename = "FINAL_ETC_STOP_NAME")]
    stop: String,
    #[serde(rename = "TOTAL_ON")]
    boardings: String,
    #[serde(rename = "stop_lat")]
    lat: f64,
    #[serde(rename = "stop_lon")]
    lon: f64,
}

/// Loads all records from the file at `path`, picking the reader from its
/// extension.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RidershipRecord>> {
    let path = path.as_ref();
    info!("loading ridership records from {}", path.display());
    let file = File::open(path).map_err(|source| Error::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let records = if is_workbook(path) {
        read_workbook(BufReader::new(file))?
    } else {
        read_records(file)?
    };
    info!(
        rows = records.len(),
        "loaded ridership records from {}",
        path.display()
    );
    Ok(records)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Reads records from any CSV source with a header row.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<RidershipRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    column_positions(reader.headers()?.iter())?;

    let mut records = vec![];
    for (index, raw) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = raw?;
        let boardings = coerce_boardings(&raw.boardings)
            .ok_or_else(|| Error::boarding_count(index + 1, raw.boardings.as_str()))?;
        records.push(RidershipRecord {
            index,
            route: raw.route,
            stop: raw.stop,
            boardings,
            lat: raw.lat,
            lon: raw.lon,
        });
    }

    check_route_totals(&records)?;
    Ok(records)
}

/// Reads records from the first worksheet of an xlsx workbook. The first row
/// holds the column names; fully blank rows are skipped.
pub fn read_workbook<R: io::Read + io::Seek>(reader: R) -> Result<Vec<RidershipRecord>> {
    let mut workbook: Xlsx<R> = Xlsx::new(reader)?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or(Error::EmptyWorkbook)??;

    let mut rows = sheet.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    let [route, stop, boardings, lat, lon] = column_positions(header.iter().map(String::as_str))?;

    let mut records = vec![];
    let data_rows = rows.filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)));
    for (index, row) in data_rows.enumerate() {
        let row_number = index + 1;
        let text = |pos: usize| row.get(pos).map(cell_text).unwrap_or_default();

        let raw_boardings = text(boardings);
        let count = coerce_boardings(&raw_boardings)
            .ok_or_else(|| Error::boarding_count(row_number, raw_boardings.as_str()))?;
        records.push(RidershipRecord {
            index,
            route: text(route),
            stop: text(stop),
            boardings: count,
            lat: coordinate(row.get(lat), row_number, LAT_COLUMN)?,
            lon: coordinate(row.get(lon), row_number, LON_COLUMN)?,
        });
    }

    check_route_totals(&records)?;
    Ok(records)
}

/// Positions of the required columns, in [`REQUIRED_COLUMNS`] order.
fn column_positions<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<[usize; 5]> {
    let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let mut positions = [0; 5];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| *h == column)
            .ok_or(Error::MissingColumn(column))?;
    }
    debug!(
        ?positions,
        "ridership columns: {ROUTE_COLUMN}, {STOP_COLUMN}, {BOARDINGS_COLUMN}, {LAT_COLUMN}, {LON_COLUMN}"
    );
    Ok(positions)
}

/// Every route's boarding total must fit in a `u64` for aggregation.
fn check_route_totals(records: &[RidershipRecord]) -> Result<()> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for record in records {
        let total = totals.entry(record.route.as_str()).or_default();
        *total = total
            .checked_add(record.boardings)
            .ok_or_else(|| Error::RouteTotalOverflow {
                route: record.route.to_owned(),
            })?;
    }
    Ok(())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn coordinate(cell: Option<&Data>, row: usize, column: &'static str) -> Result<f64> {
    let invalid = |value: String| Error::Coordinate { row, column, value };
    match cell {
        Some(Data::Float(value)) => Ok(*value),
        Some(Data::Int(value)) => Ok(*value as f64),
        Some(Data::String(s)) => s.trim().parse().map_err(|_| invalid(s.to_owned())),
        other => Err(invalid(other.map(cell_text).unwrap_or_default())),
    }
}

/// Coerces a boarding cell to an integer count.
///
/// Integer text is taken as-is; finite non-negative float text is truncated
/// toward zero. Returns `None` for anything else.
pub fn coerce_boardings(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 {
        Some(value.trunc() as u64)
    } else {
        None
    }
}
