use crate::config::tables::ZipColumns;
use crate::core::Coordinate;
use crate::domain::model::ZipRecord;
use crate::utils::error::{FinderError, Result};
use csv::{ReaderBuilder, StringRecord};

const TABLE: &str = "ZIP";

fn column_index(headers: &StringRecord, table: &str, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| FinderError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
}

/// Scans the ZIP table for the first row whose ZIP column equals `zip_code` exactly.
///
/// No normalization is applied to the query. An empty query or an empty table never matches.
pub fn find_zip_record(text: &str, zip_code: &str, columns: &ZipColumns) -> Result<Option<ZipRecord>> {
    if zip_code.is_empty() {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        tracing::debug!("ZIP table is empty");
        return Ok(None);
    }
    let zip_idx = column_index(&headers, TABLE, &columns.zip)?;
    let lat_idx = column_index(&headers, TABLE, &columns.lat)?;
    let lon_idx = column_index(&headers, TABLE, &columns.lon)?;

    for result in reader.records() {
        let record = result?;
        if record.get(zip_idx) != Some(zip_code) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let lat = parse_coordinate(&record, lat_idx, zip_code, line, &columns.lat)?;
        let lon = parse_coordinate(&record, lon_idx, zip_code, line, &columns.lon)?;

        tracing::debug!("ZIP {} resolved on line {} to ({}, {})", zip_code, line, lat, lon);
        return Ok(Some(ZipRecord {
            zip: zip_code.to_string(),
            coordinate: Coordinate::new(lat, lon),
        }));
    }

    Ok(None)
}

/// Maps a ZIP code to its coordinate, `None` when the table has no such ZIP.
pub fn resolve(text: &str, zip_code: &str, columns: &ZipColumns) -> Result<Option<Coordinate>> {
    Ok(find_zip_record(text, zip_code, columns)?.map(|record| record.coordinate))
}

fn parse_coordinate(
    record: &StringRecord,
    idx: usize,
    zip_code: &str,
    line: u64,
    field: &str,
) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FinderError::MalformedZipRow {
            zip: zip_code.to_string(),
            line,
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}
