use crate::config::tables::MarketColumns;
use crate::core::Coordinate;
use crate::domain::model::{MarketLoad, MarketRecord, SkipReason, SkippedRow};
use crate::utils::error::Result;
use csv::{ReaderBuilder, StringRecord};

/// Trims whitespace and one trailing comma from a coordinate cell.
pub fn clean_coordinate(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(',').unwrap_or(trimmed).trim()
}

/// Removes a single pair of enclosing double quotes; anything else is returned as-is.
pub fn strip_enclosing_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

struct ColumnIndexes {
    name: Option<usize>,
    address: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
    description: Option<usize>,
}

impl ColumnIndexes {
    fn new(headers: &StringRecord, columns: &MarketColumns) -> Self {
        let find = |column: &str| {
            let idx = headers.iter().position(|h| h == column);
            if idx.is_none() {
                tracing::warn!("Market table has no '{}' column", column);
            }
            idx
        };

        Self {
            name: find(&columns.name),
            address: find(&columns.address),
            lat: find(&columns.lat),
            lon: find(&columns.lon),
            description: find(&columns.description),
        }
    }
}

fn cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

/// Parses the market table into clean records.
///
/// Rows with an empty or unparsable coordinate are skipped and reported in
/// [`MarketLoad::skipped`]; they never abort the load. Output keeps table order.
pub fn load_markets(text: &str, columns: &MarketColumns) -> Result<MarketLoad> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let idx = ColumnIndexes::new(&headers, columns);
    let mut load = MarketLoad::default();

    for result in reader.records() {
        // Decoded text and flexible records leave csv nothing per-row to reject.
        let record = result?;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let lat_str = clean_coordinate(cell(&record, idx.lat));
        let lon_str = clean_coordinate(cell(&record, idx.lon));

        if lat_str.is_empty() || lon_str.is_empty() {
            tracing::debug!("Skipping market row on line {} with no coordinates", line);
            load.skipped.push(skipped(line, SkipReason::EmptyCoordinate, &record));
            continue;
        }

        let lat = parse_coordinate(lat_str);
        let lon = parse_coordinate(lon_str);
        let (lat, lon) = match (lat, lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            (lat, _) => {
                let (field, value) = if lat.is_none() {
                    (&columns.lat, lat_str)
                } else {
                    (&columns.lon, lon_str)
                };
                let reason = SkipReason::InvalidCoordinate {
                    field: field.clone(),
                    value: value.to_string(),
                };
                tracing::warn!("Skipping invalid market row on line {}: {}", line, reason);
                load.skipped.push(skipped(line, reason, &record));
                continue;
            }
        };

        load.markets.push(MarketRecord {
            name: cell(&record, idx.name).trim().to_string(),
            address: strip_enclosing_quotes(cell(&record, idx.address).trim()).to_string(),
            coordinate: Coordinate::new(lat, lon),
            description: cell(&record, idx.description).trim().to_string(),
        });
    }

    tracing::debug!(
        "Loaded {} markets ({} rows skipped)",
        load.markets.len(),
        load.skipped.len()
    );

    Ok(load)
}

fn skipped(line: u64, reason: SkipReason, record: &StringRecord) -> SkippedRow {
    SkippedRow {
        line,
        reason,
        raw: record.iter().map(str::to_string).collect(),
    }
}
