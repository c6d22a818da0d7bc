use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipRecord {
    pub zip: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub description: String,
}

/// A market inside the search radius, with its distance in miles rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(flatten)]
    pub market: MarketRecord,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    EmptyCoordinate,
    InvalidCoordinate { field: String, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyCoordinate => write!(f, "empty coordinate"),
            SkipReason::InvalidCoordinate { field, value } => {
                write!(f, "invalid {} value '{}'", field, value)
            }
        }
    }
}

/// A market table row the loader left out, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: SkipReason,
    pub raw: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketLoad {
    pub markets: Vec<MarketRecord>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub zip: String,
    pub origin: Coordinate,
    pub matches: Vec<RankedMatch>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    NotFound { zip: String },
    Found(SearchResult),
}

pub const ZIP_NOT_FOUND_MESSAGE: &str = "ZIP code not found.";

impl QueryOutcome {
    pub fn zip(&self) -> &str {
        match self {
            QueryOutcome::NotFound { zip } => zip,
            QueryOutcome::Found(result) => &result.zip,
        }
    }

    /// Ranked matches, empty when the ZIP code did not resolve.
    pub fn matches(&self) -> &[RankedMatch] {
        match self {
            QueryOutcome::NotFound { .. } => &[],
            QueryOutcome::Found(result) => &result.matches,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryOutcome::NotFound { .. })
    }

    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            QueryOutcome::NotFound { .. } => Some(ZIP_NOT_FOUND_MESSAGE),
            QueryOutcome::Found(_) => None,
        }
    }
}
