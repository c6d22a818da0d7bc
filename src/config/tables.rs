use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZIP_TABLE_PATH: &str = "data/uszips.csv";
pub const DEFAULT_MARKET_TABLE_PATH: &str = "data/markets.csv";
pub const DEFAULT_ZIP_ENCODING: &str = "utf-8";
pub const DEFAULT_MARKET_ENCODING: &str = "windows-1252";

/// Header names of the ZIP reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipColumns {
    pub zip: String,
    pub lat: String,
    pub lon: String,
}

impl Default for ZipColumns {
    fn default() -> Self {
        Self {
            zip: "zip".to_string(),
            lat: "lat".to_string(),
            lon: "lng".to_string(),
        }
    }
}

impl ZipColumns {
    pub fn validate(&self) -> Result<()> {
        validate_non_empty_string("zip_table.columns.zip", &self.zip)?;
        validate_non_empty_string("zip_table.columns.lat", &self.lat)?;
        validate_non_empty_string("zip_table.columns.lon", &self.lon)
    }
}

/// Header names of the market reference table.
///
/// The source data labels latitude `location_y` and longitude `location_x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketColumns {
    pub name: String,
    pub address: String,
    pub lat: String,
    pub lon: String,
    pub description: String,
}

impl Default for MarketColumns {
    fn default() -> Self {
        Self {
            name: "listing_name".to_string(),
            address: "location_address".to_string(),
            lat: "location_y".to_string(),
            lon: "location_x".to_string(),
            description: "location_desc".to_string(),
        }
    }
}

impl MarketColumns {
    pub fn validate(&self) -> Result<()> {
        validate_non_empty_string("market_table.columns.name", &self.name)?;
        validate_non_empty_string("market_table.columns.address", &self.address)?;
        validate_non_empty_string("market_table.columns.lat", &self.lat)?;
        validate_non_empty_string("market_table.columns.lon", &self.lon)?;
        validate_non_empty_string("market_table.columns.description", &self.description)
    }
}
