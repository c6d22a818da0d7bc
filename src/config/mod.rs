pub mod cli;
pub mod tables;
pub mod toml_config;

use crate::core::ranker::EARTH_RADIUS_MILES;
use crate::utils::error::Result;
use crate::utils::validation::{validate_encoding, validate_path, validate_range};

/// Largest meaningful search radius: half the Earth's circumference.
pub const MAX_RADIUS_MILES: f64 = std::f64::consts::PI * EARTH_RADIUS_MILES;

pub(crate) fn validate_table_settings(
    prefix: &str,
    path: &str,
    encoding: &str,
) -> Result<()> {
    validate_path(&format!("{}.path", prefix), path)?;
    validate_encoding(&format!("{}.encoding", prefix), encoding)
}

pub(crate) fn validate_radius(field: &str, radius_miles: f64) -> Result<()> {
    validate_range(field, radius_miles, 0.0, MAX_RADIUS_MILES)
}

#[cfg(feature = "cli")]
pub use command_line::CliConfig;

#[cfg(feature = "cli")]
mod command_line {
    use super::tables::{
        DEFAULT_MARKET_ENCODING, DEFAULT_MARKET_TABLE_PATH, DEFAULT_ZIP_ENCODING,
        DEFAULT_ZIP_TABLE_PATH,
    };
    use super::{validate_radius, validate_table_settings};
    use crate::app::report::OutputFormat;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "market-finder")]
    #[command(about = "Find markets within a radius of a US ZIP code, nearest first")]
    pub struct CliConfig {
        /// ZIP codes to search around
        #[arg(required = true)]
        pub zip_codes: Vec<String>,

        /// Directory that relative table paths resolve against
        #[arg(long, default_value = ".")]
        pub base_dir: String,

        #[arg(long, default_value = DEFAULT_ZIP_TABLE_PATH)]
        pub zip_file: String,

        #[arg(long, default_value = DEFAULT_MARKET_TABLE_PATH)]
        pub markets_file: String,

        #[arg(long, default_value = DEFAULT_ZIP_ENCODING)]
        pub zip_encoding: String,

        #[arg(long, default_value = DEFAULT_MARKET_ENCODING)]
        pub market_encoding: String,

        /// Search radius in miles
        #[arg(long, default_value_t = crate::core::ranker::DEFAULT_RADIUS_MILES)]
        pub radius: f64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        pub format: OutputFormat,

        /// Read each reference table once for all ZIP codes instead of once per query
        #[arg(long)]
        pub cache: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn zip_table_path(&self) -> &str {
            &self.zip_file
        }

        fn zip_table_encoding(&self) -> &str {
            &self.zip_encoding
        }

        fn market_table_path(&self) -> &str {
            &self.markets_file
        }

        fn market_table_encoding(&self) -> &str {
            &self.market_encoding
        }

        fn radius_miles(&self) -> f64 {
            self.radius
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("base_dir", &self.base_dir)?;
            validate_table_settings("zip_table", &self.zip_file, &self.zip_encoding)?;
            validate_table_settings("market_table", &self.markets_file, &self.market_encoding)?;
            validate_radius("radius", self.radius)
        }
    }

}
