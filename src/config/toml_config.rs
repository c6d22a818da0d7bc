use crate::config::tables::{
    MarketColumns, ZipColumns, DEFAULT_MARKET_ENCODING, DEFAULT_MARKET_TABLE_PATH,
    DEFAULT_ZIP_ENCODING, DEFAULT_ZIP_TABLE_PATH,
};
use crate::config::{validate_radius, validate_table_settings};
use crate::core::ranker::DEFAULT_RADIUS_MILES;
use crate::core::ConfigProvider;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub finder: FinderSection,
    #[serde(default)]
    pub zip_table: TableConfig<ZipColumns>,
    #[serde(default)]
    pub market_table: TableConfig<MarketColumns>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderSection {
    pub radius_miles: f64,
    /// Directory that relative table paths resolve against.
    pub base_dir: String,
    pub cache: bool,
}

impl Default for FinderSection {
    fn default() -> Self {
        Self {
            radius_miles: DEFAULT_RADIUS_MILES,
            base_dir: ".".to_string(),
            cache: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig<C> {
    pub path: String,
    pub encoding: String,
    #[serde(default)]
    pub columns: C,
}

impl Default for TableConfig<ZipColumns> {
    fn default() -> Self {
        Self {
            path: DEFAULT_ZIP_TABLE_PATH.to_string(),
            encoding: DEFAULT_ZIP_ENCODING.to_string(),
            columns: ZipColumns::default(),
        }
    }
}

impl Default for TableConfig<MarketColumns> {
    fn default() -> Self {
        Self {
            path: DEFAULT_MARKET_TABLE_PATH.to_string(),
            encoding: DEFAULT_MARKET_ENCODING.to_string(),
            columns: MarketColumns::default(),
        }
    }
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left in place.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("finder.base_dir", &self.finder.base_dir)?;
        validate_radius("finder.radius_miles", self.finder.radius_miles)?;
        validate_table_settings("zip_table", &self.zip_table.path, &self.zip_table.encoding)?;
        validate_table_settings(
            "market_table",
            &self.market_table.path,
            &self.market_table.encoding,
        )?;
        self.zip_table.columns.validate()?;
        self.market_table.columns.validate()
    }

    pub fn base_dir(&self) -> &str {
        &self.finder.base_dir
    }

    pub fn cache_enabled(&self) -> bool {
        self.finder.cache
    }
}

impl ConfigProvider for TomlConfig {
    fn zip_table_path(&self) -> &str {
        &self.zip_table.path
    }

    fn zip_table_encoding(&self) -> &str {
        &self.zip_table.encoding
    }

    fn market_table_path(&self) -> &str {
        &self.market_table.path
    }

    fn market_table_encoding(&self) -> &str {
        &self.market_table.encoding
    }

    fn radius_miles(&self) -> f64 {
        self.finder.radius_miles
    }

    fn zip_columns(&self) -> ZipColumns {
        self.zip_table.columns.clone()
    }

    fn market_columns(&self) -> MarketColumns {
        self.market_table.columns.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
