pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{cache::CachedStorage, finder::MarketFinder};
pub use domain::model::{QueryOutcome, ZIP_NOT_FOUND_MESSAGE};
pub use utils::error::{FinderError, Result};
