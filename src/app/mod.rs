pub mod report;

use crate::config::cli::LocalStorage;
use crate::core::cache::CachedStorage;
use crate::core::finder::MarketFinder;
use crate::core::{ConfigProvider, QueryOutcome};
use crate::utils::error::Result;

/// Runs every query against tables on local disk. With `cache` set each table is read
/// once for the whole batch; otherwise every query re-reads both tables.
pub fn search<C: ConfigProvider>(
    storage: LocalStorage,
    config: C,
    zip_codes: &[String],
    cache: bool,
) -> Result<Vec<QueryOutcome>> {
    if cache {
        tracing::debug!("Reference table cache enabled");
        MarketFinder::new(CachedStorage::new(storage), config).find_all(zip_codes)
    } else {
        MarketFinder::new(storage, config).find_all(zip_codes)
    }
}
