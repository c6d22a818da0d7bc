use crate::core::{loader, ranker, resolver, text, ConfigProvider, Coordinate, Storage};
use crate::domain::model::{MarketLoad, QueryOutcome, SearchResult};
use crate::utils::error::Result;

/// Answers "which markets lie near this ZIP code", re-reading both reference tables
/// through its [`Storage`] on every query.
pub struct MarketFinder<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MarketFinder<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_table(&self, path: &str, encoding: &str) -> Result<String> {
        tracing::debug!("Reading {} as {}", path, encoding);
        let bytes = self.storage.read_file(path)?;
        text::decode_table(&bytes, encoding)
    }

    pub fn resolve(&self, zip_code: &str) -> Result<Option<Coordinate>> {
        if zip_code.is_empty() {
            return Ok(None);
        }
        let table = self.read_table(
            self.config.zip_table_path(),
            self.config.zip_table_encoding(),
        )?;
        resolver::resolve(&table, zip_code, &self.config.zip_columns())
    }

    pub fn load_markets(&self) -> Result<MarketLoad> {
        let table = self.read_table(
            self.config.market_table_path(),
            self.config.market_table_encoding(),
        )?;
        loader::load_markets(&table, &self.config.market_columns())
    }

    /// Runs one query. An unknown ZIP code is an ordinary [`QueryOutcome::NotFound`];
    /// only unreadable or misconfigured reference data is an error.
    pub fn find(&self, zip_code: &str) -> Result<QueryOutcome> {
        tracing::info!("Searching markets near ZIP {:?}", zip_code);

        let Some(origin) = self.resolve(zip_code)? else {
            tracing::info!("ZIP code {:?} not found", zip_code);
            return Ok(QueryOutcome::NotFound {
                zip: zip_code.to_string(),
            });
        };

        let load = self.load_markets()?;
        if !load.skipped.is_empty() {
            tracing::info!("Skipped {} malformed market rows", load.skipped.len());
        }

        let candidates = load.markets.len();
        let matches = ranker::rank(origin, load.markets, self.config.radius_miles());
        tracing::info!(
            "{} of {} markets within {} miles of {}",
            matches.len(),
            candidates,
            self.config.radius_miles(),
            zip_code
        );

        Ok(QueryOutcome::Found(SearchResult {
            zip: zip_code.to_string(),
            origin,
            matches,
            skipped: load.skipped,
        }))
    }

    /// Runs [`find`](Self::find) for each ZIP code in order, stopping at the first error.
    pub fn find_all<Z: AsRef<str>>(&self, zip_codes: &[Z]) -> Result<Vec<QueryOutcome>> {
        zip_codes.iter().map(|zip| self.find(zip.as_ref())).collect()
    }
}
