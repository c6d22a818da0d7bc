use crate::config::tables::{MarketColumns, ZipColumns};
use crate::core::ranker::DEFAULT_RADIUS_MILES;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn zip_table_path(&self) -> &str;
    fn zip_table_encoding(&self) -> &str;
    fn market_table_path(&self) -> &str;
    fn market_table_encoding(&self) -> &str;

    fn radius_miles(&self) -> f64 {
        DEFAULT_RADIUS_MILES
    }

    fn zip_columns(&self) -> ZipColumns {
        ZipColumns::default()
    }

    fn market_columns(&self) -> MarketColumns {
        MarketColumns::default()
    }
}
