pub mod cache;
pub mod finder;
pub mod loader;
pub mod ranker;
pub mod resolver;
pub mod text;

pub use crate::domain::model::{
    Coordinate, MarketLoad, MarketRecord, QueryOutcome, RankedMatch, SearchResult,
};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
