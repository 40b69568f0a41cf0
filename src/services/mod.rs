// Service exports
pub mod cache;
pub mod postgres;

pub use cache::{RankingCache, RankingKey, RankedFor, CacheError};
pub use postgres::{PostgresClient, PostgresError, PoolOptions, parse_work_types};
