pub mod cache;
pub mod client;
pub mod error;
pub mod season;
pub mod types;

pub use cache::{clear_cache, get_cache_path, CacheConfig};
pub use client::{create_client, ErgastClient, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use season::{fetch_season, load_race, load_season, RoundSource, DEFAULT_MAX_ROUNDS};
