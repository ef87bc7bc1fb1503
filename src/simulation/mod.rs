pub mod config;
pub mod engine;
pub mod report;
pub mod standings;
pub mod types;

pub use config::*;
pub use engine::{simulate_race, simulate_season};
pub use report::SeasonReport;
pub use standings::aggregate_standings;
pub use types::{is_finished, Exclusions, Race, RaceResult, Standing};
