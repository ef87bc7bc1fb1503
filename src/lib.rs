pub mod browser;
pub mod config;
pub mod ergast;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod simulation;

pub use fetch::{fetch_and_simulate_race, fetch_and_simulate_season};
