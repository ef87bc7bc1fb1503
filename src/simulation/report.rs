use serde::Serialize;

use super::standings::aggregate_standings;
use super::types::{Exclusions, Race, Standing};

/// Everything a presenter needs to show one re-run season.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub season: u16,
    pub excluded_drivers: Vec<String>,
    pub excluded_constructors: Vec<String>,
    pub races: Vec<Race>,
    pub driver_standings: Vec<Standing>,
    pub constructor_standings: Vec<Standing>,
}

impl SeasonReport {
    /// Build a report from already simulated races.
    pub fn new(season: u16, exclusions: &Exclusions, races: Vec<Race>) -> Self {
        let (driver_standings, constructor_standings) = aggregate_standings(&races);
        let (drivers, constructors) = exclusions.sorted();

        Self {
            season,
            excluded_drivers: drivers.into_iter().map(str::to_string).collect(),
            excluded_constructors: constructors.into_iter().map(str::to_string).collect(),
            races,
            driver_standings,
            constructor_standings,
        }
    }

    pub fn has_exclusions(&self) -> bool {
        !self.excluded_drivers.is_empty() || !self.excluded_constructors.is_empty()
    }
}
