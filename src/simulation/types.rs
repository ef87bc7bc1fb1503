use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// "Finished" and any "+N Lap(s)" status count as classified finishers;
/// everything else (accidents, failures, disqualifications) does not.
pub fn is_finished(status: &str) -> bool {
    let status = status.to_lowercase();
    status == "finished" || status.contains("lap")
}

/// One entrant's outcome in one race.
///
/// `position`, `points`, `win` and `podium` hold whatever the data source
/// reported until the race has been through the simulator, which overwrites
/// them for the counterfactual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub driver_id: String,
    pub given_name: String,
    pub family_name: String,
    pub code: Option<String>,        // Three-letter code, e.g. "HAM"
    pub constructor_id: String,
    pub constructor_name: String,
    pub status: String,              // "Finished", "+1 Lap", "Engine", ...
    pub fastest_lap_rank: Option<u32>, // 1 = fastest; None if no timed lap
    pub position: u32,
    pub points: u32,
    pub win: bool,
    pub podium: bool,
}

impl RaceResult {
    /// Whether the entrant was running at the flag, lapped or not.
    pub fn finished(&self) -> bool {
        is_finished(&self.status)
    }

    /// "Lewis Hamilton"
    pub fn full_name(&self) -> String {
        if self.given_name.is_empty() {
            self.family_name.clone()
        } else {
            format!("{} {}", self.given_name, self.family_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub season: u16,
    pub round: u32,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub circuit: Option<String>,
    /// Results in the order the source listed them, which is taken as the
    /// finishing order.
    pub results: Vec<RaceResult>,
}

impl Race {
    /// "2019 Monaco Grand Prix"
    pub fn title(&self) -> String {
        format!("{} {}", self.season, self.name)
    }
}

/// Drivers and constructors to pretend never entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusions {
    pub drivers: HashSet<String>,
    pub constructors: HashSet<String>,
}

impl Exclusions {
    pub fn new<D, C>(drivers: D, constructors: C) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            drivers: drivers.into_iter().map(Into::into).collect(),
            constructors: constructors.into_iter().map(Into::into).collect(),
        }
    }

    /// A result is dropped if either its driver or its constructor is excluded.
    pub fn excludes(&self, result: &RaceResult) -> bool {
        self.drivers.contains(&result.driver_id)
            || self.constructors.contains(&result.constructor_id)
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty() && self.constructors.is_empty()
    }

    /// Merge another set of exclusions into this one.
    pub fn extend(&mut self, other: Exclusions) {
        self.drivers.extend(other.drivers);
        self.constructors.extend(other.constructors);
    }

    /// Sorted ids for display, drivers first.
    pub fn sorted(&self) -> (Vec<&str>, Vec<&str>) {
        let mut drivers: Vec<&str> = self.drivers.iter().map(String::as_str).collect();
        let mut constructors: Vec<&str> = self.constructors.iter().map(String::as_str).collect();
        drivers.sort_unstable();
        constructors.sort_unstable();
        (drivers, constructors)
    }
}

/// Cumulative totals for one driver or one constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub id: String,
    pub name: String,
    pub constructor_id: String,
    pub constructor: String,
    pub points: u32,
    pub wins: u32,
    pub podiums: u32,
}

impl Standing {
    pub fn new(id: &str, name: &str, constructor_id: &str, constructor: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            constructor_id: constructor_id.to_string(),
            constructor: constructor.to_string(),
            points: 0,
            wins: 0,
            podiums: 0,
        }
    }

    pub(crate) fn add(&mut self, result: &RaceResult) {
        self.points += result.points;
        self.wins += u32::from(result.win);
        self.podiums += u32::from(result.podium);
    }
}
