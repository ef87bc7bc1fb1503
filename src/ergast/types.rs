//! Wire format of the Ergast `results.json` endpoint.
//!
//! Every number arrives as a string, and most nested objects are optional on
//! older seasons, so decoding is lenient and conversion to [`Race`] does the
//! parsing.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::simulation::{Race, RaceResult};

#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    #[serde(rename = "MRData")]
    pub mr_data: MrData,
}

#[derive(Debug, Deserialize)]
pub struct MrData {
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

#[derive(Debug, Deserialize)]
pub struct RaceTable {
    #[serde(rename = "Races", default)]
    pub races: Vec<ErgastRace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgastRace {
    pub season: String,
    pub round: String,
    pub race_name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "Circuit", default)]
    pub circuit: Option<ErgastCircuit>,
    #[serde(rename = "Results", default)]
    pub results: Vec<ErgastResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgastCircuit {
    pub circuit_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ErgastResult {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(rename = "Driver")]
    pub driver: ErgastDriver,
    #[serde(rename = "Constructor")]
    pub constructor: ErgastConstructor,
    pub status: String,
    #[serde(rename = "FastestLap", default)]
    pub fastest_lap: Option<ErgastFastestLap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgastDriver {
    pub driver_id: String,
    #[serde(default)]
    pub given_name: String,
    pub family_name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgastConstructor {
    pub constructor_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ErgastFastestLap {
    #[serde(default)]
    pub rank: Option<String>,
}

impl ErgastRace {
    /// Convert into a [`Race`], keeping the listed order of results.
    ///
    /// Returns a description of the problem if season or round is not a number.
    pub fn into_race(self) -> Result<Race, String> {
        let season: u16 = self
            .season
            .trim()
            .parse()
            .map_err(|_| format!("invalid season '{}'", self.season))?;
        let round: u32 = self
            .round
            .trim()
            .parse()
            .map_err(|_| format!("invalid round '{}'", self.round))?;

        let date = self
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let results = self
            .results
            .into_iter()
            .enumerate()
            .map(|(idx, result)| result.into_result(idx as u32 + 1))
            .collect();

        Ok(Race {
            season,
            round,
            name: self.race_name,
            date,
            circuit: self.circuit.map(|c| c.circuit_name),
            results,
        })
    }
}

impl ErgastResult {
    fn into_result(self, listed_position: u32) -> RaceResult {
        let position = self
            .position
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(listed_position);

        // Rank "0" shows up for laps that were never timed
        let fastest_lap_rank = self
            .fastest_lap
            .and_then(|lap| lap.rank)
            .and_then(|rank| rank.trim().parse::<u32>().ok())
            .filter(|&rank| rank > 0);

        RaceResult {
            driver_id: self.driver.driver_id,
            given_name: self.driver.given_name,
            family_name: self.driver.family_name,
            code: self.driver.code,
            constructor_id: self.constructor.constructor_id,
            constructor_name: self.constructor.name,
            status: self.status,
            fastest_lap_rank,
            position,
            points: 0, // Recomputed by the simulator
            win: position == 1,
            podium: matches!(position, 2 | 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "MRData": {
            "series": "f1",
            "RaceTable": {
                "season": "2019",
                "round": "6",
                "Races": [{
                    "season": "2019",
                    "round": "6",
                    "raceName": "Monaco Grand Prix",
                    "date": "2019-05-26",
                    "Circuit": {"circuitId": "monaco", "circuitName": "Circuit de Monaco"},
                    "Results": [
                        {
                            "number": "44", "position": "1", "positionText": "1", "points": "25",
                            "Driver": {"driverId": "hamilton", "code": "HAM", "givenName": "Lewis", "familyName": "Hamilton"},
                            "Constructor": {"constructorId": "mercedes", "name": "Mercedes"},
                            "status": "Finished",
                            "FastestLap": {"rank": "2", "lap": "71"}
                        },
                        {
                            "number": "16", "position": "2", "positionText": "2", "points": "18",
                            "Driver": {"driverId": "leclerc", "givenName": "Charles", "familyName": "Leclerc"},
                            "Constructor": {"constructorId": "ferrari", "name": "Ferrari"},
                            "status": "+1 Lap",
                            "FastestLap": {"rank": "0"}
                        },
                        {
                            "number": "10", "position": "3", "positionText": "R", "points": "0",
                            "Driver": {"driverId": "gasly", "givenName": "Pierre", "familyName": "Gasly"},
                            "Constructor": {"constructorId": "red_bull", "name": "Red Bull"},
                            "status": "Suspension"
                        }
                    ]
                }]
            }
        }
    }"#;

    #[test]
    fn test_parse_race() {
        let response: ResultsResponse = serde_json::from_str(SAMPLE).unwrap();
        let race = response
            .mr_data
            .race_table
            .races
            .into_iter()
            .next()
            .unwrap()
            .into_race()
            .unwrap();

        assert_eq!(race.season, 2019);
        assert_eq!(race.round, 6);
        assert_eq!(race.name, "Monaco Grand Prix");
        assert_eq!(race.date, NaiveDate::from_ymd_opt(2019, 5, 26));
        assert_eq!(race.circuit.as_deref(), Some("Circuit de Monaco"));
        assert_eq!(race.results.len(), 3);

        let hamilton = &race.results[0];
        assert_eq!(hamilton.driver_id, "hamilton");
        assert_eq!(hamilton.code.as_deref(), Some("HAM"));
        assert_eq!(hamilton.constructor_name, "Mercedes");
        assert_eq!(hamilton.fastest_lap_rank, Some(2));
        assert!(hamilton.win);
    }

    #[test]
    fn test_missing_or_zero_fastest_lap_rank() {
        let response: ResultsResponse = serde_json::from_str(SAMPLE).unwrap();
        let race = response.mr_data.race_table.races.into_iter().next().unwrap().into_race().unwrap();

        assert_eq!(race.results[1].fastest_lap_rank, None);
        assert_eq!(race.results[2].fastest_lap_rank, None);
        assert_eq!(race.results[2].status, "Suspension");
    }

    #[test]
    fn test_empty_races_array() {
        let body = r#"{"MRData": {"RaceTable": {"season": "2019", "Races": []}}}"#;
        let response: ResultsResponse = serde_json::from_str(body).unwrap();
        assert!(response.mr_data.race_table.races.is_empty());
    }

    #[test]
    fn test_invalid_round_is_rejected() {
        let race = ErgastRace {
            season: "2019".to_string(),
            round: "six".to_string(),
            race_name: "Monaco Grand Prix".to_string(),
            date: None,
            circuit: None,
            results: vec![],
        };
        let err = race.into_race().unwrap_err();
        assert!(err.contains("invalid round"));
    }
}
