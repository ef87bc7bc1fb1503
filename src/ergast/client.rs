use anyhow::{Context, Result};
use std::time::Duration;

use super::error::FetchError;
use super::season::RoundSource;
use super::types::ResultsResponse;
use crate::simulation::Race;

/// Jolpica took over the Ergast API (same paths, same JSON) when ergast.com
/// shut down.
pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Enough for any grid in the history of the championship.
const RESULTS_LIMIT: u32 = 100;

/// HTTP client for an Ergast-compatible results API
#[derive(Clone, Debug)]
pub struct ErgastClient {
    http: reqwest::Client,
    base_url: String,
}

/// Create a results API client
pub fn create_client(base_url: &str, timeout: Duration) -> Result<ErgastClient> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("formulanein/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    Ok(ErgastClient {
        http,
        base_url: base_url.trim_end_matches('/').to_string(),
    })
}

impl ErgastClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn round_url(&self, season: u16, round: u32) -> String {
        format!(
            "{}/{}/{}/results.json?limit={}",
            self.base_url, season, round, RESULTS_LIMIT
        )
    }
}

impl RoundSource for ErgastClient {
    async fn fetch_round(&self, season: u16, round: u32) -> Result<Option<Race>, FetchError> {
        let url = self.round_url(season, round);
        tracing::debug!(%url, "requesting round");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { season, round, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { season, round, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { season, round, source })?;

        parse_round(&body, season, round)
    }
}

/// Decode a `results.json` body. An empty race table means the season has no
/// such round.
pub fn parse_round(body: &str, season: u16, round: u32) -> Result<Option<Race>, FetchError> {
    let malformed = |reason: String| FetchError::Malformed { season, round, reason };

    let response: ResultsResponse =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    let Some(race) = response.mr_data.race_table.races.into_iter().next() else {
        return Ok(None);
    };

    race.into_race().map(Some).map_err(malformed)
}
