use anyhow::Result;

use crate::ergast::{load_race, load_season, CacheConfig, RoundSource};
use crate::simulation::{
    simulate_race, simulate_season, Exclusions, Race, SeasonReport, SimulationConfig,
};

/// Load a season (cache or API), re-run every race without the excluded
/// entrants and aggregate the championship.
///
/// Races are simulated and aggregated in calendar order. A season with no
/// races at all is reported as an error rather than an empty report.
pub async fn fetch_and_simulate_season<S: RoundSource>(
    source: &S,
    season: u16,
    exclusions: &Exclusions,
    simulation: &SimulationConfig,
    max_rounds: u32,
    cache_config: &CacheConfig,
) -> Result<SeasonReport> {
    let races = load_season(source, season, max_rounds, cache_config).await?;

    if races.is_empty() {
        anyhow::bail!("No races found for the {} season", season);
    }

    tracing::info!(season, races = races.len(), "simulating season");
    let simulated = simulate_season(&races, exclusions, simulation);

    Ok(SeasonReport::new(season, exclusions, simulated))
}

/// Load and re-run a single round.
pub async fn fetch_and_simulate_race<S: RoundSource>(
    source: &S,
    season: u16,
    round: u32,
    exclusions: &Exclusions,
    simulation: &SimulationConfig,
    cache_config: &CacheConfig,
) -> Result<Race> {
    let race = load_race(source, season, round, cache_config).await?;
    Ok(simulate_race(&race, exclusions, simulation))
}
