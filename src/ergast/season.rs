use anyhow::Result;

use super::cache::{read_cached_season, write_cached_season, CacheConfig, CachedSeason};
use super::error::FetchError;
use crate::simulation::Race;

/// Hard stop when walking a season round by round.
pub const DEFAULT_MAX_ROUNDS: u32 = 30;

/// Anything that can hand out one race of a season at a time.
#[allow(async_fn_in_trait)]
pub trait RoundSource {
    /// Fetch the raw results of a 1-based round.
    ///
    /// `Ok(None)` means the season has no such round.
    async fn fetch_round(&self, season: u16, round: u32) -> Result<Option<Race>, FetchError>;
}

/// Fetch a season in calendar order, one round after another, until the
/// source runs out of rounds or `max_rounds` is reached.
///
/// The first failure aborts the season; no partial season is returned.
pub async fn fetch_season<S: RoundSource>(
    source: &S,
    season: u16,
    max_rounds: u32,
) -> Result<Vec<Race>, FetchError> {
    let mut races = Vec::new();

    for round in 1..=max_rounds {
        match source.fetch_round(season, round).await? {
            Some(race) => {
                tracing::info!(season, round, race = %race.name, "fetched round");
                races.push(race);
            }
            None => {
                tracing::debug!(season, round, "no more rounds");
                return Ok(races);
            }
        }
    }

    tracing::warn!(season, max_rounds, "stopped at round limit, season may be incomplete");
    Ok(races)
}

/// Load a season from the cache when possible, otherwise fetch it and update
/// the cache.
pub async fn load_season<S: RoundSource>(
    source: &S,
    season: u16,
    max_rounds: u32,
    cache: &CacheConfig,
) -> Result<Vec<Race>> {
    if let Some(entry) = cached_season(season, cache) {
        return Ok(entry.races);
    }

    let races = fetch_season(source, season, max_rounds).await?;

    if cache.enabled && !races.is_empty() {
        let entry = CachedSeason::new(season, races);
        // A failed cache write only costs a refetch next time
        if let Err(e) = write_cached_season(&cache.path, &entry) {
            tracing::warn!(season, error = %format!("{:#}", e), "could not cache season");
        }
        return Ok(entry.races);
    }

    Ok(races)
}

/// Load a single round. A fresh cached season is used if there is one;
/// otherwise only that round is fetched.
pub async fn load_race<S: RoundSource>(
    source: &S,
    season: u16,
    round: u32,
    cache: &CacheConfig,
) -> Result<Race> {
    if let Some(entry) = cached_season(season, cache) {
        if let Some(race) = entry.races.into_iter().find(|r| r.round == round) {
            return Ok(race);
        }
    }

    match source.fetch_round(season, round).await? {
        Some(race) => Ok(race),
        None => anyhow::bail!("Season {} has no round {}", season, round),
    }
}

fn cached_season(season: u16, cache: &CacheConfig) -> Option<CachedSeason> {
    if !cache.enabled || cache.refresh {
        return None;
    }

    match read_cached_season(&cache.path, season) {
        Some(entry) if entry.is_fresh(cache.max_age) => {
            tracing::info!(season, fetched_at = %entry.fetched_at, "using cached season");
            Some(entry)
        }
        Some(_) => {
            tracing::info!(season, "cached season is stale, refetching");
            None
        }
        None => {
            tracing::debug!(season, "season not cached");
            None
        }
    }
}
