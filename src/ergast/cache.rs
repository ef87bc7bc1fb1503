use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::simulation::Race;

const CACHE_FORMAT_VERSION: u32 = 1;

/// Configuration for the on-disk season cache
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool,             // false when --no-cache
    pub refresh: bool,             // true when --refresh: skip reads, still write
    pub max_age: Option<Duration>, // None: cached seasons never go stale
    pub path: PathBuf,
}

impl CacheConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            enabled: true,
            refresh: false,
            max_age: None,
            path,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(get_cache_path())
        }
    }
}

/// Get the platform-appropriate cache directory for formulanein
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("formulanein/seasons"))
        .unwrap_or_else(|| std::env::temp_dir().join("formulanein/seasons"))
}

/// Clear the season cache directory
pub fn clear_cache(cache_path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// A whole season of raw (unsimulated) results as fetched
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedSeason {
    pub version: u32,
    pub season: u16,
    pub fetched_at: DateTime<Utc>,
    pub races: Vec<Race>,
}

impl CachedSeason {
    pub fn new(season: u16, races: Vec<Race>) -> Self {
        Self {
            version: CACHE_FORMAT_VERSION,
            season,
            fetched_at: Utc::now(),
            races,
        }
    }

    /// Whether the entry is younger than `max_age`. Without a limit every
    /// entry is fresh.
    pub fn is_fresh(&self, max_age: Option<Duration>) -> bool {
        let Some(max_age) = max_age else {
            return true;
        };
        match (Utc::now() - self.fetched_at).to_std() {
            Ok(age) => age < max_age,
            Err(_) => true, // fetched_at in the future, clock skew
        }
    }
}

fn season_key(season: u16) -> String {
    format!("season:{}", season)
}

/// Read a cached season. Missing, unreadable or outdated entries all come
/// back as None so the caller simply refetches.
pub fn read_cached_season(cache_path: &Path, season: u16) -> Option<CachedSeason> {
    let bytes = cacache::read_sync(cache_path, season_key(season)).ok()?;
    let entry: CachedSeason = serde_json::from_slice(&bytes).ok()?;

    if entry.version != CACHE_FORMAT_VERSION || entry.season != season {
        tracing::debug!(season, version = entry.version, "ignoring incompatible cache entry");
        return None;
    }
    Some(entry)
}

/// Write a season to the cache
pub fn write_cached_season(cache_path: &Path, entry: &CachedSeason) -> Result<()> {
    let json = serde_json::to_vec(entry).context("Failed to serialize season cache entry")?;
    cacache::write_sync(cache_path, season_key(entry.season), json)
        .with_context(|| format!("Failed to write season {} to cache", entry.season))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_race(round: u32) -> Race {
        Race {
            season: 2019,
            round,
            name: format!("Round {}", round),
            date: None,
            circuit: None,
            results: vec![],
        }
    }

    #[test]
    fn test_read_missing_season_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_cached_season(dir.path(), 2019).is_none());
    }

    #[test]
    fn test_write_and_read_season() {
        let dir = tempfile::tempdir().unwrap();
        let entry = CachedSeason::new(2019, vec![sample_race(1), sample_race(2)]);
        write_cached_season(dir.path(), &entry).unwrap();

        let loaded = read_cached_season(dir.path(), 2019).unwrap();
        assert_eq!(loaded.season, 2019);
        assert_eq!(loaded.races, entry.races);
        assert!(read_cached_season(dir.path(), 2020).is_none());
    }

    #[test]
    fn test_freshness() {
        let mut entry = CachedSeason::new(2019, vec![]);
        assert!(entry.is_fresh(None));
        assert!(entry.is_fresh(Some(Duration::from_secs(3600))));

        entry.fetched_at = Utc::now() - chrono::Duration::days(2);
        assert!(!entry.is_fresh(Some(Duration::from_secs(86400))));
        assert!(entry.is_fresh(None));
    }

    #[test]
    fn test_clear_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("seasons");
        write_cached_season(&cache_path, &CachedSeason::new(2019, vec![])).unwrap();

        clear_cache(&cache_path).unwrap();
        assert!(!cache_path.exists());
        // Clearing twice is fine
        clear_cache(&cache_path).unwrap();
    }
}
