use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ergast::{DEFAULT_BASE_URL, DEFAULT_MAX_ROUNDS};
use crate::simulation::{Exclusions, SimulationConfig};

const DEFAULT_TIMEOUT: &str = "30s";
const DEFAULT_HTML_PATH: &str = "formulanein_{season}.html";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub cache: Option<CacheSettings>,
    #[serde(default)]
    pub report: Option<ReportConfig>,
    /// Always left out, on top of whatever is passed on the command line
    #[serde(default)]
    pub exclude: Option<ExcludeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: Some(SimulationConfig::default()),
            api: Some(ApiConfig::default()),
            cache: Some(CacheSettings::default()),
            report: Some(ReportConfig::default()),
            exclude: Some(ExcludeConfig::default()),
        }
    }
}

/// Where race results come from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Root of an Ergast-compatible API, without trailing slash
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout, humantime format (e.g. "30s", "1m")
    #[serde(default)]
    pub timeout: Option<String>,

    /// Stop asking for more rounds after this many
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            timeout: Some(DEFAULT_TIMEOUT.to_string()),
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Result<Duration> {
        let raw = self.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT);
        humantime::parse_duration(raw).with_context(|| format!("Invalid api.timeout '{}'", raw))
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS)
    }
}

/// On-disk season cache.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Refetch a cached season once it is older than this (e.g. "7d").
    /// Unset means cached seasons never expire.
    #[serde(default)]
    pub max_age: Option<String>,

    /// Cache directory (default: platform cache dir)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            max_age: None,
            dir: None,
        }
    }
}

impl CacheSettings {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn max_age(&self) -> Result<Option<Duration>> {
        self.max_age
            .as_deref()
            .map(|raw| {
                humantime::parse_duration(raw)
                    .with_context(|| format!("Invalid cache.max_age '{}'", raw))
            })
            .transpose()
    }

    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(crate::ergast::get_cache_path)
    }
}

/// HTML report output.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Output path; "{season}" is replaced by the year. Relative paths are
    /// resolved against the system temp dir.
    #[serde(default)]
    pub html_path: Option<String>,

    /// Handlebars template to use instead of the built-in one
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            html_path: Some(DEFAULT_HTML_PATH.to_string()),
            template: None,
        }
    }
}

impl ReportConfig {
    /// Resolve the HTML output path for a season
    pub fn html_path(&self, season: u16) -> PathBuf {
        let raw = self.html_path.as_deref().unwrap_or(DEFAULT_HTML_PATH);
        let path = PathBuf::from(raw.replace("{season}", &season.to_string()));
        if path.is_absolute() {
            path
        } else {
            std::env::temp_dir().join(path)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub drivers: Vec<String>,
    #[serde(default)]
    pub constructors: Vec<String>,
}

impl From<ExcludeConfig> for Exclusions {
    fn from(config: ExcludeConfig) -> Self {
        Exclusions::new(config.drivers, config.constructors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
simulation:
  fastest_lap_bonus: 0
exclude:
  constructors: ["mercedes"]
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let simulation = config.simulation.unwrap();
        assert!(simulation.points.is_none());
        assert_eq!(simulation.fastest_lap_bonus, Some(0));
        assert!(config.api.is_none());

        let exclusions: Exclusions = config.exclude.unwrap().into();
        assert!(exclusions.constructors.contains("mercedes"));
        assert!(exclusions.drivers.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "simulation:\n  pointz: [1]\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_api_defaults() {
        let api: ApiConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
        assert_eq!(api.timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(api.max_rounds(), DEFAULT_MAX_ROUNDS);
    }

    #[test]
    fn test_cache_max_age_parse() {
        let settings = CacheSettings {
            enabled: None,
            max_age: Some("2d".to_string()),
            dir: None,
        };
        assert!(settings.enabled());
        assert_eq!(settings.max_age().unwrap(), Some(Duration::from_secs(2 * 86400)));

        let bad = CacheSettings {
            max_age: Some("soon".to_string()),
            ..settings
        };
        assert!(bad.max_age().is_err());
    }

    #[test]
    fn test_html_path_substitutes_season() {
        let report = ReportConfig {
            html_path: Some("/srv/reports/{season}.html".to_string()),
            template: None,
        };
        assert_eq!(report.html_path(2019), PathBuf::from("/srv/reports/2019.html"));

        let default = ReportConfig::default();
        assert_eq!(
            default.html_path(2021),
            std::env::temp_dir().join("formulanein_2021.html")
        );
    }
}
