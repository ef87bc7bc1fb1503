use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::PathBuf;

use super::{get_config_path, Config};

const HEADER: &str = "\
# formulanein configuration
#
# simulation.points        points per finishing position, winner first
# simulation.fastest_lap_bonus  extra point for the fastest lap (0 disables)
# cache.max_age            e.g. \"7d\"; leave unset to keep seasons forever
# report.html_path         \"{season}\" is replaced by the year
# exclude                  ids always left out of every simulation
";

/// Write the default configuration file.
///
/// Uses the default config path unless `path` is given. Refuses to overwrite
/// an existing file unless `force` is set. Returns the path written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite it.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .context("Failed to serialize default config")?;

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(HEADER.as_bytes())
        .context("Failed to write config file")?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config file")?;
    file.commit().context("Failed to save config file")?;

    Ok(config_path)
}
