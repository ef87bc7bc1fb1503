pub mod formatter;
pub mod html;

pub use formatter::{
    format_constructor_standings, format_driver_standings, format_race, format_season, format_tsv,
    should_use_colors,
};
pub use html::HtmlRenderer;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::simulation::SeasonReport;

/// How a season report is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned tables for the terminal
    Text,
    /// Driver standings as tab-separated values
    Tsv,
    /// The full report as JSON
    Json,
    /// Standalone HTML page
    Html,
}

impl OutputFormat {
    /// HTML goes to a file even without --output
    pub fn writes_file_by_default(self) -> bool {
        matches!(self, OutputFormat::Html)
    }
}

/// Render a report in the requested format
pub fn render_report(
    report: &SeasonReport,
    format: OutputFormat,
    report_config: &ReportConfig,
    use_colors: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_season(report, use_colors)),
        OutputFormat::Tsv => Ok(format_tsv(report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
        OutputFormat::Html => {
            HtmlRenderer::new(report_config.template.as_deref())?.render(report)
        }
    }
}

/// Where a report ends up when written to disk: an explicit path, the
/// configured HTML path, or nowhere (stdout).
pub fn report_destination(
    format: OutputFormat,
    output: Option<PathBuf>,
    report_config: &ReportConfig,
    season: u16,
) -> Option<PathBuf> {
    output.or_else(|| {
        format
            .writes_file_by_default()
            .then(|| report_config.html_path(season))
    })
}

/// Write a rendered report atomically
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}
