use anyhow::{Context, Result};
use std::path::Path;

/// Open a written report in the user's default browser
///
/// # Errors
/// Returns error if the path cannot be resolved or no browser is available
pub fn open_report(path: &Path) -> Result<()> {
    let absolute = std::fs::canonicalize(path)
        .with_context(|| format!("Report not found at {}", path.display()))?;
    let target = absolute.to_string_lossy();

    webbrowser::open(&target)
        .with_context(|| format!("Failed to open browser for {}", target))?;
    Ok(())
}
