use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate points table
    if let Some(ref simulation) = config.simulation {
        if let Some(ref points) = simulation.points {
            if points.is_empty() {
                errors.push("simulation.points: must list at least one position".to_string());
            }
            for (i, pair) in points.windows(2).enumerate() {
                if pair[1] > pair[0] {
                    errors.push(format!(
                        "simulation.points[{}]: {} is more than position {} gets ({})",
                        i + 1,
                        pair[1],
                        i + 1,
                        pair[0]
                    ));
                }
            }
        }
    }

    // Validate API settings
    if let Some(ref api) = config.api {
        if let Some(ref base_url) = api.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                errors.push(format!(
                    "api.base_url: '{}' must start with http:// or https://",
                    base_url
                ));
            }
        }
        if let Some(ref timeout) = api.timeout {
            if let Err(e) = humantime::parse_duration(timeout) {
                errors.push(format!("api.timeout: invalid duration '{}' - {}", timeout, e));
            }
        }
        if api.max_rounds == Some(0) {
            errors.push("api.max_rounds: must be at least 1".to_string());
        }
    }

    // Validate cache max age
    if let Some(ref cache) = config.cache {
        if let Some(ref max_age) = cache.max_age {
            if let Err(e) = humantime::parse_duration(max_age) {
                errors.push(format!("cache.max_age: invalid duration '{}' - {}", max_age, e));
            }
        }
    }

    // Validate template override
    if let Some(ref report) = config.report {
        if let Some(ref template) = report.template {
            if !template.is_file() {
                errors.push(format!(
                    "report.template: '{}' is not a readable file",
                    template.display()
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
