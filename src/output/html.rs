use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use std::path::Path;

use crate::simulation::{is_finished, SeasonReport};

const SEASON_TEMPLATE: &str = "season";
const BUILTIN_TEMPLATE: &str = include_str!("templates/season.html.hbs");

// {{inc @index}} -> 1-based row number
handlebars_helper!(inc: |index: u64| index + 1);
// {{blank_zero wins}} -> "" for 0
handlebars_helper!(blank_zero: |value: u64| if value == 0 { String::new() } else { value.to_string() });
// {{#unless (finished status)}} -> retired cars
handlebars_helper!(finished: |status: str| is_finished(status));

/// What the season template sees: the report plus a ready-made exclusion list
#[derive(Serialize)]
struct SeasonView<'a> {
    #[serde(flatten)]
    report: &'a SeasonReport,
    excluded: String,
}

/// Renders a season report as a standalone HTML page
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    /// Use the built-in template, or the Handlebars file at `template` if given
    pub fn new(template: Option<&Path>) -> Result<Self> {
        let source = match template {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template at {}", path.display()))?,
            None => BUILTIN_TEMPLATE.to_string(),
        };

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_helper("inc", Box::new(inc));
        registry.register_helper("blank_zero", Box::new(blank_zero));
        registry.register_helper("finished", Box::new(finished));
        registry
            .register_template_string(SEASON_TEMPLATE, source)
            .context("Failed to parse season template")?;

        Ok(Self { registry })
    }

    pub fn render(&self, report: &SeasonReport) -> Result<String> {
        let mut excluded: Vec<&str> = Vec::new();
        excluded.extend(report.excluded_drivers.iter().map(String::as_str));
        excluded.extend(report.excluded_constructors.iter().map(String::as_str));

        let view = SeasonView {
            report,
            excluded: excluded.join(", "),
        };

        self.registry
            .render(SEASON_TEMPLATE, &view)
            .with_context(|| format!("Failed to render HTML report for {}", report.season))
    }
}
