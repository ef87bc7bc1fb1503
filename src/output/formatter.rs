use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::simulation::{Race, SeasonReport, Standing};

const NAME_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Truncate to fit a column, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Zero wins/podiums are left blank so the leaders stand out
fn blank_if_zero(value: u32) -> String {
    if value > 0 {
        value.to_string()
    } else {
        String::new()
    }
}

fn heading(text: &str, rule: char, use_colors: bool) -> String {
    let underline = rule.to_string().repeat(text.chars().count());
    if use_colors {
        format!("{}\n{}", text.bold(), underline.dimmed())
    } else {
        format!("{}\n{}", text, underline)
    }
}

fn header_row(row: String, use_colors: bool) -> String {
    let row = row.trim_end().to_string();
    if use_colors {
        row.dimmed().to_string()
    } else {
        row
    }
}

/// Driver championship table
/// Columns: Driver, Team, Points, Wins, Podiums
pub fn format_driver_standings(standings: &[Standing], season: u16, use_colors: bool) -> String {
    let mut lines = vec![heading(&format!("{} driver standings", season), '=', use_colors)];
    lines.push(header_row(
        format!(
            "{:<20} {:<20} {:<8} {:<7} {:<8}",
            "Driver", "Team", "Points", "Wins", "Podiums"
        ),
        use_colors,
    ));

    for standing in standings {
        let name = format!("{:<20}", truncate(&standing.name, NAME_WIDTH));
        let row_rest = format!(
            " {:<20} {:<8} {:<7} {:<8}",
            truncate(&standing.constructor, NAME_WIDTH),
            standing.points,
            blank_if_zero(standing.wins),
            blank_if_zero(standing.podiums)
        );
        if use_colors {
            lines.push(format!("{}{}", name.bold(), row_rest).trim_end().to_string());
        } else {
            lines.push(format!("{}{}", name, row_rest).trim_end().to_string());
        }
    }

    if standings.is_empty() {
        lines.push("No points scored.".to_string());
    }
    lines.join("\n")
}

/// Constructor championship table
/// Columns: Team, Points, Wins, Podiums
pub fn format_constructor_standings(
    standings: &[Standing],
    season: u16,
    use_colors: bool,
) -> String {
    let mut lines = vec![heading(&format!("{} constructor standings", season), '=', use_colors)];
    lines.push(header_row(
        format!("{:<20} {:<8} {:<7} {:<8}", "Team", "Points", "Wins", "Podiums"),
        use_colors,
    ));

    for standing in standings {
        let name = format!("{:<20}", truncate(&standing.name, NAME_WIDTH));
        let row_rest = format!(
            " {:<8} {:<7} {:<8}",
            standing.points,
            blank_if_zero(standing.wins),
            blank_if_zero(standing.podiums)
        );
        if use_colors {
            lines.push(format!("{}{}", name.bold(), row_rest).trim_end().to_string());
        } else {
            lines.push(format!("{}{}", name, row_rest).trim_end().to_string());
        }
    }

    if standings.is_empty() {
        lines.push("No points scored.".to_string());
    }
    lines.join("\n")
}

/// One simulated race
/// Columns: Pos., Driver, Team, Points, Status
pub fn format_race(race: &Race, use_colors: bool) -> String {
    let mut lines = vec![heading(&race.title(), '-', use_colors)];

    if race.results.is_empty() {
        lines.push("Nobody left to race.".to_string());
        return lines.join("\n");
    }

    lines.push(header_row(
        format!("{:<4} {:<20} {:<20} {:<6} {}", "Pos.", "Driver", "Team", "Points", "Status"),
        use_colors,
    ));

    for result in &race.results {
        let row = format!(
            "{:<4} {:<20} {:<20} {:<6} {}",
            result.position,
            truncate(&result.family_name, NAME_WIDTH),
            truncate(&result.constructor_name, NAME_WIDTH),
            result.points,
            result.status
        );
        if use_colors && !result.finished() {
            lines.push(row.dimmed().to_string());
        } else {
            lines.push(row);
        }
    }

    lines.join("\n")
}

/// Whole season: both championship tables followed by every race
pub fn format_season(report: &SeasonReport, use_colors: bool) -> String {
    let mut sections = Vec::new();

    if report.has_exclusions() {
        let mut excluded: Vec<&str> = Vec::new();
        excluded.extend(report.excluded_drivers.iter().map(String::as_str));
        excluded.extend(report.excluded_constructors.iter().map(String::as_str));
        let line = format!("Without: {}", excluded.join(", "));
        sections.push(if use_colors {
            line.yellow().to_string()
        } else {
            line
        });
    }

    sections.push(format_driver_standings(
        &report.driver_standings,
        report.season,
        use_colors,
    ));
    sections.push(format_constructor_standings(
        &report.constructor_standings,
        report.season,
        use_colors,
    ));
    for race in &report.races {
        sections.push(format_race(race, use_colors));
    }

    sections.join("\n\n")
}

/// Driver standings as tab-separated values for scripting
/// Columns: position, name, team, points, wins, podiums (no headers, no colors)
pub fn format_tsv(report: &SeasonReport) -> String {
    report
        .driver_standings
        .iter()
        .enumerate()
        .map(|(idx, standing)| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                idx + 1,
                standing.name,
                standing.constructor,
                standing.points,
                standing.wins,
                standing.podiums
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
