use super::config::SimulationConfig;
use super::types::{Exclusions, Race, RaceResult};

/// Re-run a race as though the excluded drivers and constructors never took
/// part. The input is left untouched; a new race is returned.
///
/// The remaining entrants keep their relative order and are renumbered from 1.
/// Points follow the table for classified finishers only, and the fastest-lap
/// bonus goes to the best-ranked lap among the remaining entrants, provided
/// that entrant scored.
pub fn simulate_race(race: &Race, exclusions: &Exclusions, config: &SimulationConfig) -> Race {
    let mut results: Vec<RaceResult> = Vec::with_capacity(race.results.len());
    // (rank, index into results) of the best fastest lap seen so far
    let mut fastest: Option<(u32, usize)> = None;

    for result in race.results.iter().filter(|r| !exclusions.excludes(r)) {
        let position = results.len() as u32 + 1;
        let points = if result.finished() {
            config.points_for(position)
        } else {
            0
        };

        if let Some(rank) = result.fastest_lap_rank {
            if fastest.map_or(true, |(best, _)| rank < best) {
                fastest = Some((rank, results.len()));
            }
        }

        results.push(RaceResult {
            position,
            points,
            win: position == 1,
            podium: matches!(position, 2 | 3),
            ..result.clone()
        });
    }

    // Nothing to award when every entrant was excluded or nobody set a lap
    if let Some((rank, index)) = fastest {
        let holder = &mut results[index];
        if holder.points > 0 {
            holder.points += config.bonus();
        } else {
            tracing::debug!(
                race = %race.title(),
                driver = %holder.driver_id,
                rank,
                "fastest lap holder scored nothing, no bonus"
            );
        }
    }

    tracing::debug!(
        race = %race.title(),
        entrants = race.results.len(),
        remaining = results.len(),
        "simulated race"
    );

    Race {
        results,
        ..race.clone()
    }
}

/// Simulate every race of a season, keeping calendar order.
pub fn simulate_season(
    races: &[Race],
    exclusions: &Exclusions,
    config: &SimulationConfig,
) -> Vec<Race> {
    races
        .iter()
        .map(|race| simulate_race(race, exclusions, config))
        .collect()
}
