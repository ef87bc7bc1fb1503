use std::cmp::Ordering;
use std::collections::HashMap;

use super::types::{Race, Standing};

/// Fold simulated races into driver and constructor championship tables.
///
/// Drivers are keyed by driver id, constructors by constructor name. A
/// driver's team is taken from their first appearance and never updated, so a
/// mid-season move keeps showing the original team.
///
/// Both tables are sorted by points, then wins, then podiums (all descending).
/// Anything still level keeps first-seen order.
pub fn aggregate_standings(races: &[Race]) -> (Vec<Standing>, Vec<Standing>) {
    let mut drivers: Vec<Standing> = Vec::new();
    let mut driver_index: HashMap<String, usize> = HashMap::new();
    let mut constructors: Vec<Standing> = Vec::new();
    let mut constructor_index: HashMap<String, usize> = HashMap::new();

    for race in races {
        for result in &race.results {
            let idx = *driver_index
                .entry(result.driver_id.clone())
                .or_insert_with(|| {
                    drivers.push(Standing::new(
                        &result.driver_id,
                        &result.family_name,
                        &result.constructor_id,
                        &result.constructor_name,
                    ));
                    drivers.len() - 1
                });
            drivers[idx].add(result);

            let idx = *constructor_index
                .entry(result.constructor_name.clone())
                .or_insert_with(|| {
                    constructors.push(Standing::new(
                        &result.constructor_id,
                        &result.constructor_name,
                        &result.constructor_id,
                        &result.constructor_name,
                    ));
                    constructors.len() - 1
                });
            constructors[idx].add(result);
        }
    }

    // Vec::sort_by is stable, so insertion order settles full ties
    drivers.sort_by(compare_standings);
    constructors.sort_by(compare_standings);

    (drivers, constructors)
}

fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.podiums.cmp(&a.podiums))
}
