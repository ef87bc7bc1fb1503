use formulanein::simulation::{
    aggregate_standings, simulate_race, Exclusions, Race, RaceResult, SimulationConfig,
    DEFAULT_POINTS,
};
use proptest::prelude::*;
use std::collections::HashMap;

const STATUSES: [&str; 5] = ["Finished", "+1 Lap", "+2 Laps", "Engine", "Collision"];
const TEAMS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

/// (status index, team index, fastest lap rank)
fn entrant_strategy() -> impl Strategy<Value = (usize, usize, Option<u32>)> {
    (0..STATUSES.len(), 0..TEAMS.len(), proptest::option::of(1u32..25))
}

fn build_race(round: u32, entrants: &[(usize, usize, Option<u32>)]) -> Race {
    let results = entrants
        .iter()
        .enumerate()
        .map(|(i, &(status, team, rank))| RaceResult {
            driver_id: format!("driver{}", i),
            given_name: String::new(),
            family_name: format!("Driver{}", i),
            code: None,
            constructor_id: TEAMS[team].to_string(),
            constructor_name: TEAMS[team].to_uppercase(),
            status: STATUSES[status].to_string(),
            fastest_lap_rank: rank,
            position: i as u32 + 1,
            points: 0,
            win: false,
            podium: false,
        })
        .collect();

    Race {
        season: 2019,
        round,
        name: format!("Round {}", round),
        date: None,
        circuit: None,
        results,
    }
}

fn exclusions_from(drivers: &[usize], teams: &[usize]) -> Exclusions {
    Exclusions::new(
        drivers.iter().map(|i| format!("driver{}", i)),
        teams.iter().map(|&t| TEAMS[t].to_string()),
    )
}

proptest! {
    #[test]
    fn positions_are_contiguous_from_one(
        entrants in proptest::collection::vec(entrant_strategy(), 0..24),
        drivers in proptest::collection::vec(0usize..24, 0..6),
        teams in proptest::collection::vec(0usize..4, 0..2),
    ) {
        let race = build_race(1, &entrants);
        let simulated = simulate_race(&race, &exclusions_from(&drivers, &teams), &SimulationConfig::default());

        let positions: Vec<u32> = simulated.results.iter().map(|r| r.position).collect();
        let expected: Vec<u32> = (1..=simulated.results.len() as u32).collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn points_never_exceed_table_plus_bonus(
        entrants in proptest::collection::vec(entrant_strategy(), 0..24),
        drivers in proptest::collection::vec(0usize..24, 0..6),
    ) {
        let race = build_race(1, &entrants);
        let simulated = simulate_race(&race, &exclusions_from(&drivers, &[]), &SimulationConfig::default());

        let k = simulated.results.len().min(DEFAULT_POINTS.len());
        let ceiling: u32 = DEFAULT_POINTS[..k].iter().sum::<u32>() + 1;
        let total: u32 = simulated.results.iter().map(|r| r.points).sum();
        prop_assert!(total <= ceiling, "{} > {}", total, ceiling);
    }

    #[test]
    fn relative_order_is_preserved(
        entrants in proptest::collection::vec(entrant_strategy(), 0..24),
        drivers in proptest::collection::vec(0usize..24, 0..6),
        teams in proptest::collection::vec(0usize..4, 0..2),
    ) {
        let race = build_race(1, &entrants);
        let exclusions = exclusions_from(&drivers, &teams);
        let simulated = simulate_race(&race, &exclusions, &SimulationConfig::default());

        let kept: Vec<&str> = race
            .results
            .iter()
            .filter(|r| !exclusions.excludes(r))
            .map(|r| r.driver_id.as_str())
            .collect();
        let simulated_ids: Vec<&str> = simulated.results.iter().map(|r| r.driver_id.as_str()).collect();
        prop_assert_eq!(kept, simulated_ids);
    }

    #[test]
    fn non_finishers_never_score(
        entrants in proptest::collection::vec(entrant_strategy(), 0..24),
    ) {
        let race = build_race(1, &entrants);
        let simulated = simulate_race(&race, &Exclusions::default(), &SimulationConfig::default());

        for result in simulated.results.iter().filter(|r| !r.finished()) {
            prop_assert_eq!(result.points, 0);
        }
    }

    #[test]
    fn at_most_one_bonus_point_per_race(
        entrants in proptest::collection::vec(entrant_strategy(), 0..24),
    ) {
        let race = build_race(1, &entrants);
        let simulated = simulate_race(&race, &Exclusions::default(), &SimulationConfig::default());

        let with_bonus = simulated
            .results
            .iter()
            .filter(|r| {
                let table = if r.finished() && (r.position as usize) <= DEFAULT_POINTS.len() {
                    DEFAULT_POINTS[r.position as usize - 1]
                } else {
                    0
                };
                r.points == table + 1
            })
            .count();
        prop_assert!(with_bonus <= 1);
    }

    #[test]
    fn standings_equal_sum_of_race_points(
        season in proptest::collection::vec(proptest::collection::vec(entrant_strategy(), 1..20), 1..6),
        teams in proptest::collection::vec(0usize..4, 0..2),
    ) {
        let exclusions = exclusions_from(&[], &teams);
        let races: Vec<Race> = season
            .iter()
            .enumerate()
            .map(|(i, entrants)| simulate_race(&build_race(i as u32 + 1, entrants), &exclusions, &SimulationConfig::default()))
            .collect();

        let mut expected: HashMap<&str, u32> = HashMap::new();
        for race in &races {
            for result in &race.results {
                *expected.entry(result.driver_id.as_str()).or_default() += result.points;
            }
        }

        let (drivers, constructors) = aggregate_standings(&races);
        prop_assert_eq!(drivers.len(), expected.len());
        for standing in &drivers {
            prop_assert_eq!(standing.points, expected[standing.id.as_str()]);
        }

        let driver_total: u32 = drivers.iter().map(|s| s.points).sum();
        let constructor_total: u32 = constructors.iter().map(|s| s.points).sum();
        prop_assert_eq!(driver_total, constructor_total);

        // Sorted descending by points
        prop_assert!(drivers.windows(2).all(|w| w[0].points >= w[1].points));
    }
}
