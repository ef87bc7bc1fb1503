use serde::{Deserialize, Serialize};

/// Points for positions 1 through 10, as awarded since 2010.
pub const DEFAULT_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Extra point for the fastest lap, awarded since 2019.
pub const DEFAULT_FASTEST_LAP_BONUS: u32 = 1;

/// How points are handed out when re-running a race.
///
/// Example YAML:
/// ```yaml
/// simulation:
///   points: [10, 6, 4, 3, 2, 1]
///   fastest_lap_bonus: 0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Points per finishing position, winner first (default: 25-18-15-12-10-8-6-4-2-1)
    #[serde(default)]
    pub points: Option<Vec<u32>>,

    /// Bonus for the fastest lap when its holder scored (default: 1, 0 disables)
    #[serde(default)]
    pub fastest_lap_bonus: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            points: Some(DEFAULT_POINTS.to_vec()),
            fastest_lap_bonus: Some(DEFAULT_FASTEST_LAP_BONUS),
        }
    }
}

impl SimulationConfig {
    pub fn points_table(&self) -> &[u32] {
        self.points.as_deref().unwrap_or(&DEFAULT_POINTS)
    }

    pub fn bonus(&self) -> u32 {
        self.fastest_lap_bonus.unwrap_or(DEFAULT_FASTEST_LAP_BONUS)
    }

    /// Points for a 1-based position, ignoring whether the car finished.
    pub fn points_for(&self, position: u32) -> u32 {
        let table = self.points_table();
        match usize::try_from(position) {
            Ok(p) if p >= 1 && p <= table.len() => table[p - 1],
            _ => 0,
        }
    }
}
