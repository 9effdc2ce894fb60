//! Per-run statistics. Counters only ever increase during a run and feed the
//! score conversion in [`crate::scoring`].

use serde::{Deserialize, Serialize};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    FuelDepletion,
    BlackHole,
    PirateAttack,
    Anomaly,
    #[default]
    Unknown,
}

impl DeathCause {
    pub fn id(self) -> &'static str {
        match self {
            Self::FuelDepletion => "fuel_depletion",
            Self::BlackHole => "black_hole",
            Self::PirateAttack => "pirate_attack",
            Self::Anomaly => "anomaly",
            Self::Unknown => "unknown",
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub tiles_explored: u32,
    pub planets_discovered: u32,
    pub derelicts_explored: u32,
    pub nebulae_traversed: u32,
    pub pirates_defeated: u32,
    pub diplomatic_missions: u32,
    /// Distinct sectors entered, including the origin.
    pub sectors_explored: u32,
    pub blueprints_collected: u32,
    pub turns_played: u32,
    pub black_holes_escaped: u32,
    /// Furthest sector distance from the origin reached this run.
    pub max_distance_reached: f64,
    /// Filled in when the run is finished.
    pub total_score: u64,
    pub death_cause: DeathCause,
    /// Milliseconds since the Unix epoch.
    pub time_started: u64,
    pub time_ended: Option<u64>,
}

impl GameStats {
    /// Fresh counters for a run starting at `time_started`. The origin sector
    /// counts as explored.
    pub fn new(time_started: u64) -> Self {
        Self {
            sectors_explored: 1,
            time_started,
            ..Self::default()
        }
    }

    /// Run length in milliseconds, using `now` if the run has not ended.
    pub fn play_time(&self, now: u64) -> u64 {
        self.time_ended.unwrap_or(now).saturating_sub(self.time_started)
    }
}
