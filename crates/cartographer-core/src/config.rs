//! Run configuration: starting resources, difficulty and freighter density.
//!
//! Every field has a default matching the standard game, so a JSON file only
//! needs the fields it overrides.

use cartographer_logic::types::{Faction, GridPos};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A freighter placed in the origin sector when a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginFreighter {
    pub faction: Faction,
    pub position: GridPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub starting_fuel: i32,
    pub max_fuel: i32,
    pub max_hull: i32,
    pub starting_credits: u32,
    /// Difficulty in the origin sector. Each ten sectors of distance adds one.
    pub base_difficulty: u32,
    /// Chance that a newly generated sector contains a freighter.
    pub freighter_spawn_chance: f64,
    pub origin_freighters: Vec<OriginFreighter>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            starting_fuel: 100,
            max_fuel: 100,
            max_hull: 100,
            starting_credits: 100,
            base_difficulty: 1,
            freighter_spawn_chance: 0.15,
            origin_freighters: vec![
                OriginFreighter {
                    faction: Faction::Aserian,
                    position: GridPos::new(5, 5),
                },
                OriginFreighter {
                    faction: Faction::Krynn,
                    position: GridPos::new(15, 5),
                },
            ],
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Validation errors for a run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max fuel must be positive, got {0}")]
    MaxFuelNotPositive(i32),
    #[error("max hull must be positive, got {0}")]
    MaxHullNotPositive(i32),
    #[error("starting fuel {starting} is outside 1..={max}")]
    StartingFuelOutOfRange { starting: i32, max: i32 },
    #[error("base difficulty must be at least 1")]
    DifficultyTooLow,
    #[error("freighter spawn chance {0} is outside [0, 1]")]
    SpawnChanceOutOfRange(f64),
    #[error("origin freighter {index} is off the grid at ({x}, {y})")]
    FreighterOutOfBounds { index: usize, x: usize, y: usize },
    #[error("origin freighter {index} starts on the player's cell")]
    FreighterOnPlayer { index: usize },
}

/// Validate a run configuration. Returns all errors found (empty = valid).
pub fn validate_config(config: &RunConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.max_fuel <= 0 {
        errors.push(ConfigError::MaxFuelNotPositive(config.max_fuel));
    }
    if config.max_hull <= 0 {
        errors.push(ConfigError::MaxHullNotPositive(config.max_hull));
    }
    if config.starting_fuel <= 0 || config.starting_fuel > config.max_fuel {
        errors.push(ConfigError::StartingFuelOutOfRange {
            starting: config.starting_fuel,
            max: config.max_fuel,
        });
    }
    if config.base_difficulty < 1 {
        errors.push(ConfigError::DifficultyTooLow);
    }
    if !(0.0..=1.0).contains(&config.freighter_spawn_chance) {
        errors.push(ConfigError::SpawnChanceOutOfRange(config.freighter_spawn_chance));
    }

    for (index, freighter) in config.origin_freighters.iter().enumerate() {
        let pos = freighter.position;
        if !pos.in_bounds() {
            errors.push(ConfigError::FreighterOutOfBounds {
                index,
                x: pos.x,
                y: pos.y,
            });
        } else if pos == GridPos::center() {
            errors.push(ConfigError::FreighterOnPlayer { index });
        }
    }

    errors
}
