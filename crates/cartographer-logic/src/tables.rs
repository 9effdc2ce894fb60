//! Static game tables: tile spawn weights, base damage, freighter stats,
//! trade offers, and mission templates.
//!
//! Everything here is plain data plus the small functions that scale it.
//! Randomness lives in the engine; these tables only say what the odds are.

use crate::factions::FactionRank;
use crate::tiles::Tile;
use crate::types::Faction;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SECTOR GENERATION
// ============================================================================

/// Per-cell spawn probability for each non-empty tile, in roulette order.
/// The remaining mass (0.73 at base) resolves to empty space.
pub const BASE_SPAWN_WEIGHTS: [(Tile, f64); 9] = [
    (Tile::BlackHole, 0.02),
    (Tile::Planet, 0.05),
    (Tile::Asteroid, 0.08),
    (Tile::Nebula, 0.04),
    (Tile::FuelStation, 0.03),
    (Tile::Derelict, 0.02),
    (Tile::Outpost(Faction::Aserian), 0.01),
    (Tile::Outpost(Faction::Krynn), 0.01),
    (Tile::Outpost(Faction::Eldari), 0.01),
];

/// Sectors further than this get more hazards and fewer stations.
pub const DEEP_SPACE_DISTANCE: f64 = 10.0;
/// Sectors further than this also get more outposts and even fewer stations.
pub const FRONTIER_DISTANCE: f64 = 20.0;

/// Spawn weights for a sector `distance` sectors from the origin.
/// Multipliers compound: a frontier fuel station is `0.03 × 0.8 × 0.7`.
pub fn spawn_weights(distance: f64) -> [(Tile, f64); 9] {
    let mut weights = BASE_SPAWN_WEIGHTS;
    if distance > DEEP_SPACE_DISTANCE {
        for (tile, weight) in weights.iter_mut() {
            match tile {
                Tile::BlackHole | Tile::Derelict => *weight *= 1.5,
                Tile::FuelStation => *weight *= 0.8,
                _ => {}
            }
        }
    }
    if distance > FRONTIER_DISTANCE {
        for (tile, weight) in weights.iter_mut() {
            match tile {
                Tile::Outpost(_) => *weight *= 1.2,
                Tile::FuelStation => *weight *= 0.7,
                _ => {}
            }
        }
    }
    weights
}

/// Roulette selection: walk the cumulative weights and return the first tile
/// whose running total exceeds `roll` (a value in `[0, 1)`).
pub fn pick_tile(weights: &[(Tile, f64)], roll: f64) -> Tile {
    let mut cumulative = 0.0;
    for &(tile, weight) in weights {
        cumulative += weight;
        if roll < cumulative {
            return tile;
        }
    }
    Tile::Empty
}

// ============================================================================
// DAMAGE
// ============================================================================

/// Everything that can hurt the hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSource {
    BlackHole,
    Asteroid,
    Pirate,
    SolarFlare,
    Anomaly,
    Nebula,
}

impl DamageSource {
    pub fn base_damage(self) -> i32 {
        match self {
            Self::BlackHole => 20,
            Self::Pirate => 15,
            Self::Anomaly => 12,
            Self::Asteroid => 10,
            Self::SolarFlare => 8,
            Self::Nebula => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BlackHole => "black hole",
            Self::Asteroid => "asteroid",
            Self::Pirate => "pirate",
            Self::SolarFlare => "solar flare",
            Self::Anomaly => "anomaly",
            Self::Nebula => "nebula",
        }
    }
}

impl fmt::Display for DamageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// FREIGHTERS
// ============================================================================

/// Hull and cargo ranges for each faction's freighter class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreighterStats {
    pub health: i32,
    pub defense: i32,
    /// Inclusive lower bound on cargo credits.
    pub min_cargo: u32,
    /// Exclusive upper bound on cargo credits.
    pub max_cargo: u32,
    /// Chance the cargo hold is a pirate trap.
    pub trap_chance: f64,
}

pub fn freighter_stats(faction: Faction) -> FreighterStats {
    match faction {
        Faction::Aserian => FreighterStats {
            health: 200,
            defense: 30,
            min_cargo: 100,
            max_cargo: 500,
            trap_chance: 0.2,
        },
        Faction::Krynn => FreighterStats {
            health: 150,
            defense: 20,
            min_cargo: 200,
            max_cargo: 800,
            trap_chance: 0.3,
        },
        Faction::Eldari => FreighterStats {
            health: 300,
            defense: 40,
            min_cargo: 300,
            max_cargo: 1000,
            trap_chance: 0.4,
        },
    }
}

/// Penalty to raid success when a freighter sits in its own faction's space.
pub fn home_territory_raid_penalty(faction: Faction) -> f64 {
    match faction {
        Faction::Aserian => 0.20,
        Faction::Krynn => 0.15,
        Faction::Eldari => 0.25,
    }
}

/// One credits-for-blueprints deal offered by a freighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub credits: u32,
    pub blueprints: u32,
    pub reputation: i32,
}

const fn offer(credits: u32, blueprints: u32, reputation: i32) -> TradeOffer {
    TradeOffer {
        credits,
        blueprints,
        reputation,
    }
}

const ASERIAN_OFFERS: [TradeOffer; 3] = [offer(200, 2, 10), offer(500, 5, 25), offer(1000, 10, 50)];
const KRYNN_OFFERS: [TradeOffer; 3] = [offer(300, 3, 15), offer(600, 6, 30), offer(1200, 12, 60)];
const ELDARI_OFFERS: [TradeOffer; 3] = [offer(400, 4, 20), offer(800, 8, 40), offer(1500, 15, 80)];

/// The three trade tiers a faction's freighters offer, cheapest first.
pub fn trade_offers(faction: Faction) -> &'static [TradeOffer; 3] {
    match faction {
        Faction::Aserian => &ASERIAN_OFFERS,
        Faction::Krynn => &KRYNN_OFFERS,
        Faction::Eldari => &ELDARI_OFFERS,
    }
}

// ============================================================================
// MISSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    Combat,
    Exploration,
    Trade,
}

impl MissionKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Exploration => "exploration",
            Self::Trade => "trade",
        }
    }
}

/// Static description of a mission a faction can hand out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: MissionKind,
    /// Offered only at exactly this rank.
    pub rank: FactionRank,
    pub reputation: i32,
    pub credits: Option<u32>,
    pub blueprints: Option<u32>,
    pub technology: Option<&'static str>,
}

const ASERIAN_MISSIONS: [MissionTemplate; 2] = [
    MissionTemplate {
        name: "Secure Trade Route",
        description: "Clear pirate activity from an important trade route",
        kind: MissionKind::Combat,
        rank: FactionRank::Allied,
        reputation: 50,
        credits: Some(1000),
        blueprints: None,
        technology: None,
    },
    MissionTemplate {
        name: "Resource Survey",
        description: "Map and analyze resource-rich sectors",
        kind: MissionKind::Exploration,
        rank: FactionRank::Allied,
        reputation: 30,
        credits: None,
        blueprints: Some(2),
        technology: None,
    },
];

const KRYNN_MISSIONS: [MissionTemplate; 2] = [
    MissionTemplate {
        name: "Raid Convoy",
        description: "Attack and loot a valuable trade convoy",
        kind: MissionKind::Combat,
        rank: FactionRank::Allied,
        reputation: 40,
        credits: Some(1500),
        blueprints: None,
        technology: None,
    },
    MissionTemplate {
        name: "Smuggling Run",
        description: "Transport contraband through hostile space",
        kind: MissionKind::Trade,
        rank: FactionRank::Allied,
        reputation: 35,
        credits: None,
        blueprints: Some(3),
        technology: None,
    },
];

const ELDARI_MISSIONS: [MissionTemplate; 2] = [
    MissionTemplate {
        name: "Ancient Artifacts",
        description: "Recover artifacts from dangerous ruins",
        kind: MissionKind::Exploration,
        rank: FactionRank::Allied,
        reputation: 60,
        credits: None,
        blueprints: None,
        technology: Some("eldari_artifact"),
    },
    MissionTemplate {
        name: "Knowledge Exchange",
        description: "Transport sensitive data between Eldari sanctuaries",
        kind: MissionKind::Trade,
        rank: FactionRank::Allied,
        reputation: 45,
        credits: None,
        blueprints: Some(4),
        technology: None,
    },
];

pub fn mission_templates(faction: Faction) -> &'static [MissionTemplate] {
    match faction {
        Faction::Aserian => &ASERIAN_MISSIONS,
        Faction::Krynn => &KRYNN_MISSIONS,
        Faction::Eldari => &ELDARI_MISSIONS,
    }
}

/// Templates a faction offers at `rank`: exact rank match, and only for
/// ranks that offer missions at all.
pub fn eligible_templates(faction: Faction, rank: FactionRank) -> Vec<&'static MissionTemplate> {
    if !rank.offers_missions() {
        return Vec::new();
    }
    mission_templates(faction)
        .iter()
        .filter(|t| t.rank == rank)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_of(weights: &[(Tile, f64)], tile: Tile) -> f64 {
        weights.iter().find(|(t, _)| *t == tile).map(|(_, w)| *w).unwrap()
    }

    #[test]
    fn test_base_weights_leave_empty_dominant() {
        let total: f64 = BASE_SPAWN_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((1.0 - total - 0.73).abs() < 1e-9);
    }

    #[test]
    fn test_spawn_weights_scale_with_distance() {
        let near = spawn_weights(5.0);
        assert_eq!(near, BASE_SPAWN_WEIGHTS);

        let deep = spawn_weights(15.0);
        assert!((weight_of(&deep, Tile::BlackHole) - 0.03).abs() < 1e-9);
        assert!((weight_of(&deep, Tile::Derelict) - 0.03).abs() < 1e-9);
        assert!((weight_of(&deep, Tile::FuelStation) - 0.024).abs() < 1e-9);
        assert!((weight_of(&deep, Tile::Outpost(Faction::Krynn)) - 0.01).abs() < 1e-9);

        let frontier = spawn_weights(25.0);
        assert!((weight_of(&frontier, Tile::FuelStation) - 0.03 * 0.8 * 0.7).abs() < 1e-9);
        assert!((weight_of(&frontier, Tile::Outpost(Faction::Eldari)) - 0.012).abs() < 1e-9);
        assert!((weight_of(&frontier, Tile::BlackHole) - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_distance_thresholds_are_exclusive() {
        assert_eq!(spawn_weights(10.0), BASE_SPAWN_WEIGHTS);
        let at_twenty = spawn_weights(20.0);
        assert!((weight_of(&at_twenty, Tile::Outpost(Faction::Aserian)) - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_pick_tile_roulette() {
        let weights = BASE_SPAWN_WEIGHTS;
        assert_eq!(pick_tile(&weights, 0.0), Tile::BlackHole);
        assert_eq!(pick_tile(&weights, 0.019), Tile::BlackHole);
        assert_eq!(pick_tile(&weights, 0.02), Tile::Planet);
        assert_eq!(pick_tile(&weights, 0.10), Tile::Asteroid);
        assert_eq!(pick_tile(&weights, 0.265), Tile::Outpost(Faction::Eldari));
        assert_eq!(pick_tile(&weights, 0.28), Tile::Empty);
        assert_eq!(pick_tile(&weights, 0.999), Tile::Empty);
    }

    #[test]
    fn test_base_damage_values() {
        assert_eq!(DamageSource::BlackHole.base_damage(), 20);
        assert_eq!(DamageSource::Pirate.base_damage(), 15);
        assert_eq!(DamageSource::Asteroid.base_damage(), 10);
        assert_eq!(DamageSource::Anomaly.base_damage(), 12);
        assert_eq!(DamageSource::SolarFlare.base_damage(), 8);
        assert_eq!(DamageSource::Nebula.base_damage(), 5);
    }

    #[test]
    fn test_trade_offers_ascend() {
        for faction in Faction::ALL {
            let offers = trade_offers(faction);
            assert!(offers[0].credits < offers[1].credits);
            assert!(offers[1].credits < offers[2].credits);
        }
    }

    #[test]
    fn test_mission_templates_exact_rank() {
        assert_eq!(eligible_templates(Faction::Aserian, FactionRank::Allied).len(), 2);
        assert!(eligible_templates(Faction::Aserian, FactionRank::Respected).is_empty());
        assert!(eligible_templates(Faction::Krynn, FactionRank::Champion).is_empty());
        assert!(eligible_templates(Faction::Eldari, FactionRank::Neutral).is_empty());
    }
}
