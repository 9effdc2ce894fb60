//! Ship upgrades as data plus a single interpreter.
//!
//! An upgrade is a kind and a level. What a level *does* is answered by
//! [`UpgradeKind::effect`]; the engine applies the returned [`UpgradeEffect`]
//! and every other subsystem reads levels through the helper functions below
//! (scanner radius, shield mitigation, etc.) so each curve has one home.
//!
//! Permanent upgrades live on the player account and are bought with skill
//! points between runs. Their catalog is here too.

use serde::{Deserialize, Serialize};

/// Highest level of every in-run upgrade.
pub const UPGRADE_MAX_LEVEL: u8 = 3;

/// Cost growth per purchase.
const COST_GROWTH: f64 = 1.5;

/// Fuel capacity before any Extended Fuel Tank level.
pub const BASE_MAX_FUEL: i32 = 100;

// ============================================================================
// IN-RUN UPGRADES
// ============================================================================

/// Upgrades bought with blueprints during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    ExtendedFuelTank,
    AntiGravityThrusters,
    AdvancedScanner,
    ShieldGenerator,
}

/// Scanner reach derived from the Advanced Scanner level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScanRange {
    /// Euclidean radius in cells.
    Radius(f64),
    /// The entire current sector.
    WholeSector,
}

impl ScanRange {
    pub fn covers(self, distance: f64) -> bool {
        match self {
            Self::Radius(r) => distance <= r,
            Self::WholeSector => true,
        }
    }
}

/// What reaching a level changes on the ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// Set the fuel capacity. Current fuel is capped, not refilled.
    MaxFuel(i32),
    /// Fraction of black-hole pull resisted.
    BlackHoleResistance(f64),
    ScanRange(ScanRange),
    /// Fraction of incoming hull damage absorbed.
    DamageMitigation(f64),
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::ExtendedFuelTank,
        UpgradeKind::AntiGravityThrusters,
        UpgradeKind::AdvancedScanner,
        UpgradeKind::ShieldGenerator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ExtendedFuelTank => "Extended Fuel Tank",
            Self::AntiGravityThrusters => "Anti-Gravity Thrusters",
            Self::AdvancedScanner => "Advanced Scanner",
            Self::ShieldGenerator => "Shield Generator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ExtendedFuelTank => {
                "Increase fuel capacity for longer journeys between refueling stations."
            }
            Self::AntiGravityThrusters => {
                "Propulsion that resists black hole pull and outruns pirates."
            }
            Self::AdvancedScanner => "Long-range scanning that reveals nearby tiles.",
            Self::ShieldGenerator => "Energy shield that reduces damage from hazards and pirates.",
        }
    }

    /// Blueprint cost of the first level.
    pub fn base_cost(self) -> u32 {
        match self {
            Self::ExtendedFuelTank => 3,
            Self::AntiGravityThrusters => 5,
            Self::AdvancedScanner => 4,
            Self::ShieldGenerator => 6,
        }
    }

    /// The effect of owning `level` (1..=3). Level 0 and levels past the cap
    /// are clamped.
    pub fn effect(self, level: u8) -> UpgradeEffect {
        let level = level.min(UPGRADE_MAX_LEVEL);
        match self {
            Self::ExtendedFuelTank => UpgradeEffect::MaxFuel(max_fuel(level)),
            Self::AntiGravityThrusters => {
                UpgradeEffect::BlackHoleResistance(black_hole_resistance(level))
            }
            Self::AdvancedScanner => UpgradeEffect::ScanRange(scan_range(level)),
            Self::ShieldGenerator => UpgradeEffect::DamageMitigation(shield_mitigation(level)),
        }
    }

    /// Player-facing summary of `level`.
    pub fn effect_label(self, level: u8) -> String {
        match self.effect(level) {
            UpgradeEffect::MaxFuel(fuel) => format!("Fuel capacity {}", fuel),
            UpgradeEffect::BlackHoleResistance(r) if r >= 1.0 => {
                "Immune to black hole pull".to_string()
            }
            UpgradeEffect::BlackHoleResistance(r) => {
                format!("Reduce black hole pull by {:.0}%", r * 100.0)
            }
            UpgradeEffect::ScanRange(ScanRange::WholeSector) => {
                "Reveal all tiles in current sector".to_string()
            }
            UpgradeEffect::ScanRange(ScanRange::Radius(r)) => {
                format!("Reveal tiles {} spaces away", r)
            }
            UpgradeEffect::DamageMitigation(m) if m >= 1.0 => "Immune to damage".to_string(),
            UpgradeEffect::DamageMitigation(m) => format!("Reduce damage by {:.0}%", m * 100.0),
        }
    }
}

/// Cost of the next level after a purchase at `cost`.
pub fn next_cost(cost: u32) -> u32 {
    (cost as f64 * COST_GROWTH).floor() as u32
}

pub fn max_fuel(tank_level: u8) -> i32 {
    match tank_level {
        0 => BASE_MAX_FUEL,
        1 => BASE_MAX_FUEL * 3 / 2,
        2 => BASE_MAX_FUEL * 7 / 4,
        _ => BASE_MAX_FUEL * 2,
    }
}

pub fn black_hole_resistance(thruster_level: u8) -> f64 {
    if thruster_level >= UPGRADE_MAX_LEVEL {
        1.0
    } else {
        0.25 * thruster_level as f64
    }
}

/// Visibility reach: level 0 → 2, 1 → 3, 2 → 5, 3 → whole sector.
pub fn scan_range(scanner_level: u8) -> ScanRange {
    match scanner_level {
        0 => ScanRange::Radius(2.0),
        1 => ScanRange::Radius(3.0),
        2 => ScanRange::Radius(5.0),
        _ => ScanRange::WholeSector,
    }
}

/// 25% per Shield Generator level; level 3 is immune.
pub fn shield_mitigation(shield_level: u8) -> f64 {
    if shield_level >= UPGRADE_MAX_LEVEL {
        1.0
    } else {
        0.25 * shield_level as f64
    }
}

// ============================================================================
// PERMANENT UPGRADES
// ============================================================================

/// Upgrades bought with skill points and kept across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermanentUpgradeKind {
    FuelEfficiency,
    ScannerRange,
    BlackHoleResistance,
    ThrustBoosters,
    CargoExpansion,
    Shields,
    Hyperdrive,
    DiplomaticTranslator,
    MiningEfficiency,
    HullStrength,
}

impl PermanentUpgradeKind {
    pub const ALL: [PermanentUpgradeKind; 10] = [
        PermanentUpgradeKind::FuelEfficiency,
        PermanentUpgradeKind::ScannerRange,
        PermanentUpgradeKind::BlackHoleResistance,
        PermanentUpgradeKind::ThrustBoosters,
        PermanentUpgradeKind::CargoExpansion,
        PermanentUpgradeKind::Shields,
        PermanentUpgradeKind::Hyperdrive,
        PermanentUpgradeKind::DiplomaticTranslator,
        PermanentUpgradeKind::MiningEfficiency,
        PermanentUpgradeKind::HullStrength,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FuelEfficiency => "Fuel Efficiency",
            Self::ScannerRange => "Scanner Range",
            Self::BlackHoleResistance => "Black Hole Resistance",
            Self::ThrustBoosters => "Thrust Boosters",
            Self::CargoExpansion => "Cargo Expansion",
            Self::Shields => "Shields",
            Self::Hyperdrive => "Hyperdrive",
            Self::DiplomaticTranslator => "Diplomatic Translator",
            Self::MiningEfficiency => "Mining Efficiency",
            Self::HullStrength => "Hull Strength",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FuelEfficiency => "Reduce fuel consumption",
            Self::ScannerRange => "Detect objects from afar",
            Self::BlackHoleResistance => "Better resist black hole pull",
            Self::ThrustBoosters => "Diagonal movement",
            Self::CargoExpansion => "Carry more resources",
            Self::Shields => "Reduce damage taken",
            Self::Hyperdrive => "Emergency sector escape",
            Self::DiplomaticTranslator => "Better faction relations",
            Self::MiningEfficiency => "Better resource collection",
            Self::HullStrength => "Reduce all damage",
        }
    }

    /// Skill-point cost per level.
    pub fn cost(self) -> u32 {
        match self {
            Self::FuelEfficiency => 100,
            Self::ScannerRange => 150,
            Self::BlackHoleResistance => 200,
            Self::ThrustBoosters => 250,
            Self::CargoExpansion => 200,
            Self::Shields => 300,
            Self::Hyperdrive => 500,
            Self::DiplomaticTranslator => 400,
            Self::MiningEfficiency => 250,
            Self::HullStrength => 300,
        }
    }

    pub fn max_level(self) -> u8 {
        match self {
            Self::FuelEfficiency => 5,
            Self::ScannerRange => 3,
            Self::BlackHoleResistance => 5,
            Self::ThrustBoosters => 1,
            Self::CargoExpansion => 3,
            Self::Shields => 4,
            Self::Hyperdrive => 3,
            Self::DiplomaticTranslator => 4,
            Self::MiningEfficiency => 5,
            Self::HullStrength => 5,
        }
    }

    pub fn effect_description(self, level: u8) -> String {
        let level = level as u32;
        match self {
            Self::FuelEfficiency => format!("Reduce fuel consumption by {}%", level * 5),
            Self::ScannerRange => format!("Detect objects {} tiles away", level),
            Self::BlackHoleResistance => format!("Reduce pull effect by {}%", level * 10),
            Self::ThrustBoosters => "Enable diagonal movement".to_string(),
            Self::CargoExpansion => format!("+{}% cargo capacity", level * 50),
            Self::Shields => format!("Reduce damage by {}%", level * 25),
            Self::Hyperdrive => format!("{} emergency escapes per run", level),
            Self::DiplomaticTranslator => format!("+{}% reputation gains", level * 25),
            Self::MiningEfficiency => format!("+{}% mining yields", level * 20),
            Self::HullStrength => format!("Reduce damage by {}%", level * 5),
        }
    }
}
