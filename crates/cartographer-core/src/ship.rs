//! In-run ship upgrades bought with blueprints.

use crate::state::GameState;
use crate::visibility;
use cartographer_logic::upgrades::{next_cost, UpgradeEffect, UpgradeKind, UPGRADE_MAX_LEVEL};
use serde::{Deserialize, Serialize};

/// One upgrade slot on the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipUpgrade {
    pub kind: UpgradeKind,
    /// Only ever increases.
    pub current_level: u8,
    /// Blueprint cost of the next level.
    pub cost: u32,
}

impl ShipUpgrade {
    pub fn new(kind: UpgradeKind) -> Self {
        Self {
            kind,
            current_level: 0,
            cost: kind.base_cost(),
        }
    }

    pub fn is_maxed(&self) -> bool {
        self.current_level >= UPGRADE_MAX_LEVEL
    }
}

/// Buy the next level of `kind`.
pub fn purchase_upgrade(state: &GameState, kind: UpgradeKind) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let Some(index) = state.upgrades.iter().position(|u| u.kind == kind) else {
        return state.rejected(format!("{} is not fitted to this ship", kind.name()));
    };
    let slot = state.upgrades[index];
    if slot.is_maxed() {
        return state.rejected(format!("{} is already at max level", kind.name()));
    }
    if state.blueprints < slot.cost {
        return state.rejected(format!(
            "Not enough blueprints for {} (need {})",
            kind.name(),
            slot.cost
        ));
    }

    let level = slot.current_level + 1;
    let mut next = state.clone();
    next.blueprints -= slot.cost;
    next.upgrades[index] = ShipUpgrade {
        kind,
        current_level: level,
        cost: next_cost(slot.cost),
    };
    apply_effect(&mut next, kind.effect(level));
    next.record(vec![format!(
        "Installed {} level {}: {}",
        kind.name(),
        level,
        kind.effect_label(level)
    )]);
    next
}

fn apply_effect(state: &mut GameState, effect: UpgradeEffect) {
    match effect {
        UpgradeEffect::MaxFuel(max) => {
            state.max_fuel = max;
            state.fuel = state.fuel.min(max);
        }
        UpgradeEffect::BlackHoleResistance(resistance) => state.black_hole_resistance = resistance,
        UpgradeEffect::ScanRange(_) => visibility::refresh(state),
        UpgradeEffect::DamageMitigation(mitigation) => state.damage_reduction = mitigation,
    }
}
