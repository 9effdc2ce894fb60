//! Faction freighters: spawning, patrols, and the three ways to deal with
//! one (trade, raid, defend).
//!
//! Freighters are state-only outside the current sector. Only local
//! freighters move, and only local freighters are drawn on the grid.

use crate::damage;
use crate::reputation;
use crate::rng::{chance, pick, roll_between};
use crate::state::GameState;
use cartographer_logic::factions::freighter_unlock_threshold;
use cartographer_logic::tables::{
    freighter_stats, home_territory_raid_penalty, trade_offers, DamageSource,
};
use cartographer_logic::tiles::{positions, set_tile, tile_at, Tile};
use cartographer_logic::types::{Direction, Faction, GridPos, SectorCoord};
use cartographer_logic::upgrades::UpgradeKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

const INTEL_CHANCE: f64 = 0.2;
const DEFEND_CHANCE: f64 = 0.7;
const DEFEND_REPUTATION: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub credits: u32,
    pub blueprints: u32,
    /// A trapped hold springs an ambush on a successful raid.
    pub is_trap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freighter {
    pub id: u64,
    pub faction: Faction,
    pub sector: SectorCoord,
    pub position: GridPos,
    pub facing: Direction,
    pub cargo: Cargo,
    pub health: i32,
    pub max_health: i32,
    pub defense: i32,
}

impl Freighter {
    /// A freighter facing right with freshly rolled cargo.
    pub fn new<R: Rng + ?Sized>(
        id: u64,
        faction: Faction,
        sector: SectorCoord,
        position: GridPos,
        rng: &mut R,
    ) -> Self {
        let stats = freighter_stats(faction);
        let credits = roll_between(rng, stats.min_cargo, stats.max_cargo);
        Self {
            id,
            faction,
            sector,
            position,
            facing: Direction::Right,
            cargo: Cargo {
                credits,
                blueprints: credits / 100,
                is_trap: chance(rng, stats.trap_chance),
            },
            health: stats.health,
            max_health: stats.health,
            defense: stats.defense,
        }
    }

    /// One patrol step: advance, or turn around at the grid edge.
    fn patrol(&mut self) {
        match self.position.step(self.facing) {
            Some(next) => self.position = next,
            None => self.facing = self.facing.opposite(),
        }
    }
}

// ============================================================================
// UPKEEP
// ============================================================================

/// Move the freighters of the current sector one step and redraw them.
pub fn advance_freighters(state: &GameState) -> GameState {
    let mut next = state.clone();
    advance(&mut next);
    next
}

pub(crate) fn advance(state: &mut GameState) {
    let sector = state.current_sector;
    for freighter in state.freighters.iter_mut().filter(|f| f.sector == sector) {
        freighter.patrol();
    }
    redraw(state);
}

/// Clear every freighter marker, draw the current sector's freighters, then
/// the player on top.
pub(crate) fn redraw(state: &mut GameState) {
    for cell in state.grid.iter_mut().flatten() {
        if cell.is_freighter() {
            *cell = Tile::Empty;
        }
    }
    let sector = state.current_sector;
    for freighter in state.freighters.iter().filter(|f| f.sector == sector) {
        set_tile(&mut state.grid, freighter.position, Tile::Freighter(freighter.faction));
    }
    state.place_player();
}

/// Maybe spawn a freighter in the freshly generated current sector.
pub(crate) fn spawn_in_new_sector<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
) -> Vec<String> {
    if !chance(rng, state.freighter_spawn_chance) {
        return Vec::new();
    }
    let open: Vec<GridPos> = positions()
        .filter(|&p| p != state.player_position && tile_at(&state.grid, p) == Tile::Empty)
        .collect();
    let (Some(&faction), Some(&position)) = (pick(rng, &Faction::ALL), pick(rng, &open)) else {
        return Vec::new();
    };

    let id = state.allocate_freighter_id();
    let sector = state.current_sector;
    state.freighters.push(Freighter::new(id, faction, sector, position, rng));
    log::debug!("Spawned {} freighter {} in sector {}", faction, id, sector.key());
    vec![format!("A {} freighter is patrolling this sector", faction)]
}

fn local_index(state: &GameState, freighter_id: u64) -> Option<usize> {
    state
        .freighters
        .iter()
        .position(|f| f.id == freighter_id && f.sector == state.current_sector)
}

// ============================================================================
// INTERACTIONS
// ============================================================================

/// Whether the faction's freighters will trade at the current reputation.
pub fn can_trade(state: &GameState, faction: Faction) -> bool {
    state.factions.get(faction).reputation >= freighter_unlock_threshold(faction)
}

/// Raid success probability against `freighter`, clamped to `[0.1, 0.9]`.
pub fn raid_chance(state: &GameState, freighter: &Freighter) -> f64 {
    let scanner = state.upgrade_level(UpgradeKind::AdvancedScanner) as f64;
    let thrusters = state.upgrade_level(UpgradeKind::AntiGravityThrusters) as f64;
    let shields = state.upgrade_level(UpgradeKind::ShieldGenerator) as f64;

    let mut chance = 0.5 + 0.10 * scanner + 0.15 * thrusters + 0.10 * shields;
    if state.faction_territories.get(&freighter.sector.key()) == Some(&freighter.faction) {
        chance -= home_territory_raid_penalty(freighter.faction);
    }
    chance.clamp(0.1, 0.9)
}

/// Buy trade tier `offer` (0..3) from a local freighter.
pub fn trade<R: Rng + ?Sized>(
    state: &GameState,
    freighter_id: u64,
    offer: usize,
    rng: &mut R,
) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let Some(index) = local_index(state, freighter_id) else {
        return state.rejected("No such freighter in this sector");
    };
    let faction = state.freighters[index].faction;
    if !can_trade(state, faction) {
        return state.rejected(format!("{} freighters will not trade with you yet", faction));
    }
    let Some(deal) = trade_offers(faction).get(offer).copied() else {
        return state.rejected("Unknown trade offer");
    };
    if state.credits < deal.credits {
        return state.rejected("Not enough credits for this trade");
    }

    let mut next = state.clone();
    next.credits -= deal.credits;
    next.gain_blueprints(deal.blueprints);
    next.stats.diplomatic_missions += 1;

    let mut messages = vec![format!(
        "Traded {} credits for {} blueprints",
        deal.credits, deal.blueprints
    )];
    messages.extend(reputation::change(&mut next, faction, deal.reputation));

    if chance(rng, INTEL_CHANCE) {
        let intel = roll_between(rng, 50, 100);
        next.credits += intel;
        messages.push(format!("Freighter shared valuable intel worth {} credits!", intel));
    }

    next.record(messages);
    next
}

/// Raid a local freighter.
pub fn raid<R: Rng + ?Sized>(state: &GameState, freighter_id: u64, rng: &mut R) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let Some(index) = local_index(state, freighter_id) else {
        return state.rejected("No such freighter in this sector");
    };

    let mut next = state.clone();
    let success = chance(rng, raid_chance(state, &state.freighters[index]));
    let mut messages = Vec::new();

    if success && next.freighters[index].cargo.is_trap {
        next.freighters[index].cargo.is_trap = false;
        messages.push("It's a trap! Reinforcements detected!".to_string());
        messages.extend(damage::inflict(&mut next, DamageSource::Pirate, 2.0));
    } else if success {
        let cargo = next.freighters[index].cargo;
        next.freighters[index].cargo.credits = 0;
        next.freighters[index].cargo.blueprints = 0;
        next.credits += cargo.credits;
        next.gain_blueprints(cargo.blueprints);
        messages.push("Raid successful! Acquired:".to_string());
        messages.push(format!("- {} credits", cargo.credits));
        messages.push(format!("- {} blueprints", cargo.blueprints));
    } else {
        messages.push("Raid failed! Taking damage!".to_string());
        messages.extend(damage::inflict(&mut next, DamageSource::Pirate, 1.0));
    }

    next.record(messages);
    next.settle();
    next
}

/// Help a local freighter fight off an attack.
pub fn defend<R: Rng + ?Sized>(state: &GameState, freighter_id: u64, rng: &mut R) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let Some(index) = local_index(state, freighter_id) else {
        return state.rejected("No such freighter in this sector");
    };
    let faction = state.freighters[index].faction;

    let mut next = state.clone();
    let mut messages = Vec::new();
    if chance(rng, DEFEND_CHANCE) {
        messages.push("Successfully defended the freighter!".to_string());
        messages.extend(reputation::change(&mut next, faction, DEFEND_REPUTATION));
        let bonus = roll_between(rng, 100, 300);
        next.credits += bonus;
        next.stats.diplomatic_missions += 1;
        messages.push(format!("Received {} credits as reward", bonus));
    } else {
        messages.push("Failed to defend the freighter!".to_string());
        messages.extend(damage::inflict(&mut next, DamageSource::Pirate, 0.5));
    }

    next.record(messages);
    next.settle();
    next
}
