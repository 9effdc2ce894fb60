//! The per-move orchestrator.
//!
//! One call runs, in order: freighter upkeep, mission refresh, the move
//! itself (a sector transition or a tile effect), clamping and terminal
//! checks, then visibility. A run that is already over ignores moves.

use crate::damage;
use crate::freighter;
use crate::missions;
use crate::reputation;
use crate::rng::chance;
use crate::sector;
use crate::state::GameState;
use crate::visibility;
use cartographer_logic::factions::FactionAction;
use cartographer_logic::tables::DamageSource;
use cartographer_logic::tiles::{set_tile, tile_at, Tile};
use cartographer_logic::types::{Direction, Faction, GridPos};
use rand::Rng;

const ASTEROID_MINING_CHANCE: f64 = 0.3;
const ASTEROID_FUEL: i32 = 20;
const NEBULA_DAMAGE_CHANCE: f64 = 0.4;
const DERELICT_SALVAGE_CHANCE: f64 = 0.5;
const DERELICT_BLUEPRINTS: u32 = 2;

/// What stepping onto a tile did, before the flat fuel cost.
struct TileOutcome {
    messages: Vec<String>,
    /// Replaces the `-1` fuel cost when set.
    fuel_change: Option<i32>,
}

impl TileOutcome {
    fn quiet() -> Self {
        Self::log(Vec::new())
    }

    fn log(messages: Vec<String>) -> Self {
        Self {
            messages,
            fuel_change: None,
        }
    }
}

/// Move the ship one cell in `direction`.
pub fn move_player<R: Rng + ?Sized>(
    state: &GameState,
    direction: Direction,
    rng: &mut R,
) -> GameState {
    if state.game_over {
        return state.clone();
    }

    let mut next = state.clone();
    freighter::advance(&mut next);
    missions::refresh(&mut next);
    next.docked_at = None;

    let from = next.player_position;
    let messages = match from.step(direction) {
        Some(target) => step_within_sector(&mut next, from, target, rng),
        None => {
            let coord = next.current_sector.neighbor(direction);
            sector::enter_sector(&mut next, coord, from.wrap(direction), rng)
        }
    };

    next.record(messages);
    next.settle();
    visibility::refresh(&mut next);
    next
}

fn step_within_sector<R: Rng + ?Sized>(
    state: &mut GameState,
    from: GridPos,
    target: GridPos,
    rng: &mut R,
) -> Vec<String> {
    let tile = tile_at(&state.grid, target);
    set_tile(&mut state.grid, from, Tile::Empty);
    state.player_position = target;
    // Upkeep may already have moved a freighter onto `from`.
    freighter::redraw(state);

    let outcome = match tile {
        Tile::BlackHole => on_black_hole(state),
        Tile::Planet => on_planet(state),
        Tile::Asteroid => on_asteroid(rng),
        Tile::Nebula => on_nebula(state, rng),
        Tile::FuelStation => on_fuel_station(state),
        Tile::Derelict => on_derelict(state, rng),
        Tile::Outpost(faction) => on_outpost(state, faction),
        Tile::Freighter(_) => on_freighter(state, target),
        Tile::Empty | Tile::Player => TileOutcome::quiet(),
    };

    let change = outcome.fuel_change.unwrap_or(-1);
    state.fuel = (state.fuel + change).clamp(0, state.max_fuel);
    state.stats.tiles_explored += 1;
    state.stats.turns_played += 1;
    outcome.messages
}

// ── tile effects ────────────────────────────────────────────────────────

fn on_black_hole(state: &mut GameState) -> TileOutcome {
    let messages = damage::inflict(state, DamageSource::BlackHole, 1.0);
    if state.hull > 0 {
        state.stats.black_holes_escaped += 1;
    }
    TileOutcome::log(messages)
}

fn on_planet(state: &mut GameState) -> TileOutcome {
    state.gain_blueprints(1);
    state.stats.planets_discovered += 1;
    TileOutcome::log(vec!["Discovered a new planet!".to_string()])
}

fn on_asteroid<R: Rng + ?Sized>(rng: &mut R) -> TileOutcome {
    if chance(rng, ASTEROID_MINING_CHANCE) {
        TileOutcome {
            messages: vec!["Successfully mined fuel from asteroid!".to_string()],
            fuel_change: Some(ASTEROID_FUEL),
        }
    } else {
        TileOutcome::quiet()
    }
}

fn on_nebula<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TileOutcome {
    let mut messages = vec!["Entering nebula...".to_string()];
    if chance(rng, NEBULA_DAMAGE_CHANCE) {
        messages.extend(damage::inflict(state, DamageSource::Nebula, 1.0));
    } else {
        messages.push("Safely traversed the nebula.".to_string());
    }
    state.stats.nebulae_traversed += 1;
    TileOutcome::log(messages)
}

fn on_fuel_station(state: &mut GameState) -> TileOutcome {
    TileOutcome {
        messages: vec!["Refueling station found!".to_string()],
        fuel_change: Some(state.max_fuel - state.fuel),
    }
}

fn on_derelict<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TileOutcome {
    let mut messages = vec!["Exploring derelict ship...".to_string()];
    if chance(rng, DERELICT_SALVAGE_CHANCE) {
        state.gain_blueprints(DERELICT_BLUEPRINTS);
        messages.push(format!("Found {} blueprints!", DERELICT_BLUEPRINTS));
    }
    state.stats.derelicts_explored += 1;
    TileOutcome::log(messages)
}

fn on_outpost(state: &mut GameState, faction: Faction) -> TileOutcome {
    let mut messages = vec![format!("Entered {} territory", faction)];
    messages.extend(reputation::award(state, faction, FactionAction::ExploreTerritory, 1.0));
    state.docked_at = Some(faction);
    messages.push(format!("Docked at the {} sanctuary", faction));
    TileOutcome::log(messages)
}

fn on_freighter(state: &mut GameState, target: GridPos) -> TileOutcome {
    match state.local_freighters().find(|f| f.position == target) {
        Some(freighter) => {
            TileOutcome::log(vec![format!("Encountered {} freighter!", freighter.faction)])
        }
        None => TileOutcome::quiet(),
    }
}
