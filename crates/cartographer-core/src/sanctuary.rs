//! Services at a faction outpost. Only available while docked.

use crate::reputation;
use crate::state::GameState;
use cartographer_logic::factions::{FactionAction, SANCTUARY_TRADE_THRESHOLD};
use cartographer_logic::types::Faction;

pub const REPAIR_COST: u32 = 50;
pub const TRADE_COST: u32 = 100;
pub const TRADE_BLUEPRINTS: u32 = 3;
/// Trade points scale with the deal size, one per 50 credits.
const TRADE_POINTS_MULTIPLIER: f64 = 2.0;

pub fn can_trade(state: &GameState, faction: Faction) -> bool {
    state.factions.get(faction).reputation >= SANCTUARY_TRADE_THRESHOLD
}

/// Full hull repair. Reputation scales with the share of hull restored.
pub fn repair(state: &GameState) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let Some(faction) = state.docked_at else {
        return state.rejected("You are not docked at a sanctuary");
    };
    if state.credits < REPAIR_COST {
        return state.rejected("Not enough credits for repairs");
    }
    let missing = state.max_hull - state.hull;
    if missing <= 0 {
        return state.rejected("Ship is already at full health");
    }

    let mut next = state.clone();
    next.hull = next.max_hull;
    next.credits -= REPAIR_COST;
    let multiplier = missing as f64 / state.max_hull as f64;

    let mut messages = vec![
        format!("Repaired {} hull damage", missing),
        format!("Spent {} credits", REPAIR_COST),
    ];
    messages.extend(reputation::award(
        &mut next,
        faction,
        FactionAction::ExploreTerritory,
        multiplier,
    ));
    next.record(messages);
    next
}

/// Credits for blueprints. Requires Acquainted standing.
pub fn trade(state: &GameState) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let Some(faction) = state.docked_at else {
        return state.rejected("You are not docked at a sanctuary");
    };
    if !can_trade(state, faction) {
        return state.rejected(format!("The {} sanctuary will not trade with you yet", faction));
    }
    if state.credits < TRADE_COST {
        return state.rejected("Not enough credits for trade");
    }

    let mut next = state.clone();
    next.credits -= TRADE_COST;
    next.gain_blueprints(TRADE_BLUEPRINTS);
    next.stats.diplomatic_missions += 1;

    let mut messages = vec![format!(
        "Traded {} credits for {} blueprints",
        TRADE_COST, TRADE_BLUEPRINTS
    )];
    messages.extend(reputation::award(
        &mut next,
        faction,
        FactionAction::TradeResources,
        TRADE_POINTS_MULTIPLIER,
    ));
    next.record(messages);
    next
}
