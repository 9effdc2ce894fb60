//! Faction reputation ledger: points, raw adjustments, rank changes and
//! freighter unlocks.

use crate::state::GameState;
use cartographer_logic::factions::{
    clamp_reputation, freighter_unlock_threshold, rank_for, FactionAction,
};
use cartographer_logic::types::Faction;

/// Award the points for `action`, scaled by `multiplier` and floored.
pub fn award_points(
    state: &GameState,
    faction: Faction,
    action: FactionAction,
    multiplier: f64,
) -> GameState {
    let mut next = state.clone();
    let messages = award(&mut next, faction, action, multiplier);
    next.record(messages);
    next
}

/// Shift reputation by a raw `delta`.
pub fn adjust_reputation(state: &GameState, faction: Faction, delta: i32) -> GameState {
    let mut next = state.clone();
    let messages = change(&mut next, faction, delta);
    next.record(messages);
    next
}

pub(crate) fn award(
    state: &mut GameState,
    faction: Faction,
    action: FactionAction,
    multiplier: f64,
) -> Vec<String> {
    change(state, faction, action.scaled_points(multiplier))
}

/// Apply `delta`, clamp, and recompute the rank. Returns the messages
/// unlogged.
pub(crate) fn change(state: &mut GameState, faction: Faction, delta: i32) -> Vec<String> {
    let status = state.factions.get_mut(faction);
    let before = status.reputation;
    let old_rank = status.rank;
    status.reputation = clamp_reputation(before + delta);
    status.rank = rank_for(status.reputation);

    let mut messages = Vec::new();
    if delta >= 0 {
        messages.push(format!("Gained {} reputation with {}", delta, faction));
    } else {
        messages.push(format!("Lost {} reputation with {}", -delta, faction));
    }

    if status.rank > old_rank {
        messages.push(format!("Achieved new rank with {}: {}!", faction, status.rank));
    } else if status.rank < old_rank {
        messages.push(format!("Standing with {} fell to {}", faction, status.rank));
    }

    let threshold = freighter_unlock_threshold(faction);
    if before < threshold && status.reputation >= threshold {
        messages.push(format!("{} freighters are now available for trade!", faction));
    }
    messages
}
