//! Fog of war. Cells inside scanner range are `Visible`; cells seen before
//! stay `Explored`; everything else is `Hidden`.

use crate::state::GameState;
use cartographer_logic::tiles::{hidden_visibility, positions, Visibility};
use cartographer_logic::types::GridPos;
use cartographer_logic::upgrades::{scan_range, ScanRange, UpgradeKind};

/// Scanner reach for the ship's current Advanced Scanner level.
pub fn scanner_range(state: &GameState) -> ScanRange {
    scan_range(state.upgrade_level(UpgradeKind::AdvancedScanner))
}

/// Cells within `range` of `origin` (Euclidean).
pub fn cells_in_range(origin: GridPos, range: ScanRange) -> impl Iterator<Item = GridPos> {
    positions().filter(move |&p| range.covers(origin.distance_to(p)))
}

/// Downgrade every visible cell to explored, then mark the cells in scanner
/// range visible.
pub fn recompute(state: &GameState) -> GameState {
    let mut next = state.clone();
    refresh(&mut next);
    next
}

pub(crate) fn refresh(state: &mut GameState) {
    for cell in state.visibility.iter_mut().flatten() {
        if *cell == Visibility::Visible {
            *cell = Visibility::Explored;
        }
    }
    mark_visible(state);
}

/// Forget the previous sector: every cell hidden, then scanner range visible.
pub(crate) fn reseed(state: &mut GameState) {
    state.visibility = hidden_visibility();
    mark_visible(state);
}

fn mark_visible(state: &mut GameState) {
    let range = scanner_range(state);
    for pos in cells_in_range(state.player_position, range) {
        state.visibility[pos.y][pos.x] = Visibility::Visible;
    }
}
