//! Sector generation, the append-only sector store, and sector transitions.

use crate::freighter;
use crate::state::GameState;
use crate::visibility;
use cartographer_logic::tables::{pick_tile, spawn_weights};
use cartographer_logic::tiles::{count_tiles, empty_grid, Grid, Tile};
use cartographer_logic::types::{Faction, GridPos, SectorCoord};
use rand::Rng;
use std::collections::BTreeMap;

/// Roll a fresh sector at `distance` from the origin. Each cell is sampled
/// independently.
pub fn generate<R: Rng + ?Sized>(distance: f64, rng: &mut R) -> Grid {
    let weights = spawn_weights(distance);
    let mut grid = empty_grid();
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = pick_tile(&weights, rng.gen::<f64>());
        }
    }
    grid
}

/// Pristine grids of every sector generated so far, keyed by `"x,y"`.
/// An entry is never replaced once written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorStore {
    grids: BTreeMap<String, Grid>,
}

impl SectorStore {
    /// A store holding only the origin sector, which is always empty space.
    pub fn with_origin() -> Self {
        let mut store = Self::default();
        store.grids.insert(SectorCoord::ORIGIN.key(), empty_grid());
        store
    }

    pub fn contains(&self, coord: SectorCoord) -> bool {
        self.grids.contains_key(&coord.key())
    }

    pub fn get(&self, coord: SectorCoord) -> Option<Grid> {
        self.grids.get(&coord.key()).copied()
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// The stored grid for `coord`, generating and storing it on first
    /// visit. The flag is `true` when the sector was generated by this call.
    pub fn get_or_create<R: Rng + ?Sized>(
        &mut self,
        coord: SectorCoord,
        rng: &mut R,
    ) -> (Grid, bool) {
        let key = coord.key();
        if let Some(grid) = self.grids.get(&key) {
            log::debug!("Sector {} restored from store", key);
            return (*grid, false);
        }
        let grid = generate(coord.distance_from_origin(), rng);
        log::debug!(
            "Sector {} generated at distance {:.2}",
            key,
            coord.distance_from_origin()
        );
        self.grids.insert(key, grid);
        (grid, true)
    }
}

/// Faction holding a strict majority of outposts in `grid`, if any.
pub fn territory_claim(grid: &Grid) -> Option<Faction> {
    let counts: Vec<(Faction, usize)> = Faction::ALL
        .into_iter()
        .map(|f| (f, count_tiles(grid, Tile::Outpost(f))))
        .collect();
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .into_iter()
        .find(|&(_, n)| n > 0 && n * 2 > total)
        .map(|(f, _)| f)
}

/// Move the ship into `coord`, arriving at `position`. Returns the arrival
/// messages; the caller logs them.
pub(crate) fn enter_sector<R: Rng + ?Sized>(
    state: &mut GameState,
    coord: SectorCoord,
    position: GridPos,
    rng: &mut R,
) -> Vec<String> {
    let key = coord.key();
    let distance = coord.distance_from_origin();
    let (grid, created) = state.sectors.get_or_create(coord, rng);

    let mut messages = Vec::new();
    if created {
        messages.push(format!("Entering new sector at {}", coord));
        messages.push(format!(
            "Distance from origin: {} sectors",
            distance.floor() as i64
        ));
    } else {
        messages.push("Entering previously explored sector".to_string());
    }

    state.grid = grid;
    state.current_sector = coord;
    state.player_position = position;

    if created {
        if let Some(faction) = territory_claim(&grid) {
            state.faction_territories.insert(key.clone(), faction);
            messages.push(format!("This sector is claimed by the {}", faction));
        }
        messages.extend(freighter::spawn_in_new_sector(state, rng));
    }

    freighter::redraw(state);
    visibility::reseed(state);

    if state.explored_sectors.insert(key) {
        state.stats.sectors_explored += 1;
    }
    if distance > state.stats.max_distance_reached {
        state.stats.max_distance_reached = distance;
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartographer_logic::tiles::set_tile;
    use cartographer_logic::types::{GRID_HEIGHT, GRID_WIDTH};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_is_mostly_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate(0.0, &mut rng);
        let empty = count_tiles(&grid, Tile::Empty);
        assert!(empty > GRID_WIDTH * GRID_HEIGHT / 2, "only {} empty cells", empty);
        assert_eq!(count_tiles(&grid, Tile::Player), 0);
    }

    #[test]
    fn test_forced_low_roll_fills_with_first_weight() {
        let mut rng = StepRng::new(0, 0);
        let grid = generate(5.0, &mut rng);
        assert_eq!(count_tiles(&grid, Tile::BlackHole), GRID_WIDTH * GRID_HEIGHT);
    }

    #[test]
    fn test_revisit_returns_identical_grid() {
        let mut store = SectorStore::with_origin();
        let mut rng = StdRng::seed_from_u64(42);
        let coord = SectorCoord::new(3, -2);
        let (first, created) = store.get_or_create(coord, &mut rng);
        assert!(created);
        for _ in 0..5 {
            let (again, created) = store.get_or_create(coord, &mut rng);
            assert!(!created);
            assert_eq!(again, first);
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_origin_is_empty() {
        let store = SectorStore::with_origin();
        assert_eq!(store.get(SectorCoord::ORIGIN), Some(empty_grid()));
        assert!(!store.contains(SectorCoord::new(1, 0)));
    }

    #[test]
    fn test_territory_needs_strict_majority() {
        let mut grid = empty_grid();
        assert_eq!(territory_claim(&grid), None);

        set_tile(&mut grid, GridPos::new(0, 0), Tile::Outpost(Faction::Krynn));
        assert_eq!(territory_claim(&grid), Some(Faction::Krynn));

        set_tile(&mut grid, GridPos::new(1, 0), Tile::Outpost(Faction::Eldari));
        assert_eq!(territory_claim(&grid), None);

        set_tile(&mut grid, GridPos::new(2, 0), Tile::Outpost(Faction::Eldari));
        assert_eq!(territory_claim(&grid), Some(Faction::Eldari));
    }
}
