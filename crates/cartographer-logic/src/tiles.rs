//! Tile kinds and the fixed-size sector grid.
//!
//! A `Tile` is keyed by a stable identifier ([`Tile::id`]) rather than the
//! display character; [`Tile::symbol`] exists only for the render boundary.

use crate::types::{Faction, GridPos, GRID_HEIGHT, GRID_WIDTH};
use serde::{Deserialize, Serialize};

/// What occupies one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    /// The player's ship marker.
    Player,
    BlackHole,
    Planet,
    Asteroid,
    Nebula,
    FuelStation,
    Derelict,
    /// A faction outpost (sanctuary).
    Outpost(Faction),
    /// A faction freighter marker, redrawn every turn.
    Freighter(Faction),
}

impl Tile {
    /// Stable identifier used for dispatch and persistence.
    pub fn id(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Player => "player",
            Self::BlackHole => "black_hole",
            Self::Planet => "planet",
            Self::Asteroid => "asteroid",
            Self::Nebula => "nebula",
            Self::FuelStation => "fuel_station",
            Self::Derelict => "derelict",
            Self::Outpost(Faction::Aserian) => "outpost_aserian",
            Self::Outpost(Faction::Krynn) => "outpost_krynn",
            Self::Outpost(Faction::Eldari) => "outpost_eldari",
            Self::Freighter(Faction::Aserian) => "freighter_aserian",
            Self::Freighter(Faction::Krynn) => "freighter_krynn",
            Self::Freighter(Faction::Eldari) => "freighter_eldari",
        }
    }

    /// Display symbol for the render boundary.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Empty => ".",
            Self::Player => "^",
            Self::BlackHole => "X",
            Self::Planet => "O",
            Self::Asteroid => "#",
            Self::Nebula => "~",
            Self::FuelStation => "+",
            Self::Derelict => "D",
            Self::Outpost(Faction::Aserian) => "A",
            Self::Outpost(Faction::Krynn) => "K",
            Self::Outpost(Faction::Eldari) => "E",
            Self::Freighter(Faction::Aserian) => "AF",
            Self::Freighter(Faction::Krynn) => "KF",
            Self::Freighter(Faction::Eldari) => "EF",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Tile> {
        let tile = match symbol {
            "." => Self::Empty,
            "^" => Self::Player,
            "X" => Self::BlackHole,
            "O" => Self::Planet,
            "#" => Self::Asteroid,
            "~" => Self::Nebula,
            "+" => Self::FuelStation,
            "D" => Self::Derelict,
            "A" => Self::Outpost(Faction::Aserian),
            "K" => Self::Outpost(Faction::Krynn),
            "E" => Self::Outpost(Faction::Eldari),
            "AF" => Self::Freighter(Faction::Aserian),
            "KF" => Self::Freighter(Faction::Krynn),
            "EF" => Self::Freighter(Faction::Eldari),
            _ => return None,
        };
        Some(tile)
    }

    pub fn is_freighter(self) -> bool {
        matches!(self, Self::Freighter(_))
    }
}

/// Fog-of-war state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Never seen.
    #[default]
    Hidden,
    /// Seen before; shape remembered, contents not live.
    Explored,
    /// Inside scanner range right now.
    Visible,
}

/// One sector: `GRID_HEIGHT` rows of `GRID_WIDTH` tiles, indexed `[y][x]`.
pub type Grid = [[Tile; GRID_WIDTH]; GRID_HEIGHT];

/// Visibility layer parallel to [`Grid`].
pub type VisibilityGrid = [[Visibility; GRID_WIDTH]; GRID_HEIGHT];

pub fn empty_grid() -> Grid {
    [[Tile::Empty; GRID_WIDTH]; GRID_HEIGHT]
}

pub fn hidden_visibility() -> VisibilityGrid {
    [[Visibility::Hidden; GRID_WIDTH]; GRID_HEIGHT]
}

pub fn tile_at(grid: &Grid, pos: GridPos) -> Tile {
    grid[pos.y][pos.x]
}

pub fn set_tile(grid: &mut Grid, pos: GridPos, tile: Tile) {
    grid[pos.y][pos.x] = tile;
}

/// Iterate every cell position in row-major order.
pub fn positions() -> impl Iterator<Item = GridPos> {
    (0..GRID_HEIGHT).flat_map(|y| (0..GRID_WIDTH).map(move |x| GridPos::new(x, y)))
}

/// Count cells holding `tile`.
pub fn count_tiles(grid: &Grid, tile: Tile) -> usize {
    grid.iter().flatten().filter(|&&t| t == tile).count()
}
