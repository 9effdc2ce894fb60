//! Core identifiers shared by every subsystem: factions, movement directions,
//! and the two coordinate spaces (cell within a sector, sector within the
//! galaxy).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of every sector grid, in cells.
pub const GRID_WIDTH: usize = 20;
/// Height of every sector grid, in cells.
pub const GRID_HEIGHT: usize = 10;

// ============================================================================
// FACTIONS
// ============================================================================

/// The three powers that claim space, run outposts, and fly freighters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Trading collective. Well-armed freighters.
    Aserian,
    /// Pirate clans. Fast, lightly defended smugglers.
    Krynn,
    /// Reclusive ancients. Slow, heavily shielded carriers.
    Eldari,
}

impl Faction {
    /// All factions in table order.
    pub const ALL: [Faction; 3] = [Faction::Aserian, Faction::Krynn, Faction::Eldari];

    pub fn name(self) -> &'static str {
        match self {
            Self::Aserian => "Aserian",
            Self::Krynn => "Krynn",
            Self::Eldari => "Eldari",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// DIRECTIONS
// ============================================================================

/// One of the four movement tokens accepted at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// The input token was not one of `up`, `down`, `left`, `right`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction token {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

// ============================================================================
// COORDINATES
// ============================================================================

/// A cell inside a sector grid. Always `x < GRID_WIDTH`, `y < GRID_HEIGHT`
/// for positions owned by the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Centre of the grid, where every run starts.
    pub const fn center() -> Self {
        Self::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
    }

    pub fn in_bounds(self) -> bool {
        self.x < GRID_WIDTH && self.y < GRID_HEIGHT
    }

    /// The neighbouring cell in `direction`, or `None` at the grid edge.
    pub fn step(self, direction: Direction) -> Option<GridPos> {
        match direction {
            Direction::Up if self.y > 0 => Some(Self::new(self.x, self.y - 1)),
            Direction::Down if self.y + 1 < GRID_HEIGHT => Some(Self::new(self.x, self.y + 1)),
            Direction::Left if self.x > 0 => Some(Self::new(self.x - 1, self.y)),
            Direction::Right if self.x + 1 < GRID_WIDTH => Some(Self::new(self.x + 1, self.y)),
            _ => None,
        }
    }

    /// The cell the ship lands on after leaving the grid through `direction`:
    /// the opposite edge of the neighbouring sector, same row/column.
    pub fn wrap(self, direction: Direction) -> GridPos {
        match direction {
            Direction::Up => Self::new(self.x, GRID_HEIGHT - 1),
            Direction::Down => Self::new(self.x, 0),
            Direction::Left => Self::new(GRID_WIDTH - 1, self.y),
            Direction::Right => Self::new(0, self.y),
        }
    }

    pub fn distance_to(self, other: GridPos) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A sector's position in the galaxy. Origin is `(0, 0)`; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectorCoord {
    pub x: i32,
    pub y: i32,
}

impl SectorCoord {
    pub const ORIGIN: SectorCoord = SectorCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Persistence key, `"x,y"`.
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Euclidean distance from the origin sector.
    pub fn distance_from_origin(self) -> f64 {
        let x = self.x as f64;
        let y = self.y as f64;
        (x * x + y * y).sqrt()
    }

    pub fn neighbor(self, direction: Direction) -> SectorCoord {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

impl fmt::Display for SectorCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
