use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_COLORS: u8 = 6;
pub const NUM_SHAPES: u8 = 6;
/// Copies of every color/shape kind in a full supply.
pub const COPIES_PER_KIND: usize = 3;
pub const TOTAL_TILES: usize = NUM_COLORS as usize * NUM_SHAPES as usize * COPIES_PER_KIND;
/// A line can never hold more tiles than an attribute has values.
pub const MAX_LINE_LENGTH: usize = 6;
pub const HAND_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub color: u8,
    pub shape: u8,
}

impl Tile {
    pub const fn new(color: u8, shape: u8) -> Self {
        Tile { color, shape }
    }

    pub fn is_valid(&self) -> bool {
        self.color < NUM_COLORS && self.shape < NUM_SHAPES
    }

    /// Every kind of tile, color-major.
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        (0..NUM_COLORS).flat_map(|color| (0..NUM_SHAPES).map(move |shape| Tile::new(color, shape)))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}s{}", self.color, self.shape)
    }
}

/// Which attribute two tiles on the same line have in common.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shared {
    Color,
    Shape,
}

impl Shared {
    /// Tiles sharing a line must match in exactly one attribute.
    pub fn between(a: Tile, b: Tile) -> Option<Shared> {
        match (a.color == b.color, a.shape == b.shape) {
            (true, false) => Some(Shared::Color),
            (false, true) => Some(Shared::Shape),
            _ => None,
        }
    }

    /// True when `a` and `b` match on this attribute and differ on the other one.
    pub fn holds(self, a: Tile, b: Tile) -> bool {
        Shared::between(a, b) == Some(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    pub fn step(self, direction: Direction) -> Coord {
        let (dx, dy) = direction.delta();
        Coord::new(self.x + dx, self.y + dy)
    }

    pub fn neighbors(self) -> [Coord; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Screen orientation: north is negative y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}
