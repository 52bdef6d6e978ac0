//! Sparse, unbounded playing surface and the placement-legality predicate.
//!
//! [`may_place`] is pure: the turn engine, undo and the move search all call the
//! very same function, so a move the search proposes is exactly a move a human
//! could have made.

use crate::game::tile::{Coord, Direction, Shared, Tile, MAX_LINE_LENGTH};
use std::collections::{BTreeMap, BTreeSet};

/// Orientation of a line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The two directions walking away from a cell along this axis.
    pub fn directions(self) -> (Direction, Direction) {
        match self {
            Axis::Horizontal => (Direction::West, Direction::East),
            Axis::Vertical => (Direction::North, Direction::South),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: BTreeMap<Coord, Tile>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, at: Coord) -> Option<Tile> {
        self.cells.get(&at).copied()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells.contains_key(&at)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Puts a tile down without any rule check. Returns the tile previously there.
    pub fn insert(&mut self, at: Coord, tile: Tile) -> Option<Tile> {
        self.cells.insert(at, tile)
    }

    pub fn remove(&mut self, at: Coord) -> Option<Tile> {
        self.cells.remove(&at)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.cells.iter().map(|(c, t)| (*c, *t))
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.values().copied()
    }

    /// How many copies of this exact tile kind lie on the board.
    pub fn count_of(&self, tile: Tile) -> usize {
        self.cells.values().filter(|t| **t == tile).count()
    }

    pub fn has_neighbor(&self, at: Coord) -> bool {
        at.neighbors().iter().any(|n| self.contains(*n))
    }

    /// Tiles met when walking from `from` (exclusive) in `direction` until the first gap.
    pub fn chain(&self, from: Coord, direction: Direction) -> Vec<Tile> {
        let mut tiles = Vec::new();
        let mut at = from.step(direction);
        while let Some(tile) = self.get(at) {
            tiles.push(tile);
            at = at.step(direction);
        }
        tiles
    }

    /// Maximal contiguous run through `at` along `axis`, ordered west→east or
    /// north→south. Contains just `at` when it has no neighbor on that axis.
    pub fn run_through(&self, at: Coord, axis: Axis) -> Vec<Coord> {
        let (back, forth) = axis.directions();
        let mut start = at;
        while self.contains(start.step(back)) {
            start = start.step(back);
        }
        let mut run = vec![start];
        let mut cursor = start;
        while self.contains(cursor.step(forth)) {
            cursor = cursor.step(forth);
            run.push(cursor);
        }
        run
    }

    /// Empty cells touching at least one tile. An empty board offers the origin only.
    pub fn frontier(&self) -> BTreeSet<Coord> {
        if self.is_empty() {
            return BTreeSet::from([Coord::ORIGIN]);
        }
        self.cells
            .keys()
            .flat_map(|c| c.neighbors())
            .filter(|n| !self.contains(*n))
            .collect()
    }

    /// See [`may_place`].
    pub fn may_place(&self, tile: Tile, placed_this_turn: &[Coord], at: Coord) -> bool {
        may_place(tile, self, placed_this_turn, at)
    }
}

impl FromIterator<(Coord, Tile)> for Board {
    fn from_iter<I: IntoIterator<Item = (Coord, Tile)>>(iter: I) -> Self {
        Board {
            cells: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// PLACEMENT LEGALITY
// ============================================================================

/// Decides whether `tile` may go to `at`, given the cells already placed during
/// the active turn (those cells are already on `board`).
pub fn may_place(tile: Tile, board: &Board, placed_this_turn: &[Coord], at: Coord) -> bool {
    if board.contains(at) {
        return false;
    }
    if board.is_empty() {
        return true;
    }

    // A turn that opened on an empty board has no anchored line to extend yet.
    let opened_on_empty_board = board.len() == placed_this_turn.len();
    if !placed_this_turn
        .iter()
        .all(|q| extends_turn_line(board, *q, at, opened_on_empty_board))
    {
        return false;
    }

    if !board.has_neighbor(at) {
        return false;
    }

    for direction in Direction::ALL {
        let Some(neighbor) = board.get(at.step(direction)) else {
            continue;
        };
        let Some(shared) = Shared::between(tile, neighbor) else {
            return false;
        };
        if !board
            .chain(at, direction)
            .into_iter()
            .all(|t| shared.holds(tile, t))
        {
            return false;
        }
    }

    bridge_is_consistent(tile, board, at, Axis::Horizontal)
        && bridge_is_consistent(tile, board, at, Axis::Vertical)
}

/// All placements of one turn lie on a single row or column, and a previously
/// placed cell can only be joined along a line it already belongs to.
fn extends_turn_line(board: &Board, q: Coord, at: Coord, opened_on_empty_board: bool) -> bool {
    let (axis, from, to, fixed) = if q.x == at.x {
        (Axis::Vertical, q.y.min(at.y), q.y.max(at.y), at.x)
    } else if q.y == at.y {
        (Axis::Horizontal, q.x.min(at.x), q.x.max(at.x), at.y)
    } else {
        return false;
    };

    let (back, forth) = axis.directions();
    let anchored = board.contains(q.step(back)) || board.contains(q.step(forth));
    if !anchored && !opened_on_empty_board {
        return false;
    }

    let cell = |v: i32| match axis {
        Axis::Vertical => Coord::new(fixed, v),
        Axis::Horizontal => Coord::new(v, fixed),
    };
    let candidate = match axis {
        Axis::Vertical => at.y,
        Axis::Horizontal => at.x,
    };
    (from..to).all(|v| v == candidate || board.contains(cell(v)))
}

/// When `at` has neighbors on both sides of `axis`, the two lines it joins must
/// share the same attribute and stay consistent tile by tile across the bridge.
fn bridge_is_consistent(tile: Tile, board: &Board, at: Coord, axis: Axis) -> bool {
    let (back, forth) = axis.directions();
    let back_chain = board.chain(at, back);
    let forth_chain = board.chain(at, forth);

    if back_chain.len() + forth_chain.len() + 1 > MAX_LINE_LENGTH {
        return false;
    }
    let (Some(&back_neighbor), Some(&forth_neighbor)) = (back_chain.first(), forth_chain.first())
    else {
        return true;
    };

    let shared = match (
        Shared::between(tile, back_neighbor),
        Shared::between(tile, forth_neighbor),
    ) {
        (Some(a), Some(b)) if a == b => a,
        _ => return false,
    };

    back_chain
        .iter()
        .all(|b1| forth_chain.iter().all(|b2| shared.holds(*b1, *b2)))
}
