use crate::game::tile::Coord;
use serde::{Deserialize, Serialize};

/// One tile going from a hand slot to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Placement {
    pub slot: usize,
    pub at: Coord,
}

impl Placement {
    pub fn new(slot: usize, at: Coord) -> Self {
        Placement { slot, at }
    }
}

/// A whole turn, decided up front (by the search) and applied through the
/// same operations a human would use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Placements in the order they must be made; earlier ones can enable later ones.
    Place(Vec<Placement>),
    /// Hand slots to put back into the bag. Empty means pass.
    Swap(Vec<usize>),
}

impl Move {
    pub fn tile_count(&self) -> usize {
        match self {
            Move::Place(placements) => placements.len(),
            Move::Swap(slots) => slots.len(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Swap(slots) if slots.is_empty())
    }
}
