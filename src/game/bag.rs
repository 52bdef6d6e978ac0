use crate::game::tile::{Tile, COPIES_PER_KIND};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Pool of undrawn tiles. Draws come from the front; returned tiles land at a
/// random position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    pub(crate) tiles: Vec<Tile>,
}

impl Bag {
    /// Full supply: every kind three times, each tile inserted at a fresh random
    /// position of the growing bag.
    pub fn full(rng: &mut StdRng) -> Self {
        let mut bag = Bag::default();
        for kind in Tile::all_kinds() {
            for _ in 0..COPIES_PER_KIND {
                bag.return_tile(kind, rng);
            }
        }
        bag
    }

    /// Bag holding exactly `tiles`, front first.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Bag { tiles }
    }

    /// Get a reference to the tiles in the bag
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn draw(&mut self) -> Option<Tile> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(0))
        }
    }

    /// Inserts at a uniformly random index in `0..=len`.
    pub fn return_tile(&mut self, tile: Tile, rng: &mut StdRng) {
        let index = rng.random_range(0..=self.tiles.len());
        self.tiles.insert(index, tile);
    }

    /// Returns tiles one by one; every insertion draws a new index over the
    /// bag as it grows.
    pub fn return_tiles<I: IntoIterator<Item = Tile>>(&mut self, tiles: I, rng: &mut StdRng) {
        for tile in tiles {
            self.return_tile(tile, rng);
        }
    }
}
