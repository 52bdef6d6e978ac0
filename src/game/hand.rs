use crate::game::tile::{Tile, HAND_SIZE};
use serde::{Deserialize, Serialize};

/// A player's rack: six slots, each possibly empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: [Option<Tile>; HAND_SIZE],
}

impl Hand {
    pub fn new(slots: [Option<Tile>; HAND_SIZE]) -> Self {
        Hand { slots }
    }

    pub fn slots(&self) -> &[Option<Tile>; HAND_SIZE] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<Tile> {
        self.slots.get(slot).copied().flatten()
    }

    /// Empties the slot and returns what it held.
    pub fn take(&mut self, slot: usize) -> Option<Tile> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Writes `tile` into the slot and returns what was there before.
    pub fn replace(&mut self, slot: usize, tile: Option<Tile>) -> Option<Tile> {
        match self.slots.get_mut(slot) {
            Some(cell) => std::mem::replace(cell, tile),
            None => tile,
        }
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Puts the tile in the lowest empty slot. Hands the tile back when full.
    pub fn put_in_first_empty(&mut self, tile: Tile) -> Result<usize, Tile> {
        match self.first_empty() {
            Some(slot) => {
                self.slots[slot] = Some(tile);
                Ok(slot)
            }
            None => Err(tile),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Occupied slots with their tiles, in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Tile)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_empty_slot_is_refilled_first() {
        let mut hand = Hand::new([Some(Tile::new(0, 0)), None, Some(Tile::new(1, 1)), None, None, None]);
        assert_eq!(hand.count(), 2);
        assert_eq!(hand.put_in_first_empty(Tile::new(2, 2)), Ok(1));
        assert_eq!(hand.put_in_first_empty(Tile::new(3, 3)), Ok(3));
        assert_eq!(hand.take(0), Some(Tile::new(0, 0)));
        assert_eq!(hand.first_empty(), Some(0));
    }

    #[test]
    fn test_full_hand_rejects_tile() {
        let mut hand = Hand::new([Some(Tile::new(0, 0)); HAND_SIZE]);
        assert_eq!(hand.put_in_first_empty(Tile::new(5, 5)), Err(Tile::new(5, 5)));
        assert!(!hand.is_empty());
        assert_eq!(hand.get(HAND_SIZE), None);
    }

    #[test]
    fn test_replace_exchanges_slot_content() {
        let mut hand = Hand::default();
        assert!(hand.is_empty());
        assert_eq!(hand.replace(2, Some(Tile::new(4, 1))), None);
        assert_eq!(hand.replace(2, None), Some(Tile::new(4, 1)));
        assert_eq!(hand.occupied().count(), 0);
    }
}
