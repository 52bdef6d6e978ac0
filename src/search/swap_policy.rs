use crate::engine::moves::Move;
use crate::game::board::Board;
use crate::game::hand::Hand;
use crate::game::tile::COPIES_PER_KIND;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Swap chosen when no placement exists.
///
/// Tiles whose other copies already sit on the board are dead weight and go
/// first, as many as the bag can take. Otherwise a single random tile goes.
/// With an empty bag nothing can be exchanged and the turn is a pass.
pub fn choose_swap(board: &Board, hand: &Hand, bag_len: usize, rng: &mut StdRng) -> Move {
    if bag_len == 0 {
        return Move::Swap(Vec::new());
    }

    let mut dead: Vec<usize> = hand
        .occupied()
        .filter(|(_, tile)| board.count_of(*tile) >= COPIES_PER_KIND - 1)
        .map(|(slot, _)| slot)
        .collect();
    dead.truncate(bag_len);
    if !dead.is_empty() {
        return Move::Swap(dead);
    }

    let occupied: Vec<usize> = hand.occupied().map(|(slot, _)| slot).collect();
    match occupied.choose(rng) {
        Some(&slot) => Move::Swap(vec![slot]),
        None => Move::Swap(Vec::new()),
    }
}
