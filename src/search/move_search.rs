//! Exhaustive move search for computer players.
//!
//! Every ordered subset of the hand is tried against every frontier cell the
//! turn can still reach. Each legal prefix is itself a complete candidate
//! turn, so the walk scores as it goes and backtracks on the scratch board.
//! Orders that lead to a set of placements already seen are cut off.

use crate::engine::moves::{Move, Placement};
use crate::game::board::{may_place, Board};
use crate::game::get_legal_moves::candidate_cells;
use crate::game::hand::Hand;
use crate::game::tile::{Coord, Tile, HAND_SIZE};
use crate::scoring::score_turn;
use crate::search::config::SearchConfig;
use crate::search::swap_policy::choose_swap;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, HashSet};

/// Owned snapshot of everything the search reads.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub board: Board,
    pub hand: Hand,
    pub bag_len: usize,
    /// Drives tie-breaks and the random swap, so equal requests get equal answers.
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    pub score: u64,
    pub candidates_examined: usize,
    pub timed_out: bool,
}

/// Same cells holding the same tiles, whatever the placement order.
type TurnKey = Vec<(Coord, Tile)>;

#[derive(Debug, Default)]
struct Leaders {
    score: u64,
    tiles: usize,
    ties: BTreeMap<TurnKey, Vec<Placement>>,
    examined: usize,
}

impl Leaders {
    fn rank(score: u64, tiles: usize) -> (u64, Reverse<usize>) {
        (score, Reverse(tiles))
    }

    fn offer(&mut self, key: TurnKey, path: &[(Placement, Tile)], score: u64) {
        self.examined += 1;
        let incoming = Self::rank(score, path.len());
        match incoming.cmp(&Self::rank(self.score, self.tiles)) {
            Ordering::Less if !self.ties.is_empty() => return,
            Ordering::Greater => self.ties.clear(),
            _ => {}
        }
        if self.ties.is_empty() {
            self.score = score;
            self.tiles = path.len();
        }

        self.ties
            .entry(key)
            .or_insert_with(|| path.iter().map(|(p, _)| *p).collect());
    }

    fn merge(&mut self, other: Leaders) {
        self.examined += other.examined;
        if other.ties.is_empty() {
            return;
        }
        let incoming = Self::rank(other.score, other.tiles);
        let ordering = if self.ties.is_empty() {
            Ordering::Greater
        } else {
            incoming.cmp(&Self::rank(self.score, self.tiles))
        };
        match ordering {
            Ordering::Less => {}
            Ordering::Greater => {
                self.score = other.score;
                self.tiles = other.tiles;
                self.ties = other.ties;
            }
            Ordering::Equal => {
                for (key, placements) in other.ties {
                    self.ties.entry(key).or_insert(placements);
                }
            }
        }
    }
}

struct Walk<'a> {
    hand: &'a Hand,
    board: Board,
    placed: Vec<Coord>,
    path: Vec<(Placement, Tile)>,
    used: [bool; HAND_SIZE],
    /// Legality only depends on which cells hold which tiles, not on the
    /// order they went down, so each set is expanded once.
    visited: HashSet<TurnKey>,
}

impl<'a> Walk<'a> {
    fn new(board: &Board, hand: &'a Hand) -> Self {
        Walk {
            hand,
            board: board.clone(),
            placed: Vec::new(),
            path: Vec::new(),
            used: [false; HAND_SIZE],
            visited: HashSet::new(),
        }
    }

    /// Free slots, skipping a slot whose tile an earlier free slot already offers.
    fn distinct_free_slots(&self) -> Vec<(usize, Tile)> {
        let mut seen: Vec<Tile> = Vec::new();
        self.hand
            .occupied()
            .filter(|(slot, _)| !self.used[*slot])
            .filter(|(_, tile)| {
                if seen.contains(tile) {
                    false
                } else {
                    seen.push(*tile);
                    true
                }
            })
            .collect()
    }

    fn push(&mut self, slot: usize, tile: Tile, at: Coord) {
        self.board.insert(at, tile);
        self.placed.push(at);
        self.path.push((Placement::new(slot, at), tile));
        self.used[slot] = true;
    }

    fn pop(&mut self) {
        if let Some((placement, _)) = self.path.pop() {
            self.board.remove(placement.at);
            self.placed.pop();
            self.used[placement.slot] = false;
        }
    }

    fn score_and_descend(&mut self, leaders: &mut Leaders) {
        let mut key: TurnKey = self.path.iter().map(|(p, tile)| (p.at, *tile)).collect();
        key.sort();
        if !self.visited.insert(key.clone()) {
            return;
        }
        match score_turn(&self.board, &self.placed) {
            Ok(score) => leaders.offer(key, &self.path, score),
            Err(e) => {
                log::error!("❌ Search reached an impossible board: {}", e);
                return;
            }
        }
        self.descend(leaders);
    }

    fn descend(&mut self, leaders: &mut Leaders) {
        let cells = candidate_cells(&self.board, &self.placed);
        for (slot, tile) in self.distinct_free_slots() {
            for &at in &cells {
                if !may_place(tile, &self.board, &self.placed, at) {
                    continue;
                }
                self.push(slot, tile, at);
                self.score_and_descend(leaders);
                self.pop();
            }
        }
    }
}

/// Legal first placements, in a fixed order.
fn roots(board: &Board, hand: &Hand) -> Vec<(usize, Tile, Coord)> {
    let walk = Walk::new(board, hand);
    let cells = candidate_cells(board, &[]);
    walk.distinct_free_slots()
        .into_iter()
        .flat_map(|(slot, tile)| cells.iter().map(move |&at| (slot, tile, at)))
        .filter(|&(_, tile, at)| may_place(tile, board, &[], at))
        .collect()
}

fn explore_root(board: &Board, hand: &Hand, root: (usize, Tile, Coord)) -> Leaders {
    let (slot, tile, at) = root;
    let mut leaders = Leaders::default();
    let mut walk = Walk::new(board, hand);
    walk.push(slot, tile, at);
    walk.score_and_descend(&mut leaders);
    leaders
}

/// Finds the highest-scoring turn for `request.hand`, preferring fewer tiles
/// on equal scores and drawing uniformly among what is still tied. Falls back
/// to [`choose_swap`] when nothing can be placed.
pub fn find_best_move(request: &SearchRequest, config: &SearchConfig) -> SearchOutcome {
    let mut rng = StdRng::seed_from_u64(request.seed);
    let roots = roots(&request.board, &request.hand);

    let per_root: Vec<Leaders> = if config.parallel {
        roots
            .par_iter()
            .map(|&root| explore_root(&request.board, &request.hand, root))
            .collect()
    } else {
        roots
            .iter()
            .map(|&root| explore_root(&request.board, &request.hand, root))
            .collect()
    };

    let mut leaders = Leaders::default();
    for found in per_root {
        leaders.merge(found);
    }
    log::debug!(
        "Search examined {} candidate turns, {} tied at {} points",
        leaders.examined,
        leaders.ties.len(),
        leaders.score
    );

    let tied: Vec<Vec<Placement>> = leaders.ties.into_values().collect();
    match tied.choose(&mut rng) {
        Some(placements) => SearchOutcome {
            mv: Move::Place(placements.clone()),
            score: leaders.score,
            candidates_examined: leaders.examined,
            timed_out: false,
        },
        None => SearchOutcome {
            mv: choose_swap(&request.board, &request.hand, request.bag_len, &mut rng),
            score: 0,
            candidates_examined: leaders.examined,
            timed_out: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(tiles: &[Tile]) -> Hand {
        let mut hand = Hand::default();
        for &tile in tiles {
            let _ = hand.put_in_first_empty(tile);
        }
        hand
    }

    fn request(board: Board, hand: Hand) -> SearchRequest {
        SearchRequest {
            board,
            hand,
            bag_len: 20,
            seed: 5,
        }
    }

    fn replay(board: &Board, hand: &Hand, placements: &[Placement]) -> u64 {
        let mut board = board.clone();
        let mut placed = Vec::new();
        for p in placements {
            let tile = hand.get(p.slot).expect("slot holds a tile");
            assert!(may_place(tile, &board, &placed, p.at), "illegal step {:?}", p);
            board.insert(p.at, tile);
            placed.push(p.at);
        }
        score_turn(&board, &placed).unwrap()
    }

    #[test]
    fn test_finds_longest_line() {
        let board: Board = [(Coord::ORIGIN, Tile::new(0, 0))].into_iter().collect();
        let hand = hand(&[
            Tile::new(0, 1),
            Tile::new(0, 2),
            Tile::new(0, 3),
            Tile::new(4, 4),
        ]);
        let outcome = find_best_move(&request(board.clone(), hand), &SearchConfig::sequential());

        assert_eq!(outcome.score, 4);
        assert_eq!(outcome.mv.tile_count(), 3);
        match &outcome.mv {
            Move::Place(placements) => assert_eq!(replay(&board, &hand, placements), 4),
            other => panic!("expected placements, got {:?}", other),
        }
    }

    #[test]
    fn test_prefers_completing_a_line() {
        let board: Board = (0..5)
            .map(|x| (Coord::new(x, 0), Tile::new(x as u8, 2)))
            .collect();
        let hand = hand(&[Tile::new(5, 2), Tile::new(0, 3)]);
        let outcome = find_best_move(&request(board, hand), &SearchConfig::sequential());
        assert_eq!(outcome.score, 12);
        assert_eq!(outcome.mv.tile_count(), 1);
    }

    #[test]
    fn test_equal_scores_prefer_fewer_tiles() {
        let board: Board = [
            (Coord::new(0, 0), Tile::new(0, 0)),
            (Coord::new(1, 0), Tile::new(0, 1)),
        ]
        .into_iter()
        .collect();
        let hand = hand(&[Tile::new(0, 2), Tile::new(1, 0), Tile::new(2, 0)]);

        // Two tiles down the column score as much as one tile on the row.
        let mut column = board.clone();
        let mut placed = Vec::new();
        for (tile, at) in [(Tile::new(1, 0), Coord::new(0, 1)), (Tile::new(2, 0), Coord::new(0, 2))] {
            assert!(may_place(tile, &column, &placed, at));
            column.insert(at, tile);
            placed.push(at);
        }
        assert_eq!(score_turn(&column, &placed).unwrap(), 3);

        let outcome = find_best_move(&request(board, hand), &SearchConfig::sequential());
        assert_eq!(outcome.score, 3);
        match &outcome.mv {
            Move::Place(placements) => {
                assert_eq!(placements.len(), 1);
                assert_eq!(placements[0].slot, 0);
                assert!([Coord::new(-1, 0), Coord::new(2, 0)].contains(&placements[0].at));
            }
            other => panic!("expected placements, got {:?}", other),
        }
    }

    #[test]
    fn test_leaders_keep_fewest_tiles_in_any_order() {
        let (a, b, c) = (Tile::new(0, 2), Tile::new(1, 0), Tile::new(2, 0));
        let single = vec![(Placement::new(0, Coord::new(2, 0)), a)];
        let double = vec![
            (Placement::new(1, Coord::new(0, 1)), b),
            (Placement::new(2, Coord::new(0, 2)), c),
        ];
        let key = |path: &[(Placement, Tile)]| -> TurnKey {
            let mut key: TurnKey = path.iter().map(|(p, t)| (p.at, *t)).collect();
            key.sort();
            key
        };
        let offered = |paths: &[&Vec<(Placement, Tile)>]| {
            let mut leaders = Leaders::default();
            for path in paths {
                leaders.offer(key(path), path, 3);
            }
            leaders
        };

        for leaders in [offered(&[&single, &double]), offered(&[&double, &single])] {
            assert_eq!((leaders.score, leaders.tiles, leaders.examined), (3, 1, 2));
            assert_eq!(leaders.ties.keys().collect::<Vec<_>>(), vec![&key(&single)]);
        }

        let mut merged = offered(&[&single]);
        merged.merge(offered(&[&double]));
        let mut reversed = offered(&[&double]);
        reversed.merge(offered(&[&single]));
        for leaders in [merged, reversed] {
            assert_eq!((leaders.score, leaders.tiles, leaders.examined), (3, 1, 2));
            assert_eq!(leaders.ties.len(), 1);
            assert!(leaders.ties.contains_key(&key(&single)));
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let board: Board = [
            (Coord::new(0, 0), Tile::new(1, 1)),
            (Coord::new(1, 0), Tile::new(1, 2)),
            (Coord::new(0, 1), Tile::new(2, 1)),
        ]
        .into_iter()
        .collect();
        let hand = hand(&[
            Tile::new(1, 3),
            Tile::new(3, 1),
            Tile::new(1, 4),
            Tile::new(4, 1),
            Tile::new(2, 2),
        ]);
        let req = request(board, hand);
        let sequential = find_best_move(&req, &SearchConfig::sequential());
        let parallel = find_best_move(&req, &SearchConfig::default());
        assert_eq!(sequential, parallel);
        assert!(sequential.candidates_examined > 0);
    }

    #[test]
    fn test_duplicate_tiles_do_not_multiply_candidates() {
        let board: Board = [(Coord::ORIGIN, Tile::new(0, 0))].into_iter().collect();
        let single = find_best_move(
            &request(board.clone(), hand(&[Tile::new(0, 1)])),
            &SearchConfig::sequential(),
        );
        let doubled = find_best_move(
            &request(board, hand(&[Tile::new(0, 1), Tile::new(0, 1)])),
            &SearchConfig::sequential(),
        );
        assert_eq!(single.candidates_examined, 4);
        assert_eq!(doubled.candidates_examined, 4);
    }

    #[test]
    fn test_no_placement_falls_back_to_swap() {
        let board: Board = [(Coord::ORIGIN, Tile::new(0, 0))].into_iter().collect();
        let hand = hand(&[Tile::new(1, 1), Tile::new(2, 2)]);
        let outcome = find_best_move(&request(board, hand), &SearchConfig::default());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.candidates_examined, 0);
        assert_matches::assert_matches!(outcome.mv, Move::Swap(ref slots) if slots.len() == 1);
    }
}
