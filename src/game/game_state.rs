use crate::game::bag::Bag;
use crate::game::board::Board;
use crate::game::player::{is_valid_name, Player, PlayerSetting, MAX_PLAYERS};
use crate::game::tile::{Coord, Tile, HAND_SIZE};
use crate::{Result, RowsAndColsError};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the active player has done so far this turn and not yet committed.
/// Placements and a swap are never both active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTurn {
    /// Cells filled this turn, in placement order. Their tiles are on the board.
    pub placements: Vec<Coord>,
    /// `None` while no swap is in progress; `Some(vec![])` is a pass.
    pub swap: Option<Vec<Tile>>,
}

impl PendingTurn {
    pub fn is_idle(&self) -> bool {
        self.placements.is_empty() && self.swap.is_none()
    }

    pub fn swap_len(&self) -> usize {
        self.swap.as_ref().map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.placements.clear();
        self.swap = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A player ended a turn with an empty hand and nothing left to draw.
    HandExhausted,
    /// Bag empty and every player passed in a row.
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub reason: GameOverReason,
    pub winning_score: u64,
    /// Indices of every player holding the top score.
    pub winners: Vec<usize>,
    pub winner_names: Vec<String>,
}

impl GameResult {
    pub fn sole_winner(&self) -> Option<&str> {
        match self.winner_names.as_slice() {
            [name] => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn announcement(&self) -> String {
        match self.winner_names.as_slice() {
            [] => "Nobody has won.".to_string(),
            [name] => format!("{} has won!", name),
            [rest @ .., last] => format!("{} and {} are joint winners!", rest.join(", "), last),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(GameResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub bag: Bag,
    pub players: Vec<Player>,
    pub current_player: usize,
    /// Tile picked out of the hand and not yet placed.
    pub held: Option<Tile>,
    pub pending: PendingTurn,
    pub status: GameStatus,
    /// Set on creation, cleared by the first action. A restored game starts cleared.
    pub newly_started: bool,
    pub consecutive_passes: usize,
    pub turns_played: usize,
}

impl GameState {
    /// Fills the bag, seeds the board with its first tile at the origin and
    /// deals a full hand to every seat in order.
    pub fn new_game(seats: &[PlayerSetting], rng: &mut StdRng) -> Result<Self> {
        if seats.is_empty() || seats.len() > MAX_PLAYERS {
            return Err(RowsAndColsError::InvalidSetup(format!(
                "{} players requested, expected 1 to {}",
                seats.len(),
                MAX_PLAYERS
            )));
        }
        if let Some(seat) = seats.iter().find(|s| !is_valid_name(&s.name)) {
            return Err(RowsAndColsError::InvalidSetup(format!(
                "player name {:?} spans several lines",
                seat.name
            )));
        }

        let mut bag = Bag::full(rng);
        let mut board = Board::new();
        if let Some(first) = bag.draw() {
            board.insert(Coord::ORIGIN, first);
        }

        let mut players: Vec<Player> = seats
            .iter()
            .map(|s| Player::new(s.name.clone(), s.is_ai))
            .collect();
        for player in &mut players {
            for slot in 0..HAND_SIZE {
                player.hand.replace(slot, bag.draw());
            }
        }

        log::info!(
            "🎲 New game: {} players, {} tiles left in the bag",
            players.len(),
            bag.len()
        );

        Ok(GameState {
            board,
            bag,
            players,
            current_player: 0,
            held: None,
            pending: PendingTurn::default(),
            status: GameStatus::InProgress,
            newly_started: true,
            consecutive_passes: 0,
            turns_played: 0,
        })
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub(crate) fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    pub fn result(&self) -> Option<&GameResult> {
        match &self.status {
            GameStatus::Finished(result) => Some(result),
            GameStatus::InProgress => None,
        }
    }

    pub fn is_saveable(&self) -> bool {
        !self.is_over() && !self.newly_started
    }

    /// Count of every tile kind wherever it sits: board, bag, hands, held tile
    /// and pending swap.
    pub fn tile_census(&self) -> HashMap<Tile, usize> {
        let mut census = HashMap::new();
        let hands = self.players.iter().flat_map(|p| p.hand.occupied().map(|(_, t)| t));
        let swap = self.pending.swap.iter().flatten().copied();
        for tile in self
            .board
            .tiles()
            .chain(self.bag.tiles().iter().copied())
            .chain(hands)
            .chain(self.held)
            .chain(swap)
        {
            *census.entry(tile).or_insert(0) += 1;
        }
        census
    }
}
