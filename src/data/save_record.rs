use crate::game::bag::Bag;
use crate::game::board::Board;
use crate::game::game_state::{GameState, GameStatus, PendingTurn};
use crate::game::hand::Hand;
use crate::game::player::{Player, MAX_PLAYERS};
use crate::game::tile::{Coord, Tile, COPIES_PER_KIND, HAND_SIZE, TOTAL_TILES};
use crate::{Result, RowsAndColsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub is_ai: bool,
    pub score: u64,
    pub hand: [Option<Tile>; HAND_SIZE],
}

/// Everything needed to resume a game between two actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub players: Vec<PlayerRecord>,
    pub current_player: usize,
    pub board: Vec<(Coord, Tile)>,
    /// Undrawn tiles, front first.
    pub bag: Vec<Tile>,
    pub placements: Vec<Coord>,
    /// `None` when no swap is in progress.
    pub swap: Option<Vec<Tile>>,
    pub held: Option<Tile>,
}

fn corrupt(reason: impl Into<String>) -> RowsAndColsError {
    RowsAndColsError::CorruptSaveRecord(reason.into())
}

impl SaveRecord {
    pub fn capture(state: &GameState) -> Self {
        SaveRecord {
            players: state
                .players
                .iter()
                .map(|p| PlayerRecord {
                    name: p.name().to_string(),
                    is_ai: p.is_ai(),
                    score: p.score(),
                    hand: *p.hand().slots(),
                })
                .collect(),
            current_player: state.current_player,
            board: state.board.iter().collect(),
            bag: state.bag.tiles().to_vec(),
            placements: state.pending.placements.clone(),
            swap: state.pending.swap.clone(),
            held: state.held,
        }
    }

    /// Rebuilds a playable game, refusing any record the rules could not
    /// have produced.
    pub fn restore(self) -> Result<GameState> {
        self.validate()?;

        let board: Board = self.board.into_iter().collect();
        let players = self
            .players
            .into_iter()
            .map(|p| Player::restored(p.name, p.is_ai, p.score, Hand::new(p.hand)))
            .collect();

        Ok(GameState {
            board,
            bag: Bag::from_tiles(self.bag),
            players,
            current_player: self.current_player,
            held: self.held,
            pending: PendingTurn {
                placements: self.placements,
                swap: self.swap,
            },
            status: GameStatus::InProgress,
            newly_started: false,
            consecutive_passes: 0,
            turns_played: 0,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(corrupt(format!("{} players", self.players.len())));
        }
        if self.current_player >= self.players.len() {
            return Err(corrupt(format!("current player {} out of range", self.current_player)));
        }

        let mut cells = BTreeSet::new();
        if let Some((at, _)) = self.board.iter().find(|(at, _)| !cells.insert(*at)) {
            return Err(corrupt(format!("cell {} listed twice", at)));
        }
        if let Some(at) = self.placements.iter().find(|at| !cells.contains(*at)) {
            return Err(corrupt(format!("pending placement {} is not on the board", at)));
        }
        if !self.placements.is_empty() && self.swap.is_some() {
            return Err(corrupt("placements and swap pending together"));
        }

        let hands = self.players.iter().flat_map(|p| p.hand.iter().flatten());
        let all: Vec<Tile> = self
            .board
            .iter()
            .map(|(_, t)| *t)
            .chain(self.bag.iter().copied())
            .chain(hands.copied())
            .chain(self.held)
            .chain(self.swap.iter().flatten().copied())
            .collect();

        if let Some(tile) = all.iter().find(|t| !t.is_valid()) {
            return Err(corrupt(format!("tile {} out of range", tile)));
        }
        if all.len() != TOTAL_TILES {
            return Err(corrupt(format!("{} tiles instead of {}", all.len(), TOTAL_TILES)));
        }
        for kind in Tile::all_kinds() {
            let copies = all.iter().filter(|t| **t == kind).count();
            if copies != COPIES_PER_KIND {
                return Err(corrupt(format!("{} copies of {}", copies, kind)));
            }
        }
        Ok(())
    }
}
