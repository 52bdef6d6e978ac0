//! Turn lifecycle for the active player.
//!
//! `AwaitingMove → (Placing | Swapping) → end_turn → AwaitingMove` for the next
//! player, or `GameOver`. Every operation validates before it mutates, so a
//! rejected call leaves the game exactly as it was.

use crate::engine::moves::Move;
use crate::engine::outcome::TurnOutcome;
use crate::game::board::{may_place, Board};
use crate::game::game_state::{GameOverReason, GameResult, GameState, GameStatus};
use crate::game::get_legal_moves::get_legal_moves;
use crate::game::hand::Hand;
use crate::game::player::PlayerSetting;
use crate::game::tile::{Coord, Tile, HAND_SIZE};
use crate::highscores::{HighscoreEntry, HighscoreRegistry};
use crate::scoring::{score_turn, CLOSING_BONUS};
use crate::search::{find_best_move, SearchConfig, SearchOutcome, SearchRequest};
use crate::{Result, RowsAndColsError};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingMove,
    Placing,
    Swapping,
    GameOver,
}

/// Which actions the active player may take right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub can_swap: bool,
    pub can_cancel_swap: bool,
    pub can_undo: bool,
    pub can_end_turn: bool,
    pub can_ai_step: bool,
}

#[derive(Debug, Clone)]
pub struct TurnEngine {
    state: GameState,
    rng: StdRng,
    search_config: SearchConfig,
}

impl TurnEngine {
    pub fn new(seats: &[PlayerSetting], mut rng: StdRng) -> Result<Self> {
        let state = GameState::new_game(seats, &mut rng)?;
        Ok(Self::from_state(state, rng))
    }

    pub fn with_seed(seats: &[PlayerSetting], seed: u64) -> Result<Self> {
        Self::new(seats, StdRng::seed_from_u64(seed))
    }

    /// Resumes a restored game.
    pub fn from_state(state: GameState, rng: StdRng) -> Self {
        TurnEngine {
            state,
            rng,
            search_config: SearchConfig::default(),
        }
    }

    pub fn with_search_config(mut self, config: SearchConfig) -> Self {
        self.search_config = config;
        self
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search_config
    }

    // ========================================================================
    // READ ACCESSORS
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn current_player(&self) -> usize {
        self.state.current_player
    }

    pub fn hand(&self, player: usize) -> Option<&Hand> {
        self.state.players.get(player).map(|p| p.hand())
    }

    pub fn held(&self) -> Option<Tile> {
        self.state.held
    }

    pub fn pending_placements(&self) -> &[Coord] {
        &self.state.pending.placements
    }

    pub fn pending_swap(&self) -> Option<&[Tile]> {
        self.state.pending.swap.as_deref()
    }

    /// Cells where the held tile could go, for highlighting.
    pub fn legal_cells_for_held(&self) -> Vec<Coord> {
        match self.state.held {
            Some(tile) if !self.state.is_over() && self.state.pending.swap.is_none() => {
                get_legal_moves(&self.state.board, tile, &self.state.pending.placements)
            }
            _ => Vec::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        let pending = &self.state.pending;
        if self.state.is_over() {
            TurnPhase::GameOver
        } else if pending.swap.is_some() {
            TurnPhase::Swapping
        } else if !pending.placements.is_empty() {
            TurnPhase::Placing
        } else {
            TurnPhase::AwaitingMove
        }
    }

    pub fn controls(&self) -> Controls {
        if self.state.is_over() {
            return Controls::default();
        }
        let pending = &self.state.pending;
        let is_ai = self.state.current().is_ai();
        let has_placements = !pending.placements.is_empty();
        Controls {
            can_swap: !is_ai && pending.is_idle(),
            can_cancel_swap: pending.swap.is_some(),
            can_undo: !is_ai && !pending.is_idle(),
            can_end_turn: has_placements || pending.swap.is_some(),
            can_ai_step: is_ai && pending.is_idle(),
        }
    }

    // ========================================================================
    // PLACING
    // ========================================================================

    /// Exchanges the content of a hand slot with the held tile.
    pub fn select_tile(&mut self, slot: usize) -> Result<()> {
        self.ensure_in_progress()?;
        if self.state.pending.swap.is_some() {
            return Err(RowsAndColsError::IllegalSwapState(
                "tiles cannot be picked up while swapping",
            ));
        }
        let slot_empty = self.state.current().hand().get(slot).is_none();
        if slot >= HAND_SIZE || (slot_empty && self.state.held.is_none()) {
            return Err(RowsAndColsError::EmptySlot(slot));
        }
        let held = self.state.held;
        self.state.held = self.state.current_mut().hand.replace(slot, held);
        self.state.newly_started = false;
        Ok(())
    }

    /// Puts the held tile on the board.
    pub fn place_tile(&mut self, at: Coord) -> Result<()> {
        self.ensure_in_progress()?;
        if self.state.pending.swap.is_some() {
            return Err(RowsAndColsError::IllegalSwapState(
                "tiles cannot be placed while swapping",
            ));
        }
        let tile = self.state.held.ok_or(RowsAndColsError::NoTileHeld)?;
        if !may_place(tile, &self.state.board, &self.state.pending.placements, at) {
            log::debug!("Rejected {} at {}", tile, at);
            return Err(RowsAndColsError::IllegalPlacement(at));
        }
        self.state.board.insert(at, tile);
        self.state.pending.placements.push(at);
        self.state.held = None;
        self.state.newly_started = false;
        Ok(())
    }

    /// Picks the tile in `slot` and places it; the hand is left untouched when
    /// the placement is refused.
    pub fn place_from_hand(&mut self, slot: usize, at: Coord) -> Result<()> {
        if self.state.current().hand().get(slot).is_none() {
            return Err(RowsAndColsError::EmptySlot(slot));
        }
        let newly_started = self.state.newly_started;
        self.select_tile(slot)?;
        if let Err(e) = self.place_tile(at) {
            self.select_tile(slot)?;
            self.state.newly_started = newly_started;
            return Err(e);
        }
        Ok(())
    }

    // ========================================================================
    // SWAPPING
    // ========================================================================

    pub fn begin_swap(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        let pending = &self.state.pending;
        if !pending.placements.is_empty() {
            return Err(RowsAndColsError::IllegalSwapState(
                "cannot swap after placing tiles this turn",
            ));
        }
        if pending.swap.is_some() {
            return Err(RowsAndColsError::IllegalSwapState("a swap is already in progress"));
        }

        let mut swap = Vec::new();
        if !self.state.bag.is_empty() {
            swap.extend(self.state.held.take());
        }
        self.state.pending.swap = Some(swap);
        self.state.newly_started = false;
        Ok(())
    }

    pub fn add_to_swap(&mut self, slot: usize) -> Result<()> {
        self.ensure_in_progress()?;
        let swap_len = match &self.state.pending.swap {
            Some(swap) => swap.len(),
            None => return Err(RowsAndColsError::IllegalSwapState("no swap in progress")),
        };
        if self.state.current().hand().get(slot).is_none() {
            return Err(RowsAndColsError::EmptySlot(slot));
        }
        let bag_len = self.state.bag.len();
        if swap_len >= bag_len {
            return Err(RowsAndColsError::InsufficientBagForSwap { bag_len });
        }

        if let Some(tile) = self.state.current_mut().hand.take(slot) {
            log::debug!("{} sets {} aside", self.state.current().name(), tile);
            if let Some(swap) = self.state.pending.swap.as_mut() {
                swap.push(tile);
            }
        }
        Ok(())
    }

    /// Leaves swap mode; tiles already set aside go back to the hand.
    pub fn cancel_swap(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        let swap = self
            .state
            .pending
            .swap
            .take()
            .ok_or(RowsAndColsError::IllegalSwapState("no swap in progress"))?;
        for tile in swap {
            self.return_to_hand(tile)?;
        }
        Ok(())
    }

    // ========================================================================
    // UNDO / APPLY
    // ========================================================================

    /// Takes back every placement and swap of the turn in progress. Only
    /// human players can undo.
    pub fn undo_turn(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        if self.state.current().is_ai() {
            return Err(RowsAndColsError::UndoUnavailable);
        }
        if self.state.pending.is_idle() {
            return Err(RowsAndColsError::UndoUnavailable);
        }
        self.revert_pending()
    }

    /// Applies a decided move through the regular placement/swap operations.
    /// A move that fails halfway is rolled back.
    pub fn apply_move(&mut self, mv: &Move) -> Result<()> {
        self.ensure_in_progress()?;
        if !self.state.pending.is_idle() {
            return Err(RowsAndColsError::IllegalSwapState("the turn has already started"));
        }
        self.stash_held()?;

        let applied = match mv {
            Move::Place(placements) => placements
                .iter()
                .try_for_each(|p| self.place_from_hand(p.slot, p.at)),
            Move::Swap(slots) => self
                .begin_swap()
                .and_then(|_| slots.iter().try_for_each(|slot| self.add_to_swap(*slot))),
        };
        if let Err(e) = applied {
            self.revert_pending()?;
            return Err(e);
        }
        Ok(())
    }

    /// Owned snapshot of what the search needs; the held tile counts as being
    /// in the first free slot, where `apply_move` will put it.
    pub fn search_request(&mut self) -> Result<SearchRequest> {
        let mut hand = *self.state.current().hand();
        if let Some(tile) = self.state.held {
            hand.put_in_first_empty(tile).map_err(|t| {
                RowsAndColsError::InconsistentState(format!("no free hand slot for {}", t))
            })?;
        }
        Ok(SearchRequest {
            board: self.state.board.clone(),
            hand,
            bag_len: self.state.bag.len(),
            seed: self.rng.random::<u64>(),
        })
    }

    /// Lets the computer decide the current turn and stages it. The turn still
    /// has to be committed with [`TurnEngine::end_turn`].
    pub fn ai_step(&mut self) -> Result<SearchOutcome> {
        self.ensure_in_progress()?;
        if !self.controls().can_ai_step {
            return Err(RowsAndColsError::NotAiTurn);
        }
        let request = self.search_request()?;
        let outcome = find_best_move(&request, &self.search_config);
        log::debug!(
            "{} plays {:?} for {} points ({} candidates)",
            self.state.current().name(),
            outcome.mv,
            outcome.score,
            outcome.candidates_examined
        );
        self.apply_move(&outcome.mv)?;
        Ok(outcome)
    }

    // ========================================================================
    // END OF TURN
    // ========================================================================

    /// Scores the turn, refills the hand, and either ends the game or hands
    /// over to the next player.
    pub fn end_turn(&mut self, registry: &mut dyn HighscoreRegistry) -> Result<TurnOutcome> {
        self.ensure_in_progress()?;
        if self.state.pending.is_idle() {
            return Err(RowsAndColsError::EmptyTurn);
        }

        let player = self.state.current_player;
        let points = score_turn(&self.state.board, &self.state.pending.placements)?;
        let tiles_placed = self.state.pending.placements.len();
        let tiles_swapped = self.state.pending.swap_len();
        let is_pass = tiles_placed == 0 && tiles_swapped == 0;

        self.state.current_mut().add_points(points);
        self.refill_current_hand();
        self.state.turns_played += 1;
        self.state.newly_started = false;

        log::info!(
            "{} placed {} and swapped {} tile(s) for {} points (total {})",
            self.state.current().name(),
            tiles_placed,
            tiles_swapped,
            points,
            self.state.current().score()
        );

        let mut outcome = TurnOutcome {
            player,
            points,
            closing_bonus: 0,
            tiles_placed,
            tiles_swapped,
            game_over: None,
        };

        if self.state.current().hand().is_empty() {
            self.state.current_mut().add_points(CLOSING_BONUS);
            self.state.pending.clear();
            outcome.closing_bonus = CLOSING_BONUS;
            outcome.game_over = Some(self.finish(GameOverReason::HandExhausted, registry));
            return Ok(outcome);
        }

        if let Some(swap) = self.state.pending.swap.take() {
            self.state.bag.return_tiles(swap, &mut self.rng);
        }
        self.state.pending.clear();
        self.state.consecutive_passes = if is_pass {
            self.state.consecutive_passes + 1
        } else {
            0
        };
        self.state.current_player = (self.state.current_player + 1) % self.state.players.len();

        if self.state.bag.is_empty() && self.state.consecutive_passes >= self.state.players.len() {
            outcome.game_over = Some(self.finish(GameOverReason::Stalemate, registry));
        }
        Ok(outcome)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn ensure_in_progress(&self) -> Result<()> {
        match self.state.status {
            GameStatus::InProgress => Ok(()),
            GameStatus::Finished(_) => Err(RowsAndColsError::GameOver),
        }
    }

    /// Empty slots take the held tile first, then the front of the bag.
    fn refill_current_hand(&mut self) {
        for slot in 0..HAND_SIZE {
            if self.state.current().hand().get(slot).is_some() {
                continue;
            }
            let tile = self.state.held.take().or_else(|| self.state.bag.draw());
            self.state.current_mut().hand.replace(slot, tile);
        }
    }

    fn return_to_hand(&mut self, tile: Tile) -> Result<()> {
        self.state
            .current_mut()
            .hand
            .put_in_first_empty(tile)
            .map(|_| ())
            .map_err(|t| RowsAndColsError::InconsistentState(format!("no free hand slot for {}", t)))
    }

    fn stash_held(&mut self) -> Result<()> {
        match self.state.held.take() {
            Some(tile) => self.return_to_hand(tile),
            None => Ok(()),
        }
    }

    fn revert_pending(&mut self) -> Result<()> {
        if let Some(swap) = self.state.pending.swap.take() {
            for tile in swap {
                self.return_to_hand(tile)?;
            }
        }
        let placements = std::mem::take(&mut self.state.pending.placements);
        for at in placements {
            if let Some(tile) = self.state.board.remove(at) {
                self.return_to_hand(tile)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self, reason: GameOverReason, registry: &mut dyn HighscoreRegistry) -> GameResult {
        let players = &self.state.players;
        let winning_score = players.iter().map(|p| p.score()).max().unwrap_or(0);
        let winners: Vec<usize> = (0..players.len())
            .filter(|&i| players[i].score() >= winning_score)
            .collect();
        let result = GameResult {
            reason,
            winning_score,
            winner_names: winners.iter().map(|&i| players[i].name().to_string()).collect(),
            winners,
        };
        log::info!("🏁 Game over ({:?}): {}", reason, result.announcement());

        if let Some(name) = result.sole_winner() {
            let entry = HighscoreEntry::new(name, winning_score, players.len());
            match registry.register(entry) {
                Some(rank) => log::info!("🏆 {} enters the high scores at rank {}", name, rank + 1),
                None => log::debug!("{} did not reach the high-score table", name),
            }
        }

        self.state.status = GameStatus::Finished(result.clone());
        result
    }
}
