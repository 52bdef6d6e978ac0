use crate::game::game_state::{GameOverReason, GameResult, GameState};
use serde::{Deserialize, Serialize};

/// What `end_turn` did for the player who just finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: usize,
    /// Line points for this turn's placements.
    pub points: u64,
    pub closing_bonus: u64,
    pub tiles_placed: usize,
    pub tiles_swapped: usize,
    pub game_over: Option<GameResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub is_ai: bool,
    pub score: u64,
}

/// End-of-game report, printable as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub finished_at: i64,
    pub players: Vec<PlayerSummary>,
    pub winners: Vec<String>,
    pub reason: Option<GameOverReason>,
    pub announcement: Option<String>,
    pub turns_played: usize,
    pub tiles_on_board: usize,
}

impl GameSummary {
    pub fn from_state(state: &GameState) -> Self {
        let result = state.result();
        GameSummary {
            finished_at: chrono::Utc::now().timestamp(),
            players: state
                .players
                .iter()
                .map(|p| PlayerSummary {
                    name: p.name().to_string(),
                    is_ai: p.is_ai(),
                    score: p.score(),
                })
                .collect(),
            winners: result.map(|r| r.winner_names.clone()).unwrap_or_default(),
            reason: result.map(|r| r.reason),
            announcement: result.map(GameResult::announcement),
            turns_played: state.turns_played,
            tiles_on_board: state.board.len(),
        }
    }
}
