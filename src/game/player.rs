use crate::game::hand::Hand;
use serde::{Deserialize, Serialize};

pub const MIN_LOBBY_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Names are stored one per line in saved games.
pub fn is_valid_name(name: &str) -> bool {
    !name.contains(['\n', '\r'])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    is_ai: bool,
    score: u64,
    pub(crate) hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>, is_ai: bool) -> Self {
        Player {
            name: name.into(),
            is_ai,
            score: 0,
            hand: Hand::default(),
        }
    }

    /// Rebuilds a player from persisted values.
    pub fn restored(name: impl Into<String>, is_ai: bool, score: u64, hand: Hand) -> Self {
        Player {
            name: name.into(),
            is_ai,
            score,
            hand,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn add_points(&mut self, points: u64) {
        self.score += points;
    }
}

// ============================================================================
// LOBBY - seats configured before a game starts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetting {
    pub name: String,
    pub is_ai: bool,
}

impl PlayerSetting {
    pub fn new(name: impl Into<String>, is_ai: bool) -> Self {
        PlayerSetting {
            name: name.into(),
            is_ai,
        }
    }
}

/// Seat list edited before the game. Names can only change here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lobby {
    seats: Vec<PlayerSetting>,
}

impl Default for Lobby {
    fn default() -> Self {
        Lobby {
            seats: vec![
                PlayerSetting::new("Player 1", false),
                PlayerSetting::new("Player 2", true),
                PlayerSetting::new("Player 3", true),
            ],
        }
    }
}

impl Lobby {
    pub fn seats(&self) -> &[PlayerSetting] {
        &self.seats
    }

    /// Adds "Player N" with the same AI flag as the last seat.
    pub fn add_player(&mut self) -> bool {
        let n = self.seats.len();
        if n >= MAX_PLAYERS {
            return false;
        }
        let is_ai = self.seats.last().map(|s| s.is_ai).unwrap_or(false);
        self.seats
            .push(PlayerSetting::new(format!("Player {}", n + 1), is_ai));
        true
    }

    pub fn remove_player(&mut self) -> bool {
        if self.seats.len() <= MIN_LOBBY_PLAYERS {
            return false;
        }
        self.seats.pop();
        true
    }

    pub fn rename(&mut self, seat: usize, name: impl Into<String>) -> bool {
        let name = name.into();
        if !is_valid_name(&name) {
            return false;
        }
        match self.seats.get_mut(seat) {
            Some(s) => {
                s.name = name;
                true
            }
            None => false,
        }
    }

    pub fn toggle_ai(&mut self, seat: usize) -> bool {
        match self.seats.get_mut(seat) {
            Some(s) => {
                s.is_ai = !s.is_ai;
                true
            }
            None => false,
        }
    }
}
