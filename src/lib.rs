//! # Rows & Cols
//!
//! Rule engine for a turn-based tile-placement game: tiles carry a color and a
//! shape, lines must share exactly one of the two, and completed lines score.
//!
//! ## Features
//!
//! - **Game model**: board, bag, hands and players with the placement-legality predicate
//! - **Turn engine**: staged placements, swaps, undo, scoring, refill and game end
//! - **Move search**: exhaustive AI player with a swap fallback
//! - **Persistence**: save-game record with a line-oriented text codec
//! - **High scores**: ranked table backed by a CSV file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rows_and_cols::{
//!     engine::TurnEngine,
//!     game::player::PlayerSetting,
//!     highscores::HighscoreTable,
//! };
//!
//! let seats = [PlayerSetting::new("Ann", true), PlayerSetting::new("Bob", true)];
//! let mut engine = TurnEngine::with_seed(&seats, 42)?;
//! let mut scores = HighscoreTable::default();
//! while !engine.state().is_over() {
//!     engine.ai_step()?;
//!     engine.end_turn(&mut scores)?;
//! }
//! # Ok::<(), rows_and_cols::RowsAndColsError>(())
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Tiles, board, bag, hands, players and the game state
pub mod game;

/// Line scoring
pub mod scoring;

/// Turn lifecycle: placements, swaps, undo, end of turn
pub mod engine;

/// AI move search
pub mod search;

/// High-score table and registry
pub mod highscores;

/// Save-game record and its text codec
pub mod data;

/// Logger bootstrap for the binary
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use engine::{Move, Placement, TurnEngine, TurnOutcome};
pub use game::board::{may_place, Board};
pub use game::game_state::{GameResult, GameState};
pub use game::tile::{Coord, Tile};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Rows & Cols library
#[derive(Debug, thiserror::Error)]
pub enum RowsAndColsError {
    #[error("Illegal placement at {0}")]
    IllegalPlacement(Coord),

    #[error("Illegal swap state: {0}")]
    IllegalSwapState(&'static str),

    #[error("Swap set cannot exceed the {bag_len} tiles left in the bag")]
    InsufficientBagForSwap { bag_len: usize },

    #[error("Could not restore saved game: {0}")]
    CorruptSaveRecord(String),

    #[error("No tile is held")]
    NoTileHeld,

    #[error("Hand slot {0} is empty or out of range")]
    EmptySlot(usize),

    #[error("Nothing can be undone")]
    UndoUnavailable,

    #[error("Nothing placed or swapped this turn")]
    EmptyTurn,

    #[error("The current player is not computer-controlled")]
    NotAiTurn,

    #[error("The game is over")]
    GameOver,

    #[error("Invalid setup: {0}")]
    InvalidSetup(String),

    /// The game reached a state the rules should have made impossible.
    #[error("Inconsistent game state: {0}")]
    InconsistentState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RowsAndColsError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
