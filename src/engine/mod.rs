//! Turn lifecycle on top of the game model.

pub mod moves;
pub mod outcome;
pub mod turn_engine;

pub use moves::{Move, Placement};
pub use outcome::{GameSummary, PlayerSummary, TurnOutcome};
pub use turn_engine::{Controls, TurnEngine, TurnPhase};
