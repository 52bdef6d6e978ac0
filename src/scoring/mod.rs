#[allow(clippy::module_inception)]
pub mod scoring;

pub use scoring::{score_turn, CLOSING_BONUS};
