//! Computer player: exhaustive move search, swap fallback and an async runner.

pub mod background;
pub mod config;
pub mod move_search;
pub mod swap_policy;

pub use config::SearchConfig;
pub use move_search::{find_best_move, SearchOutcome, SearchRequest};
pub use swap_policy::choose_swap;
