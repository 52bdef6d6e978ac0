//! Saved games: the logical record and its text file.

pub mod load_data;
pub mod save_data;
pub mod save_record;

pub use load_data::{decode, load_game, load_or_new_game};
pub use save_data::{encode, save_game};
pub use save_record::{PlayerRecord, SaveRecord};
