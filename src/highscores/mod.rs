//! High-score table kept outside the rule engine and handed to it at game end.

pub mod csv_store;
pub mod table;

pub use csv_store::{load_highscores, load_or_default, save_highscores, CsvHighscoreStore};
pub use table::{HighscoreEntry, HighscoreRegistry, HighscoreTable, TABLE_SIZE};
