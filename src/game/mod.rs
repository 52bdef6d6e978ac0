pub mod bag;
pub mod board;
pub mod game_state;
pub mod get_legal_moves;
pub mod hand;
pub mod player;
pub mod tile;
