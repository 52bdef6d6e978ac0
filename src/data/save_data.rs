use crate::data::save_record::SaveRecord;
use crate::game::game_state::GameState;
use crate::game::player::is_valid_name;
use crate::game::tile::Tile;
use crate::{Result, RowsAndColsError};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn push_tile(out: &mut String, tile: Tile) {
    let _ = write!(out, " {} {}", tile.shape, tile.color);
}

/// Line-oriented text form of a record: a header line, two lines per player
/// and one line for the board, bag and pending turn. Tiles are written
/// shape first.
pub fn encode(record: &SaveRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", record.players.len(), record.current_player);

    for player in &record.players {
        let _ = writeln!(out, "{}", player.name);
        let _ = write!(out, "{} {}", u8::from(player.is_ai), player.score);
        for slot in &player.hand {
            match slot {
                Some(tile) => {
                    out.push_str(" 1");
                    push_tile(&mut out, *tile);
                }
                None => out.push_str(" 0"),
            }
        }
        out.push('\n');
    }

    let swap_len = record.swap.as_ref().map_or(-1, |s| s.len() as i64);
    let _ = write!(
        out,
        "{} {} {} {}",
        record.board.len(),
        record.bag.len(),
        record.placements.len(),
        swap_len
    );
    match record.held {
        Some(tile) => {
            out.push_str(" 1");
            push_tile(&mut out, tile);
        }
        None => out.push_str(" 0"),
    }
    for (at, tile) in &record.board {
        let _ = write!(out, " {} {}", at.x, at.y);
        push_tile(&mut out, *tile);
    }
    for tile in &record.bag {
        push_tile(&mut out, *tile);
    }
    for at in &record.placements {
        let _ = write!(out, " {} {}", at.x, at.y);
    }
    for tile in record.swap.iter().flatten() {
        push_tile(&mut out, *tile);
    }
    out
}

/// Writes the game to `path` when it is worth resuming. Returns whether a
/// file was written.
pub fn save_game<P: AsRef<Path>>(path: P, state: &GameState) -> Result<bool> {
    if !state.is_saveable() {
        log::debug!("Game not saveable yet, skipping save");
        return Ok(false);
    }
    if let Some(player) = state.players.iter().find(|p| !is_valid_name(p.name())) {
        return Err(RowsAndColsError::InvalidSetup(format!(
            "player name {:?} cannot be saved",
            player.name()
        )));
    }
    fs::write(path.as_ref(), encode(&SaveRecord::capture(state)))?;
    log::info!("💾 Game saved to {}", path.as_ref().display());
    Ok(true)
}
