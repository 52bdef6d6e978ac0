use crate::data::save_record::{PlayerRecord, SaveRecord};
use crate::game::game_state::GameState;
use crate::game::player::PlayerSetting;
use crate::game::tile::{Coord, Tile, HAND_SIZE};
use crate::{Result, RowsAndColsError};
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

/// Whitespace-separated values of one line, with the line number for errors.
struct Fields<'a> {
    values: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Fields {
            values: text.split_whitespace(),
            line,
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let raw = self.values.next().ok_or_else(|| {
            RowsAndColsError::CorruptSaveRecord(format!("line {}: missing {}", self.line, what))
        })?;
        raw.parse().map_err(|_| {
            RowsAndColsError::CorruptSaveRecord(format!("line {}: bad {} '{}'", self.line, what, raw))
        })
    }

    fn tile(&mut self) -> Result<Tile> {
        let shape = self.next("shape")?;
        let color = self.next("color")?;
        Ok(Tile::new(color, shape))
    }

    fn coord(&mut self) -> Result<Coord> {
        Ok(Coord::new(self.next("x")?, self.next("y")?))
    }

    fn flag(&mut self, what: &str) -> Result<bool> {
        match self.next::<u8>(what)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(RowsAndColsError::CorruptSaveRecord(format!(
                "line {}: {} flag {}",
                self.line, what, other
            ))),
        }
    }

    fn optional_tile(&mut self) -> Result<Option<Tile>> {
        if self.flag("tile")? {
            Ok(Some(self.tile()?))
        } else {
            Ok(None)
        }
    }

    fn finish(mut self) -> Result<()> {
        match self.values.next() {
            None => Ok(()),
            Some(extra) => Err(RowsAndColsError::CorruptSaveRecord(format!(
                "line {}: unexpected '{}'",
                self.line, extra
            ))),
        }
    }
}

/// Parses the text written by [`crate::data::save_data::encode`].
pub fn decode(text: &str) -> Result<SaveRecord> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| RowsAndColsError::CorruptSaveRecord(format!("missing {} line", what)))
    };

    let (n, header) = next_line("header")?;
    let mut fields = Fields::new(header, n);
    let player_count: usize = fields.next("player count")?;
    let current_player: usize = fields.next("current player")?;
    fields.finish()?;

    let mut players = Vec::with_capacity(player_count.min(8));
    for _ in 0..player_count {
        let (_, name) = next_line("player name")?;
        let (n, data) = next_line("player data")?;
        let mut fields = Fields::new(data, n);
        let is_ai = fields.flag("ai")?;
        let score = fields.next("score")?;
        let mut hand = [None; HAND_SIZE];
        for slot in hand.iter_mut() {
            *slot = fields.optional_tile()?;
        }
        fields.finish()?;
        players.push(PlayerRecord {
            name: name.to_string(),
            is_ai,
            score,
            hand,
        });
    }

    let (n, data) = next_line("board")?;
    let mut fields = Fields::new(data, n);
    let board_len: usize = fields.next("board size")?;
    let bag_len: usize = fields.next("bag size")?;
    let placed_len: usize = fields.next("placement count")?;
    let swap_len: i64 = fields.next("swap size")?;
    let held = fields.optional_tile()?;

    let board = (0..board_len)
        .map(|_| -> Result<(Coord, Tile)> { Ok((fields.coord()?, fields.tile()?)) })
        .collect::<Result<Vec<_>>>()?;
    let bag = (0..bag_len).map(|_| fields.tile()).collect::<Result<Vec<_>>>()?;
    let placements = (0..placed_len).map(|_| fields.coord()).collect::<Result<Vec<_>>>()?;
    let swap = if swap_len < 0 {
        None
    } else {
        Some((0..swap_len).map(|_| fields.tile()).collect::<Result<Vec<_>>>()?)
    };
    fields.finish()?;

    Ok(SaveRecord {
        players,
        current_player,
        board,
        bag,
        placements,
        swap,
        held,
    })
}

/// Reads and restores a saved game. The save file is removed once the game
/// is back in play, so a crash cannot resume the same position twice.
pub fn load_game<P: AsRef<Path>>(path: P) -> Result<GameState> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let state = decode(&text)?.restore()?;
    if let Err(e) = fs::remove_file(path) {
        log::warn!("⚠️  Could not remove save file {}: {}", path.display(), e);
    }
    log::info!(
        "📂 Resumed game of {} players from {}",
        state.players.len(),
        path.display()
    );
    Ok(state)
}

/// Resumes the saved game when there is a usable one, otherwise deals a new
/// game for `seats`.
pub fn load_or_new_game<P: AsRef<Path>>(
    path: P,
    seats: &[PlayerSetting],
    rng: &mut StdRng,
) -> Result<GameState> {
    let path = path.as_ref();
    if path.is_file() {
        match load_game(path) {
            Ok(state) => return Ok(state),
            Err(e) => log::warn!("⚠️  Could not restore {}: {}. Starting a new game.", path.display(), e),
        }
    }
    GameState::new_game(seats, rng)
}
