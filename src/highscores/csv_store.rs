//! CSV storage for the high-score table.
//!
//! Format: one row per rank, `points,player_count,name`. Older files wrote
//! names containing commas unquoted, so every field after the second is part
//! of the name.

use crate::highscores::table::{HighscoreEntry, HighscoreRegistry, HighscoreTable};
use crate::{Result, RowsAndColsError};
use std::path::{Path, PathBuf};

pub fn load_highscores<P: AsRef<Path>>(path: P) -> Result<HighscoreTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default();
        let points = field(0).trim().parse::<u64>().map_err(|e| {
            RowsAndColsError::InvalidSetup(format!("bad high-score points {:?}: {}", field(0), e))
        })?;
        let player_count = field(1).trim().parse::<usize>().map_err(|e| {
            RowsAndColsError::InvalidSetup(format!("bad high-score player count {:?}: {}", field(1), e))
        })?;
        let name = record.iter().skip(2).collect::<Vec<_>>().join(",");
        entries.push(HighscoreEntry::new(name, points, player_count));
    }
    Ok(HighscoreTable::from_entries(entries))
}

/// Missing or unreadable files give the default table.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> HighscoreTable {
    match load_highscores(path.as_ref()) {
        Ok(table) => table,
        Err(e) => {
            log::debug!(
                "No usable high-score file at {} ({}), starting from an empty table",
                path.as_ref().display(),
                e
            );
            HighscoreTable::default()
        }
    }
}

pub fn save_highscores<P: AsRef<Path>>(path: P, table: &HighscoreTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    for entry in table.entries() {
        writer.write_record([
            entry.points.to_string(),
            entry.player_count.to_string(),
            entry.name.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Table that writes itself back to disk after every registration.
#[derive(Debug)]
pub struct CsvHighscoreStore {
    path: PathBuf,
    table: HighscoreTable,
}

impl CsvHighscoreStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        CsvHighscoreStore {
            path: path.as_ref().to_path_buf(),
            table: load_or_default(path),
        }
    }

    pub fn table(&self) -> &HighscoreTable {
        &self.table
    }
}

impl HighscoreRegistry for CsvHighscoreStore {
    fn register(&mut self, entry: HighscoreEntry) -> Option<usize> {
        let rank = self.table.register(entry)?;
        if let Err(e) = save_highscores(&self.path, &self.table) {
            log::error!("❌ Could not save high scores to {}: {}", self.path.display(), e);
        }
        Some(rank)
    }
}
