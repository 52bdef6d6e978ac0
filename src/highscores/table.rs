use serde::{Deserialize, Serialize};

pub const TABLE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub name: String,
    pub points: u64,
    pub player_count: usize,
}

impl HighscoreEntry {
    pub fn new(name: impl Into<String>, points: u64, player_count: usize) -> Self {
        HighscoreEntry {
            name: name.into(),
            points,
            player_count,
        }
    }

    /// Placeholder row of an untouched table.
    pub fn nobody() -> Self {
        HighscoreEntry::new("Nobody", 0, 0)
    }

    /// Beating more opponents is worth more: the table ranks by points × players.
    pub fn rank_key(&self) -> u64 {
        self.points * self.player_count as u64
    }
}

/// Receives the winner of a finished game. The rule engine only calls it when
/// exactly one player holds the top score.
pub trait HighscoreRegistry {
    /// Returns the rank the entry landed on, or `None` when it did not qualify.
    fn register(&mut self, entry: HighscoreEntry) -> Option<usize>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreTable {
    entries: Vec<HighscoreEntry>,
    highlighted: Option<usize>,
}

impl Default for HighscoreTable {
    fn default() -> Self {
        HighscoreTable {
            entries: vec![HighscoreEntry::nobody(); TABLE_SIZE],
            highlighted: None,
        }
    }
}

impl HighscoreTable {
    /// Short lists are padded with placeholder rows, long ones cut to size.
    pub fn from_entries(mut entries: Vec<HighscoreEntry>) -> Self {
        entries.resize(TABLE_SIZE, HighscoreEntry::nobody());
        HighscoreTable {
            entries,
            highlighted: None,
        }
    }

    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    /// Rank of the most recent successful registration.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }
}

impl HighscoreRegistry for HighscoreTable {
    fn register(&mut self, entry: HighscoreEntry) -> Option<usize> {
        let key = entry.rank_key();
        self.highlighted = self.entries.iter().position(|e| key > e.rank_key());
        let rank = self.highlighted?;
        self.entries.insert(rank, entry);
        self.entries.pop();
        Some(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_all_nobody() {
        let table = HighscoreTable::default();
        assert_eq!(table.entries().len(), TABLE_SIZE);
        assert!(table.entries().iter().all(|e| e.name == "Nobody" && e.rank_key() == 0));
    }

    #[test]
    fn test_register_ranks_by_points_times_players() {
        let mut table = HighscoreTable::default();
        assert_eq!(table.register(HighscoreEntry::new("Ann", 50, 2)), Some(0));
        // 40 × 3 = 120 beats 50 × 2 = 100
        assert_eq!(table.register(HighscoreEntry::new("Bob", 40, 3)), Some(0));
        assert_eq!(table.register(HighscoreEntry::new("Cid", 60, 1)), Some(2));
        assert_eq!(table.highlighted(), Some(2));

        let names: Vec<&str> = table.entries().iter().take(3).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Ann", "Cid"]);
        assert_eq!(table.entries().len(), TABLE_SIZE);
    }

    #[test]
    fn test_ties_do_not_displace() {
        let mut table = HighscoreTable::from_entries(vec![HighscoreEntry::new("Ann", 30, 2); TABLE_SIZE]);
        assert_eq!(table.register(HighscoreEntry::new("Bob", 20, 3)), None);
        assert_eq!(table.highlighted(), None);
        assert!(table.entries().iter().all(|e| e.name == "Ann"));
    }
}
