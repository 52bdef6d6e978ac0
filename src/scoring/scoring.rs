use crate::game::board::{Axis, Board};
use crate::game::tile::{Coord, MAX_LINE_LENGTH};
use crate::{Result, RowsAndColsError};

/// Awarded to the player who empties their hand and closes the game.
pub const CLOSING_BONUS: u64 = 6;

/// A completed line of this length scores double.
pub const FULL_LINE_MULTIPLIER: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub axis: Axis,
    pub cells: Vec<Coord>,
}

/// Distinct runs of two or more tiles through the cells placed this turn,
/// read on the full board. A run shared by several placements appears once.
pub fn collect_runs(board: &Board, placed_this_turn: &[Coord]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &at in placed_this_turn {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let cells = board.run_through(at, axis);
            if cells.len() < 2 || runs.iter().any(|r| r.cells == cells) {
                continue;
            }
            runs.push(Run { axis, cells });
        }
    }
    runs
}

/// Points for one run: its length, doubled once it reaches six.
pub fn line_points(length: usize) -> Result<u64> {
    match length {
        0 | 1 => Ok(0),
        l if l < MAX_LINE_LENGTH => Ok(l as u64),
        l if l == MAX_LINE_LENGTH => Ok(FULL_LINE_MULTIPLIER * l as u64),
        l => Err(RowsAndColsError::InconsistentState(format!(
            "line of {} tiles exceeds {}",
            l, MAX_LINE_LENGTH
        ))),
    }
}

/// Score earned by the placements of one turn.
pub fn score_turn(board: &Board, placed_this_turn: &[Coord]) -> Result<u64> {
    collect_runs(board, placed_this_turn)
        .iter()
        .map(|run| line_points(run.cells.len()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Tile;

    fn color_row(len: i32) -> Board {
        (0..len)
            .map(|x| (Coord::new(x, 0), Tile::new(0, x as u8)))
            .collect()
    }

    #[test]
    fn test_line_points_table() {
        assert_eq!(line_points(1).unwrap(), 0);
        for k in 2..6 {
            assert_eq!(line_points(k).unwrap(), k as u64);
        }
        assert_eq!(line_points(6).unwrap(), 12);
        assert!(line_points(7).is_err());
    }

    #[test]
    fn test_multi_tile_placement_on_one_line_scores_once() {
        let board = color_row(4);
        let placed = [Coord::new(2, 0), Coord::new(3, 0)];
        assert_eq!(collect_runs(&board, &placed).len(), 1);
        assert_eq!(score_turn(&board, &placed).unwrap(), 4);
    }

    #[test]
    fn test_completed_line_scores_double() {
        let board = color_row(6);
        assert_eq!(score_turn(&board, &[Coord::new(5, 0)]).unwrap(), 12);
    }

    #[test]
    fn test_cross_lines_both_count() {
        let mut board = color_row(3);
        board.insert(Coord::new(1, -1), Tile::new(3, 1));
        board.insert(Coord::new(1, -2), Tile::new(4, 1));
        // (1, 0) closes a row of 3 and a column of 3
        let runs = collect_runs(&board, &[Coord::new(1, 0)]);
        assert_eq!(runs.len(), 2);
        assert_eq!(score_turn(&board, &[Coord::new(1, 0)]).unwrap(), 6);
    }

    #[test]
    fn test_lone_tile_scores_nothing() {
        let mut board = Board::new();
        board.insert(Coord::ORIGIN, Tile::new(1, 1));
        assert_eq!(score_turn(&board, &[Coord::ORIGIN]).unwrap(), 0);
    }

    #[test]
    fn test_overlong_line_is_an_internal_fault() {
        let board = (0..7)
            .map(|x| (Coord::new(x, 0), Tile::new(0, (x % 6) as u8)))
            .collect::<Board>();
        assert!(matches!(
            score_turn(&board, &[Coord::ORIGIN]),
            Err(RowsAndColsError::InconsistentState(_))
        ));
    }
}
