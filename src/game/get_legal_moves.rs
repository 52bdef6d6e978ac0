use crate::game::board::{may_place, Board};
use crate::game::tile::{Coord, Tile};

/// Frontier cells still compatible with the turn's row/column, before the full
/// legality check.
pub fn candidate_cells(board: &Board, placed_this_turn: &[Coord]) -> Vec<Coord> {
    board
        .frontier()
        .into_iter()
        .filter(|c| placed_this_turn.iter().all(|q| q.x == c.x || q.y == c.y))
        .collect()
}

/// Returns every cell where `tile` may go right now.
pub fn get_legal_moves(board: &Board, tile: Tile, placed_this_turn: &[Coord]) -> Vec<Coord> {
    candidate_cells(board, placed_this_turn)
        .into_iter()
        .filter(|c| may_place(tile, board, placed_this_turn, *c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_moves_around_single_tile() {
        let mut board = Board::new();
        board.insert(Coord::ORIGIN, Tile::new(2, 2));

        assert_eq!(get_legal_moves(&board, Tile::new(2, 3), &[]).len(), 4);
        assert!(get_legal_moves(&board, Tile::new(2, 2), &[]).is_empty());
        assert!(get_legal_moves(&board, Tile::new(0, 0), &[]).is_empty());
    }

    #[test]
    fn test_candidates_follow_turn_line() {
        let mut board = Board::new();
        board.insert(Coord::ORIGIN, Tile::new(0, 0));
        board.insert(Coord::new(1, 0), Tile::new(0, 1));
        let cells = candidate_cells(&board, &[Coord::new(1, 0)]);
        assert!(cells.iter().all(|c| c.x == 1 || c.y == 0));
        assert!(cells.contains(&Coord::new(2, 0)));
        assert!(cells.contains(&Coord::new(-1, 0)));
        assert!(!cells.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn test_empty_board_offers_origin() {
        let board = Board::new();
        assert_eq!(get_legal_moves(&board, Tile::new(4, 4), &[]), vec![Coord::ORIGIN]);
    }
}
