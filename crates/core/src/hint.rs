//! Potential-move scanner
//!
//! Finds three same-type cells that one adjacent swap would line up, without
//! trying every swap. The first hit in scan order wins. Two families of
//! patterns are checked per seed cell:
//!
//! ```text
//!   pair + hook            skip-one
//!   . . . ? .              . . ? . .
//!   . & & . ?              . & . & .
//!   . . . ? .              . . ? . .
//! ```
//!
//! `&` are the matching cells, `?` the candidate third cells.

use crate::board::Board;
use crate::matcher::matches_at;
use crate::types::{Direction, MatchSet, Pos};

/// First same-type triple reachable by one swap, or empty if the board has none
pub fn find_potential_move(board: &Board) -> MatchSet {
    for cell in board.positions() {
        for dir in [
            Direction::Right,
            Direction::Up,
            Direction::Down,
            Direction::Left,
        ] {
            if let Some(found) = pair_with_hook(board, cell, dir) {
                return found;
            }
        }

        if let Some(found) = skip_one(board, cell, Direction::Right, [Direction::Up, Direction::Down])
        {
            return found;
        }

        if let Some(found) = skip_one(board, cell, Direction::Up, [Direction::Right, Direction::Left])
        {
            return found;
        }
    }

    Vec::new()
}

/// `cell` and its neighbor in `dir` match; a third matching cell touches the
/// cell beyond them, which itself is of another type.
fn pair_with_hook(board: &Board, cell: Pos, dir: Direction) -> Option<MatchSet> {
    let neighbor = board.neighbor(cell, dir)?;
    if !board.same_type(neighbor, cell) {
        return None;
    }

    let target = board.neighbor(neighbor, dir)?;
    if board.same_type(target, neighbor) {
        return None;
    }

    Direction::ALL
        .iter()
        .filter_map(|d| board.neighbor(target, *d))
        .find(|third| *third != neighbor && board.same_type(*third, neighbor))
        .map(|third| vec![cell, neighbor, third])
}

/// `cell` and the cell two steps away in `dir` match with a different cell
/// between them; a matching cell beside the middle one can be swapped in.
fn skip_one(
    board: &Board,
    cell: Pos,
    dir: Direction,
    sides: [Direction; 2],
) -> Option<MatchSet> {
    let middle = board.neighbor(cell, dir)?;
    let far = board.neighbor(middle, dir)?;
    if !board.same_type(far, cell) || board.same_type(middle, cell) {
        return None;
    }

    sides
        .iter()
        .filter_map(|d| board.neighbor(middle, *d))
        .find(|second| board.same_type(*second, cell))
        .map(|second| vec![cell, far, second])
}

/// First adjacent pair (scan order, right then up) whose swap creates a match.
///
/// Unlike [`find_potential_move`] this answers which cells to swap, at the
/// cost of trying each swap on a scratch copy of the board.
pub fn find_matching_swap(board: &Board) -> Option<(Pos, Pos)> {
    for cell in board.positions() {
        for dir in [Direction::Right, Direction::Up] {
            let Some(other) = board.neighbor(cell, dir) else {
                continue;
            };
            if board.is_empty(cell) || board.is_empty(other) || board.same_type(cell, other) {
                continue;
            }

            let mut swapped = board.clone();
            if swapped.swap_items(cell, other).is_err() {
                continue;
            }
            if !matches_at(&swapped, cell).is_empty() || !matches_at(&swapped, other).is_empty() {
                return Some((cell, other));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: u8, y: u8) -> Pos {
        Pos::new(x, y)
    }

    #[test]
    fn test_pair_with_hook_right() {
        // bottom row: A A B, with A above the B
        let board = Board::from_rows(&["CDA", "AAB"], 3).unwrap();
        assert_eq!(find_potential_move(&board), vec![p(0, 0), p(1, 0), p(2, 1)]);
    }

    #[test]
    fn test_pair_with_hook_up() {
        // column 0 from bottom: A A B, with an A to the right of the B
        let board = Board::from_rows(&["BA", "AC", "AD"], 3).unwrap();
        assert_eq!(find_potential_move(&board), vec![p(0, 0), p(0, 1), p(1, 2)]);
    }

    #[test]
    fn test_pair_with_hook_straight_line() {
        // A A B A: swapping B with the far A completes the line
        let board = Board::from_rows(&["AABA"], 3).unwrap();
        assert_eq!(find_potential_move(&board), vec![p(0, 0), p(1, 0), p(3, 0)]);
    }

    #[test]
    fn test_skip_one_horizontal() {
        // A B A on the bottom row with an A above the B
        let board = Board::from_rows(&["CAD", "ABA"], 3).unwrap();
        assert_eq!(find_potential_move(&board), vec![p(0, 0), p(2, 0), p(1, 1)]);
    }

    #[test]
    fn test_skip_one_vertical() {
        // column 0 from bottom: A B A, with an A right of the B
        let board = Board::from_rows(&["AC", "BA", "AD"], 3).unwrap();
        assert_eq!(find_potential_move(&board), vec![p(0, 0), p(0, 2), p(1, 1)]);
    }

    #[test]
    fn test_no_potential_move() {
        let board = Board::from_rows(&["ABC", "DEF", "GAB"], 3).unwrap();
        assert!(find_potential_move(&board).is_empty());
        assert_eq!(find_matching_swap(&board), None);
    }

    #[test]
    fn test_matching_swap_leaves_board_untouched() {
        let board = Board::from_rows(&["BCDE", "CDAF", "AAGB"], 3).unwrap();
        let before = board.clone();
        let (a, b) = find_matching_swap(&board).unwrap();
        assert_eq!(board, before);
        assert!(board.is_neighbor(a, b));

        // Searching again from the same board gives the same answer.
        assert_eq!(find_matching_swap(&board), Some((a, b)));
    }

    #[test]
    fn test_potential_move_agrees_with_swap_search() {
        let board = Board::from_rows(&["CDA", "AAB"], 3).unwrap();
        assert!(!find_potential_move(&board).is_empty());
        assert_eq!(find_matching_swap(&board), Some((p(2, 0), p(2, 1))));
    }
}
