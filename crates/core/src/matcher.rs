//! Match detection - runs, shape classification and board scans
//!
//! A run is walked from a seed cell along one axis: first in the positive
//! direction (right or up), then in the negative one (left or down). The result
//! keeps the seed first and is not sorted by position; classification relies on
//! that.

use crate::board::Board;
use crate::types::{Axis, Direction, MatchDirection, MatchSet, Pos};

/// Seed plus every contiguous cell matching it along `axis`
pub fn get_run(board: &Board, seed: Pos, axis: Axis) -> MatchSet {
    let mut run = vec![seed];
    let Some(seed_item) = board.item(seed) else {
        return run;
    };

    let (positive, negative) = match axis {
        Axis::Horizontal => (Direction::Right, Direction::Left),
        Axis::Vertical => (Direction::Up, Direction::Down),
    };

    for dir in [positive, negative] {
        let mut current = seed;
        while let Some(next) = board.neighbor(current, dir) {
            match board.item(next) {
                Some(item) if item.matches(&seed_item) => {
                    run.push(next);
                    current = next;
                }
                _ => break,
            }
        }
    }

    run
}

/// Classify a match set by its shape.
///
/// Mixed-axis sets only classify as [`MatchDirection::All`] above
/// `match_min + 2` cells; smaller ones are [`MatchDirection::None`].
pub fn classify_direction(matches: &[Pos], match_min: usize) -> MatchDirection {
    let Some(seed) = matches.first() else {
        return MatchDirection::None;
    };
    if matches.len() < match_min {
        return MatchDirection::None;
    }

    if matches.iter().all(|p| p.x == seed.x) {
        return MatchDirection::Vertical;
    }

    if matches.iter().all(|p| p.y == seed.y) {
        return MatchDirection::Horizontal;
    }

    if matches.len() > match_min + 2 {
        return MatchDirection::All;
    }

    MatchDirection::None
}

/// First run of at least `match_min` cells in scan order, horizontal before
/// vertical at each cell. Empty if the board has none.
pub fn find_first_match(board: &Board) -> MatchSet {
    let min = board.match_min();
    for pos in board.positions() {
        let horizontal = get_run(board, pos, Axis::Horizontal);
        if horizontal.len() >= min {
            return horizontal;
        }

        let vertical = get_run(board, pos, Axis::Vertical);
        if vertical.len() >= min {
            return vertical;
        }
    }
    Vec::new()
}

/// Both runs through `pos` that reach `match_min`, de-duplicated
pub fn matches_at(board: &Board, pos: Pos) -> MatchSet {
    let min = board.match_min();
    let mut out = MatchSet::new();
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let run = get_run(board, pos, axis);
        if run.len() >= min {
            merge_unique(&mut out, &run);
        }
    }
    out
}

/// Append the cells of `extra` not already in `into`, keeping order
pub fn merge_unique(into: &mut MatchSet, extra: &[Pos]) {
    for pos in extra {
        if !into.contains(pos) {
            into.push(*pos);
        }
    }
}
