//! Bonus module - bonus creation, compatibility filtering and detonation
//!
//! Over-threshold matches leave a bonus behind whose kind mirrors the match
//! shape:
//!
//! | Shape | Bonus |
//! |-------|-------|
//! | Horizontal | row clear |
//! | Vertical | column clear |
//! | All (L/T, more than `match_min + 2` cells) | clear all |
//!
//! When a bonus explodes it takes its blast area with it, chaining through any
//! other bonus caught in the blast.

use std::collections::VecDeque;

use tracing::debug;

use crate::board::Board;
use crate::error::GridError;
use crate::events::EventSink;
use crate::matcher::classify_direction;
use crate::rng::RandomSource;
use crate::types::{BoardEvent, BonusKind, Item, MatchSet, Pos};

/// Turn one cell of `matches` into a bonus.
///
/// The target is `preferred` when given, otherwise a random member of the set.
/// Returns the converted cell, or `None` when the set's shape has no bonus.
pub fn convert_to_bonus<R, S>(
    board: &mut Board,
    matches: &[Pos],
    preferred: Option<Pos>,
    rng: &mut R,
    sink: &mut S,
) -> Result<Option<Pos>, GridError>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    let direction = classify_direction(matches, board.match_min());
    let Some(kind) = direction.bonus_kind() else {
        return Ok(None);
    };

    let target = match preferred {
        Some(pos) => pos,
        None => matches[rng.next_range(matches.len() as u32) as usize],
    };

    if !board.is_empty(target) {
        board.free(target)?;
    }
    let item = Item::Bonus(kind);
    board.assign(target, item)?;
    sink.emit(BoardEvent::ItemAssigned { pos: target, item });

    debug!(x = target.x, y = target.y, bonus = kind.as_str(), "bonus created");
    Ok(Some(target))
}

/// Drop bonus cells whose kind disagrees with the set's shape.
///
/// Sets without bonuses come back unchanged. Otherwise normal items stay, as do
/// bonuses whose kind matches the classified direction; the rest are left on
/// the board untouched.
pub fn filter_for_bonus_compatibility(board: &Board, matches: &[Pos]) -> MatchSet {
    let has_bonus = matches
        .iter()
        .any(|pos| board.item(*pos).is_some_and(|item| item.is_bonus()));
    if !has_bonus {
        return matches.to_vec();
    }

    let wanted = classify_direction(matches, board.match_min()).bonus_kind();
    matches
        .iter()
        .copied()
        .filter(|pos| match board.item(*pos) {
            Some(Item::Bonus(kind)) => Some(kind) == wanted,
            _ => true,
        })
        .collect()
}

/// Cells a bonus at `origin` clears, excluding `origin` itself
pub fn blast_area(board: &Board, origin: Pos, kind: BonusKind) -> Vec<Pos> {
    let in_area = |pos: &Pos| match kind {
        BonusKind::RowClear => pos.y == origin.y,
        BonusKind::ColumnClear => pos.x == origin.x,
        BonusKind::ClearAll => true,
    };
    board
        .positions()
        .filter(|pos| *pos != origin && in_area(pos))
        .collect()
}

/// Explode every occupied cell in `cells`, detonating bonuses on the way.
///
/// Returns the cells actually exploded, in explosion order. Cells already empty
/// (for instance cleared by an earlier blast) are skipped.
pub fn explode<S>(board: &mut Board, cells: &[Pos], sink: &mut S) -> Result<Vec<Pos>, GridError>
where
    S: EventSink + ?Sized,
{
    let mut queue: VecDeque<Pos> = cells.iter().copied().collect();
    let mut exploded = Vec::with_capacity(cells.len());

    while let Some(pos) = queue.pop_front() {
        if board.is_empty(pos) {
            continue;
        }
        let item = board.free(pos)?;
        sink.emit(BoardEvent::ItemExploded { pos });
        exploded.push(pos);

        if let Item::Bonus(kind) = item {
            let area = blast_area(board, pos, kind);
            debug!(
                x = pos.x,
                y = pos.y,
                bonus = kind.as_str(),
                cells = area.len(),
                "bonus detonated"
            );
            queue.extend(area.into_iter().filter(|p| !board.is_empty(*p)));
        }
    }

    Ok(exploded)
}
