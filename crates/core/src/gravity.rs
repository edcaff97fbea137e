//! Gravity module - collapse, refill, initial fill and shuffle
//!
//! Everything here mutates the board and reports each change to the event sink
//! so a renderer can animate it. Refill and initial fill steer away from
//! creating matches; neither guarantees it.

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::board::Board;
use crate::error::GridError;
use crate::events::EventSink;
use crate::rng::{shuffle as shuffle_slice, RandomSource};
use crate::types::{BoardEvent, Direction, Item, NormalKind, Pos, NORMAL_KIND_COUNT};

/// Let items fall so every column is packed at the bottom.
///
/// Two-pointer pass per column, bottom to top: the running count of empty cells
/// below is how far each item drops. Relative order in a column is preserved.
/// Returns the number of items moved.
pub fn shift_down<S>(board: &mut Board, duration_ms: u32, sink: &mut S) -> Result<usize, GridError>
where
    S: EventSink + ?Sized,
{
    let mut moved = 0;
    for x in 0..board.size_x() {
        let mut shifts: u8 = 0;
        for y in 0..board.size_y() {
            let from = Pos::new(x, y);
            if board.is_empty(from) {
                shifts += 1;
                continue;
            }
            if shifts == 0 {
                continue;
            }

            let to = Pos::new(x, y - shifts);
            let item = board.free(from)?;
            board.assign(to, item)?;
            sink.emit(BoardEvent::ItemMoved {
                item,
                from,
                to,
                duration_ms,
            });
            moved += 1;
        }
    }
    Ok(moved)
}

/// Fill every empty cell with a fresh normal item.
///
/// Each cell avoids the kinds of its occupied neighbors and, among what is
/// left, takes the kind currently least common on the board (enumeration
/// order breaks ties). With every kind excluded it falls back to the first
/// kind, which can complete a match. Returns the number of cells filled.
pub fn fill_gaps<S>(board: &mut Board, sink: &mut S) -> Result<usize, GridError>
where
    S: EventSink + ?Sized,
{
    let mut counts = kind_counts(board);
    let mut filled = 0;

    let empty: Vec<Pos> = board.positions().filter(|p| board.is_empty(*p)).collect();
    for pos in empty {
        let excluded = neighbor_kinds(
            board,
            pos,
            &[Direction::Left, Direction::Right, Direction::Down, Direction::Up],
        );

        let kind = match NormalKind::ALL
            .iter()
            .filter(|kind| !excluded.contains(kind))
            .min_by_key(|kind| counts[kind.index()])
        {
            Some(kind) => *kind,
            None => {
                warn!(x = pos.x, y = pos.y, "no refill kind avoids every neighbor");
                NormalKind::ALL[0]
            }
        };

        counts[kind.index()] += 1;
        let item = Item::Normal(kind);
        board.assign(pos, item)?;
        sink.emit(BoardEvent::ItemAssigned { pos, item });
        filled += 1;
    }

    if filled > 0 {
        debug!(filled, "gaps refilled");
    }
    Ok(filled)
}

/// Populate the empty cells of a board from scratch.
///
/// Each cell picks uniformly among the kinds that differ from its bottom and
/// left neighbors, so scan order never lines up two equal neighbors behind it.
pub fn fill<R, S>(board: &mut Board, rng: &mut R, sink: &mut S) -> Result<usize, GridError>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    let mut filled = 0;
    let empty: Vec<Pos> = board.positions().filter(|p| board.is_empty(*p)).collect();
    for pos in empty {
        let excluded = neighbor_kinds(board, pos, &[Direction::Down, Direction::Left]);
        let candidates: ArrayVec<NormalKind, NORMAL_KIND_COUNT> = NormalKind::ALL
            .iter()
            .copied()
            .filter(|kind| !excluded.contains(kind))
            .collect();

        let kind = candidates[rng.next_range(candidates.len() as u32) as usize];
        let item = Item::Normal(kind);
        board.assign(pos, item)?;
        sink.emit(BoardEvent::ItemAssigned { pos, item });
        filled += 1;
    }
    Ok(filled)
}

/// Redistribute every item uniformly over the occupied cells.
///
/// The multiset of items is unchanged. Returns the `(from, to)` mapping, which
/// is also emitted as [`BoardEvent::ItemsShuffled`].
pub fn shuffle<R, S>(
    board: &mut Board,
    rng: &mut R,
    sink: &mut S,
) -> Result<Vec<(Pos, Pos)>, GridError>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    let occupied: Vec<Pos> = board.positions().filter(|p| !board.is_empty(*p)).collect();
    let mut items = Vec::with_capacity(occupied.len());
    for pos in &occupied {
        items.push(board.free(*pos)?);
    }

    let mut order: Vec<usize> = (0..occupied.len()).collect();
    shuffle_slice(rng, &mut order);

    let mut mapping = Vec::with_capacity(occupied.len());
    for (to_idx, from_idx) in order.into_iter().enumerate() {
        let to = occupied[to_idx];
        board.assign(to, items[from_idx])?;
        mapping.push((occupied[from_idx], to));
    }

    sink.emit(BoardEvent::ItemsShuffled {
        mapping: mapping.clone(),
    });
    Ok(mapping)
}

/// Per-kind count of the normal items on the board
pub fn kind_counts(board: &Board) -> [usize; NORMAL_KIND_COUNT] {
    let mut counts = [0usize; NORMAL_KIND_COUNT];
    for pos in board.positions() {
        if let Some(kind) = board.normal_kind(pos) {
            counts[kind.index()] += 1;
        }
    }
    counts
}

fn neighbor_kinds(board: &Board, pos: Pos, dirs: &[Direction]) -> ArrayVec<NormalKind, 4> {
    let mut kinds = ArrayVec::new();
    for dir in dirs {
        if let Some(kind) = board.neighbor(pos, *dir).and_then(|n| board.normal_kind(n)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    kinds
}
