//! Board tests - grid topology, item storage and gravity

use gem_cascade::core::gravity::{fill, fill_gaps, kind_counts, shift_down, shuffle};
use gem_cascade::core::{Board, GridError, NullSink, SimpleRng};
use gem_cascade::types::{BonusKind, BoardEvent, Direction, Item, NormalKind, Pos};

fn p(x: u8, y: u8) -> Pos {
    Pos::new(x, y)
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(5, 4, 3).unwrap();
    assert_eq!(board.size_x(), 5);
    assert_eq!(board.size_y(), 4);
    assert_eq!(board.cell_count(), 20);

    for pos in board.positions() {
        assert!(board.is_empty(pos), "Cell {:?} should be empty", pos);
    }
}

#[test]
fn test_board_rejects_bad_dimensions() {
    assert!(Board::new(0, 4, 3).is_err());
    assert!(Board::new(4, 0, 3).is_err());
    assert!(Board::new(65, 4, 3).is_err());
}

#[test]
fn test_cell_at_out_of_range() {
    let board = Board::new(3, 3, 3).unwrap();
    assert_eq!(
        board.cell_at(-1, 0).unwrap_err(),
        GridError::OutOfRange { x: -1, y: 0 }
    );
    assert!(board.cell_at(0, 3).is_err());
    assert_eq!(board.cell_at(2, 1).unwrap().pos(), p(2, 1));
}

#[test]
fn test_neighbor_links_are_symmetric() {
    let board = Board::new(4, 3, 3).unwrap();
    for pos in board.positions() {
        assert!(!board.is_neighbor(pos, pos));
        for dir in Direction::ALL {
            if let Some(n) = board.neighbor(pos, dir) {
                assert_eq!(board.neighbor(n, dir.opposite()), Some(pos));
                assert!(board.is_neighbor(pos, n));
                assert!(board.is_neighbor(n, pos));
            }
        }
    }
}

#[test]
fn test_corner_and_edge_links() {
    let board = Board::new(3, 3, 3).unwrap();
    let corner = board.cell(p(0, 0)).unwrap();
    assert_eq!(corner.down(), None);
    assert_eq!(corner.left(), None);
    assert_eq!(corner.up(), Some(p(0, 1)));
    assert_eq!(corner.right(), Some(p(1, 0)));
    assert_eq!(board.neighbors(p(1, 1)).len(), 4);
    assert_eq!(board.neighbors(p(2, 2)).len(), 2);
}

#[test]
fn test_assign_free_contract() {
    let mut board = Board::new(2, 2, 3).unwrap();
    let item = Item::Normal(NormalKind::Four);

    board.assign(p(1, 1), item).unwrap();
    assert!(board.assign(p(1, 1), item).is_err());
    assert_eq!(board.free(p(1, 1)).unwrap(), item);
    assert!(board.free(p(1, 1)).is_err());
}

#[test]
fn test_swap_items_requires_adjacency() {
    let mut board = Board::from_rows(&["AB", "CD"], 3).unwrap();
    assert!(board.swap_items(p(0, 0), p(0, 0)).is_err());
    assert!(board.swap_items(p(0, 0), p(1, 1)).is_err());

    board.swap_items(p(0, 0), p(1, 0)).unwrap();
    assert_eq!(board.to_rows(), vec!["AB", "DC"]);
}

#[test]
fn test_clear_releases_every_item() {
    let mut board = Board::from_rows(&["A.B", "-C."], 3).unwrap();
    assert_eq!(board.clear(), 4);
    assert_eq!(board.occupied_count(), 0);
    assert_eq!(board.clear(), 0);
    board.assign(p(1, 1), Item::Normal(NormalKind::Two)).unwrap();
}

#[test]
fn test_rows_roundtrip_with_bonuses() {
    let rows = ["A-.", "|*G"];
    let board = Board::from_rows(&rows, 3).unwrap();
    assert_eq!(board.item(p(1, 1)), Some(Item::Bonus(BonusKind::RowClear)));
    assert_eq!(board.item(p(0, 0)), Some(Item::Bonus(BonusKind::ColumnClear)));
    assert_eq!(board.item(p(2, 0)), Some(Item::Normal(NormalKind::Seven)));
    assert_eq!(board.to_rows(), rows);
}

#[test]
fn test_shift_down_packs_every_column() {
    let mut board = Board::from_rows(&["AB.D", "....", "C.E.", ".F.."], 3).unwrap();
    let occupied = board.occupied_count();
    shift_down(&mut board, 200, &mut NullSink).unwrap();

    assert_eq!(board.occupied_count(), occupied);
    for x in 0..board.size_x() {
        let mut seen_empty = false;
        for y in 0..board.size_y() {
            if board.is_empty(p(x, y)) {
                seen_empty = true;
            } else {
                assert!(!seen_empty, "gap below ({}, {})", x, y);
            }
        }
    }
}

#[test]
fn test_collapse_then_refill_fills_board() {
    let mut board = Board::from_rows(&["ABC", "...", "DEF"], 3).unwrap();
    let mut events = Vec::new();
    shift_down(&mut board, 200, &mut events).unwrap();
    let filled = fill_gaps(&mut board, &mut events).unwrap();

    assert_eq!(filled, 3);
    assert!(board.is_full());
    let assigned = events
        .iter()
        .filter(|e| matches!(e, BoardEvent::ItemAssigned { .. }))
        .count();
    assert_eq!(assigned, 3);
}

#[test]
fn test_initial_fill_is_deterministic_per_seed() {
    let mut a = Board::new(8, 8, 3).unwrap();
    let mut b = Board::new(8, 8, 3).unwrap();
    fill(&mut a, &mut SimpleRng::new(77), &mut NullSink).unwrap();
    fill(&mut b, &mut SimpleRng::new(77), &mut NullSink).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_shuffle_preserves_items() {
    let mut board = Board::new(6, 6, 3).unwrap();
    let mut rng = SimpleRng::new(9);
    fill(&mut board, &mut rng, &mut NullSink).unwrap();
    let before = kind_counts(&board);

    let mapping = shuffle(&mut board, &mut rng, &mut NullSink).unwrap();

    assert_eq!(kind_counts(&board), before);
    assert!(board.is_full());
    let mut targets: Vec<Pos> = mapping.iter().map(|(_, to)| *to).collect();
    targets.sort();
    targets.dedup();
    assert_eq!(targets.len(), 36);
}
