//! Integration tests for the cascade controller

use gem_cascade::core::gravity::kind_counts;
use gem_cascade::core::{
    find_first_match, find_matching_swap, Board, CascadeController, CascadeError, GameSettings,
    ScriptedRng, SimpleRng, Step,
};
use gem_cascade::types::{BonusKind, BoardEvent, ControllerState, Item, Pos};

fn p(x: u8, y: u8) -> Pos {
    Pos::new(x, y)
}

fn scripted(rows: &[&str]) -> CascadeController<ScriptedRng> {
    let board = Board::from_rows(rows, 3).unwrap();
    CascadeController::from_board(board, GameSettings::default(), ScriptedRng::new(vec![0]))
}

#[test]
fn test_game_lifecycle() {
    let mut game = CascadeController::new(GameSettings::default()).unwrap();
    assert!(!game.started());

    let step = game.start().unwrap();
    assert!(game.started());
    let step = game.run_to_rest(step).unwrap();

    assert_eq!(step, Step::Ready);
    assert!(!game.is_busy());
    assert_eq!(game.board().occupied_count(), 64);
    assert!(!game.hint().is_empty());

    let assigned = game
        .drain_events()
        .iter()
        .filter(|e| matches!(e, BoardEvent::ItemAssigned { .. }))
        .count();
    assert!(assigned >= 64);
    assert!(game.events().is_empty());
}

#[test]
fn test_same_seed_same_game() {
    let play = || {
        let mut game = CascadeController::new(GameSettings {
            seed: 4242,
            ..GameSettings::default()
        })
        .unwrap();
        let step = game.start().unwrap();
        game.run_to_rest(step).unwrap();
        for _ in 0..5 {
            let (a, b) = find_matching_swap(game.board()).unwrap();
            let step = game.request_swap(a, b).unwrap();
            game.run_to_rest(step).unwrap();
        }
        (game.board().clone(), game.drain_events())
    };

    assert_eq!(play(), play());
}

#[test]
fn test_autoplay_keeps_board_settled() {
    let mut game = CascadeController::new(GameSettings::default()).unwrap();
    let step = game.start().unwrap();
    game.run_to_rest(step).unwrap();

    for turn in 0..10 {
        let (a, b) = find_matching_swap(game.board()).unwrap();
        let step = game.request_swap(a, b).unwrap();
        assert!(step.is_pending());
        assert_eq!(game.run_to_rest(step).unwrap(), Step::Ready, "turn {}", turn);
        assert!(game.board().is_full());
        assert!(find_first_match(game.board()).is_empty());
    }
    assert_eq!(game.moves(), 10);
}

#[test]
fn test_non_matching_swap_reverts() {
    let mut game = scripted(&["BCD", "AAB", "CDA"]);
    let before = game.board().clone();

    let step = game.request_swap(p(0, 0), p(1, 0)).unwrap();
    let step = game.resume(step.token().unwrap()).unwrap();
    // Swapped back, waiting on the return animation
    assert_eq!(game.board(), &before);
    assert_eq!(game.state(), ControllerState::SwapPending);

    let step = game.run_to_rest(step).unwrap();
    assert_eq!(step, Step::Ready);
    assert_eq!(game.board(), &before);
    assert_eq!(game.moves(), 0);

    let moves: Vec<BoardEvent> = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, BoardEvent::ItemMoved { .. }))
        .collect();
    assert_eq!(moves.len(), 4);
}

#[test]
fn test_matching_swap_emits_explosions() {
    let mut game = scripted(&["BCD", "AAB", "CDA"]);
    let step = game.request_swap(p(2, 1), p(2, 0)).unwrap();
    game.run_to_rest(step).unwrap();

    let exploded: Vec<Pos> = game
        .events()
        .iter()
        .filter_map(|e| match e {
            BoardEvent::ItemExploded { pos } => Some(*pos),
            _ => None,
        })
        .collect();
    // Seed first, then the run walked leftwards
    assert_eq!(&exploded[..3], &[p(2, 1), p(1, 1), p(0, 1)]);
    assert_eq!(game.moves(), 1);
}

#[test]
fn test_long_match_leaves_row_clear_at_destination() {
    let mut game = scripted(&["EFAG", "AABA", "CDEF"]);
    let step = game.request_swap(p(2, 2), p(2, 1)).unwrap();
    game.resume(step.token().unwrap()).unwrap();

    assert_eq!(game.board().item(p(2, 1)), Some(Item::Bonus(BonusKind::RowClear)));
    assert!(game.events().contains(&BoardEvent::ItemAssigned {
        pos: p(2, 1),
        item: Item::Bonus(BonusKind::RowClear),
    }));
}

#[test]
fn test_dead_board_is_shuffled() {
    let mut game = scripted(&["ABC", "DEF", "GAB"]);
    let counts = kind_counts(game.board());

    let step = game.rescan_now().unwrap();
    assert!(step.is_pending());
    assert_eq!(game.state(), ControllerState::NoMoves);
    assert_eq!(game.shuffles(), 1);
    assert_eq!(kind_counts(game.board()), counts);
    assert!(matches!(
        game.events().last(),
        Some(BoardEvent::ItemsShuffled { mapping }) if mapping.len() == 9
    ));
}

#[test]
fn test_input_dropped_while_busy() {
    let mut game = scripted(&["BCD", "AAB", "CDA"]);
    let step = game.request_swap(p(2, 1), p(2, 0)).unwrap();

    assert!(game.is_busy());
    assert_eq!(game.request_swap(p(0, 0), p(0, 1)).unwrap(), Step::Dropped);
    game.run_to_rest(step).unwrap();
    assert!(!game.is_busy());
}

#[test]
fn test_invalid_swap_is_an_error() {
    let mut game = scripted(&["BCD", "AAB", "CDA"]);
    assert!(matches!(
        game.request_swap(p(0, 0), p(2, 2)),
        Err(CascadeError::Grid(_))
    ));
    assert!(matches!(
        game.request_swap(p(1, 1), p(1, 1)),
        Err(CascadeError::Grid(_))
    ));
    assert_eq!(game.state(), ControllerState::Idle);
}

#[test]
fn test_resume_rejects_unknown_token() {
    let mut game = scripted(&["BCD", "AAB", "CDA"]);
    let step = game.request_swap(p(2, 1), p(2, 0)).unwrap();
    let token = step.token().unwrap();
    game.resume(token).unwrap();
    assert_eq!(
        game.resume(token),
        Err(CascadeError::StaleToken { got: token.id() })
    );
}

#[test]
fn test_hint_after_idle_delay() {
    let mut game = CascadeController::with_rng(
        GameSettings {
            time_for_hint_ms: 1000,
            ..GameSettings::default()
        },
        SimpleRng::new(3),
    )
    .unwrap();
    let step = game.start().unwrap();
    game.run_to_rest(step).unwrap();
    game.drain_events();

    assert!(!game.tick(600));
    assert!(game.tick(600));
    assert_eq!(
        game.drain_events(),
        vec![BoardEvent::HintShown {
            cells: game.hint().to_vec()
        }]
    );
}

#[test]
fn test_game_over_lets_cascade_finish() {
    let mut game = scripted(&["BCD", "AAB", "CDA"]);
    let step = game.request_swap(p(2, 1), p(2, 0)).unwrap();
    game.signal_game_over();

    assert_eq!(game.run_to_rest(step).unwrap(), Step::GameOver);
    assert_eq!(game.state(), ControllerState::GameOver);
    assert_eq!(game.request_swap(p(0, 0), p(1, 0)).unwrap(), Step::Dropped);
}

#[test]
fn test_snapshot_reflects_controller() {
    let game = scripted(&["BCD", "AAB", "CDA"]);
    let snap = game.snapshot();
    assert_eq!(snap.rows, vec!["BCD", "AAB", "CDA"]);
    assert_eq!(snap.state, "idle");

    let json: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
    assert_eq!(json["size_x"], 3);
    assert_eq!(json["moves"], 0);
}
