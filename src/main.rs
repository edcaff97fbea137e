//! Headless autoplay runner (default binary).
//!
//! Builds a board from `GEM_*` environment settings, then plays
//! `GEM_AUTOPLAY_MOVES` swaps chosen by the swap search, resolving every
//! animation wait immediately. Set `RUST_LOG=debug` to follow each cascade step.

use anyhow::{bail, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gem_cascade::core::{find_matching_swap, CascadeController, GameSettings, Step};
use gem_cascade::types::BoardEvent;

const DEFAULT_AUTOPLAY_MOVES: u32 = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = GameSettings::from_env();
    settings.validate()?;

    let moves = std::env::var("GEM_AUTOPLAY_MOVES")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_AUTOPLAY_MOVES);

    run(settings, moves)
}

fn run(settings: GameSettings, moves: u32) -> Result<()> {
    info!(
        size_x = settings.board_size_x,
        size_y = settings.board_size_y,
        match_min = settings.match_min,
        seed = settings.seed,
        "starting autoplay"
    );

    let mut game = CascadeController::new(settings)?;
    let step = game.start()?;
    game.run_to_rest(step)?;
    game.drain_events();
    println!("{}\n", game.snapshot());

    for turn in 1..=moves {
        let Some((a, b)) = find_matching_swap(game.board()) else {
            warn!(turn, "no matching swap found, stopping");
            break;
        };

        let step = game.request_swap(a, b)?;
        if step == Step::Dropped {
            bail!("swap dropped by an idle controller");
        }
        game.run_to_rest(step)?;

        let events = game.drain_events();
        let exploded = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::ItemExploded { .. }))
            .count();
        info!(
            turn,
            ax = a.x,
            ay = a.y,
            bx = b.x,
            by = b.y,
            exploded,
            events = events.len(),
            "move resolved"
        );
        println!("{}\n", game.snapshot());
    }

    game.signal_game_over();
    info!(
        moves = game.moves(),
        cascades = game.cascades(),
        shuffles = game.shuffles(),
        "autoplay finished"
    );
    Ok(())
}
