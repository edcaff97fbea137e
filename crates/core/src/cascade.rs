//! Cascade controller - sequences swap, match, explode, collapse and refill
//!
//! This module ties together all core components: board, matcher, bonus rules,
//! gravity and the potential-move scanner. It owns the board and is the only
//! thing that mutates it during play.
//!
//! # Suspend points
//!
//! Every pause a renderer needs (swap animation, collapse, refill, shuffle) is
//! returned to the caller as [`Step::Pending`] carrying a [`ResumeToken`]. The
//! controller does nothing until [`CascadeController::resume`] is called with
//! that token. A synchronous caller can resume immediately, which is what
//! [`CascadeController::run_to_rest`] does.
//!
//! # State machine
//!
//! ```text
//! Idle --swap--> SwapPending --no match--> (revert) --> Idle
//!                     |
//!                   match
//!                     v
//!                Resolving <------------------+
//!                     |                       |
//!      explode, bonus, collapse, refill       |
//!                     |                       |
//!             rescan: match? ----- yes -------+
//!                     | no
//!          potential move? -- yes --> Idle
//!                     | no
//!                  NoMoves --shuffle-------> rescan
//! ```
//!
//! A game-over signal moves `Idle` to `GameOver` at once; a cascade already in
//! flight finishes its steps and then lands in `GameOver` instead of `Idle`.

use tracing::{debug, info};

use crate::board::Board;
use crate::bonus::{convert_to_bonus, explode, filter_for_bonus_compatibility};
use crate::config::GameSettings;
use crate::error::{CascadeError, ConfigError, GridError};
use crate::gravity::{fill, fill_gaps, shift_down, shuffle};
use crate::hint::find_potential_move;
use crate::matcher::{find_first_match, matches_at, merge_unique};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::BoardSnapshot;
use crate::types::{BoardEvent, ControllerState, MatchSet, Pos};

/// Identifies the step a [`Step::Pending`] is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResumeToken(u32);

impl ResumeToken {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// What the caller must do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Control is back with the player
    Ready,
    /// Wait `duration_ms` (or for the matching animation), then resume
    Pending {
        token: ResumeToken,
        duration_ms: u32,
    },
    /// Input ignored: the controller is busy, paused or over
    Dropped,
    /// The cascade finished after a game-over signal; no more input
    GameOver,
}

impl Step {
    pub fn is_pending(&self) -> bool {
        matches!(self, Step::Pending { .. })
    }

    pub fn token(&self) -> Option<ResumeToken> {
        match self {
            Step::Pending { token, .. } => Some(*token),
            _ => None,
        }
    }
}

/// Work left to do once the outstanding wait is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    SwapSettled { a: Pos, b: Pos },
    SwapReverted,
    Collapsed,
    Refilled,
    Shuffled,
    /// Board emptied for a rebuild, waiting to be filled
    Cleared,
}

/// Complete controller state
#[derive(Debug, Clone)]
pub struct CascadeController<R = SimpleRng> {
    board: Board,
    settings: GameSettings,
    rng: R,
    state: ControllerState,
    events: Vec<BoardEvent>,
    pending: Option<(ResumeToken, Continuation)>,
    next_token: u32,
    started: bool,
    paused: bool,
    game_over: bool,
    /// Cells of the last potential move found
    hint: MatchSet,
    hint_shown: bool,
    idle_ms: u32,
    consecutive_shuffles: u32,
    moves: u32,
    cascades: u32,
    shuffles: u32,
}

impl CascadeController<SimpleRng> {
    /// Controller with an empty board, seeded from the settings
    pub fn new(settings: GameSettings) -> Result<Self, CascadeError> {
        let rng = SimpleRng::new(settings.seed);
        Self::with_rng(settings, rng)
    }
}

impl<R: RandomSource> CascadeController<R> {
    /// Controller with an empty board and an injected RNG.
    ///
    /// Fails with `Settings` for anything [`GameSettings::validate`] rejects,
    /// including shapes too small to ever hold a move.
    pub fn with_rng(settings: GameSettings, rng: R) -> Result<Self, CascadeError> {
        if let Err(ConfigError::Invalid(reason)) = settings.validate() {
            return Err(CascadeError::Settings(reason));
        }
        let board = Board::new(
            settings.board_size_x,
            settings.board_size_y,
            settings.match_min,
        )?;
        Ok(Self::assemble(board, settings, rng))
    }

    /// Controller over an already populated board, idle and ready for input.
    ///
    /// The board's own dimensions and `match_min` win over the settings.
    pub fn from_board(board: Board, mut settings: GameSettings, rng: R) -> Self {
        settings.board_size_x = board.size_x();
        settings.board_size_y = board.size_y();
        settings.match_min = board.match_min();

        let mut controller = Self::assemble(board, settings, rng);
        controller.started = true;
        controller.hint = find_potential_move(&controller.board);
        controller
    }

    fn assemble(board: Board, settings: GameSettings, rng: R) -> Self {
        Self {
            board,
            settings,
            rng,
            state: ControllerState::Idle,
            events: Vec::new(),
            pending: None,
            next_token: 0,
            started: false,
            paused: false,
            game_over: false,
            hint: Vec::new(),
            hint_shown: false,
            idle_ms: 0,
            consecutive_shuffles: 0,
            moves: 0,
            cascades: 0,
            shuffles: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True whenever input would be dropped
    pub fn is_busy(&self) -> bool {
        self.state != ControllerState::Idle || self.paused
    }

    /// Cells of the current hint (empty if none cached)
    pub fn hint(&self) -> &[Pos] {
        &self.hint
    }

    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    /// Accepted swaps that produced a match
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Match sets resolved, chain reactions included
    pub fn cascades(&self) -> u32 {
        self.cascades
    }

    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    /// Outstanding wait, if any
    pub fn pending_token(&self) -> Option<ResumeToken> {
        self.pending.map(|(token, _)| token)
    }

    /// Events not yet handed to the renderer
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Take every buffered event
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(
            &self.board,
            self.state,
            self.moves,
            self.cascades,
            self.shuffles,
        )
    }

    /// Fill the board and settle it (a fresh fill may need a shuffle)
    pub fn start(&mut self) -> Result<Step, CascadeError> {
        if self.started {
            return Ok(Step::Dropped);
        }
        self.started = true;

        let filled = fill(&mut self.board, &mut self.rng, &mut self.events)?;
        info!(
            size_x = self.board.size_x(),
            size_y = self.board.size_y(),
            filled,
            "board filled"
        );
        self.rescan()
    }

    /// Player swap of two adjacent cells.
    ///
    /// Dropped while busy or after game over. Identical or non-adjacent cells
    /// are a caller bug and fail with `InvalidState`.
    pub fn request_swap(&mut self, a: Pos, b: Pos) -> Result<Step, CascadeError> {
        if !self.started {
            return Err(CascadeError::NotStarted);
        }
        if self.game_over || self.is_busy() {
            debug!(state = self.state.as_str(), paused = self.paused, "swap dropped");
            return Ok(Step::Dropped);
        }

        self.swap_with_moves(a, b)?;
        self.stop_hint();
        self.state = ControllerState::SwapPending;
        debug!(ax = a.x, ay = a.y, bx = b.x, by = b.y, "swap requested");

        Ok(self.wait(Continuation::SwapSettled { a, b }, self.settings.swap_ms))
    }

    /// Continue after the wait identified by `token`
    pub fn resume(&mut self, token: ResumeToken) -> Result<Step, CascadeError> {
        let continuation = match self.pending {
            Some((expected, continuation)) if expected == token => continuation,
            _ => return Err(CascadeError::StaleToken { got: token.0 }),
        };
        self.pending = None;

        match continuation {
            Continuation::SwapSettled { a, b } => self.swap_settled(a, b),
            Continuation::SwapReverted => Ok(self.finish()),
            Continuation::Collapsed => {
                fill_gaps(&mut self.board, &mut self.events)?;
                Ok(self.wait(Continuation::Refilled, self.settings.settle_ms))
            }
            Continuation::Cleared => {
                fill(&mut self.board, &mut self.rng, &mut self.events)?;
                Ok(self.wait(Continuation::Refilled, self.settings.settle_ms))
            }
            Continuation::Refilled | Continuation::Shuffled => self.rescan(),
        }
    }

    /// Resume every wait immediately until control comes back
    pub fn run_to_rest(&mut self, mut step: Step) -> Result<Step, CascadeError> {
        while let Step::Pending { token, .. } = step {
            step = self.resume(token)?;
        }
        Ok(step)
    }

    /// Advance the idle hint timer; returns true when a hint is shown
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != ControllerState::Idle || self.paused || self.hint_shown {
            return false;
        }

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms <= self.settings.time_for_hint_ms {
            return false;
        }

        self.idle_ms = 0;
        self.hint_shown = true;
        self.events.push(BoardEvent::HintShown {
            cells: self.hint.clone(),
        });
        true
    }

    /// Stop accepting input; an in-flight cascade still completes
    pub fn signal_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.stop_hint();
        if self.state == ControllerState::Idle {
            self.state = ControllerState::GameOver;
        }
        info!(moves = self.moves, cascades = self.cascades, "game over");
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume_play(&mut self) {
        self.paused = false;
    }

    /// Re-run the settle scan from outside a cascade (e.g. after editing a board)
    pub fn rescan_now(&mut self) -> Result<Step, CascadeError> {
        if self.is_busy() || self.game_over {
            return Ok(Step::Dropped);
        }
        self.rescan()
    }

    fn wait(&mut self, continuation: Continuation, duration_ms: u32) -> Step {
        let token = ResumeToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some((token, continuation));
        Step::Pending { token, duration_ms }
    }

    fn swap_with_moves(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        self.board.swap_items(a, b)?;
        let duration_ms = self.settings.swap_ms;
        for (from, to) in [(b, a), (a, b)] {
            if let Some(item) = self.board.item(to) {
                self.events.push(BoardEvent::ItemMoved {
                    item,
                    from,
                    to,
                    duration_ms,
                });
            }
        }
        Ok(())
    }

    fn swap_settled(&mut self, a: Pos, b: Pos) -> Result<Step, CascadeError> {
        // A bonus swapped anywhere goes off on its own.
        let bonus_cell = [a, b]
            .into_iter()
            .find(|pos| self.board.item(*pos).is_some_and(|item| item.is_bonus()));
        if let Some(pos) = bonus_cell {
            self.moves += 1;
            self.state = ControllerState::Resolving;
            let exploded = explode(&mut self.board, &[pos], &mut self.events)?;
            debug!(x = pos.x, y = pos.y, cells = exploded.len(), "swapped bonus fired");
            return self.collapse();
        }

        let mut matches = matches_at(&self.board, a);
        merge_unique(&mut matches, &matches_at(&self.board, b));

        if matches.len() < self.board.match_min() {
            debug!("no match, reverting swap");
            self.swap_with_moves(a, b)?;
            return Ok(self.wait(Continuation::SwapReverted, self.settings.swap_ms));
        }

        self.moves += 1;
        self.state = ControllerState::Resolving;
        self.resolve(matches, Some(b))
    }

    fn resolve(&mut self, matches: MatchSet, preferred: Option<Pos>) -> Result<Step, CascadeError> {
        self.cascades += 1;

        let mut explodable = filter_for_bonus_compatibility(&self.board, &matches);
        if explodable.is_empty() {
            // Every cell was an incompatible bonus; fire the set as found.
            explodable = matches;
        }

        let exploded = explode(&mut self.board, &explodable, &mut self.events)?;
        debug!(
            matched = explodable.len(),
            exploded = exploded.len(),
            cascade = self.cascades,
            "match resolved"
        );

        if explodable.len() > self.board.match_min() {
            convert_to_bonus(
                &mut self.board,
                &explodable,
                preferred,
                &mut self.rng,
                &mut self.events,
            )?;
        }

        self.collapse()
    }

    fn collapse(&mut self) -> Result<Step, CascadeError> {
        let moved = shift_down(&mut self.board, self.settings.settle_ms, &mut self.events)?;
        debug!(moved, "collapsed");
        Ok(self.wait(Continuation::Collapsed, self.settings.settle_ms))
    }

    fn rescan(&mut self) -> Result<Step, CascadeError> {
        self.state = ControllerState::Resolving;

        let matches = find_first_match(&self.board);
        if !matches.is_empty() {
            return self.resolve(matches, None);
        }

        self.hint = find_potential_move(&self.board);
        if !self.hint.is_empty() {
            self.consecutive_shuffles = 0;
            self.idle_ms = 0;
            return Ok(self.finish());
        }

        self.state = ControllerState::NoMoves;
        self.no_moves()
    }

    fn no_moves(&mut self) -> Result<Step, CascadeError> {
        if self.consecutive_shuffles >= self.settings.shuffle_limit {
            info!(
                shuffles = self.consecutive_shuffles,
                "shuffling keeps failing, rebuilding board"
            );
            self.consecutive_shuffles = 0;
            let cleared: Vec<Pos> = self
                .board
                .positions()
                .filter(|pos| !self.board.is_empty(*pos))
                .collect();
            for pos in cleared {
                self.events.push(BoardEvent::ItemExploded { pos });
            }
            self.board.clear();
            return Ok(self.wait(Continuation::Cleared, self.settings.settle_ms));
        }

        self.consecutive_shuffles += 1;
        self.shuffles += 1;
        shuffle(&mut self.board, &mut self.rng, &mut self.events)?;
        info!(attempt = self.consecutive_shuffles, "no moves left, board shuffled");
        Ok(self.wait(Continuation::Shuffled, self.settings.shuffle_ms))
    }

    fn finish(&mut self) -> Step {
        if self.game_over {
            self.state = ControllerState::GameOver;
            Step::GameOver
        } else {
            self.state = ControllerState::Idle;
            Step::Ready
        }
    }

    fn stop_hint(&mut self) {
        if self.hint_shown {
            self.events.push(BoardEvent::HintCleared);
        }
        self.hint_shown = false;
        self.idle_ms = 0;
    }
}
