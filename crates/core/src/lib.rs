//! Core match-3 simulation - pure, deterministic, and testable
//!
//! This crate holds the board, the match rules and the cascade sequencing.
//! It has **no dependencies** on rendering, input or I/O, making it:
//!
//! - **Deterministic**: Same seed and same swaps produce the same board
//! - **Testable**: Boards can be written as rows of symbols
//! - **Portable**: Runs headless; a renderer only consumes [`types::BoardEvent`]s
//!
//! # Module Structure
//!
//! - [`board`]: cell grid with neighbor links and item storage
//! - [`matcher`]: run scanning, match detection and shape classification
//! - [`bonus`]: bonus creation, compatibility filtering and blast chaining
//! - [`gravity`]: collapse, refill, initial fill and shuffle
//! - [`hint`]: potential-move scanner
//! - [`cascade`]: the controller that sequences all of the above
//! - [`rng`]: injectable randomness
//! - [`config`]: game settings from defaults, env or JSON
//! - [`snapshot`]: plain-data board view for logs and tooling
//!
//! # Game Rules
//!
//! - **Matches**: `match_min` or more same-kind items in a row or column
//! - **Swaps**: only adjacent cells; a swap that matches nothing is reverted
//! - **Bonuses**: matches longer than `match_min` leave a row, column or
//!   clear-all bonus behind, shaped after the match
//! - **Cascades**: after a collapse and refill the board is rescanned until
//!   it settles
//! - **Deadlock**: a board without a potential move is shuffled
//!
//! # Example
//!
//! ```
//! use gem_cascade_core::{CascadeController, GameSettings, Step};
//! use gem_cascade_core::types::ControllerState;
//!
//! let mut game = CascadeController::new(GameSettings::default()).unwrap();
//! let step = game.start().unwrap();
//!
//! // Resolve every animation wait at once
//! let step = game.run_to_rest(step).unwrap();
//! assert_eq!(step, Step::Ready);
//! assert_eq!(game.state(), ControllerState::Idle);
//! assert!(game.board().is_full());
//! ```
//!
//! # Timing
//!
//! The core never sleeps. Every wait comes back as [`Step::Pending`] with a
//! suggested duration:
//! - **Swap**: 300ms, also used for a reverted swap
//! - **Settle**: 200ms after a collapse and after a refill
//! - **Shuffle**: 300ms
//!
//! Call [`CascadeController::tick`](cascade::CascadeController::tick) while
//! idle to drive the hint timer.

pub mod board;
pub mod bonus;
pub mod cascade;
pub mod config;
pub mod error;
pub mod events;
pub mod gravity;
pub mod hint;
pub mod matcher;
pub mod rng;
pub mod snapshot;

pub use gem_cascade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, MAX_BOARD_SIDE};
pub use cascade::{CascadeController, ResumeToken, Step};
pub use config::GameSettings;
pub use error::{CascadeError, ConfigError, GridError};
pub use events::{EventSink, NullSink};
pub use hint::{find_matching_swap, find_potential_move};
pub use matcher::{find_first_match, matches_at};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use snapshot::BoardSnapshot;
