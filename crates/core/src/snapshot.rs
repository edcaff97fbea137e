use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::types::ControllerState;

/// Plain-data view of the board for logs and tooling.
///
/// Rows are listed top row first using the `Board::from_rows` symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub size_x: u8,
    pub size_y: u8,
    pub match_min: usize,
    pub rows: Vec<String>,
    pub state: &'static str,
    pub moves: u32,
    pub cascades: u32,
    pub shuffles: u32,
}

impl BoardSnapshot {
    pub fn capture(
        board: &Board,
        state: ControllerState,
        moves: u32,
        cascades: u32,
        shuffles: u32,
    ) -> Self {
        Self {
            size_x: board.size_x(),
            size_y: board.size_y(),
            match_min: board.match_min(),
            rows: board.to_rows(),
            state: state.as_str(),
            moves,
            cascades,
            shuffles,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        write!(
            f,
            "[{}] moves={} cascades={} shuffles={}",
            self.state, self.moves, self.cascades, self.shuffles
        )
    }
}
