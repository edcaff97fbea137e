//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, headless drivers, renderers).
//!
//! # Coordinates
//!
//! Cells are addressed as `(x, y)` with `x` growing to the right and `y`
//! growing upwards: `y = 0` is the bottom row, which is where gravity settles
//! items.
//!
//! # Item Catalog
//!
//! The catalog is closed:
//!
//! | Variant | Kinds |
//! |---------|-------|
//! | `Item::Normal` | 7 kinds, [`NormalKind::ALL`] in enumeration order |
//! | `Item::Bonus` | row clear, column clear, clear all |
//!
//! # Timing Constants
//!
//! Durations are opaque hints handed to the animation collaborator, in
//! milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SWAP_MS` | 300 | Two items trading places |
//! | `SETTLE_MS` | 200 | Pause after a collapse or a refill |
//! | `SHUFFLE_MS` | 300 | Pause after a shuffle |
//! | `HINT_DELAY_MS` | 5000 | Idle time before a hint is shown |
//!
//! # Examples
//!
//! ```
//! use gem_cascade_types::{BonusKind, Item, MatchDirection, NormalKind};
//!
//! let a = Item::Normal(NormalKind::Three);
//! let b = Item::Normal(NormalKind::Three);
//! assert!(a.matches(&b));
//!
//! // Bonus items only match the same bonus kind.
//! assert!(!a.matches(&Item::Bonus(BonusKind::RowClear)));
//!
//! assert_eq!(MatchDirection::Vertical.bonus_kind(), Some(BonusKind::ColumnClear));
//! assert_eq!(NormalKind::from_str("five"), Some(NormalKind::Five));
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_SIZE_X: u8 = 8;

/// Default board height in cells
pub const DEFAULT_BOARD_SIZE_Y: u8 = 8;

/// Default minimum run length counted as a match
pub const DEFAULT_MATCH_MIN: usize = 3;

/// Swap animation duration (300ms)
pub const SWAP_MS: u32 = 300;

/// Pause after a collapse and after a refill (200ms)
pub const SETTLE_MS: u32 = 200;

/// Pause after a shuffle (300ms)
pub const SHUFFLE_MS: u32 = 300;

/// Idle time before a hint is shown (5s)
pub const HINT_DELAY_MS: u32 = 5000;

/// Number of normal item kinds
pub const NORMAL_KIND_COUNT: usize = 7;

/// The seven ordinary item kinds.
///
/// Enumeration order matters: refill tie-breaks and the refill fallback both
/// use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NormalKind {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
}

impl NormalKind {
    /// All kinds in enumeration order
    pub const ALL: [NormalKind; NORMAL_KIND_COUNT] = [
        NormalKind::One,
        NormalKind::Two,
        NormalKind::Three,
        NormalKind::Four,
        NormalKind::Five,
        NormalKind::Six,
        NormalKind::Seven,
    ];

    /// Position in [`NormalKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_cascade_types::NormalKind;
    ///
    /// assert_eq!(NormalKind::from_str("one"), Some(NormalKind::One));
    /// assert_eq!(NormalKind::from_str("SEVEN"), Some(NormalKind::Seven));
    /// assert_eq!(NormalKind::from_str("eight"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "one" => Some(NormalKind::One),
            "two" => Some(NormalKind::Two),
            "three" => Some(NormalKind::Three),
            "four" => Some(NormalKind::Four),
            "five" => Some(NormalKind::Five),
            "six" => Some(NormalKind::Six),
            "seven" => Some(NormalKind::Seven),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalKind::One => "one",
            NormalKind::Two => "two",
            NormalKind::Three => "three",
            NormalKind::Four => "four",
            NormalKind::Five => "five",
            NormalKind::Six => "six",
            NormalKind::Seven => "seven",
        }
    }

    /// Single-character symbol for text boards
    pub fn symbol(&self) -> char {
        match self {
            NormalKind::One => 'A',
            NormalKind::Two => 'B',
            NormalKind::Three => 'C',
            NormalKind::Four => 'D',
            NormalKind::Five => 'E',
            NormalKind::Six => 'F',
            NormalKind::Seven => 'G',
        }
    }
}

/// Special items created from over-threshold matches.
///
/// - **RowClear**: explodes its whole row
/// - **ColumnClear**: explodes its whole column
/// - **ClearAll**: explodes the whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusKind {
    RowClear,
    ColumnClear,
    ClearAll,
}

impl BonusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BonusKind::RowClear => "rowClear",
            BonusKind::ColumnClear => "columnClear",
            BonusKind::ClearAll => "clearAll",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BonusKind::RowClear => '-',
            BonusKind::ColumnClear => '|',
            BonusKind::ClearAll => '*',
        }
    }
}

/// An occupant of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Normal(NormalKind),
    Bonus(BonusKind),
}

impl Item {
    /// Run equality: both normal with the same kind, or both the same bonus.
    pub fn matches(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Normal(a), Item::Normal(b)) => a == b,
            (Item::Bonus(a), Item::Bonus(b)) => a == b,
            _ => false,
        }
    }

    pub fn normal_kind(&self) -> Option<NormalKind> {
        match self {
            Item::Normal(kind) => Some(*kind),
            Item::Bonus(_) => None,
        }
    }

    pub fn bonus_kind(&self) -> Option<BonusKind> {
        match self {
            Item::Normal(_) => None,
            Item::Bonus(kind) => Some(*kind),
        }
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self, Item::Bonus(_))
    }

    pub fn symbol(&self) -> char {
        match self {
            Item::Normal(kind) => kind.symbol(),
            Item::Bonus(kind) => kind.symbol(),
        }
    }
}

/// Axis a run is walked along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The four adjacency directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Coordinate delta of one step (`y` grows upwards)
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Shape classification of a match set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchDirection {
    None,
    Horizontal,
    Vertical,
    All,
}

impl MatchDirection {
    /// Bonus kind created from a match of this shape
    pub fn bonus_kind(&self) -> Option<BonusKind> {
        match self {
            MatchDirection::None => None,
            MatchDirection::Horizontal => Some(BonusKind::RowClear),
            MatchDirection::Vertical => Some(BonusKind::ColumnClear),
            MatchDirection::All => Some(BonusKind::ClearAll),
        }
    }
}

/// Cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Ordered list of cells, seed first
pub type MatchSet = Vec<Pos>;

/// Requests handed to the render/animation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new item appeared in a cell (fill, refill, bonus conversion)
    ItemAssigned { pos: Pos, item: Item },
    /// An item travelled between cells (swap, revert, gravity)
    ItemMoved {
        item: Item,
        from: Pos,
        to: Pos,
        duration_ms: u32,
    },
    /// A cell's item was released with an explosion
    ItemExploded { pos: Pos },
    /// Items were redistributed; each pair is `(from, to)`
    ItemsShuffled { mapping: Vec<(Pos, Pos)> },
    /// Idle long enough: highlight these cells
    HintShown { cells: Vec<Pos> },
    /// Any highlighted hint should stop animating
    HintCleared,
}

/// Cascade controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    Idle,
    SwapPending,
    Resolving,
    NoMoves,
    GameOver,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::SwapPending => "swapPending",
            ControllerState::Resolving => "resolving",
            ControllerState::NoMoves => "noMoves",
            ControllerState::GameOver => "gameOver",
        }
    }
}
