//! Board module - manages the cell grid and its adjacency
//!
//! The board is a `size_x` x `size_y` grid where each cell holds at most one item.
//! Uses flat storage for cells and items, row-major (`y * size_x + x`).
//! Coordinates: `x` grows to the right, `y` grows upwards (`y = 0` is the bottom row).
//!
//! Neighbor links are computed once at construction and never change. No search
//! logic lives here; see `matcher`, `gravity` and `hint`.

use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::types::{BonusKind, Direction, Item, NormalKind, Pos};

/// Largest supported board side
pub const MAX_BOARD_SIDE: u8 = 64;

/// A grid cell and its fixed adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    /// Links indexed up, right, down, left
    links: [Option<Pos>; 4],
}

impl Cell {
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn up(&self) -> Option<Pos> {
        self.links[0]
    }

    pub fn right(&self) -> Option<Pos> {
        self.links[1]
    }

    pub fn down(&self) -> Option<Pos> {
        self.links[2]
    }

    pub fn left(&self) -> Option<Pos> {
        self.links[3]
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Pos> {
        match dir {
            Direction::Up => self.up(),
            Direction::Right => self.right(),
            Direction::Down => self.down(),
            Direction::Left => self.left(),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size_x: u8,
    size_y: u8,
    match_min: usize,
    cells: Vec<Cell>,
    items: Vec<Option<Item>>,
}

impl Board {
    /// Create an empty board with all neighbor links in place
    pub fn new(size_x: u8, size_y: u8, match_min: usize) -> Result<Self, GridError> {
        if size_x == 0 || size_y == 0 || size_x > MAX_BOARD_SIDE || size_y > MAX_BOARD_SIDE {
            return Err(GridError::InvalidState("board dimensions out of range"));
        }

        let w = size_x as usize;
        let h = size_y as usize;
        let mut cells = Vec::with_capacity(w * h);
        for y in 0..size_y {
            for x in 0..size_x {
                let mut links = [None; 4];
                for (slot, dir) in Direction::ALL.iter().enumerate() {
                    let (dx, dy) = dir.offset();
                    let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                    if (0..size_x as i32).contains(&nx) && (0..size_y as i32).contains(&ny) {
                        links[slot] = Some(Pos::new(nx as u8, ny as u8));
                    }
                }
                cells.push(Cell {
                    pos: Pos::new(x, y),
                    links,
                });
            }
        }

        Ok(Self {
            size_x,
            size_y,
            match_min,
            cells,
            items: vec![None; w * h],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.size_x as i32 || y < 0 || y >= self.size_y as i32 {
            return None;
        }
        Some((y as usize) * (self.size_x as usize) + (x as usize))
    }

    #[inline(always)]
    fn index_of(&self, pos: Pos) -> Result<usize, GridError> {
        self.index(pos.x as i32, pos.y as i32)
            .ok_or(GridError::OutOfRange {
                x: pos.x as i32,
                y: pos.y as i32,
            })
    }

    pub fn size_x(&self) -> u8 {
        self.size_x
    }

    pub fn size_y(&self) -> u8 {
        self.size_y
    }

    pub fn match_min(&self) -> usize {
        self.match_min
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell at (x, y); fails instead of clamping
    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        self.index(x, y)
            .map(|idx| &self.cells[idx])
            .ok_or(GridError::OutOfRange { x, y })
    }

    pub fn cell(&self, pos: Pos) -> Result<&Cell, GridError> {
        let idx = self.index_of(pos)?;
        Ok(&self.cells[idx])
    }

    /// Adjacent cell in `dir`, absent at the edge (or for a foreign position)
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        self.cell(pos).ok().and_then(|cell| cell.neighbor(dir))
    }

    /// Existing neighbors in up, right, down, left order
    pub fn neighbors(&self, pos: Pos) -> ArrayVec<Pos, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.neighbor(pos, dir))
            .collect()
    }

    /// True iff one of the four links connects `a` and `b`
    pub fn is_neighbor(&self, a: Pos, b: Pos) -> bool {
        match self.cell(a) {
            Ok(cell) => cell.links.iter().any(|link| *link == Some(b)),
            Err(_) => false,
        }
    }

    /// Occupant of the cell; `None` when empty or off the board
    pub fn item(&self, pos: Pos) -> Option<Item> {
        self.index_of(pos).ok().and_then(|idx| self.items[idx])
    }

    pub fn is_empty(&self, pos: Pos) -> bool {
        self.item(pos).is_none()
    }

    /// Normal kind in the cell, if it holds a normal item
    pub fn normal_kind(&self, pos: Pos) -> Option<NormalKind> {
        self.item(pos).and_then(|item| item.normal_kind())
    }

    /// True if both cells hold items that would extend the same run
    pub fn same_type(&self, a: Pos, b: Pos) -> bool {
        match (self.item(a), self.item(b)) {
            (Some(ia), Some(ib)) => ia.matches(&ib),
            _ => false,
        }
    }

    /// Place an item in an empty cell
    pub fn assign(&mut self, pos: Pos, item: Item) -> Result<(), GridError> {
        let idx = self.index_of(pos)?;
        if self.items[idx].is_some() {
            return Err(GridError::InvalidState("assign to an occupied cell"));
        }
        self.items[idx] = Some(item);
        Ok(())
    }

    /// Release the cell's item
    pub fn free(&mut self, pos: Pos) -> Result<Item, GridError> {
        let idx = self.index_of(pos)?;
        self.items[idx]
            .take()
            .ok_or(GridError::InvalidState("free an empty cell"))
    }

    /// Exchange the occupants of two adjacent cells
    pub fn swap_items(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        if a == b {
            return Err(GridError::InvalidState("swap a cell with itself"));
        }
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if !self.is_neighbor(a, b) {
            return Err(GridError::InvalidState("swap non-adjacent cells"));
        }
        self.items.swap(ia, ib);
        Ok(())
    }

    /// Release every item, returning how many were held
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for slot in &mut self.items {
            if slot.take().is_some() {
                released += 1;
            }
        }
        released
    }

    /// All positions in scan order: columns left to right, each bottom to top
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size_x).flat_map(move |x| (0..self.size_y).map(move |y| Pos::new(x, y)))
    }

    pub fn occupied_count(&self) -> usize {
        self.items.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.items.iter().all(|slot| slot.is_some())
    }

    /// Parse a board from text rows, top row first.
    ///
    /// `A`..`G` are the normal kinds in enumeration order, `-`, `|` and `*` the
    /// row clear, column clear and clear all bonuses, `.` an empty cell.
    ///
    /// ```
    /// use gem_cascade_core::Board;
    ///
    /// let board = Board::from_rows(&["AB", "CA"], 3).unwrap();
    /// assert_eq!(board.size_x(), 2);
    /// assert_eq!(board.to_rows(), vec!["AB".to_string(), "CA".to_string()]);
    /// ```
    pub fn from_rows(rows: &[&str], match_min: usize) -> Result<Self, GridError> {
        let size_y = rows.len();
        let size_x = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if size_x > MAX_BOARD_SIDE as usize || size_y > MAX_BOARD_SIDE as usize {
            return Err(GridError::InvalidState("board dimensions out of range"));
        }
        let mut board = Self::new(size_x as u8, size_y as u8, match_min)?;

        for (row_idx, row) in rows.iter().enumerate() {
            if row.chars().count() != size_x {
                return Err(GridError::InvalidState("ragged board rows"));
            }
            let y = (size_y - 1 - row_idx) as u8;
            for (x, ch) in row.chars().enumerate() {
                if let Some(item) = item_from_symbol(ch)? {
                    board.assign(Pos::new(x as u8, y), item)?;
                }
            }
        }

        Ok(board)
    }

    /// Render as text rows, top row first (inverse of [`Board::from_rows`])
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.size_y)
            .rev()
            .map(|y| {
                (0..self.size_x)
                    .map(|x| self.item(Pos::new(x, y)).map_or('.', |item| item.symbol()))
                    .collect()
            })
            .collect()
    }
}

fn item_from_symbol(ch: char) -> Result<Option<Item>, GridError> {
    let item = match ch {
        '.' => return Ok(None),
        '-' => Item::Bonus(BonusKind::RowClear),
        '|' => Item::Bonus(BonusKind::ColumnClear),
        '*' => Item::Bonus(BonusKind::ClearAll),
        _ => match NormalKind::ALL.iter().find(|kind| kind.symbol() == ch) {
            Some(kind) => Item::Normal(*kind),
            None => return Err(GridError::InvalidState("unknown board symbol")),
        },
    };
    Ok(Some(item))
}
