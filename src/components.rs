#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    #[must_use]
    pub fn is_filled(self) -> bool {
        self == Cell::Filled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    L,
    J,
    Z,
    S,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::L,
        TetrominoType::J,
        TetrominoType::Z,
        TetrominoType::S,
    ];

    /// Picks one of the seven shapes uniformly.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    /// Spawn orientation of this tetromino.
    #[must_use]
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            TetrominoType::I => &[&[1, 1, 1, 1]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::T => &[&[1, 1, 1], &[0, 1, 0]],
            TetrominoType::L => &[&[1, 1, 1], &[1, 0, 0]],
            TetrominoType::J => &[&[1, 1, 1], &[0, 0, 1]],
            TetrominoType::Z => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoType::S => &[&[0, 1, 1], &[1, 1, 0]],
        };
        Shape::from_rows(rows)
    }
}

/// Rectangular occupancy matrix of a piece, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    #[must_use]
    pub fn new(cells: Vec<Vec<bool>>) -> Self {
        Self { cells }
    }

    /// Builds a shape from rows of 0/1 flags.
    #[must_use]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|&flag| flag != 0).collect())
                .collect(),
        )
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// Offsets `(col, row)` of every occupied cell relative to the shape origin.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| (col as i32, row as i32))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse the order of the source rows.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let height = self.height();
        let cells = (0..self.width())
            .map(|col| {
                (0..height)
                    .rev()
                    .map(|row| self.cells[row].get(col).copied().unwrap_or(false))
                    .collect()
            })
            .collect();
        Self { cells }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub tetromino_type: TetrominoType,
    pub shape: Shape,
    pub position: Position,
}

impl Piece {
    #[must_use]
    pub fn new(tetromino_type: TetrominoType, position: Position) -> Self {
        Self {
            tetromino_type,
            shape: tetromino_type.shape(),
            position,
        }
    }

    /// Places a fresh piece on the top row, horizontally centered on a board `board_width` wide.
    #[must_use]
    pub fn spawn(tetromino_type: TetrominoType, board_width: usize) -> Self {
        let x = (board_width / 2) as i32 - 1;
        Self::new(tetromino_type, Position { x, y: 0 })
    }

    /// Board coordinates `(x, y)` of every occupied cell.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let Position { x, y } = self.position;
        self.shape.occupied().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// The playfield. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| !cell.is_filled())
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.width > 0
            && self
                .rows
                .get(y)
                .is_some_and(|row| row.iter().all(|cell| cell.is_filled()))
    }

    /// Whether a block may sit at `(x, y)`. Rows above the board are open.
    #[must_use]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        y < 0 || !self.rows[y as usize][x as usize].is_filled()
    }

    #[must_use]
    pub fn is_valid_position(&self, shape: &Shape, position: Position) -> bool {
        shape
            .occupied()
            .all(|(dx, dy)| self.is_free(position.x + dx, position.y + dy))
    }

    /// Merges a landed piece into the grid. Blocks above the top row are dropped.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.blocks() {
            if x >= 0 && y >= 0 {
                self.set(x as usize, y as usize, Cell::Filled);
            }
        }
    }

    /// Removes every full row, shifting the rows above down, and returns how many were removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut y = self.height;

        // Walk bottom to top; after a removal the same index holds the row that was above it
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.rows.remove(row);
                self.rows.insert(0, vec![Cell::Empty; self.width]);
                lines_cleared += 1;
            } else {
                y -= 1;
            }
        }

        lines_cleared
    }
}
