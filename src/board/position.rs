//! Grid geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::{BOARD_COLUMNS, BOARD_ROWS};

/// A (column, row) cell.
///
/// Positions are plain values; one can be built off the board (e.g. from
/// host input) and is then rejected by board commands. Use
/// [`Position::is_on_board`] to check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub column: u8,
    pub row: u8,
}

impl Position {
    /// Where the player starts by default.
    pub const CENTER: Position = Position::new(1, 1);

    #[must_use]
    pub const fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// Build a position from signed coordinates, `None` if off the board.
    #[must_use]
    pub fn try_new(column: i32, row: i32) -> Option<Self> {
        let column = u8::try_from(column).ok()?;
        let row = u8::try_from(row).ok()?;
        let position = Self::new(column, row);
        position.is_on_board().then_some(position)
    }

    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.column < BOARD_COLUMNS && self.row < BOARD_ROWS
    }

    /// Row-major cell index. Only meaningful for on-board positions.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_COLUMNS as usize + self.column as usize
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::new(
            (index % BOARD_COLUMNS as usize) as u8,
            (index / BOARD_COLUMNS as usize) as u8,
        )
    }

    /// Shift by (dc, dr), `None` if that leaves the board.
    #[must_use]
    pub fn offset(self, dc: i32, dr: i32) -> Option<Self> {
        Self::try_new(i32::from(self.column) + dc, i32::from(self.row) + dr)
    }

    /// The cell mirrored through `self` from `toward`: `self + (self - toward)`.
    ///
    /// When a card leaves `self` for `toward`, this is the cell whose card
    /// slides into `self`.
    #[must_use]
    pub fn behind(self, toward: Position) -> Option<Self> {
        let dc = i32::from(self.column) - i32::from(toward.column);
        let dr = i32::from(self.row) - i32::from(toward.row);
        self.offset(dc, dr)
    }

    /// Orthogonal neighbours only; diagonals are not adjacent.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        let dc = self.column.abs_diff(other.column);
        let dr = self.row.abs_diff(other.row);
        (dc == 1 && dr == 0) || (dc == 0 && dr == 1)
    }

    /// On-board orthogonal neighbours, row-major.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Self::all().filter(move |p| self.is_adjacent(*p))
    }

    /// Every cell, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLUMNS).map(move |column| Self::new(column, row)))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}
