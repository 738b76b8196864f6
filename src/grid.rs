//! Grid geometry shared by the loader and the engine.
//!
//! This module contains the coordinate type, the four movement directions and the fixed-size grid
//! that bounds every position in a loaded level.

use std::fmt;

/// Cell coordinate on the puzzle grid.
///
/// Columns grow to the right and rows grow downwards, so `(0, 0)` is the top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index, counted from the left edge.
    pub col: usize,
    /// Row index, counted from the top edge.
    pub row: usize,
}

impl Position {
    /// Builds a position from a column and a row.
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.col, self.row)
    }
}

/// Unit movement directions accepted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// Every direction, in the order the input layer lists them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(dx, dy)` unit delta of the direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Fixed dimensions of a loaded level.
///
/// The grid never changes while a level is active. Valid positions are those in
/// `[0, columns) × [0, rows)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

impl Grid {
    /// Builds a grid with the given dimensions.
    #[must_use]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Checks whether a position lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.col < self.columns && position.row < self.rows
    }

    /// Returns the neighbour of `position` in `direction`, or [`None`] if it falls off the grid.
    #[must_use]
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let col = position.col.checked_add_signed(dx)?;
        let row = position.row.checked_add_signed(dy)?;
        let next = Position::new(col, row);

        self.contains(next).then_some(next)
    }
}

/// Column count of the reference level set.
pub const DEFAULT_COLUMNS: usize = 10;

/// Row count of the reference level set.
pub const DEFAULT_ROWS: usize = 10;
