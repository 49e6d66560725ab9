//! Board cells and block damage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Direction;

/// Number of rows on the board.
pub const MAP_ROWS: i16 = 11;

/// Number of columns on the board.
pub const MAP_COLS: i16 = 11;

/// Template value marking an indestructible block.
pub const INDESTRUCTIBLE: i8 = -1;

/// Starting layout: `0` empty, `-1` indestructible, `n > 0` a block of strength `n`.
pub const STANDARD_TEMPLATE: [[i8; 11]; 11] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0],
    [0, -1, 0, 0, 0, 1, 0, 0, 0, -1, 0],
    [2, 0, 1, 0, -1, 0, -1, 0, 1, 0, 2],
    [0, 0, 0, 0, 2, 0, 2, 0, 0, 0, 0],
    [0, 1, -1, 2, 0, 0, 0, 2, -1, 1, 0],
    [0, 0, 0, 0, 2, 0, 2, 0, 0, 0, 0],
    [2, 0, 1, 0, -1, 0, -1, 0, 1, 0, 2],
    [0, -1, 0, 0, 0, 1, 0, 0, 0, -1, 0],
    [0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// A cell position. Signed so a ray can step one cell past the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: i16,
    /// Column index, 0 at the left.
    pub col: i16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.unit_vector();
        Self::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Strength of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strength {
    /// Destroyed after this many hits. Always positive while on the board.
    Finite(u8),
    /// Never destroyed.
    Indestructible,
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cell {
    /// Open floor.
    Empty,
    /// An obstacle.
    Block(Strength),
}

impl Cell {
    /// Build a cell from a template value.
    ///
    /// Zero is empty, a positive value is a block of that strength and any
    /// negative value is indestructible.
    #[must_use]
    pub fn from_template(value: i8) -> Self {
        match value {
            0 => Cell::Empty,
            n if n < 0 => Cell::Block(Strength::Indestructible),
            n => Cell::Block(Strength::Finite(n.unsigned_abs())),
        }
    }

    /// Check if this cell is a block of any strength.
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Cell::Block(_))
    }
}

/// What a laser did to the block it stopped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Indestructible block; unchanged.
    Blocked,
    /// Strength dropped but the block stands.
    Weakened {
        /// Strength left after the hit.
        remaining: u8,
    },
    /// Strength reached zero; the cell is now empty.
    Destroyed,
}

/// The fixed 11×11 arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Board built from [`STANDARD_TEMPLATE`].
    #[must_use]
    pub fn standard() -> Self {
        Self::from_template(&STANDARD_TEMPLATE)
    }

    /// Board built from an arbitrary 11×11 template.
    #[must_use]
    pub fn from_template(template: &[[i8; 11]; 11]) -> Self {
        let cells = template
            .iter()
            .flat_map(|row| row.iter().map(|&value| Cell::from_template(value)))
            .collect();
        Self { cells }
    }

    /// Board with no blocks at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_template(&[[0; 11]; 11])
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> i16 {
        MAP_ROWS
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> i16 {
        MAP_COLS
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < MAP_ROWS && pos.col >= 0 && pos.col < MAP_COLS
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * MAP_COLS as usize + pos.col as usize)
        } else {
            None
        }
    }

    /// Contents of the cell at `pos`, or `None` off the board.
    ///
    /// Every caller in the engine checks [`Board::in_bounds`] first.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell. Returns `false` if the position is off the board.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Apply one point of laser damage to the block at `pos`.
    ///
    /// Returns `None` if the cell holds no block.
    pub fn apply_damage(&mut self, pos: Position) -> Option<DamageOutcome> {
        let idx = self.index(pos)?;
        match self.cells[idx] {
            Cell::Empty => None,
            Cell::Block(Strength::Indestructible) => Some(DamageOutcome::Blocked),
            Cell::Block(Strength::Finite(strength)) => {
                let remaining = strength.saturating_sub(1);
                if remaining == 0 {
                    self.cells[idx] = Cell::Empty;
                    Some(DamageOutcome::Destroyed)
                } else {
                    self.cells[idx] = Cell::Block(Strength::Finite(remaining));
                    Some(DamageOutcome::Weakened { remaining })
                }
            }
        }
    }

    /// Iterate over all positions and cells in row-major order.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &cell)| {
            let row = (idx / MAP_COLS as usize) as i16;
            let col = (idx % MAP_COLS as usize) as i16;
            (Position::new(row, col), cell)
        })
    }

    /// Count cells that still hold a block.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_block()).count()
    }
}
