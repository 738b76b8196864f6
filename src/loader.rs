//! Level loading and layout validation.
//!
//! This module turns symbolic layouts into fresh engine states. Every layout is scanned cell by
//! cell in row-major order; any structural problem is reported as a [`LoadError`] and no state is
//! produced, so the engine never enters play with an invalid level.

use log::{debug, info};
use thiserror::Error;

use crate::{
    engine::LevelState,
    grid::{Grid, Position},
    layout::{LevelLayout, Symbol},
};

/// Structural problems found while loading a level layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The pack contains no layouts at all.
    #[error("the level pack contains no levels")]
    NoLevels,
    /// The requested level index is past the end of the pack.
    #[error("level {index} does not exist, the pack has {count} levels")]
    LevelOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of levels in the pack.
        count: usize,
    },
    /// The layout does not have as many rows as the grid.
    #[error("layout has {found} rows but the grid expects {expected}")]
    RowCount {
        /// Rows required by the grid.
        expected: usize,
        /// Rows present in the layout.
        found: usize,
    },
    /// A layout row does not have as many cells as the grid has columns.
    #[error("layout row {row} has {found} cells but the grid expects {expected}")]
    RowWidth {
        /// Offending row.
        row: usize,
        /// Columns required by the grid.
        expected: usize,
        /// Cells present in the row.
        found: usize,
    },
    /// A cell holds a character outside the layout vocabulary.
    #[error("unknown symbol {symbol:?} at {position}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Where it was found.
        position: Position,
    },
    /// No agent-start symbol was found.
    #[error("layout has no agent start")]
    MissingAgent,
    /// No target symbol was found.
    #[error("layout has no target")]
    MissingTarget,
    /// No movable-start symbol was found.
    #[error("layout has no movable blocks")]
    MissingMovables,
    /// More than one agent-start symbol was found.
    #[error("layout has a second agent start at {second}, the first is at {first}")]
    MultipleAgents {
        /// First agent start in row-major order.
        first: Position,
        /// The duplicate.
        second: Position,
    },
    /// More than one target symbol was found.
    #[error("layout has a second target at {second}, the first is at {first}")]
    MultipleTargets {
        /// First target in row-major order.
        first: Position,
        /// The duplicate.
        second: Position,
    },
}

/// Builds engine states from an ordered list of layouts on a fixed grid.
#[derive(Clone, Debug)]
pub struct LevelLoader {
    /// Grid every layout must match.
    grid: Grid,
    /// Layouts in play order.
    layouts: Vec<LevelLayout>,
}

impl LevelLoader {
    /// Creates a loader over the given layouts.
    #[must_use]
    pub const fn new(grid: Grid, layouts: Vec<LevelLayout>) -> Self {
        Self { grid, layouts }
    }

    /// Returns the grid layouts are checked against.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Returns the number of levels available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Checks whether the loader has no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Loads the level at `index` into a fresh state.
    ///
    /// The returned state has the agent, movables, immovables and target at their layout positions
    /// and is not satisfied.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the index is out of range or the layout is structurally invalid.
    pub fn load(&self, index: usize) -> Result<LevelState, LoadError> {
        if self.layouts.is_empty() {
            return Err(LoadError::NoLevels);
        }
        let layout = self.layouts.get(index).ok_or(LoadError::LevelOutOfRange {
            index,
            count: self.layouts.len(),
        })?;

        let state = self.scan(layout)?;
        info!(
            "loaded level {} of {} with {} movables and {} immovables",
            index + 1,
            self.layouts.len(),
            state.movables.len(),
            state.immovables.len()
        );

        Ok(state)
    }

    /// Checks that every level in the loader can be loaded.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] encountered, in play order.
    pub fn validate_all(&self) -> Result<(), LoadError> {
        if self.layouts.is_empty() {
            return Err(LoadError::NoLevels);
        }
        for layout in &self.layouts {
            let _ = self.scan(layout)?;
        }

        Ok(())
    }

    /// Scans a layout and accumulates the entity placements it describes.
    fn scan(&self, layout: &LevelLayout) -> Result<LevelState, LoadError> {
        self.check_dimensions(layout)?;

        let mut agent = None;
        let mut target = None;
        let mut movables = Vec::new();
        let mut immovables = Vec::new();

        for (position, symbol) in layout.cells() {
            match Symbol::from_char(symbol).ok_or(LoadError::UnknownSymbol { symbol, position })? {
                Symbol::Empty => {}
                Symbol::AgentStart => {
                    if let Some(first) = agent {
                        return Err(LoadError::MultipleAgents {
                            first,
                            second: position,
                        });
                    }
                    agent = Some(position);
                }
                Symbol::Target => {
                    if let Some(first) = target {
                        return Err(LoadError::MultipleTargets {
                            first,
                            second: position,
                        });
                    }
                    target = Some(position);
                }
                Symbol::MovableStart => movables.push(position),
                Symbol::Immovable => immovables.push(position),
            }
        }

        let agent = agent.ok_or(LoadError::MissingAgent)?;
        let target = target.ok_or(LoadError::MissingTarget)?;
        if movables.is_empty() {
            return Err(LoadError::MissingMovables);
        }
        debug!("agent starts at {agent}, target at {target}");

        Ok(LevelState::new(agent, movables, immovables, target))
    }

    /// Checks that the layout has exactly the grid's dimensions.
    fn check_dimensions(&self, layout: &LevelLayout) -> Result<(), LoadError> {
        let rows = layout.rows();
        if rows.len() != self.grid.rows {
            return Err(LoadError::RowCount {
                expected: self.grid.rows,
                found: rows.len(),
            });
        }
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != self.grid.columns {
                return Err(LoadError::RowWidth {
                    row,
                    expected: self.grid.columns,
                    found,
                });
            }
        }

        Ok(())
    }
}
