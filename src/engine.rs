//! Puzzle rules and level progression.
//!
//! The engine owns the active level state and is the only place where entity positions change.
//! Every command is synchronous and atomic: a move either commits a full walk or push, or leaves the
//! state untouched. Rejected moves are reported through [`MoveOutcome`] and are never errors.

use log::{debug, info};

use crate::{
    grid::{Direction, Grid, Position},
    loader::{LevelLoader, LoadError},
};

/// Kinds of entity that occupy grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player-controlled entity.
    Agent,
    /// A block that moves only when pushed.
    Movable,
    /// A wall that never moves.
    Immovable,
}

/// An entity record: a kind tag and the cell it occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entity {
    /// What the entity is.
    pub kind: EntityKind,
    /// Where it currently is.
    pub position: Position,
}

/// Result of a single movement command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The agent stepped into an empty cell.
    Walked,
    /// The agent pushed a movable one cell and stepped into its former cell.
    Pushed,
    /// The move was rejected by the grid edge, a wall, or a blocked push.
    Blocked,
    /// The move was ignored because the level is already satisfied.
    Frozen,
}

impl MoveOutcome {
    /// Checks whether the command changed the state.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        matches!(self, Self::Walked | Self::Pushed)
    }
}

/// Result of asking the engine for the next level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The next level is now active.
    LevelLoaded,
    /// There is no next level; the state was left as it was.
    GameComplete,
}

/// Entity placements and derived flags of the active level.
///
/// Values of this type are only produced by the loader, so they always start from a validated
/// layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelState {
    /// Agent position.
    pub(crate) agent: Position,
    /// Movable positions, in layout order.
    pub(crate) movables: Vec<Position>,
    /// Immovable positions, fixed after load.
    pub(crate) immovables: Vec<Position>,
    /// Target position.
    pub(crate) target: Position,
    /// Whether a movable currently covers the target.
    pub(crate) satisfied: bool,
    /// Committed moves since the level was loaded.
    pub(crate) moves: u32,
    /// Committed pushes since the level was loaded.
    pub(crate) pushes: u32,
}

impl LevelState {
    /// Builds a fresh, unsatisfied state.
    pub(crate) const fn new(
        agent: Position,
        movables: Vec<Position>,
        immovables: Vec<Position>,
        target: Position,
    ) -> Self {
        Self {
            agent,
            movables,
            immovables,
            target,
            satisfied: false,
            moves: 0,
            pushes: 0,
        }
    }

    /// Checks whether a wall occupies `position`.
    fn is_immovable(&self, position: Position) -> bool {
        self.immovables.contains(&position)
    }

    /// Returns the index of the movable at `position`, if any.
    fn movable_at(&self, position: Position) -> Option<usize> {
        self.movables
            .iter()
            .position(|&movable| movable == position)
    }

    /// Recomputes the satisfied flag from the current movable positions.
    fn refresh_satisfied(&mut self) {
        self.satisfied = self.movables.contains(&self.target);
    }
}

/// Rule enforcement and win detection for the currently loaded level.
#[derive(Clone, Debug)]
pub struct Engine {
    /// Source of level states.
    loader: LevelLoader,
    /// Index of the active level.
    level_index: usize,
    /// The active level.
    state: LevelState,
}

impl Engine {
    /// Creates an engine with the first level of `loader` active.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the loader has no levels or the first layout is invalid.
    pub fn new(loader: LevelLoader) -> Result<Self, LoadError> {
        let state = loader.load(0)?;

        Ok(Self {
            loader,
            level_index: 0,
            state,
        })
    }

    /// Attempts to move the agent one cell in `direction`, pushing a movable if one is in the way.
    ///
    /// The move is rejected when the destination is off the grid or a wall, or when a pushed
    /// movable would leave the grid or land on a wall or another movable. Once the level is
    /// satisfied every move is ignored until [`Engine::reset`] or [`Engine::advance`].
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.state.satisfied {
            return MoveOutcome::Frozen;
        }

        let grid = self.loader.grid();
        let Some(next) = grid.step(self.state.agent, direction) else {
            return MoveOutcome::Blocked;
        };
        if self.state.is_immovable(next) {
            return MoveOutcome::Blocked;
        }

        let Some(pushed) = self.state.movable_at(next) else {
            self.state.agent = next;
            self.state.moves += 1;
            debug!("agent walked {direction:?} to {next}");
            return MoveOutcome::Walked;
        };

        let Some(beyond) = grid.step(next, direction) else {
            return MoveOutcome::Blocked;
        };
        let obstructed = self.state.is_immovable(beyond)
            || self
                .state
                .movables
                .iter()
                .enumerate()
                .any(|(index, &other)| index != pushed && other == beyond);
        if obstructed {
            return MoveOutcome::Blocked;
        }

        let Some(movable) = self.state.movables.get_mut(pushed) else {
            return MoveOutcome::Blocked;
        };
        *movable = beyond;
        self.state.agent = next;
        self.state.moves += 1;
        self.state.pushes += 1;
        self.state.refresh_satisfied();
        debug!("agent pushed {direction:?} from {next} to {beyond}");
        if self.state.satisfied {
            info!("level {} satisfied", self.level_index + 1);
        }

        MoveOutcome::Pushed
    }

    /// Reloads the current level, discarding every move made on it.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the current layout can no longer be loaded.
    pub fn reset(&mut self) -> Result<(), LoadError> {
        self.state = self.loader.load(self.level_index)?;
        info!("level {} reset", self.level_index + 1);

        Ok(())
    }

    /// Loads the level after the current one.
    ///
    /// Calling this without the level being satisfied is allowed and skips the level. Past the last
    /// level the state is left untouched and [`AdvanceOutcome::GameComplete`] is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the next layout is invalid; the current level stays active.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, LoadError> {
        let next = self.level_index + 1;
        if next >= self.loader.len() {
            info!("no level after {}, game complete", self.level_index + 1);
            return Ok(AdvanceOutcome::GameComplete);
        }

        self.state = self.loader.load(next)?;
        self.level_index = next;

        Ok(AdvanceOutcome::LevelLoaded)
    }

    /// Returns the agent position.
    #[must_use]
    pub const fn agent(&self) -> Position {
        self.state.agent
    }

    /// Returns the movable positions in stable order.
    #[must_use]
    pub fn movables(&self) -> &[Position] {
        &self.state.movables
    }

    /// Returns the immovable positions.
    #[must_use]
    pub fn immovables(&self) -> &[Position] {
        &self.state.immovables
    }

    /// Returns the target position.
    #[must_use]
    pub const fn target(&self) -> Position {
        self.state.target
    }

    /// Checks whether a movable covers the target.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.state.satisfied
    }

    /// Returns the zero-based index of the active level.
    #[must_use]
    pub const fn level_index(&self) -> usize {
        self.level_index
    }

    /// Returns the number of levels available.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.loader.len()
    }

    /// Returns the grid of the active level.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.loader.grid()
    }

    /// Returns the committed moves on the active level.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.state.moves
    }

    /// Returns the committed pushes on the active level.
    #[must_use]
    pub const fn pushes(&self) -> u32 {
        self.state.pushes
    }

    /// Returns what occupies `position`, if anything.
    #[must_use]
    pub fn entity_at(&self, position: Position) -> Option<EntityKind> {
        if self.state.agent == position {
            Some(EntityKind::Agent)
        } else if self.state.movable_at(position).is_some() {
            Some(EntityKind::Movable)
        } else if self.state.is_immovable(position) {
            Some(EntityKind::Immovable)
        } else {
            None
        }
    }

    /// Returns every entity of the active level as kind-tagged records.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        let agent = Entity {
            kind: EntityKind::Agent,
            position: self.state.agent,
        };
        let movables = self.state.movables.iter().map(|&position| Entity {
            kind: EntityKind::Movable,
            position,
        });
        let immovables = self.state.immovables.iter().map(|&position| Entity {
            kind: EntityKind::Immovable,
            position,
        });

        std::iter::once(agent).chain(movables).chain(immovables).collect()
    }
}
