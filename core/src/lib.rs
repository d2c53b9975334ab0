#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Labyrinth engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative maze, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the maze executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems
//! translate into replies. Cells are modelled as tagged values in memory and
//! only collapse into the packed integer form through [`Cell::packed`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Packed bit flagging a cell as walkable terrain.
pub const TERRAIN_BIT: u32 = 0b0_0001;

/// Mask covering every bit the packed encoding assigns a meaning to.
const KNOWN_BITS: u32 = 0b1_1111;

/// Mask covering the one-hot player-direction field.
const DIRECTION_BITS: u32 = 0b1_1110;

/// Commands that express all permissible maze mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Rotates the player in place by a quarter turn.
    Rotate {
        /// Side the player turns towards.
        turn: Turn,
    },
    /// Advances the player one cell in the direction it faces.
    MoveForward,
}

/// Events broadcast by the maze after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player changed facing without leaving its cell.
    PlayerRotated {
        /// Cell the player occupies.
        cell: CellCoord,
        /// Facing before the rotation.
        from: Direction,
        /// Facing after the rotation.
        to: Direction,
    },
    /// Confirms that the player stepped between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
        /// Facing carried through the move.
        direction: Direction,
    },
    /// Reports that a forward step was refused and nothing changed.
    MoveRejected {
        /// Cell the player still occupies.
        cell: CellCoord,
        /// Facing of the refused step.
        direction: Direction,
        /// Specific reason the step was refused.
        reason: MoveBlocked,
    },
}

/// Cardinal facings available to the player.
///
/// Directions are ordered clockwise: North, East, South, West.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Facing toward decreasing row indices.
    North,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward increasing row indices.
    South,
    /// Facing toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting at North.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Value of the one-hot bit that encodes this facing in a packed cell.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::North => 0b0_0010,
            Self::South => 0b0_0100,
            Self::West => 0b0_1000,
            Self::East => 0b1_0000,
        }
    }

    /// Decodes a packed direction field holding exactly one bit.
    #[must_use]
    pub const fn from_bit(bit: u32) -> Option<Self> {
        match bit {
            0b0_0010 => Some(Self::North),
            0b0_0100 => Some(Self::South),
            0b0_1000 => Some(Self::West),
            0b1_0000 => Some(Self::East),
            _ => None,
        }
    }

    /// Facing reached after a quarter turn to the provided side.
    #[must_use]
    pub const fn turned(self, turn: Turn) -> Self {
        let index = self.clockwise_index();
        let next = match turn {
            Turn::Right => (index + 1) % 4,
            Turn::Left => (index + 3) % 4,
        };
        Self::ALL[next]
    }

    /// Compass letter used when presenting the facing to players.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    const fn clockwise_index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Side of a quarter turn, relative to the player's own facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

impl Turn {
    /// Both turning sides.
    pub const ALL: [Turn; 2] = [Self::Left, Self::Right];

    /// Side that undoes this turn.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Neighbouring cell one unit step away in the provided direction.
    ///
    /// Returns `None` when the step would leave a grid of `rows` by
    /// `columns` cells. There is no wrap-around.
    #[must_use]
    pub fn neighbor(self, direction: Direction, rows: u32, columns: u32) -> Option<CellCoord> {
        let (row, column) = match direction {
            Direction::North => (self.row.checked_sub(1)?, self.column),
            Direction::South => (self.row.checked_add(1)?, self.column),
            Direction::West => (self.row, self.column.checked_sub(1)?),
            Direction::East => (self.row, self.column.checked_add(1)?),
        };

        if row < rows && column < columns {
            Some(CellCoord::new(row, column))
        } else {
            None
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.column)
    }
}

/// Terrain and occupancy of a single grid cell.
///
/// A wall never holds the player; every constructor and mutator upholds
/// that rule so the packed form produced by [`Cell::packed`] is always
/// decodable by [`Cell::from_packed`].
///
/// Serialized cells travel in their packed form and are validated on the
/// way back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Cell {
    walkable: bool,
    occupant: Option<Direction>,
}

impl Cell {
    /// Impassable terrain.
    pub const WALL: Cell = Cell {
        walkable: false,
        occupant: None,
    };

    /// Empty room or corridor.
    pub const OPEN: Cell = Cell {
        walkable: true,
        occupant: None,
    };

    /// Walkable cell holding the player with the provided facing.
    #[must_use]
    pub const fn with_player(direction: Direction) -> Self {
        Self {
            walkable: true,
            occupant: Some(direction),
        }
    }

    /// Decodes a packed cell value.
    pub fn from_packed(value: u32) -> Result<Self, EncodingError> {
        if value & !KNOWN_BITS != 0 {
            return Err(EncodingError::UnknownBits { value });
        }

        let walkable = value & TERRAIN_BIT != 0;
        let field = value & DIRECTION_BITS;
        if field == 0 {
            return Ok(Self {
                walkable,
                occupant: None,
            });
        }

        let direction =
            Direction::from_bit(field).ok_or(EncodingError::MultipleDirections { value })?;
        if !walkable {
            return Err(EncodingError::PlayerInWall { value });
        }

        Ok(Self::with_player(direction))
    }

    /// Packed integer form: terrain bit plus the occupant's direction bit.
    #[must_use]
    pub const fn packed(&self) -> u32 {
        let terrain = if self.walkable { TERRAIN_BIT } else { 0 };
        match self.occupant {
            Some(direction) => terrain + direction.bit(),
            None => terrain,
        }
    }

    /// Reports whether the player may stand on this cell.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Facing of the player occupying this cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<Direction> {
        self.occupant
    }

    /// Replaces the occupant, leaving terrain untouched.
    ///
    /// Placing the player on a wall is refused and leaves the cell unchanged.
    pub fn set_occupant(&mut self, occupant: Option<Direction>) -> Result<(), EncodingError> {
        if occupant.is_some() && !self.walkable {
            let value = occupant.map_or(0, Direction::bit);
            return Err(EncodingError::PlayerInWall { value });
        }
        self.occupant = occupant;
        Ok(())
    }
}

impl TryFrom<u32> for Cell {
    type Error = EncodingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_packed(value)
    }
}

impl From<Cell> for u32 {
    fn from(cell: Cell) -> Self {
        cell.packed()
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Cell currently occupied by the player.
    pub cell: CellCoord,
    /// Facing of the player.
    pub direction: Direction,
}

/// Result of a forward step attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player advanced into the contained cell.
    Moved(CellCoord),
    /// The cell ahead is a wall.
    Wall,
    /// The cell ahead lies outside the grid.
    OutOfBounds,
}

impl MoveOutcome {
    /// Cell the player reached, or the reason the step was refused.
    pub const fn destination(&self) -> Result<CellCoord, MoveBlocked> {
        match *self {
            Self::Moved(to) => Ok(to),
            Self::Wall => Err(MoveBlocked::Wall),
            Self::OutOfBounds => Err(MoveBlocked::OutOfBounds),
        }
    }
}

/// Reasons a forward step may be refused by the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveBlocked {
    /// The target lies beyond the grid edge.
    OutOfBounds,
    /// The target cell is not walkable.
    Wall,
}

/// Faults raised when the maze no longer satisfies its occupancy invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No cell holds the player.
    #[error("no cell holds the player")]
    PlayerNotFound,
    /// More than one cell holds the player.
    #[error("player found in {} cells", .occupied.len())]
    CorruptState {
        /// Every cell that carries a player, in row-major order.
        occupied: Vec<CellCoord>,
    },
}

/// Reasons a packed cell value cannot be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum EncodingError {
    /// Bits above the direction field are set.
    #[error("cell value {value} sets bits outside the cell encoding")]
    UnknownBits {
        /// Offending packed value.
        value: u32,
    },
    /// More than one direction bit is set.
    #[error("cell value {value} sets more than one direction bit")]
    MultipleDirections {
        /// Offending packed value.
        value: u32,
    },
    /// The player sits on a wall.
    #[error("cell value {value} places the player inside a wall")]
    PlayerInWall {
        /// Offending packed value.
        value: u32,
    },
}
