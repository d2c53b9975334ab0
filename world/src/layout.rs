//! Validation of literal maze layouts supplied at construction.

use labyrinth_core::{Cell, CellCoord, Direction, EncodingError};
use thiserror::Error;

/// Canonical starting maze: a South-facing player at row 0, column 3.
pub const DEFAULT_LAYOUT: [[u32; 5]; 5] = [
    [0, 0, 0, 5, 0],
    [0, 0, 0, 1, 0],
    [0, 0, 1, 1, 0],
    [0, 0, 1, 1, 1],
    [0, 0, 0, 0, 0],
];

pub(crate) const DEFAULT_ROWS: u32 = 5;
pub(crate) const DEFAULT_COLUMNS: u32 = 5;

const W: Cell = Cell::WALL;
const O: Cell = Cell::OPEN;
const P: Cell = Cell::with_player(Direction::South);

/// [`DEFAULT_LAYOUT`] in decoded form.
pub(crate) const DEFAULT_CELLS: [[Cell; 5]; 5] = [
    [W, W, W, P, W],
    [W, W, W, O, W],
    [W, W, O, O, W],
    [W, W, O, O, O],
    [W, W, W, W, W],
];

/// Reasons a literal layout cannot seed a maze.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout has no rows or its first row has no cells.
    #[error("layout contains no cells")]
    Empty,
    /// The layout is too large to address with 32-bit coordinates.
    #[error("layout exceeds the addressable grid size")]
    TooLarge,
    /// A row length differs from the first row.
    #[error("row {row} holds {found} cells but {expected} were expected")]
    Ragged {
        /// Index of the offending row.
        row: u32,
        /// Length of the first row.
        expected: u32,
        /// Length of the offending row.
        found: u32,
    },
    /// A cell value could not be decoded.
    #[error("cell {cell} is invalid: {source}")]
    Encoding {
        /// Location of the offending cell.
        cell: CellCoord,
        /// Decoding failure for the cell value.
        #[source]
        source: EncodingError,
    },
    /// No cell holds the player.
    #[error("layout does not place the player")]
    MissingPlayer,
    /// More than one cell holds the player.
    #[error("layout places the player in {} cells", .occupied.len())]
    MultiplePlayers {
        /// Every cell that carries a player, in row-major order.
        occupied: Vec<CellCoord>,
    },
}

/// Dense row-major cells decoded from a validated layout.
#[derive(Debug)]
pub(crate) struct DecodedLayout {
    pub(crate) rows: u32,
    pub(crate) columns: u32,
    pub(crate) cells: Vec<Cell>,
}

pub(crate) fn decode<R>(layout: &[R]) -> Result<DecodedLayout, LayoutError>
where
    R: AsRef<[u32]>,
{
    let first = layout.first().ok_or(LayoutError::Empty)?;
    let width = first.as_ref().len();
    if width == 0 {
        return Err(LayoutError::Empty);
    }

    let rows = u32::try_from(layout.len()).map_err(|_| LayoutError::TooLarge)?;
    let columns = u32::try_from(width).map_err(|_| LayoutError::TooLarge)?;
    let capacity = layout
        .len()
        .checked_mul(width)
        .ok_or(LayoutError::TooLarge)?;

    let mut cells = Vec::with_capacity(capacity);
    let mut occupied = Vec::new();

    for (row, values) in (0..rows).zip(layout) {
        let values = values.as_ref();
        if values.len() != width {
            return Err(LayoutError::Ragged {
                row,
                expected: columns,
                found: u32::try_from(values.len()).unwrap_or(u32::MAX),
            });
        }

        for (column, &value) in (0..columns).zip(values) {
            let coord = CellCoord::new(row, column);
            let cell = Cell::from_packed(value).map_err(|source| LayoutError::Encoding {
                cell: coord,
                source,
            })?;
            if cell.occupant().is_some() {
                occupied.push(coord);
            }
            cells.push(cell);
        }
    }

    match occupied.len() {
        0 => Err(LayoutError::MissingPlayer),
        1 => Ok(DecodedLayout {
            rows,
            columns,
            cells,
        }),
        _ => Err(LayoutError::MultiplePlayers { occupied }),
    }
}
