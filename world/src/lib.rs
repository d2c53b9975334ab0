#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state management for Labyrinth.
//!
//! [`MazeEngine`] owns a fixed grid of [`Cell`] values in which exactly one
//! cell carries the player. Terrain is fixed when the engine is built; the
//! only mutations are quarter turns and single forward steps, both of which
//! rewrite occupancy alone.

mod layout;
mod render;

use labyrinth_core::{
    Cell, CellCoord, Command, Direction, EngineError, Event, MoveOutcome, PlayerSnapshot, Turn,
};
use log::{debug, trace, warn};

pub use layout::{LayoutError, DEFAULT_LAYOUT};
pub use render::{RenderRow, RenderRows};

/// Represents the authoritative maze and the player walking it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeEngine {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl MazeEngine {
    /// Builds a maze from rows of packed cell values.
    ///
    /// The layout must be a non-empty rectangle of decodable cells holding
    /// the player exactly once.
    pub fn new<R>(layout: &[R]) -> Result<Self, LayoutError>
    where
        R: AsRef<[u32]>,
    {
        let decoded = layout::decode(layout)?;
        debug!(
            "maze built with {} rows and {} columns",
            decoded.rows, decoded.columns
        );
        Ok(Self {
            rows: decoded.rows,
            columns: decoded.columns,
            cells: decoded.cells,
        })
    }

    /// Number of rows and columns, in that order.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Cell stored at the provided coordinate, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.index(coord)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Finds the player's cell and facing.
    ///
    /// Every cell is inspected so that a second occupant is reported as
    /// [`EngineError::CorruptState`] rather than hidden behind the first match.
    pub fn locate_player(&self) -> Result<PlayerSnapshot, EngineError> {
        let mut occupants = self.coords().filter_map(|cell| {
            let direction = self.cell(cell)?.occupant()?;
            Some(PlayerSnapshot { cell, direction })
        });

        let Some(player) = occupants.next() else {
            warn!("no cell holds the player");
            return Err(EngineError::PlayerNotFound);
        };

        let extra: Vec<CellCoord> = occupants.map(|snapshot| snapshot.cell).collect();
        if !extra.is_empty() {
            let mut occupied = Vec::with_capacity(extra.len() + 1);
            occupied.push(player.cell);
            occupied.extend(extra);
            warn!("player found in {} cells: {:?}", occupied.len(), occupied);
            return Err(EngineError::CorruptState { occupied });
        }

        trace!("player at {} facing {}", player.cell, player.direction);
        Ok(player)
    }

    /// Turns the player a quarter turn in place and returns the new facing.
    pub fn rotate(&mut self, turn: Turn) -> Result<Direction, EngineError> {
        let player = self.locate_player()?;
        let to = player.direction.turned(turn);
        self.place(player.cell, Some(to));
        debug!(
            "player at {} turned {:?}: {} -> {}",
            player.cell, turn, player.direction, to
        );
        Ok(to)
    }

    /// Attempts to advance the player one cell in the direction it faces.
    ///
    /// Walls and the grid edge refuse the step without touching the grid.
    pub fn move_forward(&mut self) -> Result<MoveOutcome, EngineError> {
        let player = self.locate_player()?;
        let Some(target) = player
            .cell
            .neighbor(player.direction, self.rows, self.columns)
        else {
            debug!("step {} from {} leaves the maze", player.direction, player.cell);
            return Ok(MoveOutcome::OutOfBounds);
        };

        if !self.cell(target).is_some_and(|cell| cell.is_walkable()) {
            debug!("step {} from {} hits a wall", player.direction, player.cell);
            return Ok(MoveOutcome::Wall);
        }

        self.place(target, Some(player.direction));
        self.place(player.cell, None);
        debug!(
            "player moved {} from {} to {}",
            player.direction, player.cell, target
        );
        Ok(MoveOutcome::Moved(target))
    }

    /// Lazily exposes the packed value of every cell, row by row.
    #[must_use]
    pub fn render(&self) -> RenderRows<'_> {
        RenderRows::new(&self.cells, usize::try_from(self.columns).unwrap_or(0))
    }

    /// Rewrites the occupant of a cell already known to be in bounds and
    /// walkable.
    fn place(&mut self, coord: CellCoord, occupant: Option<Direction>) {
        let slot = self.index(coord).and_then(|index| self.cells.get_mut(index));
        debug_assert!(slot.is_some(), "{coord} lies outside the maze");
        if let Some(slot) = slot {
            let placed = slot.set_occupant(occupant);
            debug_assert!(placed.is_ok(), "{coord} cannot hold the player");
        }
    }

    fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.row() < self.rows && cell.column() < self.columns {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl Default for MazeEngine {
    fn default() -> Self {
        Self {
            rows: layout::DEFAULT_ROWS,
            columns: layout::DEFAULT_COLUMNS,
            cells: layout::DEFAULT_CELLS.iter().flatten().copied().collect(),
        }
    }
}

/// Applies the provided command to the maze and broadcasts its effect.
///
/// Engine faults are returned without pushing any event.
pub fn apply(
    engine: &mut MazeEngine,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    match command {
        Command::Rotate { turn } => {
            let from = engine.locate_player()?;
            let to = engine.rotate(turn)?;
            out_events.push(Event::PlayerRotated {
                cell: from.cell,
                from: from.direction,
                to,
            });
        }
        Command::MoveForward => {
            let player = engine.locate_player()?;
            let event = match engine.move_forward()?.destination() {
                Ok(to) => Event::PlayerMoved {
                    from: player.cell,
                    to,
                    direction: player.direction,
                },
                Err(reason) => Event::MoveRejected {
                    cell: player.cell,
                    direction: player.direction,
                    reason,
                },
            };
            out_events.push(event);
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use labyrinth_core::{EngineError, PlayerSnapshot};

    use super::{MazeEngine, RenderRows};

    /// Captures the player's cell and facing.
    pub fn player(engine: &MazeEngine) -> Result<PlayerSnapshot, EngineError> {
        engine.locate_player()
    }

    /// Exposes the packed grid for presentation.
    #[must_use]
    pub fn render(engine: &MazeEngine) -> RenderRows<'_> {
        engine.render()
    }

    /// Provides the number of rows and columns of the grid.
    #[must_use]
    pub fn dimensions(engine: &MazeEngine) -> (u32, u32) {
        engine.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_core::MoveBlocked;

    fn engine_with(rows: u32, columns: u32, cells: Vec<Cell>) -> MazeEngine {
        MazeEngine {
            rows,
            columns,
            cells,
        }
    }

    #[test]
    fn locate_reports_missing_player() {
        let mut engine = engine_with(1, 3, vec![Cell::OPEN, Cell::WALL, Cell::OPEN]);

        assert_eq!(engine.locate_player(), Err(EngineError::PlayerNotFound));
        assert_eq!(engine.rotate(Turn::Left), Err(EngineError::PlayerNotFound));
        assert_eq!(engine.move_forward(), Err(EngineError::PlayerNotFound));
    }

    #[test]
    fn locate_rejects_second_occupant() {
        let mut engine = engine_with(
            2,
            2,
            vec![
                Cell::with_player(Direction::North),
                Cell::OPEN,
                Cell::WALL,
                Cell::with_player(Direction::West),
            ],
        );
        let before = engine.clone();
        let expected = EngineError::CorruptState {
            occupied: vec![CellCoord::new(0, 0), CellCoord::new(1, 1)],
        };

        assert_eq!(engine.locate_player(), Err(expected.clone()));
        assert_eq!(engine.rotate(Turn::Right), Err(expected.clone()));
        assert_eq!(engine.move_forward(), Err(expected));
        assert_eq!(engine, before, "faults must not mutate the grid");
    }

    #[test]
    fn apply_pushes_no_event_on_fault() {
        let mut engine = engine_with(1, 1, vec![Cell::OPEN]);
        let mut events = Vec::new();

        let result = apply(&mut engine, Command::MoveForward, &mut events);

        assert_eq!(result, Err(EngineError::PlayerNotFound));
        assert!(events.is_empty());
    }

    #[test]
    fn apply_broadcasts_rotation() {
        let mut engine = MazeEngine::default();
        let mut events = Vec::new();

        apply(
            &mut engine,
            Command::Rotate { turn: Turn::Left },
            &mut events,
        )
        .expect("rotation succeeds");

        assert_eq!(
            events,
            vec![Event::PlayerRotated {
                cell: CellCoord::new(0, 3),
                from: Direction::South,
                to: Direction::East,
            }]
        );
    }

    #[test]
    fn apply_broadcasts_refused_step() {
        let mut engine = MazeEngine::new(&[[3_u32, 1]]).expect("valid layout");
        let mut events = Vec::new();

        apply(&mut engine, Command::MoveForward, &mut events).expect("step resolves");

        assert_eq!(
            events,
            vec![Event::MoveRejected {
                cell: CellCoord::new(0, 0),
                direction: Direction::North,
                reason: MoveBlocked::OutOfBounds,
            }]
        );
    }

    #[test]
    fn apply_broadcasts_step() {
        let mut engine = MazeEngine::default();
        let mut events = Vec::new();

        apply(&mut engine, Command::MoveForward, &mut events).expect("step resolves");

        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: CellCoord::new(0, 3),
                to: CellCoord::new(1, 3),
                direction: Direction::South,
            }]
        );
    }

    #[test]
    fn default_matches_literal_layout() {
        let decoded = MazeEngine::new(&DEFAULT_LAYOUT).expect("default layout is valid");

        assert_eq!(MazeEngine::default(), decoded);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "lies outside the maze")]
    fn place_outside_the_grid_panics_in_debug() {
        let mut engine = MazeEngine::default();
        engine.place(CellCoord::new(9, 9), Some(Direction::North));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "cannot hold the player")]
    fn place_on_wall_panics_in_debug() {
        let mut engine = MazeEngine::default();
        engine.place(CellCoord::new(0, 0), Some(Direction::North));
    }

    #[test]
    fn render_restarts_from_clone() {
        let engine = MazeEngine::default();
        let rows = engine.render();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows.clone().into_packed(), rows.into_packed());
    }
}
