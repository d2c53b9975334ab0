use labyrinth_core::{Cell, CellCoord, Command, Turn};
use labyrinth_world::{apply, MazeEngine};
use proptest::prelude::*;

const LAYOUT: [[u32; 6]; 5] = [
    [0, 1, 1, 1, 0, 1],
    [1, 1, 0, 1, 1, 1],
    [1, 0, 0, 3, 0, 1],
    [1, 1, 1, 1, 0, 0],
    [0, 0, 1, 1, 1, 1],
];

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveForward),
        Just(Command::Rotate { turn: Turn::Left }),
        Just(Command::Rotate { turn: Turn::Right }),
    ]
}

fn terrain(engine: &MazeEngine) -> Vec<bool> {
    let (rows, columns) = engine.dimensions();
    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| CellCoord::new(row, column)))
        .map(|coord| engine.cell(coord).is_some_and(|cell| cell.is_walkable()))
        .collect()
}

fn occupied_cells(engine: &MazeEngine) -> usize {
    engine
        .render()
        .flatten()
        .filter(|value| Cell::from_packed(*value).is_ok_and(|cell| cell.occupant().is_some()))
        .count()
}

proptest! {
    #[test]
    fn command_sequences_preserve_invariants(
        commands in proptest::collection::vec(command_strategy(), 0..64)
    ) {
        let mut engine = MazeEngine::new(&LAYOUT).expect("valid layout");
        let initial_terrain = terrain(&engine);
        let mut events = Vec::new();

        for command in commands {
            let before = engine.locate_player().expect("player present");
            apply(&mut engine, command, &mut events).expect("command applies");
            let after = engine.locate_player().expect("player present");

            prop_assert_eq!(occupied_cells(&engine), 1);
            prop_assert_eq!(&terrain(&engine), &initial_terrain);
            prop_assert!(engine.cell(after.cell).is_some_and(|cell| cell.is_walkable()));

            if command == Command::MoveForward {
                prop_assert_eq!(after.direction, before.direction);
            } else {
                prop_assert_eq!(after.cell, before.cell);
            }
        }
    }
}
