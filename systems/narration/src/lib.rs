#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure narration system that phrases maze events as player-facing replies.

use labyrinth_core::{EngineError, Event, MoveBlocked, PlayerSnapshot};

/// Translates events and query results into reply lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Narrator;

impl Narrator {
    /// Creates a new narrator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends one reply line per event.
    pub fn handle(&self, events: &[Event], out: &mut Vec<String>) {
        for event in events {
            let line = match event {
                Event::PlayerRotated { to, .. } => format!("New direction: {to}"),
                Event::PlayerMoved { .. } => "One step forward".to_owned(),
                Event::MoveRejected {
                    reason: MoveBlocked::Wall,
                    ..
                } => "Wall".to_owned(),
                Event::MoveRejected {
                    reason: MoveBlocked::OutOfBounds,
                    ..
                } => "Out of the map".to_owned(),
            };
            out.push(line);
        }
    }

    /// Describes where the player stands and which way it faces.
    pub fn position(&self, player: &PlayerSnapshot, out: &mut Vec<String>) {
        out.push(format!("Position on map: {}", player.cell));
        out.push(format!("Direction (cardinal point): {}", player.direction));
    }

    /// Lists every row of packed values, separated by single spaces.
    pub fn map<I, R>(&self, rows: I, out: &mut Vec<String>)
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = u32>,
    {
        for row in rows {
            let line = row
                .into_iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            out.push(line);
        }
    }

    /// Reports an engine fault to the player.
    pub fn error(&self, error: &EngineError, out: &mut Vec<String>) {
        out.push(format!("The maze is broken: {error}"));
    }
}
