#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure interpreter system that maps free-form player messages to requests.

use labyrinth_core::{Command, Turn};
use log::trace;

/// Action a player message asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    /// Present the packed grid.
    ShowMap,
    /// Report the player's cell and facing.
    Locate,
    /// Turn the player a quarter turn.
    Turn(Turn),
    /// Step the player forward.
    Forward,
}

impl Request {
    /// Maze command that carries out the request, if it mutates the maze.
    #[must_use]
    pub const fn command(self) -> Option<Command> {
        match self {
            Self::Turn(turn) => Some(Command::Rotate { turn }),
            Self::Forward => Some(Command::MoveForward),
            Self::ShowMap | Self::Locate => None,
        }
    }
}

/// Keywords in priority order; the first entry with a match wins.
const KEYWORDS: [(Request, &[&str]); 5] = [
    (Request::ShowMap, &["map", "mapa"]),
    (Request::Turn(Turn::Right), &["right", "direita"]),
    (Request::Turn(Turn::Left), &["left", "esquerda"]),
    (Request::Forward, &["forward", "frente"]),
    (Request::Locate, &["direction", "sentido", "me", "eu"]),
];

/// Matches case-insensitive keywords anywhere in a message.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    /// Creates a new interpreter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves the request carried by a message, if any keyword appears.
    #[must_use]
    pub fn interpret(&self, message: &str) -> Option<Request> {
        let lowered = message.to_lowercase();
        let request = KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|word| lowered.contains(word)))
            .map(|(request, _)| *request);
        trace!("message {message:?} resolved to {request:?}");
        request
    }
}
