//! Message-in, replies-out loop over a single maze.

use labyrinth_core::{EngineError, Event};
use labyrinth_system_interpreter::{Interpreter, Request};
use labyrinth_system_narration::Narrator;
use labyrinth_world::{self as world, query, MazeEngine};
use log::{debug, error};

/// Couples a maze with the systems that read and answer player messages.
#[derive(Debug)]
pub(crate) struct Session {
    engine: MazeEngine,
    interpreter: Interpreter,
    narrator: Narrator,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(engine: MazeEngine) -> Self {
        Self {
            engine,
            interpreter: Interpreter::new(),
            narrator: Narrator::new(),
            events: Vec::new(),
        }
    }

    pub(crate) fn engine(&self) -> &MazeEngine {
        &self.engine
    }

    /// Answers a single message. Messages without a keyword get no reply.
    pub(crate) fn respond(&mut self, message: &str) -> Vec<String> {
        let mut replies = Vec::new();
        let Some(request) = self.interpreter.interpret(message) else {
            debug!("ignoring message {message:?}");
            return replies;
        };

        match request.command() {
            Some(command) => {
                self.events.clear();
                match world::apply(&mut self.engine, command, &mut self.events) {
                    Ok(()) => self.narrator.handle(&self.events, &mut replies),
                    Err(fault) => self.report(&fault, &mut replies),
                }
            }
            None if request == Request::ShowMap => {
                self.narrator.map(query::render(&self.engine), &mut replies);
            }
            None => match query::player(&self.engine) {
                Ok(player) => self.narrator.position(&player, &mut replies),
                Err(fault) => self.report(&fault, &mut replies),
            },
        }

        replies
    }

    fn report(&self, fault: &EngineError, replies: &mut Vec<String>) {
        error!("maze fault: {fault}");
        self.narrator.error(fault, replies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_follow_a_full_walkthrough() {
        let mut session = Session::new(MazeEngine::default());

        assert_eq!(
            session.respond("where am I? me"),
            vec!["Position on map: [0,3]", "Direction (cardinal point): S"]
        );
        assert_eq!(session.respond("forward"), vec!["One step forward"]);
        assert_eq!(session.respond("right"), vec!["New direction: W"]);
        assert_eq!(session.respond("forward"), vec!["Wall"]);
        assert_eq!(session.respond("left"), vec!["New direction: S"]);
        assert_eq!(session.respond("left"), vec!["New direction: E"]);
        assert_eq!(session.respond("forward"), vec!["Wall"]);
    }

    #[test]
    fn location_follows_steps_and_turns() {
        let mut session = Session::new(MazeEngine::default());

        assert_eq!(session.respond("forward"), vec!["One step forward"]);
        assert_eq!(session.respond("left"), vec!["New direction: E"]);
        assert_eq!(
            session.respond("which direction?"),
            vec!["Position on map: [1,3]", "Direction (cardinal point): E"]
        );
    }

    #[test]
    fn map_lists_packed_rows() {
        let mut session = Session::new(MazeEngine::default());

        let replies = session.respond("map");

        assert_eq!(replies.len(), 5);
        assert_eq!(replies[0], "0 0 0 5 0");
        assert_eq!(replies[3], "0 0 1 1 1");
    }

    #[test]
    fn unknown_messages_get_no_reply() {
        let mut session = Session::new(MazeEngine::default());
        let before = session.engine().clone();

        assert!(session.respond("hello").is_empty());
        assert_eq!(session.engine(), &before);
    }

    #[test]
    fn edge_of_map_is_reported() {
        let engine = MazeEngine::new(&[[3_u32]]).expect("valid layout");
        let mut session = Session::new(engine);

        assert_eq!(session.respond("frente"), vec!["Out of the map"]);
    }
}
