use labyrinth_core::{Command, Turn};
use labyrinth_system_interpreter::{Interpreter, Request};

#[test]
fn recognises_english_keywords() {
    let interpreter = Interpreter::new();

    assert_eq!(interpreter.interpret("show the map"), Some(Request::ShowMap));
    assert_eq!(interpreter.interpret("where am I? tell me"), Some(Request::Locate));
    assert_eq!(interpreter.interpret("direction?"), Some(Request::Locate));
    assert_eq!(
        interpreter.interpret("turn right"),
        Some(Request::Turn(Turn::Right))
    );
    assert_eq!(
        interpreter.interpret("turn left"),
        Some(Request::Turn(Turn::Left))
    );
    assert_eq!(interpreter.interpret("go forward"), Some(Request::Forward));
}

#[test]
fn recognises_portuguese_keywords() {
    let interpreter = Interpreter::new();

    assert_eq!(interpreter.interpret("mapa"), Some(Request::ShowMap));
    assert_eq!(interpreter.interpret("qual o sentido"), Some(Request::Locate));
    assert_eq!(
        interpreter.interpret("vire a direita"),
        Some(Request::Turn(Turn::Right))
    );
    assert_eq!(
        interpreter.interpret("esquerda"),
        Some(Request::Turn(Turn::Left))
    );
    assert_eq!(interpreter.interpret("frente"), Some(Request::Forward));
}

#[test]
fn matching_ignores_case() {
    let interpreter = Interpreter::new();

    assert_eq!(interpreter.interpret("MAP"), Some(Request::ShowMap));
    assert_eq!(interpreter.interpret("Forward!"), Some(Request::Forward));
}

#[test]
fn earlier_keywords_take_priority() {
    let interpreter = Interpreter::new();

    assert_eq!(
        interpreter.interpret("move me forward"),
        Some(Request::Forward),
        "actions outrank the locate keyword",
    );
    assert_eq!(
        interpreter.interpret("map then turn right"),
        Some(Request::ShowMap),
    );
}

#[test]
fn unrelated_messages_are_ignored() {
    let interpreter = Interpreter::new();

    assert_eq!(interpreter.interpret("hello there"), None);
    assert_eq!(interpreter.interpret(""), None);
}

#[test]
fn requests_map_to_commands() {
    assert_eq!(
        Request::Turn(Turn::Left).command(),
        Some(Command::Rotate { turn: Turn::Left })
    );
    assert_eq!(Request::Forward.command(), Some(Command::MoveForward));
    assert_eq!(Request::ShowMap.command(), None);
    assert_eq!(Request::Locate.command(), None);
}
