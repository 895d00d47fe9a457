use crawlview::input::{InputState, KeyCode, MouseButton, parse_command, parse_race};
use crawlview::world::{Action, Command, Direction, Race};

// ── Command vocabulary ───────────────────────────────────────────────────────

#[test]
fn bare_direction_moves() {
    assert_eq!(parse_command("no"), Ok(Command::new(Action::Move, Direction::North)));
    assert_eq!(parse_command("sw"), Ok(Command::new(Action::Move, Direction::SouthWest)));
}

#[test]
fn all_eight_directions_parse() {
    for word in ["no", "so", "ea", "we", "ne", "se", "nw", "sw"] {
        assert!(parse_command(word).is_ok(), "{word}");
    }
}

#[test]
fn attack_and_use_prefixes() {
    assert_eq!(parse_command("a ea"), Ok(Command::new(Action::Attack, Direction::East)));
    assert_eq!(parse_command("u we"), Ok(Command::new(Action::Use, Direction::West)));
}

#[test]
fn restart_has_no_direction() {
    assert_eq!(parse_command("r"), Ok(Command::new(Action::Restart, Direction::None)));
}

#[test]
fn case_and_whitespace_are_forgiven() {
    assert_eq!(parse_command("  A   NE "), Ok(Command::new(Action::Attack, Direction::NorthEast)));
}

#[test]
fn unknown_input_is_rejected_verbatim() {
    let err = parse_command("xyzzy").unwrap_err();
    assert_eq!(err.input, "xyzzy");
    for bad in ["", "a", "a up", "q no", "r no", "no no"] {
        assert!(parse_command(bad).is_err(), "'{bad}' should be rejected");
    }
}

#[test]
fn race_letters() {
    assert_eq!(parse_race("h"), Ok(Race::Human));
    assert_eq!(parse_race(" D "), Ok(Race::Dwarf));
    assert_eq!(parse_race("o"), Ok(Race::Orc));
    assert_eq!(parse_race("e"), Ok(Race::Elf));
    assert!(parse_race("human").is_err());
    assert!(parse_race("no").is_err());
}

// ── Edit line ────────────────────────────────────────────────────────────────

#[test]
fn typing_and_backspace() {
    let mut input = InputState::new();
    for ch in "a nox".chars() {
        input.type_char(ch);
    }
    input.backspace();
    assert_eq!(input.pending_line(), "a no");
}

#[test]
fn control_chars_are_not_typed() {
    let mut input = InputState::new();
    input.type_char('\r');
    input.type_char('\u{8}');
    assert_eq!(input.pending_line(), "");
}

#[test]
fn reject_keeps_line_until_next_keystroke() {
    let mut input = InputState::new();
    input.type_char('z');
    input.reject();
    assert!(input.input_error);
    assert_eq!(input.pending_line(), "z");
    input.backspace();
    assert!(!input.input_error);
}

#[test]
fn accept_clears_line() {
    let mut input = InputState::new();
    input.type_char('r');
    input.reject();
    input.accept();
    assert_eq!(input.pending_line(), "");
    assert!(!input.input_error);
}

#[test]
fn pressed_state_lasts_one_frame() {
    let mut input = InputState::new();
    input.keys_pressed.insert(KeyCode::PageDown);
    input.mouse_pressed.insert(MouseButton::Left);
    assert!(input.is_key_pressed(KeyCode::PageDown));
    assert!(input.is_mouse_pressed(MouseButton::Left));
    input.clear_frame_state();
    assert!(!input.is_key_pressed(KeyCode::PageDown));
    assert!(!input.is_mouse_pressed(MouseButton::Left));
}

#[test]
fn directions_invert_their_deltas() {
    for dir in Direction::COMPASS {
        let (dx, dy) = dir.delta();
        assert_eq!(Direction::from_delta(dx, dy), Some(dir));
    }
    assert_eq!(Direction::from_delta(0, 0), None);
    assert_eq!(Direction::from_delta(2, 0), None);
}
