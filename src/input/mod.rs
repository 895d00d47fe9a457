use std::collections::HashSet;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::error::InputRejected;
use crate::world::{Action, Command, Direction, Race};

// ── Vocabulary ───────────────────────────────────────────────────────────────

const DIRECTION_WORDS: [(&str, Direction); 8] = [
    ("no", Direction::North),
    ("so", Direction::South),
    ("ea", Direction::East),
    ("we", Direction::West),
    ("ne", Direction::NorthEast),
    ("se", Direction::SouthEast),
    ("nw", Direction::NorthWest),
    ("sw", Direction::SouthWest),
];

const RACE_WORDS: [(&str, Race); 4] = [
    ("h", Race::Human),
    ("d", Race::Dwarf),
    ("o", Race::Orc),
    ("e", Race::Elf),
];

/// Lowercase and collapse runs of whitespace, so `"  A   NO "` reads `"a no"`.
fn normalise(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn direction_word(word: &str) -> Option<Direction> {
    DIRECTION_WORDS.iter().find(|(w, _)| *w == word).map(|&(_, d)| d)
}

/// Match a submitted line against the in-game vocabulary:
/// `<dir>` moves, `a <dir>` attacks, `u <dir>` uses, `r` restarts.
pub fn parse_command(raw: &str) -> Result<Command, InputRejected> {
    let line = normalise(raw);
    let reject = || InputRejected { input: raw.to_string() };

    if line == "r" {
        return Ok(Command::new(Action::Restart, Direction::None));
    }
    let (action, word) = match line.split_once(' ') {
        Some(("a", rest)) => (Action::Attack, rest),
        Some(("u", rest)) => (Action::Use, rest),
        Some(_) => return Err(reject()),
        None => (Action::Move, line.as_str()),
    };
    direction_word(word).map(|d| Command::new(action, d)).ok_or_else(reject)
}

/// Match a submitted line against the race-selection vocabulary.
pub fn parse_race(raw: &str) -> Result<Race, InputRejected> {
    let line = normalise(raw);
    RACE_WORDS
        .iter()
        .find(|(w, _)| *w == line)
        .map(|&(_, r)| r)
        .ok_or_else(|| InputRejected { input: raw.to_string() })
}

// ── InputState ───────────────────────────────────────────────────────────────

/// Raw hardware state for a single frame plus the command line being typed.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,

    /// Cursor position in physical window pixels.
    pub mouse_pos: [f32; 2],
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,

    /// Text typed so far on the command line.
    pub line: String,
    /// Set when the last submission was rejected; cleared by the next keystroke.
    pub input_error: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    pub fn type_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.line.push(ch);
            self.input_error = false;
        }
    }

    pub fn backspace(&mut self) {
        self.line.pop();
        self.input_error = false;
    }

    /// The line to submit. It stays in place until [`accept`](Self::accept)
    /// clears it; [`reject`](Self::reject) keeps it for editing.
    pub fn pending_line(&self) -> &str {
        &self.line
    }

    pub fn accept(&mut self) {
        self.line.clear();
        self.input_error = false;
    }

    pub fn reject(&mut self) {
        self.input_error = true;
    }
}
