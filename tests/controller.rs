/// Controller phase flow, input routing and frame assembly, against a stub
/// engine and the built-in demo dungeon.
use std::time::Duration;

use crawlview::anim::AnimKey;
use crawlview::config::ViewConfig;
use crawlview::controller::{Controller, Phase, RACE_PROMPT};
use crawlview::geometry::GridPos;
use crawlview::input::InputState;
use crawlview::renderer::atlas::Sheet;
use crawlview::world::demo::DemoEngine;
use crawlview::world::*;

// ── Stub engine ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Stub {
    dims: (u32, u32),
    terrain: Vec<u8>,
    entities: Vec<u8>,
    message: String,
    status: GameStatus,
    race: Option<Race>,
    submitted: Vec<Command>,
    new_scenes: u32,
    /// Applied on the next submit, to mimic a level change.
    resize_to: Option<(u32, u32)>,
}

impl Stub {
    fn new() -> Self {
        let mut stub = Self::default();
        stub.resize(5, 5);
        stub
    }

    fn resize(&mut self, w: u32, h: u32) {
        self.dims = (w, h);
        self.terrain = vec![b'.'; (w * h) as usize];
        self.entities = vec![0; (w * h) as usize];
    }
}

impl GameEngine for Stub {
    fn dimensions(&self) -> (u32, u32) {
        self.dims
    }
    fn terrain_codes(&self) -> &[u8] {
        &self.terrain
    }
    fn entity_codes(&self) -> &[u8] {
        &self.entities
    }
    fn player_pos(&self) -> GridPos {
        GridPos::new(2, 2)
    }
    fn stats(&self) -> PlayerStats {
        PlayerStats { hp: 42, ..PlayerStats::default() }
    }
    fn message(&self) -> String {
        self.message.clone()
    }
    fn status(&self) -> GameStatus {
        self.status
    }
    fn submit(&mut self, command: Command) {
        self.submitted.push(command);
        if let Some((w, h)) = self.resize_to.take() {
            self.resize(w, h);
        }
    }
    fn set_race(&mut self, race: Race) {
        self.race = Some(race);
        self.message = "welcome".into();
    }
    fn request_new_scene(&mut self) {
        self.new_scenes += 1;
        self.status = GameStatus::default();
    }
}

fn config() -> ViewConfig {
    ViewConfig { seed: Some(7), ..ViewConfig::default() }
}

fn playing() -> Controller<Stub> {
    let mut c = Controller::new(Stub::new(), config());
    c.submit_text("h").unwrap();
    c
}

fn texts(c: &Controller<Stub>) -> Vec<String> {
    c.frame(&InputState::new()).texts.into_iter().map(|t| t.text).collect()
}

// ── Intro ────────────────────────────────────────────────────────────────────

#[test]
fn starts_in_race_selection() {
    let c = Controller::new(Stub::new(), config());
    assert_eq!(c.phase(), Phase::Intro);
    assert_eq!(c.state().ui.message(), RACE_PROMPT);
    let frame = c.frame(&InputState::new());
    assert!(frame.tiles.is_empty());
    assert!(!texts(&c).iter().any(|t| t.starts_with("Hp")));
}

#[test]
fn bad_race_is_rejected_without_side_effects() {
    let mut c = Controller::new(Stub::new(), config());
    let err = c.submit_text("no").unwrap_err();
    assert_eq!(err.input, "no");
    assert_eq!(c.phase(), Phase::Intro);
    assert_eq!(c.engine().race, None);
    assert!(c.engine().submitted.is_empty());
}

#[test]
fn race_letter_starts_play() {
    let c = playing();
    assert_eq!(c.phase(), Phase::Playing);
    assert_eq!(c.engine().race, Some(Race::Human));
    assert_eq!(c.state().ui.message(), "welcome");
    assert!(texts(&c).iter().any(|t| t.starts_with("Hp") && t.ends_with("42")));
}

// ── Playing ──────────────────────────────────────────────────────────────────

#[test]
fn commands_reach_the_engine() {
    let mut c = playing();
    c.submit_text("a no").unwrap();
    c.submit_text("ea").unwrap();
    assert_eq!(
        c.engine().submitted,
        vec![Command::new(Action::Attack, Direction::North), Command::new(Action::Move, Direction::East)]
    );
}

#[test]
fn rejected_command_changes_nothing() {
    let mut c = playing();
    assert!(c.submit_text("dance").is_err());
    assert!(c.engine().submitted.is_empty());
    assert_eq!(c.phase(), Phase::Playing);
}

#[test]
fn message_refreshes_after_command() {
    let mut c = playing();
    c.engine_mut().message = "You hear a distant roar.".into();
    c.submit_text("so").unwrap();
    assert_eq!(c.state().ui.message(), "You hear a distant roar.");
    assert!(texts(&c).iter().any(|t| t == "You hear a distant roar."));
}

#[test]
fn field_follows_scene_size() {
    let mut c = playing();
    assert_eq!(c.state().field.width(), 5);
    c.engine_mut().resize_to = Some((9, 6));
    c.submit_text("no").unwrap();
    assert_eq!((c.state().field.width(), c.state().field.height()), (9, 6));
}

#[test]
fn frame_draws_world_and_player() {
    let c = playing();
    let frame = c.frame(&InputState::new());
    let player = frame.tiles.last().unwrap();
    assert_eq!(player.tile.sheet, Sheet::Player);
    // 5x5 grid, every cell inside the 15x15 window: backdrop + floor each.
    assert_eq!(frame.tiles.len(), 25 * 2 + 1);
}

// ── Clicks ───────────────────────────────────────────────────────────────────

#[test]
fn clicking_a_neighbour_cell_moves() {
    let mut c = playing();
    let east = c.layout().cell(8, 7);
    c.click([east.x0 + 0.5, east.y0 + 0.5]);
    assert_eq!(c.engine().submitted, vec![Command::new(Action::Move, Direction::East)]);
}

#[test]
fn click_on_shared_cell_edge_moves_once() {
    let mut c = playing();
    // x = 8.0 is the edge between the north and north-east cells.
    c.click([8.0, 6.5]);
    assert_eq!(c.engine().submitted, vec![Command::new(Action::Move, Direction::North)]);
    assert!(c.state().ui.pending.is_empty());
}

#[test]
fn clicks_do_not_move_during_intro() {
    let mut c = Controller::new(Stub::new(), config());
    c.click([8.5, 7.5]);
    assert!(c.engine().submitted.is_empty());
    assert!(c.state().ui.pending.is_empty());
}

#[test]
fn page_arrows_are_gated() {
    let mut c = playing();
    c.engine_mut().message = "word ".repeat(60);
    c.submit_text("no").unwrap();
    assert!(c.state().ui.pages.len() > 2);

    let prev = c.layout().prev_arrow;
    let next = c.layout().next_arrow;
    let centre = |r: crawlview::geometry::Rect| [(r.x0 + r.x1) / 2.0, (r.y0 + r.y1) / 2.0];

    c.click(centre(prev));
    assert_eq!(c.state().ui.pages.cursor(), 0);
    c.click(centre(next));
    c.click(centre(next));
    assert_eq!(c.state().ui.pages.cursor(), 2);
    c.click(centre(prev));
    assert_eq!(c.state().ui.pages.cursor(), 1);
    assert!(c.engine().submitted.len() == 1, "arrow clicks must not submit commands");
}

#[test]
fn arrows_only_drawn_when_there_is_a_page() {
    let mut c = playing();
    assert!(!texts(&c).iter().any(|t| t == "\u{2193}" || t == "\u{2191}"));
    c.engine_mut().message = "word ".repeat(60);
    c.submit_text("no").unwrap();
    let shown = texts(&c);
    assert!(shown.iter().any(|t| t == "\u{2193}"));
    assert!(!shown.iter().any(|t| t == "\u{2191}"));
}

// ── Game over and restart ────────────────────────────────────────────────────

#[test]
fn game_over_only_accepts_restart() {
    let mut c = playing();
    c.engine_mut().status = GameStatus { finished: true, player_dead: false, final_score: 30 };
    c.submit_text("no").unwrap();
    assert_eq!(c.phase(), Phase::Over);
    assert!(texts(&c).iter().any(|t| t.contains("30")));

    assert!(c.submit_text("so").is_err());
    assert_eq!(c.engine().submitted.len(), 1);

    c.submit_text("r").unwrap();
    assert_eq!(c.phase(), Phase::Intro);
    assert_eq!(c.engine().new_scenes, 1);
}

#[test]
fn restart_resets_clock_and_field() {
    let mut c = playing();
    c.tick(Duration::from_millis(0));
    c.tick(Duration::from_millis(200));
    assert_eq!(c.state().clock.frame(AnimKey::Arrows), 1);
    let seed = c.state().field.seed();

    c.submit_text("r").unwrap();
    assert_eq!(c.phase(), Phase::Intro);
    assert_eq!(c.state().clock.frame(AnimKey::Arrows), 0);
    assert_ne!(c.state().field.seed(), seed);
    assert_eq!(c.state().ui.message(), RACE_PROMPT);
}

#[test]
fn seeded_config_is_reproducible() {
    let a = Controller::new(Stub::new(), config());
    let b = Controller::new(Stub::new(), config());
    assert_eq!(a.state().field, b.state().field);
}

// ── Demo dungeon ─────────────────────────────────────────────────────────────

#[test]
fn demo_dungeon_round() {
    let mut c = Controller::new(DemoEngine::new(), config());
    c.submit_text("d").unwrap();
    c.submit_text("so").unwrap();
    assert_eq!(c.engine().stats().gold, 10);
    assert_eq!(c.engine().stats().race, Race::Dwarf);

    let frame = c.frame(&InputState::new());
    assert!(frame.tiles.iter().any(|t| t.tile.sheet == Sheet::Tileset));
    assert!(frame.texts.iter().any(|t| t.text.starts_with("Gold") && t.text.ends_with("10")));
}
