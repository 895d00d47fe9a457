//! The one owner of view state.
//!
//! Every entry point the host calls (text submit, click, tick, draw) goes
//! through [`Controller`], so the clock, the random field and the page set
//! never have a second writer.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::anim::AnimationClock;
use crate::compose::{Frame, Layout, OverlayModel, compose_overlay, compose_world};
use crate::config::ViewConfig;
use crate::error::InputRejected;
use crate::input::{InputState, parse_command, parse_race};
use crate::ui::UiState;
use crate::ui::click::ClickRouter;
use crate::world::{Action, Command, Direction, GameEngine, Snapshot, StableRandomField};

pub const RACE_PROMPT: &str =
    "Choose your race: (h)uman, (d)warf, (o)rc or (e)lf. Type the letter and press Enter.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a race.
    Intro,
    Playing,
    /// The engine reported the run finished or the player dead; only restart is accepted.
    Over,
}

/// Everything the view keeps between frames.
pub struct RenderState {
    pub clock: AnimationClock,
    pub field: StableRandomField,
    pub ui: UiState,
}

pub struct Controller<E: GameEngine> {
    engine: E,
    state: RenderState,
    router: ClickRouter<UiState>,
    layout: Layout,
    config: ViewConfig,
    phase: Phase,
    rng: ChaCha8Rng,
}

impl<E: GameEngine> Controller<E> {
    pub fn new(engine: E, config: ViewConfig) -> Self {
        let config = config.clamped();
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (w, h) = engine.dimensions();
        let field = StableRandomField::generate(w, h, rng.r#gen());
        let layout = Layout::new(config.view_cells(), config.line_width, config.lines_per_page);

        let state = RenderState {
            clock: AnimationClock::new(&config.animations),
            field,
            ui: UiState::new(config.line_width, config.lines_per_page),
        };
        let router = build_router(&layout, config.view_radius);

        let mut controller = Self { engine, state, router, layout, config, phase: Phase::Intro, rng };
        controller.refresh_message();
        controller
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access. Changes made here show up in the message box
    /// after the next accepted command.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    // ── Entry points ────────────────────────────────────────────────────────

    /// Interpret one submitted line for the current phase.
    ///
    /// Rejected input leaves the engine and the view untouched.
    pub fn submit_text(&mut self, raw: &str) -> Result<(), InputRejected> {
        match self.phase {
            Phase::Intro => {
                let race = parse_race(raw)?;
                self.engine.set_race(race);
                self.phase = Phase::Playing;
                tracing::info!(race = race.name(), "race chosen");
            }
            Phase::Playing => {
                let command = parse_command(raw)?;
                self.apply(command);
            }
            Phase::Over => {
                let command = parse_command(raw)?;
                if command.action != Action::Restart {
                    return Err(InputRejected { input: raw.to_string() });
                }
                self.restart();
            }
        }
        self.refresh_message();
        Ok(())
    }

    /// Route a click at `point` (overlay units) and forward the move it queued.
    ///
    /// A point on the edge shared by two neighbour cells hits both; only the
    /// first queued move is sent, so one click is at most one engine turn.
    pub fn click(&mut self, point: [f32; 2]) {
        self.router.dispatch(point, &mut self.state.ui);
        let queued = std::mem::take(&mut self.state.ui.pending);
        if self.phase != Phase::Playing {
            return;
        }
        let Some(&command) = queued.first() else { return };
        if queued.len() > 1 {
            tracing::trace!(dropped = queued.len() - 1, "click on a cell edge");
        }
        self.apply(command);
        self.refresh_message();
    }

    pub fn next_page(&mut self) {
        self.state.ui.pages.next();
    }

    pub fn prev_page(&mut self) {
        self.state.ui.pages.prev();
    }

    /// Advance the animation clock to the monotonic timestamp `now`.
    pub fn tick(&mut self, now: Duration) {
        self.state.clock.tick(now);
    }

    /// Start a new scene: fresh engine scene, fresh random field, clock back
    /// to its start frames, race selection again.
    pub fn restart(&mut self) {
        self.engine.request_new_scene();
        self.regenerate_field();
        self.state.clock.reset();
        self.state.ui.clear();
        self.phase = Phase::Intro;
        tracing::info!(seed = self.state.field.seed(), "new scene");
    }

    /// Compose the current frame. `input` supplies the command line being typed.
    pub fn frame(&self, input: &InputState) -> Frame {
        let snapshot = Snapshot::capture(&self.engine);
        let tiles = if self.phase == Phase::Intro {
            Vec::new()
        } else {
            compose_world(&snapshot, &self.state.field, &self.state.clock, self.config.view_radius)
        };

        let pages = &self.state.ui.pages;
        let banner = (self.phase == Phase::Over).then(|| {
            if snapshot.status.player_dead {
                "You died. Type r to restart.".to_string()
            } else {
                format!("Final score {}. Type r to restart.", snapshot.status.final_score)
            }
        });
        let model = OverlayModel {
            stats: (self.phase != Phase::Intro).then_some(snapshot.stats),
            page: pages.current(),
            has_prev: pages.has_prev(),
            has_next: pages.has_next(),
            banner,
            input: input.pending_line(),
            input_error: input.input_error,
        };
        let (rects, texts) = compose_overlay(&model, &self.layout);
        Frame { tiles, rects, texts }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn apply(&mut self, command: Command) {
        if command.action == Action::Restart {
            self.restart();
            return;
        }
        tracing::debug!(?command, "submit");
        self.engine.submit(command);

        let (w, h) = self.engine.dimensions();
        if (w, h) != (self.state.field.width(), self.state.field.height()) {
            tracing::debug!(w, h, "scene size changed");
            self.regenerate_field();
        }
        if self.engine.status().is_over() {
            self.phase = Phase::Over;
            tracing::info!(score = self.engine.status().final_score, "run over");
        }
    }

    fn regenerate_field(&mut self) {
        let (w, h) = self.engine.dimensions();
        self.state.field = StableRandomField::generate(w, h, self.rng.r#gen());
    }

    fn refresh_message(&mut self) {
        let message = match self.phase {
            Phase::Intro => RACE_PROMPT.to_string(),
            Phase::Playing | Phase::Over => self.engine.message(),
        };
        self.state.ui.set_message(&message);
    }
}

/// Page arrows, gated on there being a page to go to, and the eight cells
/// around the player, which queue a move in that direction.
fn build_router(layout: &Layout, radius: u32) -> ClickRouter<UiState> {
    let mut router: ClickRouter<UiState> = ClickRouter::new();
    router.register_gated(layout.prev_arrow, |ui: &UiState| ui.pages.has_prev(), |ui| ui.pages.prev());
    router.register_gated(layout.next_arrow, |ui: &UiState| ui.pages.has_next(), |ui| ui.pages.next());

    let centre = radius as i32;
    for dir in Direction::COMPASS {
        let (dx, dy) = dir.delta();
        router.register(layout.cell(centre + dx, centre + dy), move |ui: &mut UiState| {
            ui.pending.push(Command::new(Action::Move, dir));
        });
    }
    router
}
