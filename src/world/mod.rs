//! The boundary to the game-logic engine.
//!
//! The engine is an opaque collaborator: it is queried for raw byte grids and
//! player state, and receives commands. [`Snapshot::capture`] converts the raw
//! codes into typed grids once per frame so the rest of the crate never sees
//! a byte code.

mod codes;
pub mod demo;
mod grid;

pub use codes::{Action, Command, Direction, Entity, LootKind, MonsterKind, Race, Terrain};
pub use grid::{Grid, StableRandomField, cell_count};

use crate::geometry::GridPos;

/// Player numbers shown in the HUD.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub gold: i32,
    pub race: Race,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub finished: bool,
    pub player_dead: bool,
    pub final_score: i32,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        self.finished || self.player_dead
    }
}

/// Query/command surface of the game-logic engine.
///
/// Queries are called from the render path, commands from the input path;
/// the host is single-threaded so the two never overlap.
pub trait GameEngine {
    /// Grid `(width, height)`, fixed for the lifetime of a scene.
    fn dimensions(&self) -> (u32, u32);
    /// Row-major background codes, `width * height` bytes.
    fn terrain_codes(&self) -> &[u8];
    /// Row-major foreground codes, `width * height` bytes.
    fn entity_codes(&self) -> &[u8];
    fn player_pos(&self) -> GridPos;
    fn stats(&self) -> PlayerStats;
    /// The current message; replaced wholesale whenever the engine reports a new one.
    fn message(&self) -> String;
    fn status(&self) -> GameStatus;

    fn submit(&mut self, command: Command);
    fn set_race(&mut self, race: Race);
    fn request_new_scene(&mut self);
}

/// Typed, immutable copy of one engine frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub terrain: Grid<Terrain>,
    pub entities: Grid<Entity>,
    pub player: GridPos,
    pub stats: PlayerStats,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn capture(engine: &dyn GameEngine) -> Self {
        let (width, height) = engine.dimensions();
        let terrain = decode(width, height, engine.terrain_codes(), Terrain::from_code);
        let entities = decode(width, height, engine.entity_codes(), Entity::from_code);
        Self {
            terrain,
            entities,
            player: engine.player_pos(),
            stats: engine.stats(),
            status: engine.status(),
        }
    }
}

/// Short or missing buffers decode as default cells rather than failing.
fn decode<T: Clone + Default>(width: u32, height: u32, raw: &[u8], f: impl Fn(u8) -> T) -> Grid<T> {
    let len = cell_count(width, height);
    if raw.len() != len {
        tracing::warn!(expected = len, got = raw.len(), "engine buffer size mismatch");
    }
    let cells = (0..len).map(|i| raw.get(i).copied().map(&f).unwrap_or_default()).collect();
    Grid::from_cells(width, height, cells).unwrap_or_else(|| Grid::new(width, height))
}
