//! A tiny fixed dungeon that speaks the [`GameEngine`] protocol.
//!
//! It exists so the binary has something to draw without the real engine:
//! movement onto walkable cells, gold pickup, one-hit monsters that strike
//! back, potions, and a trap that ends the run. Nothing here is a game rule
//! the view depends on.

use crate::geometry::GridPos;

use super::{Action, Command, Direction, Entity, GameEngine, GameStatus, LootKind, PlayerStats, Race, Terrain};

const MAP: &[&str] = &[
    "                                ",
    " |--------|          |-------|  ",
    " |........|          |.......|  ",
    " |........+####      |.......|  ",
    " |........|   #      |.......|  ",
    " |--+-----|   #######+.......|  ",
    "    #                |.......|  ",
    "    #                |---+---|  ",
    "    ###########          #      ",
    "              #          #      ",
    "       |------+-----|    #      ",
    "       |............+#####      ",
    "       |...........\\|           ",
    "       |------------|           ",
    "                                ",
];

const SPAWNS: &[(i32, i32, u8)] = &[
    (7, 2, b'N'),
    (3, 4, b'G'),
    (8, 4, b'P'),
    (27, 2, b'B'),
    (26, 3, b'D'),
    (23, 4, b'V'),
    (25, 6, b'X'),
    (10, 11, b'M'),
    (18, 11, b'W'),
    (15, 12, b'T'),
    (12, 12, b'C'),
];

const PLAYER_START: GridPos = GridPos::new(3, 3);
const GOLD_PER_PILE: i32 = 10;
const POTION_HEAL: i32 = 10;

pub struct DemoEngine {
    width: u32,
    height: u32,
    terrain: Vec<u8>,
    entities: Vec<u8>,
    player: GridPos,
    stats: PlayerStats,
    status: GameStatus,
    message: String,
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoEngine {
    pub fn new() -> Self {
        let width = MAP.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let height = MAP.len() as u32;
        let mut engine = Self {
            width,
            height,
            terrain: Vec::new(),
            entities: Vec::new(),
            player: PLAYER_START,
            stats: PlayerStats::default(),
            status: GameStatus::default(),
            message: String::new(),
        };
        engine.reset();
        engine
    }

    fn reset(&mut self) {
        let (w, h) = (self.width as usize, self.height as usize);
        self.terrain = vec![b' '; w * h];
        for (y, row) in MAP.iter().enumerate() {
            for (x, byte) in row.bytes().enumerate() {
                self.terrain[x + y * w] = byte;
            }
        }
        self.entities = vec![0; w * h];
        for &(x, y, code) in SPAWNS {
            self.put_entity(GridPos::new(x, y), code);
        }
        self.player = PLAYER_START;
        self.put_entity(PLAYER_START, b'@');
        self.stats = race_stats(self.stats.race);
        self.status = GameStatus::default();
        self.message.clear();
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        let in_bounds =
            pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height;
        in_bounds.then(|| pos.x as usize + pos.y as usize * self.width as usize)
    }

    fn terrain_at(&self, pos: GridPos) -> Terrain {
        self.index(pos).map_or(Terrain::Empty, |i| Terrain::from_code(self.terrain[i]))
    }

    fn entity_at(&self, pos: GridPos) -> Entity {
        self.index(pos).map_or(Entity::None, |i| Entity::from_code(self.entities[i]))
    }

    fn put_entity(&mut self, pos: GridPos, code: u8) {
        if let Some(i) = self.index(pos) {
            self.entities[i] = code;
        }
    }

    fn target(&self, dir: Direction) -> GridPos {
        let (dx, dy) = dir.delta();
        self.player.offset(dx, dy)
    }

    fn step(&mut self, dir: Direction) {
        let to = self.target(dir);
        if !self.terrain_at(to).is_walkable() {
            self.message = "You can't go that way.".to_string();
            return;
        }
        match self.entity_at(to) {
            Entity::Monster(kind) => {
                self.message = format!("A {} blocks your way.", kind.name());
                return;
            }
            Entity::Loot(LootKind::Gold) => {
                self.stats.gold += GOLD_PER_PILE;
                self.message = format!("You pick up {GOLD_PER_PILE} gold.");
            }
            Entity::Loot(_) => {
                self.message = "There is something here. Use it from an adjacent cell.".to_string();
                return;
            }
            Entity::None | Entity::Player => self.message.clear(),
        }
        self.put_entity(self.player, 0);
        self.player = to;
        self.put_entity(to, b'@');

        if self.terrain_at(to) == Terrain::Trap {
            self.status.finished = true;
            self.status.final_score = self.stats.gold;
            self.message = format!(
                "The floor gives way beneath you and you tumble out of the dungeon with {} gold. Type r to play again.",
                self.stats.gold
            );
        }
    }

    fn attack(&mut self, dir: Direction) {
        let to = self.target(dir);
        let Entity::Monster(kind) = self.entity_at(to) else {
            self.message = "You swing at nothing.".to_string();
            return;
        };
        self.put_entity(to, 0);
        let wound = (10 - self.stats.def / 5).max(1);
        self.stats.hp -= wound;
        if self.stats.hp <= 0 {
            self.stats.hp = 0;
            self.status.player_dead = true;
            self.message = format!("The {} takes you down with it. Type r to try again.", kind.name());
        } else {
            self.message = format!("You slay the {}. It wounds you for {wound} HP.", kind.name());
        }
    }

    fn use_item(&mut self, dir: Direction) {
        let to = self.target(dir);
        let Entity::Loot(kind) = self.entity_at(to) else {
            self.message = "There is nothing to use there.".to_string();
            return;
        };
        self.message = match kind {
            LootKind::Potion => {
                self.stats.hp += POTION_HEAL;
                format!("You drink the potion and recover {POTION_HEAL} HP.")
            }
            LootKind::BarrierSuit => {
                self.stats.def += 10;
                "You put on the barrier suit.".to_string()
            }
            LootKind::Compass => "The compass needle points at the trap.".to_string(),
            LootKind::Gold => {
                self.stats.gold += GOLD_PER_PILE;
                format!("You pick up {GOLD_PER_PILE} gold.")
            }
        };
        self.put_entity(to, 0);
    }
}

fn race_stats(race: Race) -> PlayerStats {
    let (hp, atk, def) = match race {
        Race::Human => (140, 20, 20),
        Race::Dwarf => (100, 20, 30),
        Race::Orc => (180, 30, 25),
        Race::Elf => (140, 30, 10),
    };
    PlayerStats { hp, atk, def, gold: 0, race }
}

impl GameEngine for DemoEngine {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn terrain_codes(&self) -> &[u8] {
        &self.terrain
    }

    fn entity_codes(&self) -> &[u8] {
        &self.entities
    }

    fn player_pos(&self) -> GridPos {
        self.player
    }

    fn stats(&self) -> PlayerStats {
        self.stats
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn submit(&mut self, command: Command) {
        if self.status.is_over() && command.action != Action::Restart {
            return;
        }
        match command.action {
            Action::Move => self.step(command.direction),
            Action::Attack => self.attack(command.direction),
            Action::Use => self.use_item(command.direction),
            Action::Restart => self.request_new_scene(),
        }
    }

    fn set_race(&mut self, race: Race) {
        self.stats = race_stats(race);
        self.message = format!(
            "You enter the dungeon as a {}. Somewhere below lies a trap that leads out; find it before the monsters find you.",
            race.name()
        );
    }

    fn request_new_scene(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_is_on_entity_layer() {
        let e = DemoEngine::new();
        let i = (PLAYER_START.x + PLAYER_START.y * e.width as i32) as usize;
        assert_eq!(e.entities[i], b'@');
    }

    #[test]
    fn walls_block_movement() {
        let mut e = DemoEngine::new();
        // (3,3) → west is (2,3) floor, then (1,3) wall.
        e.submit(Command::new(Action::Move, Direction::West));
        e.submit(Command::new(Action::Move, Direction::West));
        assert_eq!(e.player_pos(), GridPos::new(2, 3));
    }

    #[test]
    fn gold_is_picked_up() {
        let mut e = DemoEngine::new();
        e.submit(Command::new(Action::Move, Direction::South));
        assert_eq!(e.player_pos(), GridPos::new(3, 4));
        assert_eq!(e.stats().gold, GOLD_PER_PILE);
    }
}
