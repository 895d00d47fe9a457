// ── Terrain ──────────────────────────────────────────────────────────────────

/// Background layer code. The engine speaks single bytes; everything past the
/// snapshot boundary uses this closed set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terrain {
    /// `|`
    VerticalWall,
    /// `-`
    HorizontalWall,
    /// `.`
    Floor,
    /// `+`
    Door,
    /// `#`, passage between chambers.
    Tunnel,
    /// `\`, marked by the bouncing arrow indicator.
    Trap,
    /// ` ` or NUL.
    #[default]
    Empty,
}

impl Terrain {
    pub const ALL: [Terrain; 7] = [
        Terrain::VerticalWall,
        Terrain::HorizontalWall,
        Terrain::Floor,
        Terrain::Door,
        Terrain::Tunnel,
        Terrain::Trap,
        Terrain::Empty,
    ];

    /// Decode an engine byte. Bytes outside the alphabet become `Empty`.
    pub fn from_code(code: u8) -> Self {
        match code {
            b'|' => Terrain::VerticalWall,
            b'-' => Terrain::HorizontalWall,
            b'.' => Terrain::Floor,
            b'+' => Terrain::Door,
            b'#' => Terrain::Tunnel,
            b'\\' => Terrain::Trap,
            b' ' | 0 => Terrain::Empty,
            other => {
                tracing::trace!(code = other, "unmapped terrain code");
                Terrain::Empty
            }
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Terrain::VerticalWall => b'|',
            Terrain::HorizontalWall => b'-',
            Terrain::Floor => b'.',
            Terrain::Door => b'+',
            Terrain::Tunnel => b'#',
            Terrain::Trap => b'\\',
            Terrain::Empty => b' ',
        }
    }

    /// Cells the demo engine lets the player stand on.
    pub fn is_walkable(self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Door | Terrain::Tunnel | Terrain::Trap)
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Vampire,
    Werewolf,
    Merchant,
    Goblin,
    Dragon,
    Troll,
    Phoenix,
}

impl MonsterKind {
    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Vampire => "vampire",
            MonsterKind::Werewolf => "werewolf",
            MonsterKind::Merchant => "merchant",
            MonsterKind::Goblin => "goblin",
            MonsterKind::Dragon => "dragon",
            MonsterKind::Troll => "troll",
            MonsterKind::Phoenix => "phoenix",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LootKind {
    Gold,
    Potion,
    Compass,
    BarrierSuit,
}

/// Foreground layer code: at most one occupant per cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Entity {
    #[default]
    None,
    Player,
    Monster(MonsterKind),
    Loot(LootKind),
}

impl Entity {
    /// Decode an engine byte. Unknown bytes become `None`.
    pub fn from_code(code: u8) -> Self {
        match code {
            b'@' => Entity::Player,
            b'V' => Entity::Monster(MonsterKind::Vampire),
            b'W' => Entity::Monster(MonsterKind::Werewolf),
            b'M' => Entity::Monster(MonsterKind::Merchant),
            b'N' => Entity::Monster(MonsterKind::Goblin),
            b'D' => Entity::Monster(MonsterKind::Dragon),
            b'T' => Entity::Monster(MonsterKind::Troll),
            b'X' => Entity::Monster(MonsterKind::Phoenix),
            b'G' => Entity::Loot(LootKind::Gold),
            b'P' => Entity::Loot(LootKind::Potion),
            b'C' => Entity::Loot(LootKind::Compass),
            b'B' => Entity::Loot(LootKind::BarrierSuit),
            0 | b' ' => Entity::None,
            other => {
                tracing::trace!(code = other, "unmapped entity code");
                Entity::None
            }
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Entity::None => 0,
            Entity::Player => b'@',
            Entity::Monster(MonsterKind::Vampire) => b'V',
            Entity::Monster(MonsterKind::Werewolf) => b'W',
            Entity::Monster(MonsterKind::Merchant) => b'M',
            Entity::Monster(MonsterKind::Goblin) => b'N',
            Entity::Monster(MonsterKind::Dragon) => b'D',
            Entity::Monster(MonsterKind::Troll) => b'T',
            Entity::Monster(MonsterKind::Phoenix) => b'X',
            Entity::Loot(LootKind::Gold) => b'G',
            Entity::Loot(LootKind::Potion) => b'P',
            Entity::Loot(LootKind::Compass) => b'C',
            Entity::Loot(LootKind::BarrierSuit) => b'B',
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Move,
    Attack,
    Use,
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// The eight compass directions, in vocabulary order.
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
    ];

    /// Grid step for this direction (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Inverse of [`delta`](Self::delta) for unit steps.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::COMPASS.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Race {
    #[default]
    Human,
    Dwarf,
    Orc,
    Elf,
}

impl Race {
    pub fn name(self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::Dwarf => "Dwarf",
            Race::Orc => "Orc",
            Race::Elf => "Elf",
        }
    }
}

/// One command for the game engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    pub action: Action,
    pub direction: Direction,
}

impl Command {
    pub const fn new(action: Action, direction: Direction) -> Self {
        Self { action, direction }
    }
}
