// =============================================================================
// AUTOTILE.RS: Neighbour-bitmask tile selection
//
// Each visible cell gets an 8-bit code describing which of its neighbours
// belong to a "different class". Per-terrain tables map known codes to a
// tileset coordinate; unknown codes fall back to the table's default.
// Floors and tunnels pick a variant from the scene's stable random field.
// =============================================================================

use crate::anim::{AnimKey, AnimationClock};
use crate::geometry::{GridPos, distance_manhattan};
use crate::renderer::atlas::{self, BACKDROP, SpriteId, TileRef};
use crate::world::{Entity, Grid, StableRandomField, Terrain};

// ── ClassSet ─────────────────────────────────────────────────────────────────

/// Set of terrain kinds treated as "same class" when building a code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassSet(u8);

impl ClassSet {
    /// Open ground around rooms: blank space and tunnels.
    pub const OPEN_GROUND: ClassSet = ClassSet::of(&[Terrain::Empty, Terrain::Tunnel]);
    pub const DOORS: ClassSet = ClassSet::of(&[Terrain::Door]);

    pub const fn of(kinds: &[Terrain]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << (kinds[i] as u8);
            i += 1;
        }
        ClassSet(bits)
    }

    pub const fn contains(self, kind: Terrain) -> bool {
        self.0 & (1 << (kind as u8)) != 0
    }
}

// ── NeighborCode ─────────────────────────────────────────────────────────────

/// Offsets in scan order: NW, N, NE, W, E, SW, S, SE. The first offset is
/// the most significant bit.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 8-bit neighbourhood summary; a set bit means "not in the class set".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NeighborCode(pub u8);

impl NeighborCode {
    pub const NONE: NeighborCode = NeighborCode(0);
    pub const ALL: NeighborCode = NeighborCode(0xFF);

    /// Parse the eight-character `"01…"` form, first character = NW.
    pub const fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 {
            return None;
        }
        let mut bits = 0u8;
        let mut i = 0;
        while i < 8 {
            bits <<= 1;
            match bytes[i] {
                b'1' => bits |= 1,
                b'0' => {}
                _ => return None,
            }
            i += 1;
        }
        Some(NeighborCode(bits))
    }

    /// Code for the cell at `pos`. Border cells, whose block would reach
    /// outside the grid, always get [`NeighborCode::NONE`].
    pub fn compute(grid: &Grid<Terrain>, pos: GridPos, same: ClassSet) -> Self {
        if !grid.in_bounds(pos) || grid.on_border(pos) {
            return Self::NONE;
        }
        let bits = NEIGHBOURS.iter().fold(0u8, |acc, &(dx, dy)| {
            let kind = grid.get(pos.offset(dx, dy)).copied().unwrap_or_default();
            (acc << 1) | u8::from(!same.contains(kind))
        });
        NeighborCode(bits)
    }
}

impl std::fmt::Display for NeighborCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

// ── Tables ───────────────────────────────────────────────────────────────────

/// Hand-authored code → tileset coordinate table with a fallback.
pub struct TileTable {
    pub entries: &'static [(u8, (u32, u32))],
    pub default: (u32, u32),
}

impl TileTable {
    pub fn get(&self, code: NeighborCode) -> Option<TileRef> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code.0)
            .map(|&(_, (col, row))| TileRef::tileset(col, row))
    }

    /// Table entry, or the declared default for codes the table doesn't list.
    pub fn resolve(&self, code: NeighborCode) -> TileRef {
        self.get(code).unwrap_or(TileRef::tileset(self.default.0, self.default.1))
    }
}

pub const VERTICAL_WALL: TileTable = TileTable {
    entries: &[
        (0b0000_0000, (8, 7)),
        (0b0000_1010, (0, 0)), // ┌─
        (0b0110_1000, (0, 4)), // └─
        (0b0001_0110, (5, 0)), // ─┐
        (0b1101_0110, (5, 3)), // .│
        (0b1101_0000, (5, 4)), // ─┘
        (0b1111_1011, (5, 5)),
        (0b1101_0111, (5, 1)),
        (0b1101_1111, (3, 0)),
        (0b0001_0111, (5, 3)),
        (0b0111_1111, (3, 0)),
    ],
    default: (0, 1),
};

pub const HORIZONTAL_WALL: TileTable = TileTable {
    entries: &[
        (0b0000_0000, (8, 7)),
        (0b1111_1000, (1, 4)),
        (0b1111_1001, (1, 4)),
    ],
    default: (1, 0),
};

pub const DOOR: TileTable = TileTable {
    entries: &[
        (0b1111_1000, (6, 3)),
        (0b0001_1111, (6, 6)),
        (0b0110_1011, (8, 4)),
        (0b1101_0110, (7, 4)),
    ],
    default: (8, 7),
};

/// Door codes that read as a passage the player is standing in.
const OPEN_PASSAGE: [u8; 2] = [0b1111_1000, 0b0001_1111];

pub const TRAP: TileRef = TileRef::tileset(9, 3);
pub const TUNNEL_OPEN: TileRef = TileRef::tileset(9, 4);
pub const TUNNEL_RUBBLE: TileRef = TileRef::tileset(9, 5);
pub const TUNNEL_BLOCKED: TileRef = BACKDROP;

/// Random-value thresholds for the tunnel split.
const RUBBLE_BELOW: f32 = 0.2;
const OPEN_BELOW: f32 = 0.7;

// ── Resolution ───────────────────────────────────────────────────────────────

/// Read-only inputs shared by every cell of one frame.
pub struct TileContext<'a> {
    pub terrain: &'a Grid<Terrain>,
    pub field: &'a StableRandomField,
    pub player: GridPos,
}

impl TileContext<'_> {
    /// Concrete terrain tile for `pos`, or `None` outside the grid.
    pub fn resolve_terrain(&self, pos: GridPos) -> Option<TileRef> {
        let kind = *self.terrain.get(pos)?;
        let rand = self.field.at(pos);
        let code = NeighborCode::compute(self.terrain, pos, ClassSet::OPEN_GROUND);

        let tile = match kind {
            Terrain::VerticalWall => VERTICAL_WALL.resolve(code),
            Terrain::HorizontalWall => HORIZONTAL_WALL.resolve(code),
            Terrain::Floor => atlas::lookup(SpriteId::Floor, 0, rand),
            Terrain::Door => {
                let near = distance_manhattan(pos, self.player) <= 1;
                if near && OPEN_PASSAGE.contains(&code.0) {
                    atlas::lookup(SpriteId::Floor, 0, rand)
                } else {
                    DOOR.resolve(code)
                }
            }
            Terrain::Tunnel => {
                if rand <= RUBBLE_BELOW {
                    TUNNEL_RUBBLE
                } else if rand <= OPEN_BELOW {
                    TUNNEL_OPEN
                } else if NeighborCode::compute(self.terrain, pos, ClassSet::DOORS) == NeighborCode::ALL {
                    TUNNEL_BLOCKED
                } else {
                    TUNNEL_RUBBLE
                }
            }
            Terrain::Trap => TRAP,
            Terrain::Empty => BACKDROP,
        };
        Some(tile)
    }
}

/// Foreground tile for an entity; `None` means nothing is drawn.
///
/// The player is never drawn here: its sprite always goes at the viewport
/// centre in a separate pass.
pub fn resolve_entity(entity: Entity, clock: &AnimationClock) -> Option<TileRef> {
    match entity {
        Entity::None | Entity::Player => None,
        Entity::Monster(kind) => {
            let frame = clock.frame(AnimKey::for_monster(kind));
            Some(atlas::lookup(SpriteId::Monster(kind), frame, 0.0))
        }
        Entity::Loot(kind) => Some(atlas::lookup(SpriteId::Loot(kind), 0, 0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_binary_literal() {
        assert_eq!(NeighborCode::parse("00001010"), Some(NeighborCode(0b0000_1010)));
        assert_eq!(NeighborCode::parse("1111100"), None);
        assert_eq!(NeighborCode::parse("1111100x"), None);
    }

    #[test]
    fn display_is_eight_digits() {
        assert_eq!(NeighborCode(0b0000_0101).to_string(), "00000101");
    }

    #[test]
    fn class_set_membership() {
        assert!(ClassSet::OPEN_GROUND.contains(Terrain::Tunnel));
        assert!(ClassSet::OPEN_GROUND.contains(Terrain::Empty));
        assert!(!ClassSet::OPEN_GROUND.contains(Terrain::Floor));
        assert!(ClassSet::DOORS.contains(Terrain::Door));
    }
}
