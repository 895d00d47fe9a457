//! Tile atlas lookup: semantic sprite requests → source rectangles → UVs.
//!
//! Everything here is pure data; the GPU texture that the UVs index into is
//! owned by [`SpriteAtlas`](super::sprite_atlas::SpriteAtlas).

use std::collections::HashMap;

use crate::world::{LootKind, MonsterKind};

/// Pixel size of one cell on the tileset and most monster sheets.
pub const TILE_PX: u32 = 16;

// ── Sheet ────────────────────────────────────────────────────────────────────

/// One named image asset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sheet {
    Tileset,
    Player,
    Dragon,
    Merchant,
    Goblin,
    Troll,
    Vampire,
    Werewolf,
    Phoenix,
    Arrows,
    Armour,
    Font,
}

impl Sheet {
    pub const ALL: [Sheet; 12] = [
        Sheet::Tileset,
        Sheet::Player,
        Sheet::Dragon,
        Sheet::Merchant,
        Sheet::Goblin,
        Sheet::Troll,
        Sheet::Vampire,
        Sheet::Werewolf,
        Sheet::Phoenix,
        Sheet::Arrows,
        Sheet::Armour,
        Sheet::Font,
    ];

    /// File stem of the PNG in the asset folder.
    pub fn file_stem(self) -> &'static str {
        match self {
            Sheet::Tileset => "Dungeon_Tileset",
            Sheet::Player => "Dungeon_Character",
            Sheet::Dragon => "AdultRedDragonIdleSide",
            Sheet::Merchant => "GnomeWandererIdleSide",
            Sheet::Goblin => "GoblinFanaticIdleSide",
            Sheet::Troll => "SwampTrollIdleSide",
            Sheet::Vampire => "vampire",
            Sheet::Werewolf => "WerewolfStalkerIdleSide",
            Sheet::Phoenix => "PoisonDrakeIdleSide",
            Sheet::Arrows => "arrows",
            Sheet::Armour => "armour",
            Sheet::Font => "font",
        }
    }

    /// Case-insensitive match on a file stem.
    pub fn from_stem(stem: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.file_stem().eq_ignore_ascii_case(stem))
    }

    pub fn for_monster(kind: MonsterKind) -> Self {
        match kind {
            MonsterKind::Vampire => Sheet::Vampire,
            MonsterKind::Werewolf => Sheet::Werewolf,
            MonsterKind::Merchant => Sheet::Merchant,
            MonsterKind::Goblin => Sheet::Goblin,
            MonsterKind::Dragon => Sheet::Dragon,
            MonsterKind::Troll => Sheet::Troll,
            MonsterKind::Phoenix => Sheet::Phoenix,
        }
    }
}

// ── TileRef ──────────────────────────────────────────────────────────────────

/// A square tile on a sheet, addressed by column/row in units of `size` pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub sheet: Sheet,
    pub col: u32,
    pub row: u32,
    pub size: u32,
}

impl TileRef {
    /// A 16px tile on the dungeon tileset.
    pub const fn tileset(col: u32, row: u32) -> Self {
        Self { sheet: Sheet::Tileset, col, row, size: TILE_PX }
    }

    pub const fn on(sheet: Sheet, col: u32, row: u32, size: u32) -> Self {
        Self { sheet, col, row, size }
    }

    pub fn source_rect(&self) -> SourceRect {
        SourceRect {
            x: self.col * self.size,
            y: self.row * self.size,
            w: self.size,
            h: self.size,
        }
    }
}

/// Pixel rectangle inside a single sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

// ── Sprite lookup ────────────────────────────────────────────────────────────

/// Logical sprites that are not chosen by neighbourhood.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// Dark fill under every in-grid cell.
    Backdrop,
    Floor,
    Monster(MonsterKind),
    Loot(LootKind),
    Player,
    /// Bouncing arrow drawn above a trap.
    TrapArrows,
}

pub const BACKDROP: TileRef = TileRef::tileset(8, 7);

/// Map a sprite request to its tile.
///
/// `frame` selects the column of animated strips; `variant` is a stable
/// random value in `[0, 1)` used by decorative variants.
pub fn lookup(sprite: SpriteId, frame: u32, variant: f32) -> TileRef {
    match sprite {
        SpriteId::Backdrop => BACKDROP,
        SpriteId::Floor => {
            let v = variant.clamp(0.0, 0.999_999);
            TileRef::tileset(6 + (v * 2.0) as u32, (v * 3.0) as u32)
        }
        SpriteId::Monster(kind) => TileRef::on(Sheet::for_monster(kind), frame, 0, TILE_PX),
        SpriteId::Loot(LootKind::Gold) => TileRef::tileset(6, 8),
        SpriteId::Loot(LootKind::Potion) => TileRef::tileset(9, 8),
        SpriteId::Loot(LootKind::Compass) => TileRef::tileset(9, 9),
        SpriteId::Loot(LootKind::BarrierSuit) => TileRef::on(Sheet::Armour, 1, 0, 32),
        SpriteId::Player => TileRef::on(Sheet::Player, 6, 2, TILE_PX),
        SpriteId::TrapArrows => TileRef::on(Sheet::Arrows, frame, 0, TILE_PX),
    }
}

// ── PackedAtlas ──────────────────────────────────────────────────────────────

/// Where a sheet landed inside the packed texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SheetPlacement {
    pub atlas_x: u32,
    pub atlas_y: u32,
    pub width: u32,
    pub height: u32,
}

/// Layout of every loaded sheet inside one texture.
#[derive(Clone, Debug, Default)]
pub struct PackedAtlas {
    pub width: u32,
    pub height: u32,
    pub sheets: HashMap<Sheet, SheetPlacement>,
}

impl PackedAtlas {
    /// Normalised `(uv_min, uv_max)` for a pixel rectangle on `sheet`.
    ///
    /// Returns `None` when the sheet is not loaded or the rectangle falls off
    /// the edge of the sheet; callers skip the draw.
    pub fn uv_for_rect(&self, sheet: Sheet, rect: SourceRect) -> Option<([f32; 2], [f32; 2])> {
        let p = self.sheets.get(&sheet)?;
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if rect.x + rect.w > p.width || rect.y + rect.h > p.height {
            return None;
        }
        let total_w = self.width as f32;
        let total_h = self.height as f32;
        let x0 = (p.atlas_x + rect.x) as f32;
        let y0 = (p.atlas_y + rect.y) as f32;
        Some((
            [x0 / total_w, y0 / total_h],
            [(x0 + rect.w as f32) / total_w, (y0 + rect.h as f32) / total_h],
        ))
    }

    pub fn uv_for(&self, tile: &TileRef) -> Option<([f32; 2], [f32; 2])> {
        self.uv_for_rect(tile.sheet, tile.source_rect())
    }
}
