//! Frame composition.
//!
//! Turns one engine snapshot plus the view's own state into a flat list of
//! draws in overlay units (one unit = one view cell). The renderer only has
//! to map overlay units to pixels and tiles to UVs.

use crate::anim::{AnimKey, AnimationClock};
use crate::autotile::{TileContext, resolve_entity};
use crate::geometry::{Rect, ViewWindow};
use crate::renderer::atlas::{self, BACKDROP, SpriteId, TileRef};
use crate::ui::Page;
use crate::world::{PlayerStats, Snapshot, StableRandomField, Terrain};

// ── Color ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const GRAY: Self = Self([0.6, 0.6, 0.6, 1.0]);
    pub const RED: Self = Self([1.0, 0.25, 0.2, 1.0]);
    pub const YELLOW: Self = Self([1.0, 0.9, 0.3, 1.0]);
}

// ── Draws ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileDraw {
    pub tile: TileRef,
    pub dest: Rect,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectDraw {
    pub rect: Rect,
    pub color: Color,
}

/// A run of monospaced text; every char occupies one `cell` in overlay units.
#[derive(Clone, Debug, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub origin: [f32; 2],
    pub cell: [f32; 2],
    pub color: Color,
}

/// Everything drawn in one frame, back to front: tiles, rects, text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub tiles: Vec<TileDraw>,
    pub rects: Vec<RectDraw>,
    pub texts: Vec<TextDraw>,
}

fn cell_rect(ox: i32, oy: i32) -> Rect {
    Rect::from_origin(ox as f32, oy as f32, 1.0, 1.0)
}

// ── World layer ──────────────────────────────────────────────────────────────

/// Tiles for the window of `2 * radius + 1` cells around the player.
///
/// Order: backdrop and terrain, entities, animated trap arrows, player.
/// Window cells outside the grid produce nothing.
pub fn compose_world(
    snapshot: &Snapshot,
    field: &StableRandomField,
    clock: &AnimationClock,
    radius: u32,
) -> Vec<TileDraw> {
    let window = ViewWindow::new(radius, snapshot.player);
    let ctx = TileContext { terrain: &snapshot.terrain, field, player: snapshot.player };

    let mut ground = Vec::new();
    let mut occupants = Vec::new();
    let mut overlays = Vec::new();

    for (ox, oy) in window.cells() {
        let pos = window.to_grid(ox, oy);
        let Some(tile) = ctx.resolve_terrain(pos) else { continue };
        let dest = cell_rect(ox, oy);

        ground.push(TileDraw { tile: BACKDROP, dest });
        if tile != BACKDROP {
            ground.push(TileDraw { tile, dest });
        }

        let entity = snapshot.entities.get(pos).copied().unwrap_or_default();
        if let Some(tile) = resolve_entity(entity, clock) {
            occupants.push(TileDraw { tile, dest });
        }

        if snapshot.terrain.get(pos) == Some(&Terrain::Trap) && oy > 0 {
            let tile = atlas::lookup(SpriteId::TrapArrows, clock.frame(AnimKey::Arrows), 0.0);
            overlays.push(TileDraw { tile, dest: cell_rect(ox, oy - 1) });
        }
    }

    let centre = window.radius;
    let player = TileDraw { tile: atlas::lookup(SpriteId::Player, 0, 0.0), dest: cell_rect(centre, centre) };

    ground.extend(occupants);
    ground.extend(overlays);
    ground.push(player);
    ground
}

// ── Overlay layer ────────────────────────────────────────────────────────────

/// Fixed overlay geometry, derived from the view size and text settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    pub view_cells: f32,
    pub message_box: Rect,
    pub prev_arrow: Rect,
    pub next_arrow: Rect,
    pub stat_origin: [f32; 2],
    pub stat_cell: [f32; 2],
    pub text_cell: [f32; 2],
    pub input_origin: [f32; 2],
    pub line_width: usize,
    pub lines_per_page: usize,
}

const BOX_PAD: f32 = 0.25;
const ARROW_W: f32 = 0.6;

impl Layout {
    pub fn new(view_cells: u32, line_width: usize, lines_per_page: usize) -> Self {
        let side = view_cells as f32;
        let lines = lines_per_page.max(1);
        let box_h = lines as f32;
        let message_box = Rect::from_origin(0.5, side - 0.5 - box_h, side - 1.0, box_h);

        let text_w = message_box.width() - 2.0 * BOX_PAD - ARROW_W;
        let text_cell = [text_w / line_width.max(1) as f32, (box_h - 2.0 * BOX_PAD) / lines as f32];

        let arrow_x = message_box.x1 - BOX_PAD - ARROW_W;
        let prev_arrow = Rect::from_origin(arrow_x, message_box.y0 + BOX_PAD, ARROW_W, ARROW_W);
        let next_arrow =
            Rect::from_origin(arrow_x, message_box.y1 - BOX_PAD - ARROW_W, ARROW_W, ARROW_W);

        Self {
            view_cells: side,
            message_box,
            prev_arrow,
            next_arrow,
            stat_origin: [0.5, 0.25],
            stat_cell: [0.4, 0.6],
            text_cell,
            input_origin: [0.5, side - 0.45],
            line_width,
            lines_per_page: lines,
        }
    }

    /// Overlay rect of the view cell `(ox, oy)`.
    pub fn cell(&self, ox: i32, oy: i32) -> Rect {
        cell_rect(ox, oy)
    }
}

/// What the overlay shows this frame.
pub struct OverlayModel<'a> {
    /// `None` hides the stat block (race selection).
    pub stats: Option<PlayerStats>,
    pub page: Option<&'a Page>,
    pub has_prev: bool,
    pub has_next: bool,
    /// Centred banner, e.g. the end-of-run summary.
    pub banner: Option<String>,
    pub input: &'a str,
    pub input_error: bool,
}

fn outline(rect: Rect, thickness: f32, color: Color, out: &mut Vec<RectDraw>) {
    let t = thickness;
    out.push(RectDraw { rect: Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + t), color });
    out.push(RectDraw { rect: Rect::new(rect.x0, rect.y1 - t, rect.x1, rect.y1), color });
    out.push(RectDraw { rect: Rect::new(rect.x0, rect.y0, rect.x0 + t, rect.y1), color });
    out.push(RectDraw { rect: Rect::new(rect.x1 - t, rect.y0, rect.x1, rect.y1), color });
}

/// HUD stats, message box with the current page, page arrows, banner and
/// the command line.
pub fn compose_overlay(model: &OverlayModel<'_>, layout: &Layout) -> (Vec<RectDraw>, Vec<TextDraw>) {
    let mut rects = Vec::new();
    let mut texts = Vec::new();

    if let Some(stats) = model.stats {
        let rows = [
            format!("Hp   {}", stats.hp),
            format!("Atk  {}", stats.atk),
            format!("Def  {}", stats.def),
            format!("Gold {}", stats.gold),
        ];
        let [x, y] = layout.stat_origin;
        for (i, text) in rows.into_iter().enumerate() {
            texts.push(TextDraw {
                text,
                origin: [x, y + i as f32 * layout.stat_cell[1]],
                cell: layout.stat_cell,
                color: Color::WHITE,
            });
        }
    }

    if let Some(page) = model.page {
        let b = layout.message_box;
        outline(b.inset(-0.125), 1.0 / 64.0, Color::WHITE, &mut rects);
        outline(b, 3.0 / 64.0, Color::WHITE, &mut rects);
        rects.push(RectDraw { rect: b.inset(0.125), color: Color::BLACK });

        for (i, line) in page.lines.iter().enumerate() {
            texts.push(TextDraw {
                text: line.clone(),
                origin: [b.x0 + BOX_PAD, b.y0 + BOX_PAD + i as f32 * layout.text_cell[1]],
                cell: layout.text_cell,
                color: Color::WHITE,
            });
        }
        for (shown, rect, glyph) in [
            (model.has_prev, layout.prev_arrow, "\u{2191}"),
            (model.has_next, layout.next_arrow, "\u{2193}"),
        ] {
            if shown {
                texts.push(TextDraw {
                    text: glyph.to_string(),
                    origin: [rect.x0, rect.y0],
                    cell: [rect.width(), rect.height()],
                    color: Color::YELLOW,
                });
            }
        }
    }

    if let Some(banner) = &model.banner {
        let cell = [0.45, 0.8];
        let width = banner.chars().count() as f32 * cell[0];
        let x = ((layout.view_cells - width) / 2.0).max(0.0);
        let y = layout.view_cells / 2.0 - 2.0;
        rects.push(RectDraw {
            rect: Rect::from_origin(x - 0.2, y - 0.1, width + 0.4, cell[1] + 0.2),
            color: Color::BLACK,
        });
        texts.push(TextDraw { text: banner.clone(), origin: [x, y], cell, color: Color::YELLOW });
    }

    texts.push(TextDraw {
        text: format!("> {}", model.input),
        origin: layout.input_origin,
        cell: [0.3, 0.4],
        color: if model.input_error { Color::RED } else { Color::GRAY },
    });

    (rects, texts)
}
