use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::atlas::{PackedAtlas, Sheet, SourceRect};
use super::pipeline::{MODE_TEXTURED, TileVertex, push_quad};
use crate::compose::TextDraw;
use crate::error::{Result, ViewError};
use crate::geometry::Rect;

// ── Font ─────────────────────────────────────────────────────────────────────

/// A monospaced bitmap font: glyph rectangles on the `font` sheet.
#[derive(Debug, Default)]
pub struct Font {
    pub glyphs: HashMap<char, SourceRect>,
    /// Tallest glyph, in sheet pixels.
    pub line_height: u32,
}

/// Stand-ins for glyphs a small bitmap font often lacks.
fn fallback(ch: char) -> Option<char> {
    match ch {
        '\u{2191}' => Some('^'),
        '\u{2193}' => Some('v'),
        c if c.is_ascii_lowercase() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

impl Font {
    /// Parse the atlas JSON format, keyed by single characters:
    ///
    /// ```json
    /// { "A": { "x": 0, "y": 0, "w": 16, "h": 24 }, ... }
    /// ```
    ///
    /// Extra fields are ignored; multi-character keys are skipped.
    pub fn from_atlas_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct AtlasEntry { x: u32, y: u32, w: u32, h: u32 }

        let raw: HashMap<String, AtlasEntry> = serde_json::from_str(json)?;
        let line_height = raw.values().map(|e| e.h).max().unwrap_or(0);

        let glyphs = raw
            .into_iter()
            .filter_map(|(key, e)| {
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() { return None; }
                Some((ch, SourceRect { x: e.x, y: e.y, w: e.w, h: e.h }))
            })
            .collect();

        Ok(Self { glyphs, line_height })
    }

    /// Read `font.json` from the asset folder.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join("font.json");
        let json = std::fs::read_to_string(&path)
            .map_err(|source| ViewError::Io { path: path.clone(), source })?;
        let font = Self::from_atlas_json(&json).map_err(|source| ViewError::Json { path, source })?;
        tracing::info!(glyphs = font.glyphs.len(), "font loaded");
        Ok(font)
    }

    pub fn glyph(&self, ch: char) -> Option<SourceRect> {
        self.glyphs.get(&ch).or_else(|| fallback(ch).and_then(|c| self.glyphs.get(&c))).copied()
    }
}

// ── Text quads ───────────────────────────────────────────────────────────────

/// Lay `text` out on its monospaced grid and emit one textured quad per
/// drawable glyph. Spaces and missing glyphs advance without drawing.
pub fn text_quads(text: &TextDraw, font: &Font, atlas: &PackedAtlas, out: &mut Vec<TileVertex>) {
    let [x, y] = text.origin;
    let [cw, ch] = text.cell;
    for (i, c) in text.text.chars().enumerate() {
        if c == ' ' {
            continue;
        }
        let Some(rect) = font.glyph(c) else { continue };
        let Some(uv) = atlas.uv_for_rect(Sheet::Font, rect) else { continue };
        let x0 = x + i as f32 * cw;
        push_quad(out, Rect::new(x0, y, x0 + cw, y + ch), uv, text.color, MODE_TEXTURED);
    }
}
