// ── ViewConfig ────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::anim::{TrackSpec, default_tracks};
use crate::geometry::MAX_VIEW_RADIUS;
use crate::error::{Result, ViewError};

/// Everything the view can be tuned with. Every field has a default, so a
/// config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub title: String,
    /// Initial window size in physical pixels.
    pub window_width: u32,
    pub window_height: u32,
    /// Cells shown on each side of the player; the view is `2r + 1` cells wide.
    pub view_radius: u32,
    /// Columns per message line.
    pub line_width: usize,
    pub lines_per_page: usize,
    /// Folder holding the sprite sheets and `font.json`.
    pub assets_dir: PathBuf,
    /// Seed for the first scene's random field; random when absent.
    pub seed: Option<u64>,
    pub animations: Vec<TrackSpec>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "crawlview".into(),
            window_width: 720,
            window_height: 720,
            view_radius: 7,
            line_width: 33,
            lines_per_page: 2,
            assets_dir: PathBuf::from("assets"),
            seed: None,
            animations: default_tracks(),
        }
    }
}

impl ViewConfig {
    /// Parse a config. `view_radius` is clamped to [`MAX_VIEW_RADIUS`].
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Copy with out-of-range values pulled back into range.
    pub fn clamped(mut self) -> Self {
        if self.view_radius > MAX_VIEW_RADIUS {
            tracing::warn!(view_radius = self.view_radius, max = MAX_VIEW_RADIUS, "view radius clamped");
            self.view_radius = MAX_VIEW_RADIUS;
        }
        self
    }

    /// Read `path`. A missing file gives the defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ViewError::Io { path: path.to_path_buf(), source }),
        };
        Self::from_json(&text).map_err(|source| ViewError::Json { path: path.to_path_buf(), source })
    }

    /// Cells along one side of the square view.
    pub fn view_cells(&self) -> u32 {
        2 * self.view_radius.min(MAX_VIEW_RADIUS) + 1
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_fifteen_cell_view() {
        let c = ViewConfig::default();
        assert_eq!(c.view_cells(), 15);
        assert_eq!(c.line_width, 33);
        assert_eq!(c.lines_per_page, 2);
        assert_eq!(c.animations.len(), 8);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let c = ViewConfig::from_json(r#"{ "view_radius": 4, "seed": 9 }"#).unwrap();
        assert_eq!(c.view_radius, 4);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.lines_per_page, 2);
    }

    #[test]
    fn animation_overrides_parse() {
        let c = ViewConfig::from_json(
            r#"{ "animations": [ { "key": "arrows", "frame_count": 2, "frame_ms": 100 } ] }"#,
        )
        .unwrap();
        assert_eq!(c.animations.len(), 1);
        assert_eq!(c.animations[0].start_frame, 0);
    }

    #[test]
    fn absurd_radius_is_clamped() {
        let c = ViewConfig::from_json(r#"{ "view_radius": 4294967295 }"#).unwrap();
        assert_eq!(c.view_radius, MAX_VIEW_RADIUS);
        let raw = ViewConfig { view_radius: u32::MAX, ..ViewConfig::default() };
        assert_eq!(raw.view_cells(), 2 * MAX_VIEW_RADIUS + 1);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let c = ViewConfig::load(Path::new("/definitely/not/here.json")).unwrap();
        assert_eq!(c, ViewConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewConfig::from_json("{ not json").is_err());
    }
}
