use std::collections::{HashMap, HashSet};
use std::path::Path;

use image::RgbaImage;
use wgpu::util::DeviceExt;

use super::atlas::{PackedAtlas, Sheet, SheetPlacement};
use crate::error::{Result, ViewError};

/// Sheets the view cannot draw a frame without.
pub const REQUIRED_SHEETS: [Sheet; 3] = [Sheet::Tileset, Sheet::Player, Sheet::Font];

// ── Shelf packing (pure, GPU-free) ───────────────────────────────────────────

/// One sheet's position inside the packed atlas.
#[derive(Debug, PartialEq)]
pub struct PlacedSheet {
    pub sheet: Sheet,
    pub atlas_x: u32,
    pub atlas_y: u32,
    pub pixel_w: u32,
    pub pixel_h: u32,
}

/// Shelf-pack `(sheet, pixel_w, pixel_h)` items, tallest first.
///
/// Duplicate sheets are skipped (only the first occurrence after sorting is
/// packed). Sheets wider than `max_width` are skipped with a warning.
///
/// Returns `(placements, atlas_pixel_width, atlas_pixel_height)`, both
/// rounded up to the next power of two.
pub fn pack(items: &[(Sheet, u32, u32)], max_width: u32) -> (Vec<PlacedSheet>, u32, u32) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].2.cmp(&items[a].2));

    let mut placed: HashSet<Sheet> = HashSet::new();
    let mut placements: Vec<PlacedSheet> = Vec::new();
    let mut cur_x = 0u32;
    let mut cur_y = 0u32;
    let mut row_h = 0u32;

    for &i in &order {
        let (sheet, w, h) = items[i];
        if !placed.insert(sheet) {
            continue;
        }
        if w > max_width {
            tracing::warn!(sheet = sheet.file_stem(), w, max_width, "sheet wider than atlas; skipping");
            continue;
        }
        if cur_x + w > max_width {
            cur_y += row_h;
            cur_x = 0;
            row_h = 0;
        }
        placements.push(PlacedSheet { sheet, atlas_x: cur_x, atlas_y: cur_y, pixel_w: w, pixel_h: h });
        cur_x += w;
        row_h = row_h.max(h);
    }

    let used_h = cur_y + row_h;
    let atlas_h = used_h.next_power_of_two().max(1);
    let atlas_w = max_width.next_power_of_two();
    (placements, atlas_w, atlas_h)
}

/// Pack decoded sheets into one RGBA image plus the layout describing it.
pub fn compose_atlas(sheets: &[(Sheet, RgbaImage)], max_width: u32) -> (PackedAtlas, RgbaImage) {
    let dims: Vec<(Sheet, u32, u32)> =
        sheets.iter().map(|(sheet, img)| (*sheet, img.width(), img.height())).collect();
    let (placements, atlas_w, atlas_h) = pack(&dims, max_width);

    let lookup: HashMap<Sheet, &RgbaImage> = sheets.iter().map(|(s, i)| (*s, i)).collect();
    let mut image = RgbaImage::new(atlas_w, atlas_h);
    let mut packed = PackedAtlas { width: atlas_w, height: atlas_h, sheets: HashMap::new() };

    for p in &placements {
        let Some(src) = lookup.get(&p.sheet) else { continue };
        for dy in 0..p.pixel_h {
            for dx in 0..p.pixel_w {
                image.put_pixel(p.atlas_x + dx, p.atlas_y + dy, *src.get_pixel(dx, dy));
            }
        }
        packed.sheets.insert(
            p.sheet,
            SheetPlacement { atlas_x: p.atlas_x, atlas_y: p.atlas_y, width: p.pixel_w, height: p.pixel_h },
        );
    }
    (packed, image)
}

/// Walk `dir` for PNGs whose stem names a [`Sheet`] and decode them.
///
/// Unrecognised files are skipped; a missing [`REQUIRED_SHEETS`] entry or an
/// undecodable sheet is an error.
pub fn load_sheets(dir: &Path) -> Result<Vec<(Sheet, RgbaImage)>> {
    if !dir.is_dir() {
        return Err(ViewError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "asset folder not found"),
        });
    }

    let mut loaded: Vec<(Sheet, RgbaImage)> = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let is_png = path.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }
        let Some(sheet) = path.file_stem().and_then(|s| s.to_str()).and_then(Sheet::from_stem) else {
            tracing::debug!(path = %path.display(), "not a known sheet; skipping");
            continue;
        };
        if loaded.iter().any(|(s, _)| *s == sheet) {
            tracing::warn!(path = %path.display(), "duplicate sheet; skipping");
            continue;
        }
        let img = image::open(path)
            .map_err(|source| ViewError::Image { path: path.to_path_buf(), source })?;
        loaded.push((sheet, img.to_rgba8()));
    }

    for sheet in REQUIRED_SHEETS {
        if !loaded.iter().any(|(s, _)| *s == sheet) {
            return Err(ViewError::MissingSheet { sheet, dir: dir.to_path_buf() });
        }
    }
    for sheet in Sheet::ALL {
        if !loaded.iter().any(|(s, _)| *s == sheet) {
            tracing::warn!(sheet = sheet.file_stem(), "optional sheet missing; its sprites won't draw");
        }
    }
    tracing::info!(sheets = loaded.len(), dir = %dir.display(), "sprite sheets loaded");
    Ok(loaded)
}

// ── SpriteAtlas ──────────────────────────────────────────────────────────────

pub struct SpriteAtlas {
    pub packed: PackedAtlas,
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SpriteAtlas {
    /// Maximum row width of the packed atlas texture in pixels.
    pub const ATLAS_WIDTH: u32 = 2048;

    /// Load every sheet under `dir`, pack them and upload the result.
    pub fn load_folder(device: &wgpu::Device, queue: &wgpu::Queue, dir: &Path) -> Result<Self> {
        let sheets = load_sheets(dir)?;
        let (packed, image) = compose_atlas(&sheets, Self::ATLAS_WIDTH);
        tracing::debug!(w = packed.width, h = packed.height, "atlas packed");
        let (texture_view, sampler) = Self::upload(device, queue, &image);
        Ok(Self { packed, texture_view, sampler })
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
    ) -> (wgpu::TextureView, wgpu::Sampler) {
        let (w, h) = img.dimensions();
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("sprite_atlas_tex"),
                size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        (texture_view, sampler)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallest_sheet_goes_first() {
        let items = [(Sheet::Arrows, 64, 16), (Sheet::Tileset, 160, 160)];
        let (pl, _, _) = pack(&items, 512);
        assert_eq!(pl[0].sheet, Sheet::Tileset);
        assert_eq!((pl[1].atlas_x, pl[1].atlas_y), (160, 0));
    }

    #[test]
    fn duplicate_sheet_packed_once() {
        let items = [(Sheet::Font, 16, 24), (Sheet::Font, 64, 64)];
        let (pl, _, _) = pack(&items, 512);
        assert_eq!(pl.len(), 1);
        assert_eq!(pl[0].pixel_w, 64);
    }

    #[test]
    fn missing_folder_is_io_error() {
        let err = load_sheets(Path::new("/no/such/asset/dir")).unwrap_err();
        assert!(matches!(err, ViewError::Io { .. }));
    }
}
