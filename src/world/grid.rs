use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::GridPos;

// ── Grid ─────────────────────────────────────────────────────────────────────

/// Cell count of a `width × height` grid, computed without `u32` overflow.
pub fn cell_count(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize)
}

/// Row-major `width × height` storage indexed by signed grid positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, cells: vec![T::default(); cell_count(width, height)] }
    }
}

impl<T> Grid<T> {
    /// Build from row-major cells. Returns `None` when the length is wrong.
    pub fn from_cells(width: u32, height: u32, cells: Vec<T>) -> Option<Self> {
        (cells.len() == cell_count(width, height)).then_some(Self { width, height, cells })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// `true` for cells in the outermost ring; their 3×3 block leaves the grid.
    pub fn on_border(&self, pos: GridPos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x as u32 == self.width.saturating_sub(1)
            || pos.y as u32 == self.height.saturating_sub(1)
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.x as usize + pos.y as usize * self.width as usize)
    }

    pub fn get(&self, pos: GridPos) -> Option<&T> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    pub fn set(&mut self, pos: GridPos, value: T) {
        if let Some(cell) = self.get_mut(pos) {
            *cell = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}

// ── StableRandomField ────────────────────────────────────────────────────────

/// One value in `[0, 1)` per cell, fixed for the lifetime of a scene so tile
/// variants never flicker between redraws.
#[derive(Clone, Debug, PartialEq)]
pub struct StableRandomField {
    seed: u64,
    values: Grid<f32>,
}

impl StableRandomField {
    pub fn generate(width: u32, height: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cells = (0..cell_count(width, height)).map(|_| rng.gen_range(0.0..1.0)).collect();
        let values = Grid { width, height, cells };
        Self { seed, values }
    }

    /// Wrap precomputed values. Values are clamped into `[0, 1)`.
    pub fn from_grid(mut values: Grid<f32>, seed: u64) -> Self {
        for v in &mut values.cells {
            *v = v.clamp(0.0, 0.999_999);
        }
        Self { seed, values }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> u32 {
        self.values.width()
    }

    pub fn height(&self) -> u32 {
        self.values.height()
    }

    /// Value for `pos`; cells outside the field read as `0.0`.
    pub fn at(&self, pos: GridPos) -> f32 {
        self.values.get(pos).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_in_unit_interval() {
        let f = StableRandomField::generate(30, 10, 7);
        assert!(f.values.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(StableRandomField::generate(8, 8, 42), StableRandomField::generate(8, 8, 42));
    }

    #[test]
    fn cell_count_does_not_overflow_u32() {
        assert_eq!(cell_count(3, 4), 12);
        assert_eq!(cell_count(u32::MAX, 2), u32::MAX as usize * 2);
        let g: Option<Grid<u8>> = Grid::from_cells(u32::MAX, u32::MAX, Vec::new());
        assert!(g.is_none());
    }

    #[test]
    fn border_detection() {
        let g: Grid<u8> = Grid::new(4, 3);
        assert!(g.on_border(GridPos::new(0, 1)));
        assert!(g.on_border(GridPos::new(3, 1)));
        assert!(g.on_border(GridPos::new(1, 2)));
        assert!(!g.on_border(GridPos::new(1, 1)));
    }
}
