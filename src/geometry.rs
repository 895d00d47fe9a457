// =============================================================================
// GEOMETRY.RS: Grid positions, rectangles and viewport window math
//
// - Grid positions and Manhattan distance (door proximity)
// - Inclusive rectangles in overlay units (click regions, message box)
// - Mapping between view cells and grid cells around the player
// =============================================================================

/// A cell coordinate on the engine's grid. Signed so that viewport math can
/// produce positions outside the grid without wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Calculate Manhattan distance between two points.
/// Also known as "taxicab distance" - the distance traveling only
/// along grid axes (no diagonals).
#[inline]
pub fn distance_manhattan(a: GridPos, b: GridPos) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

// =============================================================================
// RECTANGLES
// =============================================================================

/// Axis-aligned rectangle with **inclusive** edges on all four sides.
///
/// Coordinates are in overlay units, where one unit is one view cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build from an origin and a size.
    pub fn from_origin(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x0: x, y0: y, x1: x + w, y1: y + h }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// A point on any edge counts as inside.
    pub fn contains(&self, point: [f32; 2]) -> bool {
        let [px, py] = point;
        px >= self.x0 && px <= self.x1 && py >= self.y0 && py <= self.y1
    }

    /// Shrink (positive `by`) or grow (negative `by`) on every side.
    pub fn inset(&self, by: f32) -> Self {
        Self { x0: self.x0 + by, y0: self.y0 + by, x1: self.x1 - by, y1: self.y1 - by }
    }
}

// =============================================================================
// VIEWPORT WINDOW
// =============================================================================

/// Widest radius a view window accepts; larger values are clamped.
pub const MAX_VIEW_RADIUS: u32 = 256;

/// Square window of `(2 * radius + 1)` cells per side centred on the player.
///
/// View cell `(0, 0)` is the top-left corner; the player always sits at
/// view cell `(radius, radius)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewWindow {
    pub radius: i32,
    pub center: GridPos,
}

impl ViewWindow {
    pub fn new(radius: u32, center: GridPos) -> Self {
        Self { radius: radius.min(MAX_VIEW_RADIUS) as i32, center }
    }

    /// Number of cells along each side.
    pub fn side(&self) -> i32 {
        2 * self.radius + 1
    }

    /// Grid cell shown at view cell `(ox, oy)`.
    pub fn to_grid(&self, ox: i32, oy: i32) -> GridPos {
        GridPos::new(self.center.x + ox - self.radius, self.center.y + oy - self.radius)
    }

    /// View cell showing grid cell `pos`, if it is inside the window.
    pub fn to_view(&self, pos: GridPos) -> Option<(i32, i32)> {
        let ox = pos.x - self.center.x + self.radius;
        let oy = pos.y - self.center.y + self.radius;
        let side = self.side();
        (ox >= 0 && oy >= 0 && ox < side && oy < side).then_some((ox, oy))
    }

    /// Every view cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let side = self.side();
        (0..side).flat_map(move |oy| (0..side).map(move |ox| (ox, oy)))
    }
}
