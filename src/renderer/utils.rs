// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// The view is square: `cells × cells` overlay units. It is scaled uniformly to
// the largest square that fits the window and centred on both axes.

/// Axis-aligned rectangle in physical pixels that centres the square view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Map a window pixel to overlay units, or `None` when it lies in the bars.
    pub fn to_overlay(&self, pixel: [f32; 2], cells: f32) -> Option<[f32; 2]> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let u = (pixel[0] - self.x) / self.width;
        let v = (pixel[1] - self.y) / self.height;
        ((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)).then_some([u * cells, v * cells])
    }
}

/// Letterbox a square view inside a `physical_width × physical_height` window.
///
/// Returns a zero-sized viewport when either window dimension is zero.
pub fn letterbox_viewport(physical_width: u32, physical_height: u32) -> Viewport {
    if physical_width == 0 || physical_height == 0 {
        return Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }

    let pw = physical_width  as f32;
    let ph = physical_height as f32;
    let side = pw.min(ph);

    Viewport { x: (pw - side) / 2.0, y: (ph - side) / 2.0, width: side, height: side }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_window_fills() {
        let v = letterbox_viewport(720, 720);
        assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 720.0, height: 720.0 });
    }

    #[test]
    fn wide_window_gets_side_bars() {
        let v = letterbox_viewport(1280, 720);
        assert!((v.x - 280.0).abs() < 1e-3, "x={}", v.x);
        assert_eq!(v.y, 0.0);
        assert_eq!(v.width, 720.0);
    }

    #[test]
    fn tall_window_gets_top_bars() {
        let v = letterbox_viewport(600, 1000);
        assert_eq!(v.x, 0.0);
        assert!((v.y - 200.0).abs() < 1e-3, "y={}", v.y);
    }

    #[test]
    fn zero_window_is_empty() {
        assert_eq!(letterbox_viewport(0, 720).width, 0.0);
    }

    #[test]
    fn pixels_in_bars_do_not_map() {
        let v = letterbox_viewport(1280, 720);
        assert_eq!(v.to_overlay([100.0, 300.0], 15.0), None);
        let p = v.to_overlay([280.0 + 360.0, 360.0], 15.0).unwrap();
        assert!((p[0] - 7.5).abs() < 1e-4 && (p[1] - 7.5).abs() < 1e-4);
    }
}
