use crawlview::geometry::*;

#[test]
fn test_manhattan_distance() {
    assert_eq!(distance_manhattan(GridPos::new(0, 0), GridPos::new(3, 4)), 7);
    assert_eq!(distance_manhattan(GridPos::new(2, 2), GridPos::new(2, 2)), 0);
    assert_eq!(distance_manhattan(GridPos::new(-1, -1), GridPos::new(1, 1)), 4);
}

#[test]
fn test_rect_contains_edges() {
    let r = Rect::from_origin(0.5, 12.5, 14.0, 2.0);
    assert!(r.contains([0.5, 12.5]));
    assert!(r.contains([14.5, 14.5]));
    assert!(!r.contains([14.51, 13.0]));
    assert!(!r.contains([3.0, 12.4]));
}

#[test]
fn test_rect_inset_both_ways() {
    let r = Rect::new(0.0, 0.0, 4.0, 2.0);
    assert_eq!(r.inset(0.5), Rect::new(0.5, 0.5, 3.5, 1.5));
    assert_eq!(r.inset(-1.0).width(), 6.0);
}

#[test]
fn test_view_window_side() {
    assert_eq!(ViewWindow::new(7, GridPos::default()).side(), 15);
    assert_eq!(ViewWindow::new(0, GridPos::default()).side(), 1);
}

#[test]
fn test_view_window_centre_is_player() {
    let w = ViewWindow::new(7, GridPos::new(3, 3));
    assert_eq!(w.to_grid(7, 7), GridPos::new(3, 3));
    assert_eq!(w.to_grid(0, 0), GridPos::new(-4, -4));
}

#[test]
fn test_view_window_to_view_bounds() {
    let w = ViewWindow::new(2, GridPos::new(10, 10));
    assert_eq!(w.to_view(GridPos::new(8, 12)), Some((0, 4)));
    assert_eq!(w.to_view(GridPos::new(7, 10)), None);
    assert_eq!(w.to_view(GridPos::new(10, 13)), None);
}

#[test]
fn test_view_window_cells_row_major() {
    let w = ViewWindow::new(1, GridPos::default());
    let cells: Vec<_> = w.cells().collect();
    assert_eq!(cells.len(), 9);
    assert_eq!(cells[0], (0, 0));
    assert_eq!(cells[1], (1, 0));
    assert_eq!(cells[8], (2, 2));
}
