pub use kurbo::{Point, Rect};

/// Side length of the square garden canvas, in percentage units.
pub const CANVAS_EXTENT: f64 = 100.0;

/// The whole garden canvas as a rectangle in percentage space.
pub fn canvas_rect() -> Rect {
    Rect::new(0.0, 0.0, CANVAS_EXTENT, CANVAS_EXTENT)
}

/// Inclusive containment check; `kurbo::Rect::contains` excludes the far edges.
pub fn rect_contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
