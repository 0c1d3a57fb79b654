use crate::{
    foundation::core::{CANVAS_EXTENT, Point, Rect},
    foundation::prng::SeededRng,
    mask::text::TextMask,
};

/// Highest spawn density (points per on cell); larger densities are clamped to it.
pub const MAX_DENSITY: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Box on the garden canvas that a message is drawn into, in percentage units.
pub struct Bounds {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Left edge; centered horizontally when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// Top edge; centered vertically when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
}

impl Bounds {
    /// A centered box of the given size.
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            offset_x: None,
            offset_y: None,
        }
    }

    /// Resolved left edge.
    pub fn left(&self) -> f64 {
        self.offset_x
            .unwrap_or((CANVAS_EXTENT - self.width) / 2.0)
    }

    /// Resolved top edge.
    pub fn top(&self) -> f64 {
        self.offset_y
            .unwrap_or((CANVAS_EXTENT - self.height) / 2.0)
    }

    /// Resolved box as a rectangle.
    pub fn rect(&self) -> Rect {
        let (x0, y0) = (self.left(), self.top());
        Rect::new(x0, y0, x0 + self.width, y0 + self.height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Candidate placement derived from one on cell of a [`TextMask`].
pub struct SpawnPoint {
    /// Source mask row.
    pub row: usize,
    /// Source mask column.
    pub col: usize,
    /// Running index in generation order.
    pub index: usize,
    /// Canvas position in percentage units.
    pub position: Point,
    /// Global letter index of the source cell.
    pub letter_index: usize,
    /// Text line of the source letter.
    pub line_index: usize,
    /// Source letter.
    pub letter: char,
    /// Species, once assigned by [`crate::assign_species`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

/// Turn the on cells of `mask` into jittered spawn points inside `bounds`.
///
/// `density` is clamped to `[0, MAX_DENSITY]` (NaN counts as 0). Each on cell draws once to
/// resolve its fractional part (the draw happens even for whole densities), then twice per copy for the x/y jitter. `jitter` is a fraction of one
/// cell; points move by at most `jitter / 2` cells from the cell center. Output is row-major,
/// then by copy.
pub fn spawn_points(
    mask: &TextMask,
    bounds: &Bounds,
    density: f64,
    jitter: f64,
    seed: u32,
) -> Vec<SpawnPoint> {
    if mask.is_empty() {
        return Vec::new();
    }

    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, MAX_DENSITY)
    };
    let jitter = if jitter.is_finite() { jitter } else { 0.0 };
    let whole = density.floor();
    let fract = density - whole;
    let whole = whole as usize;

    let cell_w = bounds.width / mask.cols() as f64;
    let cell_h = bounds.height / mask.rows() as f64;
    let (left, top) = (bounds.left(), bounds.top());
    let meta = mask.letter_meta();

    let mut rng = SeededRng::new(seed);
    let mut points = Vec::with_capacity(mask.on_count().saturating_mul(whole.max(1)));

    for row in 0..mask.rows() {
        for col in 0..mask.cols() {
            if !mask.is_on(row, col) {
                continue;
            }
            let Some((letter_index, letter)) = mask
                .letter_at(row, col)
                .and_then(|li| meta.get(li).map(|m| (li, m)))
            else {
                continue;
            };

            let extra = usize::from(rng.next_f64() < fract);
            for _ in 0..whole + extra {
                let jx = (rng.next_f64() - 0.5) * jitter;
                let jy = (rng.next_f64() - 0.5) * jitter;
                points.push(SpawnPoint {
                    row,
                    col,
                    index: points.len(),
                    position: Point::new(
                        left + (col as f64 + 0.5 + jx) * cell_w,
                        top + (row as f64 + 0.5 + jy) * cell_h,
                    ),
                    letter_index,
                    line_index: letter.line_index,
                    letter: letter.ch,
                    species: None,
                });
            }
        }
    }

    points
}

#[cfg(test)]
#[path = "../../tests/unit/spawn/points.rs"]
mod tests;
