use crate::mask::glyphs::{GlyphTable, normalize_char};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Rasterization options for [`build_text_mask`].
pub struct MaskOptions {
    /// Empty mask columns between adjacent glyphs.
    pub char_spacing: usize,
    /// Empty mask rows between stacked lines.
    pub line_spacing: usize,
    /// Horizontal magnification of each font pixel (values below 1 act as 1).
    pub pixel_scale_x: usize,
    /// Vertical magnification of each font pixel (values below 1 act as 1).
    pub pixel_scale_y: usize,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            char_spacing: 1,
            line_spacing: 2,
            pixel_scale_x: 1,
            pixel_scale_y: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Where a rendered letter came from.
pub struct LetterMeta {
    /// Zero-based source line.
    pub line_index: usize,
    /// Zero-based position among the letters (spaces excluded) of that line.
    pub index_in_line: usize,
    /// Uppercased character.
    pub ch: char,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Boolean occupancy grid produced by rasterizing text lines.
///
/// Cells are stored row-major. Every "on" cell that belongs to a letter maps to that letter's
/// global index; spaces and unknown characters map to `None`.
pub struct TextMask {
    rows: usize,
    cols: usize,
    on: Vec<bool>,
    letter_at: Vec<Option<usize>>,
    letter_meta: Vec<LetterMeta>,
}

impl TextMask {
    /// Mask height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Mask width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True for a 0×0 mask (no lines were given).
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether cell `(row, col)` is on. Out-of-range cells are off.
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.index(row, col)
            .map(|i| self.on[i])
            .unwrap_or(false)
    }

    /// Global letter index owning cell `(row, col)`.
    pub fn letter_at(&self, row: usize, col: usize) -> Option<usize> {
        self.index(row, col).and_then(|i| self.letter_at[i])
    }

    /// Rendered letters in global-index order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letter_meta.iter().map(|m| m.ch)
    }

    /// Per-letter metadata in global-index order.
    pub fn letter_meta(&self) -> &[LetterMeta] {
        &self.letter_meta
    }

    /// Number of on cells.
    pub fn on_count(&self) -> usize {
        self.on.iter().filter(|&&b| b).count()
    }

    /// Text preview, one line per row: `#` for on cells, `.` for off cells.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(if self.is_on(row, col) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

/// Largest mask, in cells, that [`build_text_mask`] will rasterize.
pub const MAX_MASK_CELLS: usize = 1 << 22;

/// Rasterize `lines` through `glyphs` into a [`TextMask`].
///
/// Lines are uppercased and centered horizontally on the widest line. An empty `lines` slice
/// yields an empty mask; any other input yields a well-formed grid, all-off if it contains only
/// spaces. A mask that would exceed [`MAX_MASK_CELLS`] is left empty.
pub fn build_text_mask<S: AsRef<str>>(
    lines: &[S],
    opts: &MaskOptions,
    glyphs: &GlyphTable,
) -> TextMask {
    if lines.is_empty() {
        return TextMask::default();
    }

    let sx = opts.pixel_scale_x.max(1);
    let sy = opts.pixel_scale_y.max(1);

    let normalized: Vec<Vec<char>> = lines
        .iter()
        .map(|l| l.as_ref().chars().map(normalize_char).collect())
        .collect();

    let Some(size) = MaskSize::measure(&normalized, glyphs, opts) else {
        tracing::warn!(
            lines = normalized.len(),
            max_cells = MAX_MASK_CELLS,
            "text mask too large; leaving it empty"
        );
        return TextMask::default();
    };
    let MaskSize {
        rows,
        cols,
        char_w,
        char_h,
        line_widths,
    } = size;

    let mut mask = TextMask {
        rows,
        cols,
        on: vec![false; rows * cols],
        letter_at: vec![None; rows * cols],
        letter_meta: Vec::new(),
    };

    let mut row_cursor = 0;
    for (line_index, line) in normalized.iter().enumerate() {
        let mut col_cursor = (cols - line_widths[line_index]) / 2;
        let mut index_in_line = 0;

        for &ch in line {
            let letter = if ch != ' ' && glyphs.contains(ch) {
                mask.letter_meta.push(LetterMeta {
                    line_index,
                    index_in_line,
                    ch,
                });
                index_in_line += 1;
                Some(mask.letter_meta.len() - 1)
            } else {
                None
            };

            if let Some(glyph) = glyphs.resolve(ch) {
                for gy in 0..glyphs.height() {
                    for gx in 0..glyphs.width() {
                        if !glyph.is_on(glyphs.width(), gy, gx) {
                            continue;
                        }
                        for dy in 0..sy {
                            for dx in 0..sx {
                                let r = row_cursor + gy * sy + dy;
                                let c = col_cursor + gx * sx + dx;
                                let i = r * cols + c;
                                mask.on[i] = true;
                                mask.letter_at[i] = letter;
                            }
                        }
                    }
                }
            }

            col_cursor = col_cursor
                .saturating_add(char_w)
                .saturating_add(opts.char_spacing);
        }

        row_cursor = row_cursor
            .saturating_add(char_h)
            .saturating_add(opts.line_spacing);
    }

    mask
}

/// Mask dimensions, computed with checked arithmetic.
struct MaskSize {
    rows: usize,
    cols: usize,
    char_w: usize,
    char_h: usize,
    line_widths: Vec<usize>,
}

impl MaskSize {
    fn measure(lines: &[Vec<char>], glyphs: &GlyphTable, opts: &MaskOptions) -> Option<Self> {
        let char_w = glyphs.width().checked_mul(opts.pixel_scale_x.max(1))?;
        let char_h = glyphs.height().checked_mul(opts.pixel_scale_y.max(1))?;
        let span = |n: usize, size: usize, gap: usize| -> Option<usize> {
            match n {
                0 => Some(0),
                n => n.checked_mul(size)?.checked_add((n - 1).checked_mul(gap)?),
            }
        };

        let line_widths = lines
            .iter()
            .map(|l| span(l.len(), char_w, opts.char_spacing))
            .collect::<Option<Vec<_>>>()?;
        let cols = line_widths.iter().copied().max().unwrap_or(0);
        let rows = span(lines.len(), char_h, opts.line_spacing)?;
        if rows.checked_mul(cols)? > MAX_MASK_CELLS {
            return None;
        }

        Some(Self {
            rows,
            cols,
            char_w,
            char_h,
            line_widths,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/text.rs"]
mod tests;
