use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::foundation::error::{GardenError, GardenResult};

/// Width of every glyph in the built-in table, in font pixels.
pub const DEFAULT_GLYPH_WIDTH: usize = 5;
/// Height of every glyph in the built-in table, in font pixels.
pub const DEFAULT_GLYPH_HEIGHT: usize = 5;

/// Heart glyph character understood by the built-in table.
pub const HEART: char = '♥';

const DEFAULT_PATTERNS: &[(char, [&str; DEFAULT_GLYPH_HEIGHT])] = &[
    ('A', ["01110", "10001", "11111", "10001", "10001"]),
    ('B', ["11110", "10001", "11110", "10001", "11110"]),
    ('C', ["01111", "10000", "10000", "10000", "01111"]),
    ('E', ["11111", "10000", "11110", "10000", "11111"]),
    ('F', ["11111", "10000", "11110", "10000", "10000"]),
    ('H', ["10001", "10001", "11111", "10001", "10001"]),
    ('L', ["10000", "10000", "10000", "10000", "11111"]),
    ('O', ["01110", "10001", "10001", "10001", "01110"]),
    ('R', ["11110", "10001", "11110", "10010", "10001"]),
    ('U', ["10001", "10001", "10001", "10001", "01110"]),
    ('V', ["10001", "10001", "10001", "01010", "00100"]),
    ('Y', ["10001", "01010", "00100", "00100", "00100"]),
    (' ', ["00000", "00000", "00000", "00000", "00000"]),
    (HEART, ["01010", "11111", "11111", "01110", "00100"]),
];

static DEFAULT_TABLE: LazyLock<GlyphTable> = LazyLock::new(|| {
    let mut table = GlyphTable::empty(DEFAULT_GLYPH_WIDTH, DEFAULT_GLYPH_HEIGHT);
    for (ch, rows) in DEFAULT_PATTERNS {
        table.glyphs.insert(*ch, Glyph::from_rows_unchecked(rows));
    }
    table
});

/// One bitmap glyph, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    bits: Vec<bool>,
}

impl Glyph {
    fn from_rows_unchecked(rows: &[&str]) -> Self {
        let bits = rows
            .iter()
            .flat_map(|row| row.bytes().map(|b| b == b'1'))
            .collect();
        Self { bits }
    }

    /// Whether the font pixel at `(row, col)` is set.
    pub fn is_on(&self, width: usize, row: usize, col: usize) -> bool {
        self.bits.get(row * width + col).copied().unwrap_or(false)
    }

    /// Number of set font pixels.
    pub fn on_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Fixed-size bitmap font: every glyph shares one width and height.
///
/// The table is plain data. Callers may start from [`GlyphTable::default`] and
/// [`insert`](GlyphTable::insert) more glyphs, or build a table from scratch with
/// [`GlyphTable::from_patterns`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphTable {
    width: usize,
    height: usize,
    glyphs: BTreeMap<char, Glyph>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl GlyphTable {
    /// A table with no glyphs; every character renders blank.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: BTreeMap::new(),
        }
    }

    /// Build a table from `(char, rows)` patterns made of `'0'`/`'1'`.
    pub fn from_patterns<'a, I, R>(width: usize, height: usize, patterns: I) -> GardenResult<Self>
    where
        I: IntoIterator<Item = (char, R)>,
        R: AsRef<[&'a str]>,
    {
        let mut table = Self::empty(width, height);
        for (ch, rows) in patterns {
            table.insert(ch, rows.as_ref())?;
        }
        Ok(table)
    }

    /// Add or replace one glyph. Characters are stored uppercased.
    pub fn insert(&mut self, ch: char, rows: &[&str]) -> GardenResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GardenError::validation("glyph width/height must be > 0"));
        }
        if rows.len() != self.height {
            return Err(GardenError::validation(format!(
                "glyph '{ch}' has {} rows, expected {}",
                rows.len(),
                self.height
            )));
        }
        for row in rows {
            if row.len() != self.width {
                return Err(GardenError::validation(format!(
                    "glyph '{ch}' row \"{row}\" has width {}, expected {}",
                    row.len(),
                    self.width
                )));
            }
            if row.bytes().any(|b| b != b'0' && b != b'1') {
                return Err(GardenError::validation(format!(
                    "glyph '{ch}' row \"{row}\" must contain only '0' and '1'"
                )));
            }
        }
        self.glyphs
            .insert(normalize_char(ch), Glyph::from_rows_unchecked(rows));
        Ok(())
    }

    /// Glyph width in font pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Glyph height in font pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Exact lookup (after uppercasing).
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&normalize_char(ch))
    }

    /// Whether `ch` has its own glyph (as opposed to rendering as a space).
    pub fn contains(&self, ch: char) -> bool {
        self.get(ch).is_some()
    }

    /// Lookup with the space fallback; `None` means a blank cell.
    pub(crate) fn resolve(&self, ch: char) -> Option<&Glyph> {
        self.get(ch).or_else(|| self.glyphs.get(&' '))
    }
}

pub(crate) fn normalize_char(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => ch,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/glyphs.rs"]
mod tests;
