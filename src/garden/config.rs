use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use chrono::NaiveDate;

use crate::{
    assets::catalog::VariantCatalog,
    foundation::core::CANVAS_EXTENT,
    foundation::error::{GardenError, GardenResult},
    garden::calendar::DEFAULT_START_DATE,
    garden::layout::{GardenOptions, GridSpec, MAX_GRID_CELLS},
    mask::glyphs::GlyphTable,
    mask::text::MaskOptions,
    spawn::points::{Bounds, MAX_DENSITY},
};

/// Largest accepted horizontal or vertical pixel scale of a message mask.
pub const MAX_PIXEL_SCALE: usize = 64;

const EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One hidden message: text, where it is drawn, and when its flowers are planted.
pub struct MessageConfig {
    /// Stable identifier, copied onto every flower of the message.
    pub id: String,
    /// Display name; not used for layout.
    #[serde(default)]
    pub label: String,
    /// Text lines, top to bottom.
    pub lines: Vec<String>,
    /// Day index of the first flower.
    pub start_day: u64,
    /// Box the message is drawn into.
    pub bounds: Bounds,
    /// Average flowers per lit mask cell.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Position jitter as a fraction of one mask cell.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    /// Seed for the spawn-point stream.
    #[serde(default)]
    pub seed: u32,
    /// Rasterization options.
    #[serde(default)]
    pub mask_options: MaskOptions,
    /// Species palette per text line.
    #[serde(default)]
    pub line_species: Vec<Vec<String>>,
}

fn default_density() -> f64 {
    1.0
}

fn default_jitter() -> f64 {
    0.5
}

impl MessageConfig {
    /// A message with default density, jitter, seed, mask options and palettes.
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        lines: impl IntoIterator<Item = S>,
        start_day: u64,
        bounds: Bounds,
    ) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            lines: lines.into_iter().map(Into::into).collect(),
            start_day,
            bounds,
            density: default_density(),
            jitter: default_jitter(),
            seed: 0,
            mask_options: MaskOptions::default(),
            line_species: Vec::new(),
        }
    }

    /// Check value ranges. Generation itself tolerates bad values; this is for config authors.
    pub fn validate(&self) -> GardenResult<()> {
        let err = |msg: String| GardenError::validation(format!("message '{}': {msg}", self.id));

        if self.id.trim().is_empty() {
            return Err(GardenError::validation("message id must not be empty"));
        }
        if !self.density.is_finite() || !(0.0..=MAX_DENSITY).contains(&self.density) {
            return Err(err(format!(
                "density must be within [0, {MAX_DENSITY}], got {}",
                self.density
            )));
        }
        if !self.jitter.is_finite() || !(0.0..=1.0).contains(&self.jitter) {
            return Err(err(format!(
                "jitter must be within [0, 1], got {}",
                self.jitter
            )));
        }
        let b = &self.bounds;
        for (name, size) in [("width", b.width), ("height", b.height)] {
            if !size.is_finite() || size <= 0.0 || size > CANVAS_EXTENT {
                return Err(err(format!(
                    "bounds {name} must be within (0, {CANVAS_EXTENT}], got {size}"
                )));
            }
        }
        let rect = b.rect();
        if !(rect.x0.is_finite() && rect.y0.is_finite())
            || rect.x0 < -EPS
            || rect.y0 < -EPS
            || rect.x1 > CANVAS_EXTENT + EPS
            || rect.y1 > CANVAS_EXTENT + EPS
        {
            return Err(err(format!("bounds {rect:?} leave the canvas")));
        }
        let m = &self.mask_options;
        for (axis, scale) in [("x", m.pixel_scale_x), ("y", m.pixel_scale_y)] {
            if !(1..=MAX_PIXEL_SCALE).contains(&scale) {
                return Err(err(format!(
                    "pixel scale {axis} must be within [1, {MAX_PIXEL_SCALE}], got {scale}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON-facing garden configuration.
pub struct GardenConfig {
    /// Date of day 0.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Ordinary-flower grid.
    #[serde(default)]
    pub grid: GridSpec,
    /// Species allowed in message letters.
    #[serde(default)]
    pub enabled_species: Vec<String>,
    /// Drawable variant identifiers (`species-theme`).
    #[serde(default)]
    pub catalog: Vec<String>,
    /// Hidden messages, in registration order (later wins on shared days).
    #[serde(default)]
    pub messages: Vec<MessageConfig>,
}

fn default_start_date() -> NaiveDate {
    DEFAULT_START_DATE
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            grid: GridSpec::default(),
            enabled_species: Vec::new(),
            catalog: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl GardenConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GardenResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GardenError::config(format!("parse garden config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GardenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GardenError::config(format!("open garden config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check grid, messages and catalog.
    pub fn validate(&self) -> GardenResult<()> {
        if !self.grid.jitter.is_finite() || !(0.0..=1.0).contains(&self.grid.jitter) {
            return Err(GardenError::validation(format!(
                "grid jitter must be within [0, 1], got {}",
                self.grid.jitter
            )));
        }
        let (cols, rows) = (self.grid.cols, self.grid.rows);
        if cols.checked_mul(rows).is_none_or(|n| n > MAX_GRID_CELLS) {
            return Err(GardenError::validation(format!(
                "grid {cols}x{rows} exceeds {MAX_GRID_CELLS} cells"
            )));
        }
        let mut ids = BTreeSet::new();
        for message in &self.messages {
            message.validate()?;
            if !ids.insert(message.id.as_str()) {
                return Err(GardenError::validation(format!(
                    "duplicate message id '{}'",
                    message.id
                )));
            }
        }
        self.variant_catalog()?;
        Ok(())
    }

    /// Engine options with the built-in glyph table.
    pub fn options(&self) -> GardenOptions {
        GardenOptions {
            start_date: self.start_date,
            grid: self.grid,
            enabled_species: self.enabled_species.clone(),
            glyphs: GlyphTable::default(),
        }
    }

    /// Group the configured identifiers into a [`VariantCatalog`].
    pub fn variant_catalog(&self) -> GardenResult<VariantCatalog> {
        VariantCatalog::from_identifiers(&self.catalog)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/garden/config.rs"]
mod tests;
