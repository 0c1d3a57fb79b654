use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    assets::catalog::VariantCatalog,
    foundation::core::{CANVAS_EXTENT, Point, Rect},
    foundation::prng::{SeededRng, derive_seed, shuffle},
    garden::calendar::{DEFAULT_START_DATE, date_for_day},
    garden::config::MessageConfig,
    mask::glyphs::GlyphTable,
    mask::text::build_text_mask,
    spawn::points::{SpawnPoint, spawn_points},
    spawn::species::{DEFAULT_SPECIES, assign_species},
};

/// Depth band start for message flowers; every ordinary depth (`floor(y)`) is below it.
pub const MESSAGE_DEPTH_BASE: i32 = 1000;

/// Seed of the grid permutation unless configured otherwise.
pub const DEFAULT_GRID_SEED: u32 = 0x5EED_F10A;

/// Largest grid, in cells, that ordinary flowers are dealt into.
pub const MAX_GRID_CELLS: usize = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Coarse grid that ordinary flowers are dealt into.
pub struct GridSpec {
    /// Columns across the canvas.
    pub cols: usize,
    /// Rows down the canvas.
    pub rows: usize,
    /// Seed for the cell permutation and the per-day draws.
    pub seed: u32,
    /// Fraction of a cell a flower may wander from the cell center (clamped to `[0, 1]`).
    pub jitter: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 25,
            seed: DEFAULT_GRID_SEED,
            jitter: 0.8,
        }
    }
}

impl GridSpec {
    /// Total number of cells; `0` when `cols * rows` exceeds [`MAX_GRID_CELLS`].
    pub fn cell_count(&self) -> usize {
        self.cols
            .checked_mul(self.rows)
            .filter(|&n| n <= MAX_GRID_CELLS)
            .unwrap_or(0)
    }

    fn is_oversized(&self) -> bool {
        self.cell_count() == 0 && self.cols > 0 && self.rows > 0
    }

    /// Canvas rectangle covered by `cell` (row-major numbering).
    pub fn cell_rect(&self, cell: usize) -> Rect {
        let cols = self.cols.max(1);
        let rows = self.rows.max(1);
        let (w, h) = (CANVAS_EXTENT / cols as f64, CANVAS_EXTENT / rows as f64);
        let (col, row) = ((cell % cols) as f64, (cell / cols) as f64);
        Rect::new(col * w, row * h, (col + 1.0) * w, (row + 1.0) * h)
    }

    /// Order in which cells are handed out: Fisher-Yates over `[0, cell_count)` seeded by
    /// [`GridSpec::seed`]. Does not depend on how many flowers are requested.
    pub fn permutation(&self) -> Vec<usize> {
        let mut cells: Vec<usize> = (0..self.cell_count()).collect();
        shuffle(&mut cells, &mut SeededRng::new(self.seed));
        cells
    }

    /// Draw stream owned by one day of the garden.
    fn day_rng(&self, day: u64) -> SeededRng {
        SeededRng::new(derive_seed(self.seed, day))
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Everything besides the messages and the catalog that shapes a garden.
pub struct GardenOptions {
    /// Date of day 0.
    pub start_date: NaiveDate,
    /// Ordinary-flower grid.
    pub grid: GridSpec,
    /// Species allowed in message letters; empty means the built-in defaults.
    pub enabled_species: Vec<String>,
    /// Font used to rasterize message lines.
    pub glyphs: GlyphTable,
}

impl Default for GardenOptions {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            grid: GridSpec::default(),
            enabled_species: Vec::new(),
            glyphs: GlyphTable::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// How a placement's position was chosen.
pub enum PlacementKind {
    /// Dealt a cell of the shuffled grid.
    Grid,
    /// Grid exhausted; placed anywhere on the canvas.
    Scatter,
    /// Part of a hidden message.
    Message,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// One flower of the garden.
pub struct Placement {
    /// Zero-based day the flower was planted on.
    pub id: u64,
    /// Canvas position in percentage units.
    pub position: Point,
    /// Asset identifier to draw.
    pub variant: String,
    /// Visual scale factor.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Stacking order; higher draws on top.
    pub depth: i32,
    /// `id + 1`.
    pub day_number: u64,
    /// Calendar date of the planting day.
    pub date: NaiveDate,
    /// Owning message, for message flowers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Grid cell consumed, for grid flowers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_cell: Option<usize>,
}

impl Placement {
    /// Classify the placement.
    pub fn kind(&self) -> PlacementKind {
        match (&self.message_id, self.grid_cell) {
            (Some(_), _) => PlacementKind::Message,
            (None, Some(_)) => PlacementKind::Grid,
            (None, None) => PlacementKind::Scatter,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// A day claimed by more than one message; the later message wins.
pub struct DayCollision {
    /// Contested day index.
    pub day: u64,
    /// Message whose flower was overwritten.
    pub overwritten: String,
    /// Message whose flower is kept.
    pub kept: String,
}

#[derive(Clone, Debug)]
struct MessageSlot {
    point: SpawnPoint,
    message_id: String,
}

/// Lay out `count` days of garden.
///
/// Day `d` becomes placement `d`: a message flower when some message schedules a point on that
/// day, otherwise the next cell of the shuffled grid, otherwise a free scatter position. All
/// draws for a day come from a stream derived from the grid seed and the day index, so
/// `generate_garden(n + 1, ..)` extends `generate_garden(n, ..)` without altering it.
/// `count <= 0` yields no placements.
#[tracing::instrument(skip(messages, catalog, opts), fields(message_count = messages.len()))]
pub fn generate_garden(
    count: i64,
    messages: &[MessageConfig],
    catalog: &VariantCatalog,
    opts: &GardenOptions,
) -> Vec<Placement> {
    let Ok(count) = u64::try_from(count) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let (slots, collisions) = build_message_slots(messages, opts);
    for c in &collisions {
        tracing::warn!(
            day = c.day,
            overwritten = %c.overwritten,
            kept = %c.kept,
            "message flowers collide; keeping the later message"
        );
    }

    let grid = &opts.grid;
    if grid.is_oversized() {
        tracing::warn!(
            cols = grid.cols,
            rows = grid.rows,
            max_cells = MAX_GRID_CELLS,
            "grid too large; scattering every ordinary flower"
        );
    }
    let cells = grid.permutation();
    let mut next_cell = cells.iter().copied();
    let fallback_variants: Vec<String> = DEFAULT_SPECIES.iter().map(|s| s.to_string()).collect();
    let ordinary_variants = if catalog.is_empty() {
        fallback_variants.as_slice()
    } else {
        catalog.all_variants()
    };

    let capacity = usize::try_from(count).unwrap_or(0).min(MAX_GRID_CELLS);
    let mut placements = Vec::with_capacity(capacity);
    let mut exhausted_logged = false;
    for day in 0..count {
        let mut rng = grid.day_rng(day);
        let date = date_for_day(opts.start_date, day);

        if let Some(slot) = slots.get(&day) {
            placements.push(message_placement(day, date, slot, catalog, &mut rng));
            continue;
        }

        let placement = match next_cell.next() {
            Some(cell) => {
                let rect = grid.cell_rect(cell);
                let jitter = grid.jitter.clamp(0.0, 1.0);
                let jx = (rng.next_f64() - 0.5) * jitter;
                let jy = (rng.next_f64() - 0.5) * jitter;
                let position = Point::new(
                    rect.x0 + (0.5 + jx) * rect.width(),
                    rect.y0 + (0.5 + jy) * rect.height(),
                );
                ordinary_placement(day, date, position, Some(cell), ordinary_variants, &mut rng)
            }
            None => {
                if !exhausted_logged {
                    tracing::debug!(day, "grid exhausted; scattering remaining flowers");
                    exhausted_logged = true;
                }
                let position = Point::new(
                    rng.next_f64() * CANVAS_EXTENT,
                    rng.next_f64() * CANVAS_EXTENT,
                );
                ordinary_placement(day, date, position, None, ordinary_variants, &mut rng)
            }
        };
        placements.push(placement);
    }

    placements
}

/// Days claimed by more than one message, in the order they are overwritten.
///
/// Generation keeps the later message on such days; this only reports them.
pub fn find_day_collisions(messages: &[MessageConfig], opts: &GardenOptions) -> Vec<DayCollision> {
    build_message_slots(messages, opts).1
}

fn build_message_slots(
    messages: &[MessageConfig],
    opts: &GardenOptions,
) -> (BTreeMap<u64, MessageSlot>, Vec<DayCollision>) {
    let mut slots = BTreeMap::new();
    let mut collisions = Vec::new();

    for message in messages {
        let mask = build_text_mask(&message.lines, &message.mask_options, &opts.glyphs);
        let points = spawn_points(
            &mask,
            &message.bounds,
            message.density,
            message.jitter,
            message.seed,
        );
        let points = assign_species(points, &mask, &opts.enabled_species, &message.line_species);
        let points_len = points.len();
        tracing::debug!(
            message_id = %message.id,
            start_day = message.start_day,
            flowers = points_len,
            "scheduled message"
        );

        for (n, point) in points.into_iter().enumerate() {
            let Some(day) = message.start_day.checked_add(n as u64) else {
                tracing::debug!(
                    message_id = %message.id,
                    dropped = points_len - n,
                    "message runs past the last day"
                );
                break;
            };
            let slot = MessageSlot {
                point,
                message_id: message.id.clone(),
            };
            if let Some(previous) = slots.insert(day, slot) {
                collisions.push(DayCollision {
                    day,
                    overwritten: previous.message_id,
                    kept: message.id.clone(),
                });
            }
        }
    }

    (slots, collisions)
}

fn message_placement(
    day: u64,
    date: NaiveDate,
    slot: &MessageSlot,
    catalog: &VariantCatalog,
    rng: &mut SeededRng,
) -> Placement {
    let species = slot.point.species.as_deref().unwrap_or(DEFAULT_SPECIES[0]);
    let mut variants = catalog.variants_for(species);
    if variants.is_empty() {
        variants = catalog.all_variants();
    }
    let variant = if variants.is_empty() {
        species.to_string()
    } else {
        variants[rng.next_index(variants.len())].clone()
    };
    let scale = rng.next_range(0.8, 1.0);
    let rotation = rng.next_range(-5.0, 5.0);
    let row = i32::try_from(slot.point.row).unwrap_or(i32::MAX);

    Placement {
        id: day,
        position: slot.point.position,
        variant,
        scale,
        rotation,
        depth: MESSAGE_DEPTH_BASE.saturating_add(row),
        day_number: day + 1,
        date,
        message_id: Some(slot.message_id.clone()),
        grid_cell: None,
    }
}

fn ordinary_placement(
    day: u64,
    date: NaiveDate,
    position: Point,
    grid_cell: Option<usize>,
    variants: &[String],
    rng: &mut SeededRng,
) -> Placement {
    let variant = variants[rng.next_index(variants.len())].clone();
    let scale = rng.next_range(0.85, 1.15);
    let rotation = rng.next_range(-12.0, 12.0);

    Placement {
        id: day,
        position,
        variant,
        scale,
        rotation,
        depth: position.y.floor() as i32,
        day_number: day + 1,
        date,
        message_id: None,
        grid_cell,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/garden/layout.rs"]
mod tests;
