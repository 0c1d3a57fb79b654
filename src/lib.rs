//! daygarden lays out a garden that grows one flower per day.
//!
//! Most flowers are dealt into a shuffled grid. Some are reserved for hidden messages: text is
//! rasterized through a small bitmap font, every lit pixel becomes one or more spawn points, and
//! those points are planted on consecutive days so the message fills in over time.
//!
//! # Pipeline overview
//!
//! 1. **Mask**: `lines -> TextMask` via a [`GlyphTable`] ([`build_text_mask`])
//! 2. **Spawn**: `TextMask + Bounds -> Vec<SpawnPoint>` ([`spawn_points`])
//! 3. **Species**: per-letter palettes with local variety ([`assign_species`])
//! 4. **Layout**: `count + messages -> Vec<Placement>` ([`generate_garden`])
//!
//! The key design constraints:
//!
//! - **Deterministic**: every stream is an explicit [`SeededRng`]; the same inputs give the same
//!   garden on every platform.
//! - **Prefix-stable**: growing `count` only appends flowers; existing days never change.
//! - **Total**: the engine never fails. Only the config and catalog boundaries return
//!   [`GardenResult`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod garden;
mod mask;
mod spawn;

pub use assets::catalog::{VARIANT_SEPARATOR, VariantCatalog, VariantId};
pub use foundation::core::{CANVAS_EXTENT, Point, Rect, canvas_rect, rect_contains_inclusive};
pub use foundation::error::{GardenError, GardenResult};
pub use foundation::prng::{SeededRng, derive_seed, shuffle};
pub use garden::calendar::{DEFAULT_START_DATE, date_for_day, days_elapsed, today_local};
pub use garden::config::{GardenConfig, MAX_PIXEL_SCALE, MessageConfig};
pub use garden::layout::{
    DEFAULT_GRID_SEED, DayCollision, GardenOptions, GridSpec, MAX_GRID_CELLS, MESSAGE_DEPTH_BASE,
    Placement, PlacementKind, find_day_collisions, generate_garden,
};
pub use garden::summary::GardenSummary;
pub use mask::glyphs::{DEFAULT_GLYPH_HEIGHT, DEFAULT_GLYPH_WIDTH, Glyph, GlyphTable, HEART};
pub use mask::text::{LetterMeta, MAX_MASK_CELLS, MaskOptions, TextMask, build_text_mask};
pub use spawn::points::{Bounds, MAX_DENSITY, SpawnPoint, spawn_points};
pub use spawn::species::{DEFAULT_SPECIES, LETTER_PALETTE_WINDOW, SUNFLOWER, assign_species};
