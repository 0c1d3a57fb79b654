use std::collections::{BTreeMap, BTreeSet};

use crate::{
    assets::catalog::VariantCatalog,
    garden::layout::{Placement, PlacementKind},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Counts and visible species for a generated garden.
pub struct GardenSummary {
    /// Number of placements.
    pub total: usize,
    /// Flowers dealt a grid cell.
    pub grid: usize,
    /// Flowers scattered after the grid ran out.
    pub scatter: usize,
    /// Flowers per message id.
    pub messages: BTreeMap<String, usize>,
    /// Species present in the garden, by variant naming convention.
    pub species: BTreeSet<String>,
}

impl GardenSummary {
    /// Tally `placements`.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut summary = Self {
            total: placements.len(),
            ..Self::default()
        };
        for p in placements {
            match p.kind() {
                PlacementKind::Grid => summary.grid += 1,
                PlacementKind::Scatter => summary.scatter += 1,
                PlacementKind::Message => {
                    if let Some(id) = &p.message_id {
                        *summary.messages.entry(id.clone()).or_default() += 1;
                    }
                }
            }
            summary
                .species
                .insert(VariantCatalog::species_of(&p.variant).to_string());
        }
        summary
    }
}
