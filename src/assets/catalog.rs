use std::collections::BTreeMap;

use crate::foundation::error::{GardenError, GardenResult};

/// Separator between the species and theme parts of a variant identifier.
pub const VARIANT_SEPARATOR: char = '-';

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A drawable asset identifier split into its parts (`"rose-pastel"` → `rose` / `pastel`).
pub struct VariantId {
    /// Species prefix.
    pub species: String,
    /// Color theme suffix, if the identifier has one.
    pub theme: Option<String>,
}

impl VariantId {
    /// Parse `species-theme`, splitting on the first separator.
    pub fn parse(raw: &str) -> GardenResult<Self> {
        let raw = raw.trim();
        let (species, theme) = match raw.split_once(VARIANT_SEPARATOR) {
            Some((s, t)) => (s, Some(t)),
            None => (raw, None),
        };
        if species.is_empty() {
            return Err(GardenError::validation(format!(
                "variant identifier \"{raw}\" has an empty species"
            )));
        }
        Ok(Self {
            species: species.to_string(),
            theme: theme.filter(|t| !t.is_empty()).map(str::to_string),
        })
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.theme {
            Some(theme) => write!(f, "{}{VARIANT_SEPARATOR}{theme}", self.species),
            None => f.write_str(&self.species),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Drawable variants grouped by species.
///
/// Built once from a flat list of identifiers; the engine only ever reads it. Variants keep
/// their catalog order both within a species and in the flat list used for ordinary flowers.
pub struct VariantCatalog {
    all: Vec<String>,
    by_species: BTreeMap<String, Vec<String>>,
}

impl VariantCatalog {
    /// Group `ids` by species. Duplicate identifiers are kept once.
    pub fn from_identifiers<I, S>(ids: I) -> GardenResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for raw in ids {
            let id = VariantId::parse(raw.as_ref())?;
            let name = id.to_string();
            if catalog.all.contains(&name) {
                continue;
            }
            catalog
                .by_species
                .entry(id.species)
                .or_default()
                .push(name.clone());
            catalog.all.push(name);
        }
        Ok(catalog)
    }

    /// True when the catalog holds no variants.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Every variant in catalog order.
    pub fn all_variants(&self) -> &[String] {
        &self.all
    }

    /// Variants of one species in catalog order (empty when unknown).
    pub fn variants_for(&self, species: &str) -> &[String] {
        self.by_species
            .get(species)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Known species, sorted.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.by_species.keys().map(String::as_str)
    }

    /// Species prefix of a variant identifier, by naming convention.
    pub fn species_of(variant: &str) -> &str {
        variant
            .split_once(VARIANT_SEPARATOR)
            .map(|(s, _)| s)
            .unwrap_or(variant)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
