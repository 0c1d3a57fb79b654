use crate::{
    mask::text::{LetterMeta, TextMask},
    spawn::points::SpawnPoint,
};

/// Species kept out of message letters whenever an alternative exists.
pub const SUNFLOWER: &str = "sunflower";

/// Pool used when the caller enables no species.
pub const DEFAULT_SPECIES: [&str; 6] = ["rose", "tulip", "daisy", "lavender", "poppy", SUNFLOWER];

/// Maximum number of species one letter cycles through.
pub const LETTER_PALETTE_WINDOW: usize = 3;

/// Assign a species to every spawn point, letter by letter.
///
/// Each letter gets a local palette of up to [`LETTER_PALETTE_WINDOW`] species taken from its
/// line's palette (`line_species[line]`) restricted to the enabled pool, rotated by the letter's
/// position in the line. Successive points of one letter cycle through that palette, so any
/// three consecutive points of a letter differ when three or more species are available.
/// Output order matches input order.
pub fn assign_species<S: AsRef<str>>(
    points: Vec<SpawnPoint>,
    mask: &TextMask,
    enabled: &[S],
    line_species: &[Vec<String>],
) -> Vec<SpawnPoint> {
    let pool: Vec<&str> = if enabled.is_empty() {
        DEFAULT_SPECIES.to_vec()
    } else {
        enabled.iter().map(AsRef::as_ref).collect()
    };

    let meta = mask.letter_meta();
    let mut palettes: Vec<Option<Vec<&str>>> = vec![None; meta.len()];
    let mut seen = vec![0usize; meta.len()];

    points
        .into_iter()
        .map(|mut point| {
            let Some(letter) = meta.get(point.letter_index) else {
                return point;
            };
            let palette = palettes[point.letter_index]
                .get_or_insert_with(|| letter_palette(letter, &pool, line_species));
            if palette.is_empty() {
                return point;
            }
            let n = &mut seen[point.letter_index];
            point.species = Some(palette[*n % palette.len()].to_string());
            *n += 1;
            point
        })
        .collect()
}

fn letter_palette<'a>(
    letter: &LetterMeta,
    pool: &[&'a str],
    line_species: &'a [Vec<String>],
) -> Vec<&'a str> {
    let line = line_species
        .get(letter.line_index)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut candidates = dedup(
        line.iter()
            .map(String::as_str)
            .filter(|s| *s != SUNFLOWER && pool.contains(s)),
    );
    if candidates.is_empty() {
        candidates = dedup(pool.iter().copied().filter(|s| *s != SUNFLOWER));
    }
    if candidates.is_empty() {
        candidates = dedup(pool.iter().copied());
    }
    if candidates.is_empty() {
        return candidates;
    }

    let start = letter.index_in_line % candidates.len();
    (0..LETTER_PALETTE_WINDOW.min(candidates.len()))
        .map(|k| candidates[(start + k) % candidates.len()])
        .collect()
}

fn dedup<'a>(species: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for s in species {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/spawn/species.rs"]
mod tests;
