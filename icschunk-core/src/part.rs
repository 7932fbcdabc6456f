//! File names for downloaded chunks.

use crate::validate::ICS_EXTENSION;

const FALLBACK_STEM: &str = "chunk";

/// Name for the chunk at `index` of a source named `source_name`.
///
/// `holidays.ics`, index 0 → `holidays-part1.ics`. A name that is nothing but
/// the extension falls back to `chunk-part<N>.ics`.
pub fn part_filename(source_name: &str, index: usize) -> String {
    let stem = source_name
        .strip_suffix(ICS_EXTENSION)
        .unwrap_or(source_name);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    format!("{}-part{}{}", stem, index + 1, ICS_EXTENSION)
}
