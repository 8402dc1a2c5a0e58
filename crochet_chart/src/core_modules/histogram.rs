// Counts how many tiles of each color a pattern uses, so a crocheter knows how
// much of each yarn to buy. Recomputed from the pattern on every call.

use crate::core_modules::pattern::Pattern;
use crate::core_modules::pixel::pixel::Hex;
use std::collections::BTreeMap;

/// Tile count per `#rrggbb` color, ordered by color.
pub type ColorHistogram = BTreeMap<Hex, usize>;

pub fn histogram(pattern: &Pattern) -> ColorHistogram {
    let mut color_counts = ColorHistogram::new();
    for tile in pattern.tiles() {
        *color_counts.entry(tile.color.to_hex()).or_insert(0) += 1;
    }
    color_counts
}

impl Pattern {
    pub fn color_counts(&self) -> ColorHistogram {
        histogram(self)
    }
}
