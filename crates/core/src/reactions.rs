//! Number reactions used to pick a work out of a series summary.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Keycap glyphs in ordinal order; `🔟` is a single code point.
pub const NUMBER_GLYPHS: [&str; 10] = [
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
    "7\u{fe0f}\u{20e3}",
    "8\u{fe0f}\u{20e3}",
    "9\u{fe0f}\u{20e3}",
    "\u{1f51f}",
];

const VARIATION_SELECTOR: char = '\u{fe0f}';

/// Glyph (without variation selectors) to 1-based ordinal.
static ORDINALS: LazyLock<HashMap<String, usize>> = LazyLock::new(|| {
    NUMBER_GLYPHS
        .iter()
        .enumerate()
        .map(|(i, glyph)| (strip_variation(glyph), i + 1))
        .collect()
});

fn strip_variation(glyph: &str) -> String {
    glyph.chars().filter(|&c| c != VARIATION_SELECTOR).collect()
}

/// Ordinal for a reaction glyph, tolerant of a missing variation selector.
pub fn ordinal_for(glyph: &str) -> Option<usize> {
    ORDINALS.get(&strip_variation(glyph.trim())).copied()
}
