use std::sync::LazyLock;

use regex::Regex;

static GLYPH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[•●▪–—]|\t+").unwrap());
static PAGE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)--\s*\d+\s*of\s*\d+\s*--").unwrap());
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Cleans one line (or an accumulated section) of extracted text.
///
/// Strips bullet and dash glyphs, tabs and `-- N of M --` page markers, collapses
/// whitespace runs to a single space and trims. Applying it twice is a no-op.
pub fn normalize_text(text: &str) -> String {
    let mut cleaned = GLYPH_RE.replace_all(text, "").into_owned();

    // Removing a marker can splice two halves into a new one.
    while PAGE_MARKER_RE.is_match(&cleaned) {
        cleaned = PAGE_MARKER_RE.replace_all(&cleaned, "").into_owned();
    }

    WHITESPACE_RUN_RE
        .replace_all(&cleaned, " ")
        .trim()
        .to_string()
}
