//! String normalization for catalog matching.
//!
//! Every comparison the resolver performs goes through [`fold`]: both sides
//! are transliterated to ASCII and lower-cased, so "México" and "mexico"
//! compare equal and "BBVA" matches "bbva".

use deunicode::deunicode;

/// Fold a string to its canonical comparison form: ASCII transliteration,
/// lower-casing, surrounding whitespace trimmed.
pub fn fold(s: &str) -> String {
    deunicode(s.trim()).to_lowercase()
}

/// Case/diacritic-insensitive equality.
pub fn eq_fold(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Case/diacritic-insensitive containment of `needle` in `haystack`.
pub fn contains_fold(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}
