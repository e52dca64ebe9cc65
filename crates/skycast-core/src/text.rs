// crates/skycast-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use skycast_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("São Paulo"), "sao paulo");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding and normalization.
///
/// ```rust
/// use skycast_core::text::equals_folded;
///
/// assert!(equals_folded("Zürich", "zurich"));
/// assert!(!equals_folded("Berlin", "Paris"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a.trim()) == fold_key(b.trim())
}

/// Character offsets where a token (a run of alphanumerics) begins.
pub fn token_starts(chars: &[char]) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|&(i, c)| c.is_alphanumeric() && (i == 0 || !chars[i - 1].is_alphanumeric()))
        .map(|(i, _)| i)
        .collect()
}
