//! Fuzzy name matching for resort search.

/// Ratio a candidate must exceed to count as a match.
pub const MATCH_THRESHOLD: f64 = 80.0;

/// Similarity of two names on a `0.0..=100.0` scale, ignoring case.
///
/// Uses the normalised Levenshtein distance, so identical names score 100
/// and names with nothing in common score close to 0.
///
/// # Examples
/// ```
/// use powder_core::similarity_ratio;
///
/// assert_eq!(similarity_ratio("Zermatt", "zermatt"), 100.0);
/// assert!(similarity_ratio("Zermat", "Zermatt") > 80.0);
/// assert!(similarity_ratio("Aspen", "Zermatt") < 50.0);
/// ```
#[expect(clippy::float_arithmetic, reason = "ratio is rescaled to percent")]
#[must_use]
pub fn similarity_ratio(left: &str, right: &str) -> f64 {
    strsim::normalized_levenshtein(&left.to_lowercase(), &right.to_lowercase()) * 100.0
}
