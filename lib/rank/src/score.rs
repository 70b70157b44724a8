//! Relevance scoring
//!
//! The combined score blends semantic fit with popularity:
//! `LAMBDA * sim + ln(popularity + 1)`. With normalized weights and
//! similarities in `[0, 1]`, `sim` is bounded by 1, and `LAMBDA = 10·ln 10`
//! keeps a full unit of semantic similarity ahead of any plausible
//! popularity count, so popularity only breaks ties between items of
//! near-equal semantic fit.

/// Weight of the semantic component relative to log-popularity
pub const LAMBDA: f64 = 10.0 * std::f64::consts::LN_10;

/// Inner product of an item's similarity vector with the normalized
/// preference weights, both in canonical meta-category order.
#[inline]
pub fn semantic_similarity(similarity: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(similarity.len(), weights.len());
    similarity.iter().zip(weights).map(|(s, w)| s * w).sum()
}

/// Combined relevance of one item
#[inline]
pub fn relevance(sim: f64, popularity: u64) -> f64 {
    LAMBDA * sim + (popularity as f64 + 1.0).ln()
}
