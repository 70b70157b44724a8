//! Adaptive filter-split selection
//!
//! Given the filtered, scored item set and the attributes not yet
//! constrained, pick the attribute whose value buckets best separate
//! high-scoring from low-scoring items. The chosen attribute drives the next
//! filter prompt shown to the user; the caller re-invokes the selection
//! after each answer, so this is a one-step greedy decision, not a
//! materialized decision tree.

use crate::rank::ScoredItem;
use ahash::AHashMap;
use rankx_core::AttributeValue;

/// Below this total score there is no signal left to discriminate on
pub const MIN_TOTAL_SCORE: f64 = 1e-3;

/// Pick the index into `candidates` of the attribute with the smallest
/// separation loss, or `None` when no further split is meaningful.
///
/// For a candidate attribute, each item's rank violation is the number of
/// strictly higher-scoring items sharing its value bucket; the loss is the
/// score-weighted sum of violations over the total score. An attribute that
/// groups high scorers together and low scorers together loses almost
/// nothing; one that mixes them in the same buckets loses a lot.
///
/// Attributes with a single uniform value across the set cannot partition it
/// and are skipped, as are attributes some item lacks a value for. Ties
/// resolve to the earliest candidate.
pub fn select_split(items: &[ScoredItem], candidates: &[String]) -> Option<usize> {
    let total_score: f64 = items.iter().map(|item| item.score).sum();
    if total_score < MIN_TOTAL_SCORE {
        return None;
    }

    let mut best = None;
    let mut best_loss = f64::INFINITY;

    for (j, name) in candidates.iter().enumerate() {
        let Some(counts) = value_counts(items, name) else {
            continue;
        };
        let non_trivial = counts.values().any(|&c| c > 0 && c < items.len());
        if !non_trivial {
            continue;
        }

        let mut loss = 0.0;
        for item in items {
            let value = &item.attributes[name];
            let violations = items
                .iter()
                .filter(|other| other.attributes.get(name) == Some(value) && other.score > item.score)
                .count();
            loss += item.score * violations as f64;
        }
        let loss = loss / total_score;

        if loss < best_loss {
            best_loss = loss;
            best = Some(j);
        }
    }

    best
}

/// Items per distinct value of `name`; `None` if any item lacks the attribute
fn value_counts<'a>(
    items: &'a [ScoredItem],
    name: &str,
) -> Option<AHashMap<&'a AttributeValue, usize>> {
    let mut counts = AHashMap::new();
    for item in items {
        let value = item.attributes.get(name)?;
        *counts.entry(value).or_insert(0) += 1;
    }
    Some(counts)
}
