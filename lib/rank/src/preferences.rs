//! User preference normalization
//!
//! A preference map arrives sparse and in arbitrary order; scoring needs a
//! weight vector aligned to the model's canonical meta-category order and
//! summing to 1. Near-zero totals fall back to a uniform distribution
//! instead of dividing by an unstable denominator.

use rankx_core::{Error, Result};
use std::collections::HashMap;

/// Totals below this are treated as numerically unstable and replaced by the
/// uniform distribution.
pub const MIN_PREFERENCE_TOTAL: f64 = 1e-3;

/// A per-query weighting over meta categories.
///
/// By default every model meta category must carry a weight; callers that
/// want sparse maps opt into [`zero_fill_missing`](Self::zero_fill_missing).
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    weights: HashMap<String, f64>,
    zero_fill: bool,
}

impl Preferences {
    #[inline]
    #[must_use]
    pub fn new(weights: HashMap<String, f64>) -> Self {
        Self {
            weights,
            zero_fill: false,
        }
    }

    /// Treat meta categories absent from the map as weight 0 instead of
    /// failing normalization.
    #[inline]
    #[must_use]
    pub fn zero_fill_missing(mut self) -> Self {
        self.zero_fill = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn weight(mut self, category: impl Into<String>, value: f64) -> Self {
        self.weights.insert(category.into(), value);
        self
    }

    /// Produce the normalized weight vector in canonical category order.
    ///
    /// Fails on keys that are not recognized meta categories, and on missing
    /// categories unless zero-fill was requested. If the raw total is below
    /// [`MIN_PREFERENCE_TOTAL`], every category gets `1/n` instead.
    pub fn normalized(&self, meta_categories: &[String]) -> Result<Vec<f64>> {
        for key in self.weights.keys() {
            if !meta_categories.contains(key) {
                return Err(Error::UnknownMetaCategory(key.clone()));
            }
        }

        let mut raw = Vec::with_capacity(meta_categories.len());
        for category in meta_categories {
            match self.weights.get(category) {
                Some(&w) => raw.push(w),
                None if self.zero_fill => raw.push(0.0),
                None => return Err(Error::MissingMetaCategory(category.clone())),
            }
        }

        let total: f64 = raw.iter().sum();
        if total < MIN_PREFERENCE_TOTAL {
            let uniform = 1.0 / meta_categories.len() as f64;
            return Ok(vec![uniform; meta_categories.len()]);
        }
        Ok(raw.into_iter().map(|w| w / total).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
