//! # rankx Rank
//!
//! Query engine for the rankx ranking engine.
//!
//! Everything here is a pure, synchronous computation over a trained
//! [`rankx_core::SimilarityModel`]:
//!
//! - [`Preferences`] - Normalizes a raw meta-category weighting to the
//!   canonical order, summing to 1, with a uniform fallback for near-zero
//!   totals
//! - [`score`] - The `LAMBDA * sim + ln(popularity + 1)` relevance blend
//! - [`select_split`] - Greedy choice of the next filter attribute, by
//!   score-weighted rank-violation loss
//! - [`Ranker`] / [`Recommender`] - One-query orchestration: filter, score,
//!   sort, split

pub mod preferences;
pub mod rank;
pub mod score;
pub mod split;

pub use preferences::{Preferences, MIN_PREFERENCE_TOTAL};
pub use rank::{FilterPolicy, Ranker, Recommendation, Recommender, ScoredItem};
pub use score::{relevance, semantic_similarity, LAMBDA};
pub use split::{select_split, MIN_TOTAL_SCORE};
