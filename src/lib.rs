//! # rankx
//!
//! A preference-driven ranking and adaptive filter-split engine for catalog
//! items.
//!
//! rankx ranks a catalog (e.g. a course catalog) against weighted user
//! preferences and progressively narrows the result set through an
//! interactive, attribute-based filtering flow. A trained model blends
//! per-item semantic similarity against a fixed set of meta categories with
//! popularity counts; each query filters, scores, sorts, and picks the next
//! attribute worth prompting the user for.
//!
//! Embeddings are computed client-side: an external provider supplies the
//! raw per-item similarity channels consumed by training.
//!
//! ## Quick Start
//!
//! ```rust
//! use rankx::prelude::*;
//! use std::collections::HashMap;
//!
//! // Catalog items with filterable attributes
//! let items = vec![
//!     CatalogItem::new(1u64, "Intro to Databases")
//!         .with_attribute("price", "free"),
//!     CatalogItem::new(2u64, "Business English")
//!         .with_attribute("price", "paid"),
//! ];
//!
//! // Raw similarity channels from the embedding provider, one value per
//! // meta category and channel
//! let channels = vec![
//!     ChannelSimilarities::new(vec![0.9, 0.1], vec![0.7, 0.0], vec![0.8, 0.2]),
//!     ChannelSimilarities::new(vec![0.2, 0.8], vec![0.1, 0.9], vec![0.0, 0.7]),
//! ];
//! let popularity = HashMap::from([(ItemId::from(2u64), 40)]);
//!
//! let model = SimilarityModel::train(
//!     vec!["IT".to_string(), "Business".to_string()],
//!     items,
//!     channels,
//!     &popularity,
//! ).unwrap();
//!
//! // Query: weighted preferences plus the filters chosen so far
//! let prefs = Preferences::default().weight("IT", 1.0).weight("Business", 0.2);
//! let rec = Ranker::new(&model).recommend(&prefs, &[]).unwrap();
//!
//! assert_eq!(rec.items[0].name, "Intro to Databases");
//! ```
//!
//! ## Crate Structure
//!
//! rankx is composed of two crates:
//!
//! - `rankx-core` - Data model: catalog items, attribute schema, similarity
//!   table training, exact-match filtering
//! - `rankx-rank` - Query engine: preference normalization, relevance
//!   scoring, greedy filter-split selection, the ranking service
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Channels   │────>│   train()   │────>│ Similarity  │
//! │ (provider)  │     │ (normalize) │     │   Model     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!       ┌─────────────┐     ┌─────────────┐      │
//!       │ Preferences │────>│   Ranker    │<─────┘
//!       └─────────────┘     │ filter/score│
//!                           └─────────────┘
//!                                  │
//!                           ┌─────────────┐
//!                           │ Recommenda- │
//!                           │ tion + split│
//!                           └─────────────┘
//! ```

// Re-export core types
pub use rankx_core::{
    filter_items, AttributeField, AttributeFilter, AttributeSchema, AttributeValue,
    CatalogItem, ChannelSimilarities, Error, ItemId, Result, SimilarityEntry,
    SimilarityModel, ALL_VALUE,
};

// Re-export the query engine
pub use rankx_rank::{
    relevance, select_split, semantic_similarity, FilterPolicy, Preferences, Ranker,
    Recommendation, Recommender, ScoredItem, LAMBDA, MIN_PREFERENCE_TOTAL, MIN_TOTAL_SCORE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AttributeFilter, AttributeSchema, AttributeValue, CatalogItem, ChannelSimilarities,
        Error, FilterPolicy, ItemId, Preferences, Ranker, Recommendation, Recommender,
        Result, ScoredItem, SimilarityModel,
    };
}
