//! # rankx Core
//!
//! Core library for the rankx ranking engine.
//!
//! This crate provides the data model and training path:
//!
//! - [`CatalogItem`] - An item with its id, name, and filterable attributes
//! - [`AttributeSchema`] - Per-attribute value vocabulary with the `"All"` sentinel
//! - [`ChannelSimilarities`] - Raw provider output, three channels per item
//! - [`SimilarityModel`] - The trained, immutable similarity table
//! - [`AttributeFilter`] - Exact-match conjunctive filtering
//!
//! The model is trained once from provider-supplied similarity channels and
//! popularity counts, then shared read-only across queries. Query-time
//! scoring and split selection live in `rankx-rank`.

pub mod error;
pub mod filter;
pub mod item;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use filter::{filter_items, AttributeFilter};
pub use item::{AttributeValue, CatalogItem, ItemId};
pub use model::{ChannelSimilarities, SimilarityEntry, SimilarityModel};
pub use schema::{AttributeField, AttributeSchema, ALL_VALUE};
