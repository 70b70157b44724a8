//! Trained similarity model
//!
//! [`SimilarityModel::train`] turns provider-supplied raw similarity channels,
//! catalog items, and popularity counts into the immutable model every query
//! runs against. Normalization happens here, once, over the whole table:
//! each raw channel is min-max rescaled by its own global range, and the
//! three rescaled channels are combined per item/category by elementwise
//! maximum. Combining before rescaling would let one channel's raw scale
//! dominate, so the order is fixed.

use crate::error::{Error, Result};
use crate::item::{CatalogItem, ItemId};
use crate::schema::AttributeSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw similarity values for one item, as produced by the embedding
/// similarity provider: one value per meta category for each of the three
/// channels. Values are unconstrained reals prior to normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSimilarities {
    /// Similarity of the item's categories to each meta category
    pub categories: Vec<f64>,
    /// Similarity of the item's tags to each meta category
    pub tags: Vec<f64>,
    /// Similarity of the item's name to each meta category
    pub names: Vec<f64>,
}

impl ChannelSimilarities {
    #[inline]
    #[must_use]
    pub fn new(categories: Vec<f64>, tags: Vec<f64>, names: Vec<f64>) -> Self {
        Self { categories, tags, names }
    }
}

/// Per-item entry of the trained table: the combined, normalized similarity
/// vector in canonical meta-category order, plus the popularity count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub similarity: Vec<f64>,
    pub popularity: u64,
}

/// The trained model: canonical meta-category order, attribute schema,
/// catalog items, and the per-item similarity table.
///
/// Immutable after [`train`](Self::train); safe to share read-only across
/// concurrent queries.
#[derive(Debug, Clone)]
pub struct SimilarityModel {
    meta_categories: Vec<String>,
    schema: AttributeSchema,
    items: Vec<CatalogItem>,
    entries: Vec<SimilarityEntry>,
    index: HashMap<ItemId, usize>,
}

impl SimilarityModel {
    /// Train a model from catalog items, their raw similarity channels
    /// (parallel to `items`), and popularity counts keyed by item id.
    ///
    /// Items absent from `popularity` default to a count of 0. Fails if the
    /// channel list does not line up with the catalog, if any channel vector
    /// does not match the meta-category count, or if an item's attribute map
    /// does not cover every schema attribute.
    pub fn train(
        meta_categories: Vec<String>,
        items: Vec<CatalogItem>,
        channels: Vec<ChannelSimilarities>,
        popularity: &HashMap<ItemId, u64>,
    ) -> Result<Self> {
        if channels.len() != items.len() {
            return Err(Error::ChannelCountMismatch {
                channels: channels.len(),
                items: items.len(),
            });
        }
        let dim = meta_categories.len();
        for channel in &channels {
            for vector in [&channel.categories, &channel.tags, &channel.names] {
                if vector.len() != dim {
                    return Err(Error::InvalidDimension {
                        expected: dim,
                        actual: vector.len(),
                    });
                }
            }
        }

        let schema = AttributeSchema::from_items(&items);
        for item in &items {
            for name in schema.names() {
                if !item.attributes.contains_key(name) {
                    return Err(Error::MissingAttribute {
                        item: item.id.to_string(),
                        attribute: name.to_string(),
                    });
                }
            }
        }

        // Rescale each channel by its own global range before combining
        let mut categories: Vec<Vec<f64>> =
            channels.iter().map(|c| c.categories.clone()).collect();
        let mut tags: Vec<Vec<f64>> = channels.iter().map(|c| c.tags.clone()).collect();
        let mut names: Vec<Vec<f64>> = channels.iter().map(|c| c.names.clone()).collect();
        rescale_channel(&mut categories);
        rescale_channel(&mut tags);
        rescale_channel(&mut names);

        let entries: Vec<SimilarityEntry> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let similarity = (0..dim)
                    .map(|c| categories[i][c].max(tags[i][c]).max(names[i][c]))
                    .collect();
                SimilarityEntry {
                    similarity,
                    popularity: popularity.get(&item.id).copied().unwrap_or(0),
                }
            })
            .collect();

        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();

        Ok(Self {
            meta_categories,
            schema,
            items,
            entries,
            index,
        })
    }

    #[inline]
    pub fn meta_categories(&self) -> &[String] {
        &self.meta_categories
    }

    #[inline]
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    #[inline]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Table entry for an item id; `None` for items not seen at training time
    #[inline]
    pub fn entry(&self, id: &ItemId) -> Option<&SimilarityEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Catalog item by id
    #[inline]
    pub fn item(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }
}

/// Min-max rescale a channel in place by its global range across all items
/// and meta categories. A zero-width range yields an all-zero channel.
/// NaN values do not contribute to the range.
fn rescale_channel(matrix: &mut [Vec<f64>]) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for row in matrix.iter() {
        for &v in row {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if hi <= lo {
        for row in matrix.iter_mut() {
            row.fill(0.0);
        }
        return;
    }
    let span = hi - lo;
    for row in matrix.iter_mut() {
        for v in row.iter_mut() {
            *v = (*v - lo) / span;
        }
    }
}
