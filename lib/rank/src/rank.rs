//! Ranking service
//!
//! One query = resolve applied filters against the schema, filter the
//! catalog, score what is left, sort descending, and pick the next
//! filter-split attribute. [`Ranker`] borrows an immutable trained model so
//! concurrent queries need no coordination; [`Recommender`] is the thin
//! train-then-query holder for callers that keep one model around.

use crate::preferences::Preferences;
use crate::score::{relevance, semantic_similarity};
use crate::split::select_split;
use rankx_core::{
    filter_items, AttributeFilter, AttributeValue, CatalogItem, ChannelSimilarities, Error,
    ItemId, Result, SimilarityModel,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// How to treat applied filters the schema does not recognize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Drop unrecognized filters; their attribute stays in the remaining list
    #[default]
    Lenient,
    /// Reject the query with a configuration error
    Strict,
}

/// A ranked item as returned to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem {
    pub id: ItemId,
    pub name: String,
    pub attributes: HashMap<String, AttributeValue>,
    /// Pure semantic-match component, in `[0, 1]`
    pub sim: f64,
    /// Combined relevance used for the ranking order
    pub score: f64,
}

/// Result of one recommendation query
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Applied filters the schema recognized, in schema order
    pub active_filters: Vec<AttributeFilter>,
    /// Attributes still available for filtering, in schema order
    pub remaining_attributes: Vec<String>,
    /// Visible items, ranked by descending score (ties keep catalog order)
    pub items: Vec<ScoredItem>,
    /// Index into `remaining_attributes` of the next attribute to prompt
    /// for, or `None` when no further split is meaningful
    pub split_attribute: Option<usize>,
}

/// Stateless query engine over a trained model
#[derive(Debug, Clone)]
pub struct Ranker<'a> {
    model: &'a SimilarityModel,
    filter_policy: FilterPolicy,
}

impl<'a> Ranker<'a> {
    #[inline]
    #[must_use]
    pub fn new(model: &'a SimilarityModel) -> Self {
        Self {
            model,
            filter_policy: FilterPolicy::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.filter_policy = policy;
        self
    }

    #[inline]
    pub fn model(&self) -> &SimilarityModel {
        self.model
    }

    /// Answer one recommendation query.
    ///
    /// Applied filters are honored only when both their attribute and value
    /// are known to the schema; under the lenient policy anything else
    /// leaves the attribute unconstrained, under the strict policy it is a
    /// configuration error.
    pub fn recommend(
        &self,
        preferences: &Preferences,
        applied_filters: &[AttributeFilter],
    ) -> Result<Recommendation> {
        let (active_filters, remaining_attributes) = self.resolve_filters(applied_filters)?;
        let visible = filter_items(self.model.items(), &active_filters)?;

        let weights = preferences.normalized(self.model.meta_categories())?;
        let mut items: Vec<ScoredItem> = visible
            .into_iter()
            .map(|item| self.score_item(item, &weights))
            .collect();
        sort_by_score(&mut items);

        let split_attribute = select_split(&items, &remaining_attributes);
        debug!(
            visible = items.len(),
            active = active_filters.len(),
            split = ?split_attribute.map(|i| remaining_attributes[i].as_str()),
            "ranked catalog query"
        );

        Ok(Recommendation {
            active_filters,
            remaining_attributes,
            items,
            split_attribute,
        })
    }

    /// Score and rank a caller-supplied item set against the model.
    ///
    /// Items absent from the trained table score 0 and sort last; they are
    /// never an error.
    pub fn rank_items(
        &self,
        items: &[CatalogItem],
        preferences: &Preferences,
    ) -> Result<Vec<ScoredItem>> {
        let weights = preferences.normalized(self.model.meta_categories())?;
        let mut scored: Vec<ScoredItem> = items
            .iter()
            .map(|item| self.score_item(item, &weights))
            .collect();
        sort_by_score(&mut scored);
        Ok(scored)
    }

    fn score_item(&self, item: &CatalogItem, weights: &[f64]) -> ScoredItem {
        let (sim, score) = match self.model.entry(&item.id) {
            Some(entry) => {
                let sim = semantic_similarity(&entry.similarity, weights);
                (sim, relevance(sim, entry.popularity))
            }
            // Unseen at training time: sorts last, never errors
            None => (0.0, 0.0),
        };
        ScoredItem {
            id: item.id.clone(),
            name: item.name.clone(),
            attributes: item.attributes.clone(),
            sim,
            score,
        }
    }

    /// Split the applied filters into the honored set and the attributes
    /// left to prompt for, both in schema order.
    fn resolve_filters(
        &self,
        applied: &[AttributeFilter],
    ) -> Result<(Vec<AttributeFilter>, Vec<String>)> {
        if self.filter_policy == FilterPolicy::Strict {
            for filter in applied {
                match self.model.schema().get(&filter.name) {
                    None => return Err(Error::UnknownAttribute(filter.name.clone())),
                    Some(field) if !field.values.contains(&filter.value) => {
                        return Err(Error::UnknownAttributeValue {
                            attribute: filter.name.clone(),
                            value: filter.value.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        let mut active = Vec::new();
        let mut remaining = Vec::new();
        for field in self.model.schema().fields() {
            let applied_here = applied
                .iter()
                .find(|f| f.name == field.name && field.values.contains(&f.value));
            match applied_here {
                Some(filter) => active.push(filter.clone()),
                None => remaining.push(field.name.clone()),
            }
        }
        Ok((active, remaining))
    }
}

/// Stable descending sort; equal scores keep their input order
fn sort_by_score(items: &mut [ScoredItem]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Holder for the train-then-query lifecycle.
///
/// The trained model stays an immutable value; this only adds the
/// "queried before training" failure mode callers expect to surface.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    model: Option<SimilarityModel>,
}

impl Recommender {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Train and store the model; see [`SimilarityModel::train`]
    pub fn train(
        &mut self,
        meta_categories: Vec<String>,
        items: Vec<CatalogItem>,
        channels: Vec<ChannelSimilarities>,
        popularity: &HashMap<ItemId, u64>,
    ) -> Result<&SimilarityModel> {
        let model = SimilarityModel::train(meta_categories, items, channels, popularity)?;
        Ok(self.model.insert(model))
    }

    #[inline]
    pub fn model(&self) -> Option<&SimilarityModel> {
        self.model.as_ref()
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Query the stored model; fails if `train` has not run yet
    pub fn recommend(
        &self,
        preferences: &Preferences,
        applied_filters: &[AttributeFilter],
    ) -> Result<Recommendation> {
        let model = self.model.as_ref().ok_or(Error::UntrainedModel)?;
        Ranker::new(model).recommend(preferences, applied_filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        vec!["X".to_string(), "Y".to_string()]
    }

    /// Two-item catalog from the scoring scenario: A is a perfect semantic
    /// match with no popularity, B a complete mismatch with count 100.
    fn trained_model() -> SimilarityModel {
        let items = vec![
            CatalogItem::new("A", "Course A")
                .with_attribute("price", "free")
                .with_attribute("level", "beginner"),
            CatalogItem::new("B", "Course B")
                .with_attribute("price", "paid")
                .with_attribute("level", "beginner"),
        ];
        // Raw channels already span [0, 1] so min-max keeps the extremes
        let channels = vec![
            ChannelSimilarities::new(vec![1.0, 0.0], vec![0.0, 0.0], vec![0.0, 0.0]),
            ChannelSimilarities::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![0.0, 0.0]),
        ];
        let popularity = HashMap::from([(ItemId::from("B"), 100)]);
        SimilarityModel::train(categories(), items, channels, &popularity).unwrap()
    }

    fn prefs_x() -> Preferences {
        [("X", 1.0), ("Y", 0.0)].into_iter().collect()
    }

    #[test]
    fn test_semantic_match_outranks_popularity() {
        let model = trained_model();
        let rec = Ranker::new(&model).recommend(&prefs_x(), &[]).unwrap();

        assert_eq!(rec.items.len(), 2);
        assert_eq!(rec.items[0].id, ItemId::from("A"));
        assert!((rec.items[0].score - crate::score::LAMBDA).abs() < 1e-9);
        assert!((rec.items[1].score - 101f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let model = trained_model();
        let ranker = Ranker::new(&model);
        let a = ranker.recommend(&prefs_x(), &[]).unwrap();
        let b = ranker.recommend(&prefs_x(), &[]).unwrap();

        let ids = |rec: &Recommendation| {
            rec.items.iter().map(|i| i.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.split_attribute, b.split_attribute);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let items = vec![
            CatalogItem::new("A", "Course A").with_attribute("price", "free"),
            CatalogItem::new("B", "Course B").with_attribute("price", "free"),
            CatalogItem::new("C", "Course C").with_attribute("price", "free"),
        ];
        let channels = vec![
            ChannelSimilarities::new(vec![1.0], vec![0.0], vec![0.0]);
            3
        ];
        let model =
            SimilarityModel::train(vec!["X".to_string()], items, channels, &HashMap::new())
                .unwrap();
        let prefs: Preferences = [("X", 1.0)].into_iter().collect();
        let rec = Ranker::new(&model).recommend(&prefs, &[]).unwrap();

        let ids: Vec<_> = rec.items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn test_filter_resolution_lenient() {
        let model = trained_model();
        let applied = vec![
            AttributeFilter::new("price", "free"),
            AttributeFilter::new("level", "expert"), // unknown value
            AttributeFilter::new("campus", "north"), // unknown attribute
        ];
        let rec = Ranker::new(&model).recommend(&prefs_x(), &applied).unwrap();

        assert_eq!(rec.active_filters, vec![AttributeFilter::new("price", "free")]);
        assert_eq!(rec.remaining_attributes, vec!["level".to_string()]);
        assert_eq!(rec.items.len(), 1);
        assert_eq!(rec.items[0].id, ItemId::from("A"));
    }

    #[test]
    fn test_filter_resolution_strict() {
        let model = trained_model();
        let ranker = Ranker::new(&model).with_filter_policy(FilterPolicy::Strict);

        let err = ranker
            .recommend(&prefs_x(), &[AttributeFilter::new("campus", "north")])
            .unwrap_err();
        assert_eq!(err, Error::UnknownAttribute("campus".to_string()));

        let err = ranker
            .recommend(&prefs_x(), &[AttributeFilter::new("level", "expert")])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAttributeValue { .. }));
    }

    #[test]
    fn test_split_over_remaining_attributes() {
        let model = trained_model();
        let rec = Ranker::new(&model).recommend(&prefs_x(), &[]).unwrap();

        // "price" separates A (high) from B (low); "level" is uniform.
        assert_eq!(rec.remaining_attributes, vec!["level".to_string(), "price".to_string()]);
        assert_eq!(rec.split_attribute, Some(1));
    }

    #[test]
    fn test_unknown_items_score_zero_and_sort_last() {
        let model = trained_model();
        let query_items = vec![
            CatalogItem::new("Z", "Not in the table").with_attribute("price", "free"),
            CatalogItem::new("A", "Course A").with_attribute("price", "free"),
        ];
        let ranked = Ranker::new(&model).rank_items(&query_items, &prefs_x()).unwrap();

        assert_eq!(ranked[0].id, ItemId::from("A"));
        assert_eq!(ranked[1].id, ItemId::from("Z"));
        assert_eq!(ranked[1].sim, 0.0);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_recommender_before_training_fails() {
        let recommender = Recommender::new();
        let err = recommender.recommend(&prefs_x(), &[]).unwrap_err();
        assert_eq!(err, Error::UntrainedModel);
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_recommender_train_then_query() {
        let mut recommender = Recommender::new();
        let items = vec![
            CatalogItem::new("A", "Course A").with_attribute("price", "free"),
            CatalogItem::new("B", "Course B").with_attribute("price", "paid"),
        ];
        let channels = vec![
            ChannelSimilarities::new(vec![1.0, 0.0], vec![0.0, 0.0], vec![0.0, 0.0]),
            ChannelSimilarities::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![0.0, 0.0]),
        ];
        recommender
            .train(categories(), items, channels, &HashMap::new())
            .unwrap();
        assert!(recommender.is_trained());

        let rec = recommender.recommend(&prefs_x(), &[]).unwrap();
        assert_eq!(rec.items[0].id, ItemId::from("A"));
    }

    #[test]
    fn test_recommendation_serializes() {
        let model = trained_model();
        let rec = Ranker::new(&model).recommend(&prefs_x(), &[]).unwrap();
        let json = serde_json::to_string(&rec).unwrap();

        assert!(json.contains("\"active_filters\""));
        assert!(json.contains("\"remaining_attributes\""));
        assert!(json.contains("\"score\""));
    }
}
