//! Attribute schema definitions
//!
//! The attribute schema is the per-attribute value vocabulary observed across
//! the whole catalog, fixed at training time. Every attribute carries the
//! `"All"` sentinel as its first value so a presentation layer can always
//! offer a no-op filter choice.

use crate::item::{AttributeValue, CatalogItem};
use serde::{Deserialize, Serialize};

/// Sentinel value present in every attribute's vocabulary
pub const ALL_VALUE: &str = "All";

/// One filterable attribute and the ordered list of its known values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeField {
    pub name: String,
    /// `"All"` first, then every distinct value in observation order
    pub values: Vec<AttributeValue>,
}

impl AttributeField {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![AttributeValue::from(ALL_VALUE)],
        }
    }

    fn observe(&mut self, value: &AttributeValue) {
        if !self.values.contains(value) {
            self.values.push(value.clone());
        }
    }
}

/// The global attribute schema: every filterable attribute with its value
/// vocabulary. Built once at training time and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    fields: Vec<AttributeField>,
}

impl AttributeSchema {
    /// Build the schema by scanning every item's attribute map.
    ///
    /// Attribute names are kept in sorted order so the schema (and
    /// everything derived from it, like remaining-attribute lists) is
    /// deterministic across runs. Values are recorded in item order, each
    /// vocabulary led by the `"All"` sentinel.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a CatalogItem>) -> Self {
        let items: Vec<&CatalogItem> = items.into_iter().collect();

        let mut names: Vec<&String> = items
            .iter()
            .flat_map(|item| item.attributes.keys())
            .collect();
        names.sort();
        names.dedup();

        let mut schema = Self::default();
        for name in names {
            let mut field = AttributeField::new(name.clone());
            for item in &items {
                if let Some(value) = item.attributes.get(name) {
                    field.observe(value);
                }
            }
            schema.fields.push(field);
        }
        schema
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&AttributeField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if the attribute exists and lists the given value
    #[inline]
    pub fn contains_value(&self, name: &str, value: &AttributeValue) -> bool {
        self.get(name).is_some_and(|f| f.values.contains(value))
    }

    /// Attribute names in schema order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    #[inline]
    pub fn fields(&self) -> &[AttributeField] {
        &self.fields
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1u64, "Intro to Databases")
                .with_attribute("level", "beginner")
                .with_attribute("price", "free"),
            CatalogItem::new(2u64, "Advanced SQL")
                .with_attribute("level", "advanced")
                .with_attribute("price", "paid"),
            CatalogItem::new(3u64, "Data Modeling")
                .with_attribute("level", "beginner")
                .with_attribute("price", "paid"),
        ]
    }

    #[test]
    fn test_all_sentinel_first() {
        let schema = AttributeSchema::from_items(&sample_items());

        let level = schema.get("level").unwrap();
        assert_eq!(level.values[0], AttributeValue::from(ALL_VALUE));
        assert_eq!(
            level.values[1..],
            [AttributeValue::from("beginner"), AttributeValue::from("advanced")]
        );
    }

    #[test]
    fn test_duplicate_values_recorded_once() {
        let schema = AttributeSchema::from_items(&sample_items());

        let price = schema.get("price").unwrap();
        // "All" + "free" + "paid", "paid" seen twice
        assert_eq!(price.values.len(), 3);
    }

    #[test]
    fn test_contains_value() {
        let schema = AttributeSchema::from_items(&sample_items());

        assert!(schema.contains_value("level", &AttributeValue::from("advanced")));
        assert!(schema.contains_value("level", &AttributeValue::from(ALL_VALUE)));
        assert!(!schema.contains_value("level", &AttributeValue::from("expert")));
        assert!(!schema.contains_value("duration", &AttributeValue::from("short")));
    }

    #[test]
    fn test_names_sorted_deterministically() {
        let schema = AttributeSchema::from_items(&sample_items());
        assert_eq!(schema.names().collect::<Vec<_>>(), ["level", "price"]);
    }

    #[test]
    fn test_empty_catalog_empty_schema() {
        let schema = AttributeSchema::from_items(&[]);
        assert!(schema.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema = AttributeSchema::from_items(&sample_items());
        let json = serde_json::to_string(&schema).unwrap();
        let parsed: AttributeSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, parsed);
    }
}
