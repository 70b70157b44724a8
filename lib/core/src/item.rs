use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    String(String),
    Integer(u64),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::String(s) => write!(f, "{}", s),
            ItemId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::String(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::String(s.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(i: u64) -> Self {
        ItemId::Integer(i)
    }
}

/// A single scalar value of a filterable attribute.
///
/// Filtering and split grouping compare values exactly, so the type is
/// `Eq + Hash` rather than a float-carrying variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

/// A catalog item with its filterable attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    /// Attribute name -> this item's value for that attribute.
    /// Defined over the same name set as the global attribute schema.
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
}

impl CatalogItem {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: HashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up this item's value for the given attribute
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}
