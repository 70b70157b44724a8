// Exact-match attribute filtering over catalog items
use crate::error::{Error, Result};
use crate::item::{AttributeValue, CatalogItem};
use serde::{Deserialize, Serialize};

/// One applied filter: the item's value for `name` must equal `value` exactly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub name: String,
    pub value: AttributeValue,
}

impl AttributeFilter {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Exact equality on the item's value; an item lacking the attribute is
    /// a schema violation, not a non-match.
    pub fn matches(&self, item: &CatalogItem) -> Result<bool> {
        match item.attribute(&self.name) {
            Some(value) => Ok(*value == self.value),
            None => Err(Error::MissingAttribute {
                item: item.id.to_string(),
                attribute: self.name.clone(),
            }),
        }
    }
}

/// Keep the items matching every filter. An empty filter list returns the
/// input unchanged.
pub fn filter_items<'a>(
    items: impl IntoIterator<Item = &'a CatalogItem>,
    filters: &[AttributeFilter],
) -> Result<Vec<&'a CatalogItem>> {
    let mut kept = Vec::new();
    for item in items {
        let mut matched = true;
        for filter in filters {
            if !filter.matches(item)? {
                matched = false;
                break;
            }
        }
        if matched {
            kept.push(item);
        }
    }
    Ok(kept)
}
