//! In-memory record model -- the unit of cloning.
//!
//! A [`Record`] is a flat bag of named fields, each holding one or more
//! string values with an optional range end. This mirrors how date-like
//! content fields are stored upstream: plain strings in one of the supported
//! shapes (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, or decimal epoch seconds),
//! interpreted only at shift time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque record identifier.
pub type RecordId = u64;

/// A single field value, with an optional end value for range fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_value: Option<String>,
}

impl FieldItem {
    /// A plain single-value item.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            end_value: None,
        }
    }

    /// A range item with both a start and an end value.
    pub fn range(value: impl Into<String>, end_value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            end_value: Some(end_value.into()),
        }
    }
}

/// A cloneable content record.
///
/// Fields are kept in a `BTreeMap` so serialized output is deterministic
/// regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<FieldItem>>,
}

impl Record {
    pub fn new(id: RecordId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&[FieldItem]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Vec<FieldItem>> {
        self.fields.get_mut(name)
    }

    /// Replace a field with a single plain value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(name.into(), vec![FieldItem::new(value)]);
        self
    }

    /// Replace a field with a single range value.
    pub fn set_range_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        end_value: impl Into<String>,
    ) -> &mut Self {
        self.fields
            .insert(name.into(), vec![FieldItem::range(value, end_value)]);
        self
    }

    /// Replace a field with an explicit item list (multi-value fields).
    pub fn set_items(&mut self, name: impl Into<String>, items: Vec<FieldItem>) -> &mut Self {
        self.fields.insert(name.into(), items);
        self
    }
}
