//! Dynamic attribute columns.

use std::collections::BTreeMap;

use serde::Serialize;
use storefront_core::{FieldSet, Scalar};

/// Column name → value for an attribute extension table.
///
/// The set of keys depends on the installation's schema and is only known at
/// runtime. Keys are the raw column names (no alias prefix).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeBag(BTreeMap<String, Scalar>);

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from the stripped columns of an attribute table.
    ///
    /// A left join that matched no attribute row produces only nulls; that case
    /// yields an empty bag rather than a bag of nulls.
    pub fn from_field_set(fields: FieldSet) -> Self {
        if !fields.has_any_value() {
            return Self::new();
        }
        Self(fields.into_fields())
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Scalar)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
