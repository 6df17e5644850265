//! Flattened result rows and the typed field access used during hydration.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::HydrationError;
use crate::value::Scalar;

/// One result row: select alias → scalar value (explicit nulls included).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    columns: BTreeMap<String, Scalar>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, value: impl Into<Scalar>) {
        self.columns.insert(alias.into(), value.into());
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, alias: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(alias, value);
        self
    }

    pub fn get(&self, alias: &str) -> Option<&Scalar> {
        self.columns.get(alias)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Scalar)> for FlatRow {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FlatRow {
    type Item = (String, Scalar);
    type IntoIter = std::collections::btree_map::IntoIter<String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

/// The columns of one joined entity, with the alias prefix already stripped.
///
/// Accessors come in `required_*` / `optional_*` pairs. A required accessor
/// treats both a missing column and an explicit null as
/// [`HydrationError::MissingField`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    entity: String,
    fields: BTreeMap<String, Scalar>,
}

impl FieldSet {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Scalar) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when the field exists and is not null.
    pub fn is_present(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|v| !v.is_null())
    }

    /// True when at least one field carries a value.
    pub fn has_any_value(&self) -> bool {
        self.fields.values().any(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_fields(self) -> BTreeMap<String, Scalar> {
        self.fields
    }

    pub fn missing(&self, field: &str) -> HydrationError {
        HydrationError::MissingField {
            entity: self.entity.clone(),
            field: field.to_string(),
        }
    }

    fn optional<T>(
        &self,
        field: &str,
        expected: &'static str,
        convert: impl Fn(&Scalar) -> Option<T>,
    ) -> Result<Option<T>, HydrationError> {
        match self.fields.get(field) {
            None | Some(Scalar::Null) => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| HydrationError::TypeMismatch {
                entity: self.entity.clone(),
                field: field.to_string(),
                expected,
                found: value.type_name(),
            }),
        }
    }

    fn required<T>(
        &self,
        field: &str,
        expected: &'static str,
        convert: impl Fn(&Scalar) -> Option<T>,
    ) -> Result<T, HydrationError> {
        self.optional(field, expected, convert)?
            .ok_or_else(|| self.missing(field))
    }

    pub fn required_i64(&self, field: &str) -> Result<i64, HydrationError> {
        self.required(field, "int", Scalar::as_i64)
    }

    pub fn optional_i64(&self, field: &str) -> Result<Option<i64>, HydrationError> {
        self.optional(field, "int", Scalar::as_i64)
    }

    pub fn required_bool(&self, field: &str) -> Result<bool, HydrationError> {
        self.required(field, "bool", Scalar::as_bool)
    }

    pub fn required_string(&self, field: &str) -> Result<String, HydrationError> {
        self.required(field, "text", |v| v.as_str().map(str::to_string))
    }

    pub fn optional_string(&self, field: &str) -> Result<Option<String>, HydrationError> {
        self.optional(field, "text", |v| v.as_str().map(str::to_string))
    }

    pub fn required_decimal(&self, field: &str) -> Result<Decimal, HydrationError> {
        self.required(field, "decimal", Scalar::as_decimal)
    }

    pub fn optional_decimal(&self, field: &str) -> Result<Option<Decimal>, HydrationError> {
        self.optional(field, "decimal", Scalar::as_decimal)
    }

    pub fn optional_date(&self, field: &str) -> Result<Option<NaiveDate>, HydrationError> {
        self.optional(field, "date", Scalar::as_date)
    }

    pub fn optional_datetime(&self, field: &str) -> Result<Option<NaiveDateTime>, HydrationError> {
        self.optional(field, "datetime", Scalar::as_datetime)
    }
}

/// Construct a value from the stripped columns of one joined entity.
pub trait FromFields: Sized {
    fn from_fields(fields: &FieldSet) -> Result<Self, HydrationError>;
}
