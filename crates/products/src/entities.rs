//! Value objects joined into a mini product.
//!
//! Every type here is built from the columns of one joined table, with the
//! `__<alias>_` prefix already stripped. Field names passed to the
//! [`FieldSet`] accessors are therefore physical column names.

use rust_decimal::Decimal;
use serde::Serialize;

use storefront_core::{FieldSet, FromFields, HydrationError, ValueObject};

use crate::attributes::AttributeBag;

/// Tax rate (`s_core_tax`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tax {
    pub id: i64,
    /// Rate in percent, e.g. `19.00`.
    pub rate: Decimal,
    pub description: String,
}

impl ValueObject for Tax {}

impl FromFields for Tax {
    fn from_fields(fields: &FieldSet) -> Result<Self, HydrationError> {
        Ok(Self {
            id: fields.required_i64("id")?,
            rate: fields.required_decimal("tax")?,
            description: fields.required_string("description")?,
        })
    }
}

/// Sales unit (`s_core_units`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: i64,
    pub unit: Option<String>,
    pub description: Option<String>,
}

impl ValueObject for Unit {}

impl FromFields for Unit {
    fn from_fields(fields: &FieldSet) -> Result<Self, HydrationError> {
        Ok(Self {
            id: fields.required_i64("id")?,
            unit: fields.optional_string("unit")?,
            description: fields.optional_string("description")?,
        })
    }
}

/// Price group (`s_core_pricegroups`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceGroup {
    pub id: i64,
    pub description: Option<String>,
}

impl ValueObject for PriceGroup {}

impl FromFields for PriceGroup {
    fn from_fields(fields: &FieldSet) -> Result<Self, HydrationError> {
        Ok(Self {
            id: fields.required_i64("id")?,
            description: fields.optional_string("description")?,
        })
    }
}

/// Manufacturer / supplier (`s_articles_supplier`).
///
/// The manufacturer attribute table is joined separately; its columns are
/// attached through [`Manufacturer::with_attributes`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub attributes: AttributeBag,
}

impl Manufacturer {
    pub fn with_attributes(mut self, attributes: AttributeBag) -> Self {
        self.attributes = attributes;
        self
    }
}

impl ValueObject for Manufacturer {}

impl FromFields for Manufacturer {
    fn from_fields(fields: &FieldSet) -> Result<Self, HydrationError> {
        Ok(Self {
            id: fields.required_i64("id")?,
            name: fields.required_string("name")?,
            image: fields.optional_string("img")?,
            link: fields.optional_string("link")?,
            description: fields.optional_string("description")?,
            meta_title: fields.optional_string("meta_title")?,
            meta_description: fields.optional_string("meta_description")?,
            meta_keywords: fields.optional_string("meta_keywords")?,
            attributes: AttributeBag::new(),
        })
    }
}
