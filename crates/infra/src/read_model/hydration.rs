//! Flat row → [`ProductMini`].
//!
//! Hydration is driven by [`MINI_MAPPINGS`]: each entry names a table of the
//! plan and the rule deciding whether its joined row exists. A row is split
//! into one [`FieldSet`] per mapping in a single pass over its columns, then
//! each sub-entity is built from its own set.

use std::collections::HashMap;

use tracing::trace;

use storefront_core::{FieldSet, FlatRow, FromFields, HydrationError};
use storefront_products::{
    AttributeBag, Manufacturer, PriceGroup, ProductData, ProductMini, Tax, Unit, VariantData,
};

use crate::tables::{
    ATTRIBUTE, MANUFACTURER, MANUFACTURER_ATTRIBUTE, PRICE_GROUP, PRODUCT, TAX, TableSpec, UNIT,
    VARIANT,
};

/// When a joined table counts as present in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present iff this key-bearing column is non-null.
    KeyColumn(&'static str),
    /// Present iff any column is non-null (tables of unknown shape).
    AnyValue,
}

#[derive(Debug)]
pub struct Mapping {
    pub spec: &'static TableSpec,
    pub presence: Presence,
}

pub static MINI_MAPPINGS: [Mapping; 8] = [
    Mapping {
        spec: &PRODUCT,
        presence: Presence::KeyColumn("id"),
    },
    Mapping {
        spec: &VARIANT,
        presence: Presence::KeyColumn("id"),
    },
    Mapping {
        spec: &TAX,
        presence: Presence::KeyColumn("id"),
    },
    Mapping {
        spec: &UNIT,
        presence: Presence::KeyColumn("id"),
    },
    Mapping {
        spec: &MANUFACTURER,
        presence: Presence::KeyColumn("id"),
    },
    Mapping {
        spec: &PRICE_GROUP,
        presence: Presence::KeyColumn("id"),
    },
    Mapping {
        spec: &ATTRIBUTE,
        presence: Presence::AnyValue,
    },
    Mapping {
        spec: &MANUFACTURER_ATTRIBUTE,
        presence: Presence::AnyValue,
    },
];

/// Builds [`ProductMini`] values from flat rows.
#[derive(Debug)]
pub struct MiniHydrator {
    prefixes: Vec<(String, &'static Mapping)>,
}

impl Default for MiniHydrator {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniHydrator {
    pub fn new() -> Self {
        Self {
            prefixes: MINI_MAPPINGS.iter().map(|m| (m.spec.prefix(), m)).collect(),
        }
    }

    /// Hydrate one row.
    ///
    /// Product and variant are mandatory. Tax, unit, manufacturer and price
    /// group are `None` when their key column is null. Attribute columns land
    /// in bags keyed by raw column name; the manufacturer attribute bag is
    /// attached to the manufacturer.
    pub fn hydrate_mini(&self, row: FlatRow) -> Result<ProductMini, HydrationError> {
        let mut parts = self.split(row);

        let product: ProductData = parts.required(&PRODUCT)?;
        let variant: VariantData = parts.required(&VARIANT)?;

        let mut mini = ProductMini::new(product, variant);
        mini.tax = parts.optional::<Tax>(&TAX)?;
        mini.unit = parts.optional::<Unit>(&UNIT)?;
        mini.price_group = parts.optional::<PriceGroup>(&PRICE_GROUP)?;
        mini.attributes = parts.bag(&ATTRIBUTE);

        let manufacturer_attributes = parts.bag(&MANUFACTURER_ATTRIBUTE);
        mini.manufacturer = parts
            .optional::<Manufacturer>(&MANUFACTURER)?
            .map(|m| m.with_attributes(manufacturer_attributes));

        Ok(mini)
    }

    fn split(&self, row: FlatRow) -> RowParts {
        let mut sets: HashMap<&'static str, (FieldSet, &'static Mapping)> = self
            .prefixes
            .iter()
            .map(|(_, m)| (m.spec.alias, (FieldSet::new(m.spec.alias), *m)))
            .collect();

        for (alias, value) in row {
            let owner = self.prefixes.iter().find_map(|(prefix, m)| {
                alias
                    .strip_prefix(prefix.as_str())
                    .map(|field| (m, field))
            });

            match owner {
                Some((mapping, field)) => {
                    if let Some((set, _)) = sets.get_mut(mapping.spec.alias) {
                        set.insert(field, value);
                    }
                }
                None => trace!(column = %alias, "column outside every alias prefix ignored"),
            }
        }

        RowParts { sets }
    }
}

struct RowParts {
    sets: HashMap<&'static str, (FieldSet, &'static Mapping)>,
}

impl RowParts {
    /// Remove the field set of `spec`, or `None` if its joined row is absent.
    fn take(&mut self, spec: &TableSpec) -> Option<FieldSet> {
        let (fields, mapping) = self.sets.remove(spec.alias)?;
        let present = match mapping.presence {
            Presence::KeyColumn(key) => fields.is_present(key),
            Presence::AnyValue => fields.has_any_value(),
        };
        present.then_some(fields)
    }

    fn required<T: FromFields>(&mut self, spec: &TableSpec) -> Result<T, HydrationError> {
        let fields = self
            .take(spec)
            .ok_or_else(|| HydrationError::MissingEntity(spec.alias.to_string()))?;
        T::from_fields(&fields)
    }

    fn optional<T: FromFields>(&mut self, spec: &TableSpec) -> Result<Option<T>, HydrationError> {
        self.take(spec).map(|fields| T::from_fields(&fields)).transpose()
    }

    fn bag(&mut self, spec: &TableSpec) -> AttributeBag {
        self.take(spec)
            .map(AttributeBag::from_field_set)
            .unwrap_or_default()
    }
}
