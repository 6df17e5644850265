//! Test fixtures: flat rows shaped exactly like the composed select list.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use storefront_core::{FlatRow, Scalar};

use crate::schema::InMemorySchemaCatalog;
use crate::tables::{
    ATTRIBUTE, Columns, MANUFACTURER, MANUFACTURER_ATTRIBUTE, PRICE_GROUP, PRODUCT, SELECT_ORDER,
    TAX, TableSpec, UNIT, VARIANT,
};

pub(crate) const ATTRIBUTE_COLUMNS: [&str; 5] =
    ["id", "articleID", "articledetailsID", "attr1", "attr2"];

pub(crate) const MANUFACTURER_ATTRIBUTE_COLUMNS: [&str; 3] = ["id", "supplierID", "brand_color"];

/// Schema catalog knowing both attribute tables.
pub(crate) fn attribute_schema() -> Arc<InMemorySchemaCatalog> {
    Arc::new(
        InMemorySchemaCatalog::new()
            .with_table(ATTRIBUTE.table, ATTRIBUTE_COLUMNS)
            .with_table(MANUFACTURER_ATTRIBUTE.table, MANUFACTURER_ATTRIBUTE_COLUMNS),
    )
}

fn columns_of(spec: &TableSpec) -> &'static [&'static str] {
    match spec.columns {
        Columns::Fixed(columns) => columns,
        Columns::Introspected if spec.alias == ATTRIBUTE.alias => &ATTRIBUTE_COLUMNS,
        Columns::Introspected => &MANUFACTURER_ATTRIBUTE_COLUMNS,
    }
}

/// Builder for one joined result row.
#[derive(Debug, Clone)]
pub(crate) struct MiniRow {
    number: String,
    variant_id: i64,
    product_id: i64,
    tax_id: i64,
    unit_id: Option<i64>,
    supplier_id: Option<i64>,
    price_group_id: Option<i64>,
    attributes: bool,
    attr1: Option<String>,
}

impl MiniRow {
    pub(crate) fn new(number: &str, variant_id: i64) -> Self {
        Self {
            number: number.to_string(),
            variant_id,
            product_id: variant_id,
            tax_id: 1,
            unit_id: None,
            supplier_id: Some(5),
            price_group_id: None,
            attributes: true,
            attr1: Some(format!("attr-{number}")),
        }
    }

    /// taxID=1, unitID=NULL, supplierID=5, pricegroupID=NULL.
    pub(crate) fn sw1000() -> Self {
        Self::new("SW1000", 10)
    }

    pub(crate) fn product(mut self, product_id: i64) -> Self {
        self.product_id = product_id;
        self
    }

    pub(crate) fn unit(mut self, unit_id: Option<i64>) -> Self {
        self.unit_id = unit_id;
        self
    }

    pub(crate) fn manufacturer(mut self, supplier_id: Option<i64>) -> Self {
        self.supplier_id = supplier_id;
        self
    }

    pub(crate) fn price_group(mut self, price_group_id: Option<i64>) -> Self {
        self.price_group_id = price_group_id;
        self
    }

    pub(crate) fn attributes(mut self, present: bool) -> Self {
        self.attributes = present;
        self
    }

    pub(crate) fn attr1(mut self, value: &str) -> Self {
        self.attr1 = Some(value.to_string());
        self
    }

    pub(crate) fn build(&self) -> FlatRow {
        // Start from an all-null row so every selected alias is present.
        let mut row = FlatRow::new();
        for spec in SELECT_ORDER.iter() {
            for column in columns_of(spec) {
                row.insert(spec.alias_for(column), Scalar::Null);
            }
        }

        let set = |row: &mut FlatRow, spec: &TableSpec, column: &str, value: Scalar| {
            row.insert(spec.alias_for(column), value);
        };

        set(&mut row, &PRODUCT, "id", Scalar::Int(self.product_id));
        set(&mut row, &PRODUCT, "name", format!("Product {}", self.product_id).into());
        set(&mut row, &PRODUCT, "supplierID", self.supplier_id.into());
        set(&mut row, &PRODUCT, "taxID", Scalar::Int(self.tax_id));
        set(&mut row, &PRODUCT, "pricegroupID", self.price_group_id.into());
        set(
            &mut row,
            &PRODUCT,
            "datum",
            NaiveDate::from_ymd_opt(2012, 8, 15).into(),
        );
        let flags = [
            "active",
            "topseller",
            "pricegroupActive",
            "laststock",
            "crossbundlelook",
            "notification",
        ];
        for flag in flags {
            set(&mut row, &PRODUCT, flag, Scalar::Int(i64::from(flag == "active")));
        }

        set(&mut row, &VARIANT, "id", Scalar::Int(self.variant_id));
        set(&mut row, &VARIANT, "ordernumber", self.number.as_str().into());
        set(&mut row, &VARIANT, "active", Scalar::Bool(true));
        set(&mut row, &VARIANT, "kind", Scalar::Int(1));
        set(&mut row, &VARIANT, "unitID", self.unit_id.into());
        set(&mut row, &VARIANT, "shippingfree", Scalar::Bool(false));
        set(&mut row, &VARIANT, "instock", Scalar::Int(25));

        set(&mut row, &TAX, "id", Scalar::Int(self.tax_id));
        set(&mut row, &TAX, "tax", Decimal::new(1900, 2).into());
        set(&mut row, &TAX, "description", "19%".into());

        if let Some(unit_id) = self.unit_id {
            set(&mut row, &UNIT, "id", Scalar::Int(unit_id));
            set(&mut row, &UNIT, "unit", "l".into());
            set(&mut row, &UNIT, "description", "Liter".into());
        }

        if let Some(supplier_id) = self.supplier_id {
            set(&mut row, &MANUFACTURER, "id", Scalar::Int(supplier_id));
            set(&mut row, &MANUFACTURER, "name", "shopware AG".into());
            set(&mut row, &MANUFACTURER, "link", "https://www.shopware.com".into());
            set(&mut row, &MANUFACTURER, "meta_title", "shopware".into());
            set(&mut row, &MANUFACTURER, "meta_keywords", "sun, glasses".into());

            set(&mut row, &MANUFACTURER_ATTRIBUTE, "id", Scalar::Int(supplier_id));
            set(&mut row, &MANUFACTURER_ATTRIBUTE, "supplierID", Scalar::Int(supplier_id));
            set(&mut row, &MANUFACTURER_ATTRIBUTE, "brand_color", "blue".into());
        }

        if let Some(price_group_id) = self.price_group_id {
            set(&mut row, &PRICE_GROUP, "id", Scalar::Int(price_group_id));
            set(&mut row, &PRICE_GROUP, "description", "Standard".into());
        }

        if self.attributes {
            set(&mut row, &ATTRIBUTE, "id", Scalar::Int(self.variant_id));
            set(&mut row, &ATTRIBUTE, "articleID", Scalar::Int(self.product_id));
            set(&mut row, &ATTRIBUTE, "articledetailsID", Scalar::Int(self.variant_id));
            set(&mut row, &ATTRIBUTE, "attr1", self.attr1.clone().into());
        }

        row
    }
}
