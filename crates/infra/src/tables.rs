//! Table plan of the mini product query.
//!
//! Every joined table has exactly one alias, and the alias is the hydration
//! protocol: a selected column `c` of table alias `a` comes back as `__a_c`.
//! Core tables carry a fixed column list which is part of the read contract;
//! attribute extension tables are introspected at runtime.

/// How the columns of a table are determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// Explicitly enumerated; never changes with the physical schema.
    Fixed(&'static [&'static str]),
    /// Discovered through the schema catalog.
    Introspected,
}

/// One table participating in the mini query.
#[derive(Debug, PartialEq, Eq)]
pub struct TableSpec {
    pub table: &'static str,
    pub alias: &'static str,
    pub columns: Columns,
}

impl TableSpec {
    /// Alias prefix of this table's flattened columns (`__<alias>_`).
    pub fn prefix(&self) -> String {
        alias_prefix(self.alias)
    }

    /// Select alias of one column (`__<alias>_<column>`).
    pub fn alias_for(&self, column: &str) -> String {
        column_alias(self.alias, column)
    }
}

/// Postgres truncates identifiers beyond `NAMEDATALEN - 1` bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

pub fn alias_prefix(alias: &str) -> String {
    format!("__{alias}_")
}

pub fn column_alias(alias: &str, column: &str) -> String {
    format!("__{alias}_{column}")
}

pub static PRODUCT: TableSpec = TableSpec {
    table: "s_articles",
    alias: "product",
    columns: Columns::Fixed(&[
        "id",
        "supplierID",
        "name",
        "description",
        "description_long",
        "shippingtime",
        "datum",
        "active",
        "taxID",
        "pseudosales",
        "topseller",
        "metaTitle",
        "keywords",
        "changetime",
        "pricegroupID",
        "pricegroupActive",
        "filtergroupID",
        "laststock",
        "crossbundlelook",
        "notification",
        "template",
        "mode",
        "main_detail_id",
        "available_from",
        "available_to",
        "configurator_set_id",
    ]),
};

pub static VARIANT: TableSpec = TableSpec {
    table: "s_articles_details",
    alias: "variant",
    columns: Columns::Fixed(&[
        "id",
        "ordernumber",
        "suppliernumber",
        "kind",
        "additionaltext",
        "impressions",
        "sales",
        "active",
        "instock",
        "stockmin",
        "weight",
        "position",
        "width",
        "height",
        "length",
        "ean",
        "unitID",
        "purchasesteps",
        "maxpurchase",
        "minpurchase",
        "purchaseunit",
        "referenceunit",
        "packunit",
        "releasedate",
        "shippingfree",
        "shippingtime",
    ]),
};

pub static UNIT: TableSpec = TableSpec {
    table: "s_core_units",
    alias: "unit",
    columns: Columns::Fixed(&["id", "unit", "description"]),
};

pub static TAX: TableSpec = TableSpec {
    table: "s_core_tax",
    alias: "tax",
    columns: Columns::Fixed(&["id", "tax", "description"]),
};

pub static PRICE_GROUP: TableSpec = TableSpec {
    table: "s_core_pricegroups",
    alias: "priceGroup",
    columns: Columns::Fixed(&["id", "description"]),
};

pub static MANUFACTURER: TableSpec = TableSpec {
    table: "s_articles_supplier",
    alias: "manufacturer",
    columns: Columns::Fixed(&[
        "id",
        "name",
        "img",
        "link",
        "description",
        "meta_title",
        "meta_description",
        "meta_keywords",
    ]),
};

pub static ATTRIBUTE: TableSpec = TableSpec {
    table: "s_articles_attributes",
    alias: "attribute",
    columns: Columns::Introspected,
};

pub static MANUFACTURER_ATTRIBUTE: TableSpec = TableSpec {
    table: "s_articles_supplier_attributes",
    alias: "manufacturerAttribute",
    columns: Columns::Introspected,
};

/// Tables in select-list order.
pub static SELECT_ORDER: [&TableSpec; 8] = [
    &PRODUCT,
    &VARIANT,
    &UNIT,
    &TAX,
    &PRICE_GROUP,
    &MANUFACTURER,
    &ATTRIBUTE,
    &MANUFACTURER_ATTRIBUTE,
];

/// The `FROM` table. Every result row is one variant.
pub static ROOT: &TableSpec = &VARIANT;

/// Column of [`ROOT`] matched against the requested order numbers.
pub const ORDER_NUMBER_COLUMN: &str = "ordernumber";

/// Column of [`ROOT`] used to make result order deterministic.
pub const ROOT_KEY_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Mandatory relation: a missing row eliminates the result row.
    Inner,
    /// Optional relation: a missing row yields nulls.
    Left,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// `<kind> target ON target.target_column = source.source_column`
#[derive(Debug)]
pub struct Join {
    pub kind: JoinKind,
    pub target: &'static TableSpec,
    pub target_column: &'static str,
    pub source: &'static TableSpec,
    pub source_column: &'static str,
}

pub static JOINS: [Join; 7] = [
    Join {
        kind: JoinKind::Inner,
        target: &PRODUCT,
        target_column: "id",
        source: &VARIANT,
        source_column: "articleID",
    },
    Join {
        kind: JoinKind::Inner,
        target: &TAX,
        target_column: "id",
        source: &PRODUCT,
        source_column: "taxID",
    },
    Join {
        kind: JoinKind::Left,
        target: &ATTRIBUTE,
        target_column: "articledetailsID",
        source: &VARIANT,
        source_column: "id",
    },
    Join {
        kind: JoinKind::Left,
        target: &UNIT,
        target_column: "id",
        source: &VARIANT,
        source_column: "unitID",
    },
    Join {
        kind: JoinKind::Left,
        target: &MANUFACTURER,
        target_column: "id",
        source: &PRODUCT,
        source_column: "supplierID",
    },
    Join {
        kind: JoinKind::Left,
        target: &MANUFACTURER_ATTRIBUTE,
        target_column: "supplierID",
        source: &PRODUCT,
        source_column: "supplierID",
    },
    Join {
        kind: JoinKind::Left,
        target: &PRICE_GROUP,
        target_column: "id",
        source: &PRODUCT,
        source_column: "pricegroupID",
    },
];

/// Fixed column list of a known core table, looked up by physical name.
pub fn fixed_columns(table: &str) -> Option<&'static [&'static str]> {
    SELECT_ORDER.iter().find_map(|spec| match spec.columns {
        Columns::Fixed(columns) if spec.table == table => Some(columns),
        _ => None,
    })
}

/// Check that no alias prefix is a prefix of another one.
///
/// If `__a_` were a prefix of `__b_`, columns of `b` would be attributed to
/// `a` during hydration.
pub fn ensure_disjoint_prefixes(specs: &[&TableSpec]) -> Result<(), String> {
    for (i, a) in specs.iter().enumerate() {
        for (j, b) in specs.iter().enumerate() {
            if i != j && b.prefix().starts_with(&a.prefix()) {
                return Err(format!(
                    "alias prefix `{}` of `{}` shadows `{}` of `{}`",
                    a.prefix(),
                    a.table,
                    b.prefix(),
                    b.table
                ));
            }
        }
    }
    Ok(())
}
