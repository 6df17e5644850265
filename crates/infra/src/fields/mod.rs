//! Select-list construction for the mini query.
//!
//! `FieldCatalog` is the single "columns for (table, alias)" entry point. Core
//! tables resolve to their fixed lists; extension tables are introspected once
//! and memoized in a [`FieldCache`].

pub mod cache;
pub mod catalog;

pub use cache::FieldCache;
pub use catalog::FieldCatalog;

use crate::tables::column_alias;

/// One select expression: `"alias"."column" AS "__alias_column"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectField {
    table_alias: String,
    column: String,
    alias: String,
}

impl SelectField {
    pub fn new(table_alias: impl Into<String>, column: impl Into<String>) -> Self {
        let table_alias = table_alias.into();
        let column = column.into();
        let alias = column_alias(&table_alias, &column);
        Self {
            table_alias,
            column,
            alias,
        }
    }

    pub fn table_alias(&self) -> &str {
        &self.table_alias
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// The flattened column name the row will carry.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Render as SQL. Identifiers are quoted so mixed-case names such as
    /// `__priceGroup_id` survive Postgres case folding.
    pub fn to_sql(&self) -> String {
        format!(
            "{}.{} AS {}",
            quote_ident(&self.table_alias),
            quote_ident(&self.column),
            quote_ident(&self.alias)
        )
    }
}

/// Cache key of one field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub table: String,
    pub alias: String,
}

impl FieldKey {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
        }
    }
}

/// Quote an SQL identifier, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
