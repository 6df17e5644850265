//! Query composer: one statement joining every table of the mini plan.

use std::collections::BTreeSet;

use tracing::instrument;

use storefront_core::OrderNumber;

use crate::fields::{FieldCatalog, SelectField, quote_ident};
use crate::schema::{SchemaCatalog, SchemaIntrospectionError};
use crate::tables::{self, JOINS, ORDER_NUMBER_COLUMN, ROOT, ROOT_KEY_COLUMN, SELECT_ORDER};

/// A composed mini query together with its single bound parameter.
///
/// `$1` is the list of order numbers, bound as one array parameter and matched
/// with `= ANY($1)`; order numbers never appear in the SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniQuery {
    sql: String,
    order_numbers: Vec<String>,
}

impl MiniQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn order_numbers(&self) -> &[String] {
        &self.order_numbers
    }
}

/// Builds [`MiniQuery`] statements from the table plan in [`crate::tables`].
#[derive(Debug)]
pub struct MiniQueryComposer<S> {
    fields: FieldCatalog<S>,
}

impl<S> MiniQueryComposer<S>
where
    S: SchemaCatalog,
{
    pub fn new(fields: FieldCatalog<S>) -> Self {
        debug_assert!(tables::ensure_disjoint_prefixes(&SELECT_ORDER).is_ok());
        Self { fields }
    }

    pub fn field_catalog(&self) -> &FieldCatalog<S> {
        &self.fields
    }

    /// Compose the mini query for `numbers`.
    ///
    /// Returns `Ok(None)` for an empty set: there is nothing to look up and no
    /// statement (and no introspection) is needed.
    #[instrument(skip(self, numbers), fields(numbers = numbers.len()))]
    pub async fn build(
        &self,
        numbers: &BTreeSet<OrderNumber>,
    ) -> Result<Option<MiniQuery>, SchemaIntrospectionError> {
        if numbers.is_empty() {
            return Ok(None);
        }

        let mut select = Vec::new();
        for spec in SELECT_ORDER.iter() {
            let fields = self.fields.fields_for(spec.table, spec.alias).await?;
            select.extend(fields.iter().map(SelectField::to_sql));
        }

        Ok(Some(MiniQuery {
            sql: render(&select),
            order_numbers: numbers.iter().map(|n| n.as_str().to_string()).collect(),
        }))
    }
}

fn column(alias: &str, column: &str) -> String {
    format!("{}.{}", quote_ident(alias), quote_ident(column))
}

fn render(select: &[String]) -> String {
    let mut sql = String::from("SELECT\n    ");
    sql.push_str(&select.join(",\n    "));

    sql.push_str(&format!(
        "\nFROM {} AS {}",
        quote_ident(ROOT.table),
        quote_ident(ROOT.alias)
    ));

    for join in JOINS.iter() {
        sql.push_str(&format!(
            "\n{} {} AS {} ON {} = {}",
            join.kind.keyword(),
            quote_ident(join.target.table),
            quote_ident(join.target.alias),
            column(join.target.alias, join.target_column),
            column(join.source.alias, join.source_column),
        ));
    }

    sql.push_str(&format!(
        "\nWHERE {} = ANY($1)",
        column(ROOT.alias, ORDER_NUMBER_COLUMN)
    ));
    // Lowest variant id first, so "first row wins" does not depend on storage order.
    sql.push_str(&format!("\nORDER BY {} ASC", column(ROOT.alias, ROOT_KEY_COLUMN)));
    sql
}
