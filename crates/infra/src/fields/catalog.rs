use std::sync::Arc;

use tracing::{debug, instrument, trace};

use super::{FieldCache, FieldKey, SelectField};
use crate::schema::{SchemaCatalog, SchemaIntrospectionError};
use crate::tables;

/// Resolves the select list of a `(table, alias)` pair.
///
/// Core tables always use their fixed column list, even if the physical table
/// has grown extra columns. Any other table is introspected through `S` on
/// first use and served from the injected [`FieldCache`] afterwards.
#[derive(Debug)]
pub struct FieldCatalog<S> {
    schema: S,
    cache: Arc<FieldCache>,
}

impl<S> FieldCatalog<S>
where
    S: SchemaCatalog,
{
    pub fn new(schema: S) -> Self {
        Self::with_cache(schema, Arc::new(FieldCache::new()))
    }

    /// Share one cache between several catalogs (e.g. per-request catalogs
    /// over one pool).
    pub fn with_cache(schema: S, cache: Arc<FieldCache>) -> Self {
        Self { schema, cache }
    }

    pub fn cache(&self) -> &Arc<FieldCache> {
        &self.cache
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    #[instrument(skip(self))]
    pub async fn fields_for(
        &self,
        table: &str,
        alias: &str,
    ) -> Result<Arc<[SelectField]>, SchemaIntrospectionError> {
        if let Some(columns) = tables::fixed_columns(table) {
            return Ok(columns
                .iter()
                .map(|column| SelectField::new(alias, *column))
                .collect());
        }

        let key = FieldKey::new(table, alias);
        if let Some(fields) = self.cache.get(&key) {
            trace!(fields = fields.len(), "field cache hit");
            return Ok(fields);
        }

        let columns = self.schema.list_columns(table).await?;
        debug!(columns = columns.len(), "field cache miss; introspected table");

        let fields = columns
            .iter()
            .map(|column| checked_field(table, alias, column))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.cache.get_or_insert(key, fields))
    }
}

/// Reject columns whose alias the server would truncate; a truncated alias no
/// longer maps back to its column and may collide with a sibling.
fn checked_field(
    table: &str,
    alias: &str,
    column: &str,
) -> Result<SelectField, SchemaIntrospectionError> {
    let field = SelectField::new(alias, column);
    if field.alias().len() > tables::MAX_IDENTIFIER_LEN {
        return Err(SchemaIntrospectionError::AliasTooLong {
            table: table.to_string(),
            column: column.to_string(),
            alias: field.alias().to_string(),
            max: tables::MAX_IDENTIFIER_LEN,
        });
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InMemorySchemaCatalog;

    fn attribute_schema() -> Arc<InMemorySchemaCatalog> {
        Arc::new(
            InMemorySchemaCatalog::new()
                .with_table("s_articles_attributes", ["id", "articledetailsID", "attr1"]),
        )
    }

    #[tokio::test]
    async fn dynamic_fields_are_aliased() {
        let catalog = FieldCatalog::new(attribute_schema());

        let fields = catalog
            .fields_for("s_articles_attributes", "attribute")
            .await
            .unwrap();

        let sql: Vec<_> = fields.iter().map(SelectField::to_sql).collect();
        assert_eq!(
            sql,
            vec![
                r#""attribute"."id" AS "__attribute_id""#,
                r#""attribute"."articledetailsID" AS "__attribute_articledetailsID""#,
                r#""attribute"."attr1" AS "__attribute_attr1""#,
            ]
        );
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let schema = attribute_schema();
        let catalog = FieldCatalog::new(schema.clone());

        let first = catalog.fields_for("s_articles_attributes", "attribute").await.unwrap();
        let second = catalog.fields_for("s_articles_attributes", "attribute").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(schema.introspection_count(), 1);
    }

    #[tokio::test]
    async fn cache_is_keyed_by_alias_too() {
        let schema = attribute_schema();
        let catalog = FieldCatalog::new(schema.clone());

        catalog.fields_for("s_articles_attributes", "attribute").await.unwrap();
        let other = catalog.fields_for("s_articles_attributes", "a2").await.unwrap();

        assert_eq!(other[0].alias(), "__a2_id");
        assert_eq!(schema.introspection_count(), 2);
        assert_eq!(catalog.cache().len(), 2);
    }

    #[tokio::test]
    async fn core_tables_never_introspect() {
        let schema = attribute_schema();
        let catalog = FieldCatalog::new(schema.clone());

        let unit = catalog.fields_for("s_core_units", "unit").await.unwrap();

        let aliases: Vec<_> = unit.iter().map(SelectField::alias).collect();
        assert_eq!(aliases, vec!["__unit_id", "__unit_unit", "__unit_description"]);
        assert_eq!(schema.introspection_count(), 0);
        assert!(catalog.cache().is_empty());
    }

    #[tokio::test]
    async fn introspection_errors_are_not_cached() {
        let schema = Arc::new(InMemorySchemaCatalog::new());
        let catalog = FieldCatalog::new(schema.clone());

        let err = catalog
            .fields_for("s_articles_attributes", "attribute")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SchemaIntrospectionError::TableNotFound("s_articles_attributes".into())
        );

        schema.set_columns("s_articles_attributes", ["id"]);
        let fields = catalog.fields_for("s_articles_attributes", "attribute").await.unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(schema.introspection_count(), 2);
    }

    #[tokio::test]
    async fn overlong_alias_is_rejected_and_not_cached() {
        let schema = Arc::new(InMemorySchemaCatalog::new().with_table(
            "s_articles_supplier_attributes",
            ["id", "swag_custom_products_template_configuration_hash"],
        ));
        let catalog = FieldCatalog::new(schema.clone());

        let err = catalog
            .fields_for("s_articles_supplier_attributes", "manufacturerAttribute")
            .await
            .unwrap_err();

        match err {
            SchemaIntrospectionError::AliasTooLong {
                table,
                column,
                alias,
                max,
            } => {
                assert_eq!(table, "s_articles_supplier_attributes");
                assert_eq!(column, "swag_custom_products_template_configuration_hash");
                assert_eq!(alias.len(), 72);
                assert_eq!(max, 63);
            }
            other => panic!("Expected AliasTooLong, got {other:?}"),
        }
        assert!(catalog.cache().is_empty());
    }

    #[tokio::test]
    async fn alias_at_the_identifier_limit_is_accepted() {
        // "__manufacturerAttribute_" is 24 bytes, leaving 39 for the column.
        let column = "c".repeat(39);
        let schema = Arc::new(
            InMemorySchemaCatalog::new()
                .with_table("s_articles_supplier_attributes", [column.clone()]),
        );
        let catalog = FieldCatalog::new(schema);

        let fields = catalog
            .fields_for("s_articles_supplier_attributes", "manufacturerAttribute")
            .await
            .unwrap();

        assert_eq!(fields[0].alias().len(), 63);
        assert_eq!(fields[0].column(), column);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_access_yields_one_complete_list() {
        let schema = attribute_schema();
        let catalog = Arc::new(FieldCatalog::new(schema.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let catalog = catalog.clone();
            handles.push(tokio::spawn(async move {
                catalog.fields_for("s_articles_attributes", "attribute").await
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap().unwrap());
        }

        let stored = catalog
            .cache()
            .get(&FieldKey::new("s_articles_attributes", "attribute"))
            .unwrap();
        for fields in &results {
            assert_eq!(fields.len(), 3);
            assert_eq!(fields, &stored);
        }
        assert!(schema.introspection_count() >= 1);
        assert!(schema.introspection_count() <= 16);
    }
}
