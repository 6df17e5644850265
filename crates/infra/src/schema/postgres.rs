//! Postgres-backed schema catalog (`information_schema.columns`).

use std::sync::Arc;

use sqlx::{PgPool, Row};
use tracing::{Span, instrument};

use super::{SchemaCatalog, SchemaIntrospectionError};

/// Reads column names from `information_schema.columns`.
///
/// Lookups are scoped to one schema (`public` unless configured otherwise), so
/// a same-named table in another schema never leaks extra columns into the
/// select list.
#[derive(Debug, Clone)]
pub struct PgSchemaCatalog {
    pool: Arc<PgPool>,
    schema: String,
}

impl PgSchemaCatalog {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool: Arc::new(pool),
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

#[async_trait::async_trait]
impl SchemaCatalog for PgSchemaCatalog {
    #[instrument(skip(self), fields(schema = %self.schema, columns = tracing::field::Empty))]
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, SchemaIntrospectionError> {
        let metadata_error = |e: sqlx::Error| SchemaIntrospectionError::Metadata {
            table: table.to_string(),
            message: e.to_string(),
        };

        let rows = sqlx::query(
            r#"
            SELECT column_name::text AS column_name
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position ASC
            "#,
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_all(&*self.pool)
        .await
        .map_err(metadata_error)?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(row.try_get::<String, _>("column_name").map_err(metadata_error)?);
        }

        // information_schema has no row for a table that does not exist.
        if columns.is_empty() {
            return Err(SchemaIntrospectionError::TableNotFound(table.to_string()));
        }

        Span::current().record("columns", columns.len());
        Ok(columns)
    }
}
