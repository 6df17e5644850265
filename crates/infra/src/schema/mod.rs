//! Schema catalog: runtime column discovery for extension tables.
//!
//! Only the attribute tables are introspected; their column set differs per
//! installation. A failure here is an environment fault and is never retried.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

pub use in_memory::InMemorySchemaCatalog;
pub use postgres::PgSchemaCatalog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaIntrospectionError {
    #[error("table `{0}` does not exist")]
    TableNotFound(String),

    #[error("failed to read column metadata of `{table}`: {message}")]
    Metadata { table: String, message: String },

    /// The select alias of a column would exceed the Postgres identifier
    /// limit and come back truncated.
    #[error("alias `{alias}` of `{table}`.`{column}` exceeds {max} bytes")]
    AliasTooLong {
        table: String,
        column: String,
        alias: String,
        max: usize,
    },
}

/// Lists the columns of a table, in definition order.
#[async_trait::async_trait]
pub trait SchemaCatalog: Send + Sync {
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, SchemaIntrospectionError>;
}

#[async_trait::async_trait]
impl<S> SchemaCatalog for Arc<S>
where
    S: SchemaCatalog + ?Sized,
{
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, SchemaIntrospectionError> {
        (**self).list_columns(table).await
    }
}
