use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{SchemaCatalog, SchemaIntrospectionError};

/// In-memory schema catalog for tests/dev.
///
/// Counts introspection calls so callers can assert on cache behaviour.
#[derive(Debug, Default)]
pub struct InMemorySchemaCatalog {
    tables: RwLock<HashMap<String, Vec<String>>>,
    calls: AtomicUsize,
}

impl InMemorySchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table<I, C>(self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.set_columns(table, columns);
        self
    }

    /// Define (or redefine) the columns of a table.
    pub fn set_columns<I, C>(&self, table: impl Into<String>, columns: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(table.into(), columns.into_iter().map(Into::into).collect());
        }
    }

    /// Number of `list_columns` calls served so far.
    pub fn introspection_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SchemaCatalog for InMemorySchemaCatalog {
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, SchemaIntrospectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let tables = self.tables.read().map_err(|e| SchemaIntrospectionError::Metadata {
            table: table.to_string(),
            message: e.to_string(),
        })?;

        tables
            .get(table)
            .cloned()
            .ok_or_else(|| SchemaIntrospectionError::TableNotFound(table.to_string()))
    }
}
