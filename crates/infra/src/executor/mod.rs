//! Executor boundary: runs a composed [`MiniQuery`] and returns flat rows.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `QueryExecutionError` as follows:
//!
//! | SQLx Error | QueryExecutionError |
//! |------------|---------------------|
//! | Database | `Database` (message carries the driver message) |
//! | PoolClosed | `PoolClosed` |
//! | ColumnDecode | `Decode` |
//! | Other | `Driver` (network errors, timeouts, etc.) |
//!
//! Errors are returned unchanged to the caller. There is no retry here; the
//! statement is read-only and cheap to re-issue from a calling layer.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use storefront_core::FlatRow;

use crate::query::MiniQuery;

pub use in_memory::InMemoryMiniExecutor;
pub use postgres::PgMiniExecutor;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryExecutionError {
    #[error("database error in {operation}: {message}")]
    Database { operation: String, message: String },

    #[error("connection pool closed in {0}")]
    PoolClosed(String),

    #[error("failed to decode column `{column}` ({type_name}): {message}")]
    Decode {
        column: String,
        type_name: String,
        message: String,
    },

    #[error("sqlx error in {operation}: {message}")]
    Driver { operation: String, message: String },
}

/// Runs mini queries.
#[async_trait::async_trait]
pub trait MiniExecutor: Send + Sync {
    /// Execute `query` and return every row, in result order.
    async fn execute(&self, query: &MiniQuery) -> Result<Vec<FlatRow>, QueryExecutionError>;
}

#[async_trait::async_trait]
impl<E> MiniExecutor for Arc<E>
where
    E: MiniExecutor + ?Sized,
{
    async fn execute(&self, query: &MiniQuery) -> Result<Vec<FlatRow>, QueryExecutionError> {
        (**self).execute(query).await
    }
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> QueryExecutionError {
    match err {
        sqlx::Error::Database(db_err) => QueryExecutionError::Database {
            operation: operation.to_string(),
            message: match db_err.code() {
                Some(code) => format!("{} (code {})", db_err.message(), code),
                None => db_err.message().to_string(),
            },
        },
        sqlx::Error::PoolClosed => QueryExecutionError::PoolClosed(operation.to_string()),
        sqlx::Error::ColumnDecode { index, source } => QueryExecutionError::Decode {
            column: index,
            type_name: "unknown".to_string(),
            message: source.to_string(),
        },
        _ => QueryExecutionError::Driver {
            operation: operation.to_string(),
            message: err.to_string(),
        },
    }
}
