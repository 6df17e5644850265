//! Postgres-backed executor.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row, TypeInfo};
use tracing::{Span, instrument};

use storefront_core::{FlatRow, Scalar};

use super::{MiniExecutor, QueryExecutionError, map_sqlx_error};
use crate::query::MiniQuery;

/// Executes mini queries over a Postgres pool.
///
/// Column values are decoded by their Postgres type name into [`Scalar`].
/// Attribute tables may carry any column type an installation chose; types
/// outside the supported set fail the whole call with
/// [`QueryExecutionError::Decode`] rather than being silently dropped.
#[derive(Debug, Clone)]
pub struct PgMiniExecutor {
    pool: Arc<PgPool>,
}

impl PgMiniExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl MiniExecutor for PgMiniExecutor {
    #[instrument(
        skip(self, query),
        fields(numbers = query.order_numbers().len(), rows = tracing::field::Empty)
    )]
    async fn execute(&self, query: &MiniQuery) -> Result<Vec<FlatRow>, QueryExecutionError> {
        let rows = sqlx::query(query.sql())
            .bind(query.order_numbers())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("execute_mini_query", e))?;

        Span::current().record("rows", rows.len());
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<FlatRow, QueryExecutionError> {
    let mut flat = FlatRow::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.name(), column.type_info().name())?;
        flat.insert(column.name(), value);
    }
    Ok(flat)
}

fn decode_column(
    row: &PgRow,
    index: usize,
    name: &str,
    type_name: &str,
) -> Result<Scalar, QueryExecutionError> {
    let decode_error = |message: String| QueryExecutionError::Decode {
        column: name.to_string(),
        type_name: type_name.to_string(),
        message,
    };

    let value = match type_name {
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .map(|v| Scalar::from(v.map(i64::from))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .map(|v| Scalar::from(v.map(i64::from))),
        "INT8" => row.try_get::<Option<i64>, _>(index).map(Scalar::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map(|v| Scalar::from(v.map(f64::from))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index).map(Scalar::from),
        "NUMERIC" => row.try_get::<Option<Decimal>, _>(index).map(Scalar::from),
        "BOOL" => row.try_get::<Option<bool>, _>(index).map(Scalar::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index).map(Scalar::from)
        }
        "DATE" => row.try_get::<Option<NaiveDate>, _>(index).map(Scalar::from),
        "TIMESTAMP" => row.try_get::<Option<NaiveDateTime>, _>(index).map(Scalar::from),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map(|v| Scalar::from(v.map(|ts| ts.naive_utc()))),
        other => return Err(decode_error(format!("unsupported column type {other}"))),
    };

    value.map_err(|e| decode_error(e.to_string()))
}
