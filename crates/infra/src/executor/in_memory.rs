use std::collections::HashSet;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use storefront_core::{FlatRow, Scalar};

use super::{MiniExecutor, QueryExecutionError};
use crate::query::MiniQuery;
use crate::tables::{ORDER_NUMBER_COLUMN, ROOT, ROOT_KEY_COLUMN};

/// In-memory executor for tests/dev.
///
/// Holds already-flattened rows (aliased exactly as the composed select list
/// would alias them) and answers a query by filtering on the variant order
/// number, sorted by variant id like the real statement. Every call is
/// counted, and the executor can be armed to fail.
#[derive(Debug, Default)]
pub struct InMemoryMiniExecutor {
    rows: RwLock<Vec<FlatRow>>,
    failure: RwLock<Option<QueryExecutionError>>,
    calls: AtomicUsize,
}

impl InMemoryMiniExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = FlatRow>) -> Self {
        let executor = Self::new();
        for row in rows {
            executor.push_row(row);
        }
        executor
    }

    pub fn push_row(&self, row: FlatRow) {
        if let Ok(mut rows) = self.rows.write() {
            rows.push(row);
        }
    }

    /// Make every following `execute` fail with `err`.
    pub fn fail_with(&self, err: QueryExecutionError) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = Some(err);
        }
    }

    /// Number of `execute` calls served so far.
    pub fn execution_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MiniExecutor for InMemoryMiniExecutor {
    async fn execute(&self, query: &MiniQuery) -> Result<Vec<FlatRow>, QueryExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(failure) = self.failure.read() {
            if let Some(err) = failure.as_ref() {
                return Err(err.clone());
            }
        }

        let wanted: HashSet<&str> = query.order_numbers().iter().map(String::as_str).collect();
        let number_alias = ROOT.alias_for(ORDER_NUMBER_COLUMN);
        let key_alias = ROOT.alias_for(ROOT_KEY_COLUMN);

        let rows = self.rows.read().map_err(|e| QueryExecutionError::Driver {
            operation: "execute_mini_query".to_string(),
            message: e.to_string(),
        })?;

        let mut matched: Vec<FlatRow> = rows
            .iter()
            .filter(|row| {
                row.get(&number_alias)
                    .and_then(Scalar::as_str)
                    .is_some_and(|number| wanted.contains(number))
            })
            .cloned()
            .collect();
        // Stable sort: rows of the same variant keep their insertion order.
        matched.sort_by_key(|row| row.get(&key_alias).and_then(Scalar::as_i64));

        Ok(matched)
    }
}
