//! Mini product gateway: the batch/single retrieval facade.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use sqlx::PgPool;
use thiserror::Error;
use tracing::{Span, debug, instrument, trace};

use storefront_core::{HydrationError, OrderNumber, Scalar};
use storefront_products::ProductMini;

use super::hydration::MiniHydrator;
use crate::executor::{MiniExecutor, PgMiniExecutor, QueryExecutionError};
use crate::fields::FieldCatalog;
use crate::query::MiniQueryComposer;
use crate::schema::{PgSchemaCatalog, SchemaCatalog, SchemaIntrospectionError};
use crate::tables::{ORDER_NUMBER_COLUMN, ROOT};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Schema(#[from] SchemaIntrospectionError),

    #[error(transparent)]
    Query(#[from] QueryExecutionError),

    #[error("failed to hydrate mini product: {0}")]
    Hydration(#[from] HydrationError),
}

/// Loads mini products by order number.
///
/// `get_minis` is the only operation that performs I/O: one composed statement
/// per call, however many numbers are requested. Callers that need several
/// products must batch them into one call.
///
/// ## Result contract
///
/// - Unknown order numbers are omitted, not reported.
/// - At most one product per order number. If the join yields several rows for
///   one number, the first row (lowest variant id) wins and later rows are
///   discarded.
/// - Results follow database order (ascending variant id), not input order.
///   Use [`ProductGateway::get_minis_indexed`] to look products up by number.
/// - Any failure fails the whole call; there are no partial results.
#[derive(Debug)]
pub struct ProductGateway<S, E> {
    composer: MiniQueryComposer<S>,
    executor: E,
    hydrator: MiniHydrator,
}

/// Gateway over a Postgres pool.
pub type PgProductGateway = ProductGateway<PgSchemaCatalog, PgMiniExecutor>;

impl PgProductGateway {
    /// `schema` is the database schema holding the catalog tables.
    pub fn from_pool(pool: PgPool, schema: impl Into<String>) -> Self {
        let catalog = FieldCatalog::new(PgSchemaCatalog::new(pool.clone(), schema));
        Self::new(catalog, PgMiniExecutor::new(pool))
    }
}

impl<S, E> ProductGateway<S, E>
where
    S: SchemaCatalog,
    E: MiniExecutor,
{
    pub fn new(fields: FieldCatalog<S>, executor: E) -> Self {
        Self {
            composer: MiniQueryComposer::new(fields),
            executor,
            hydrator: MiniHydrator::new(),
        }
    }

    pub fn field_catalog(&self) -> &FieldCatalog<S> {
        self.composer.field_catalog()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Load the mini products of `numbers`.
    ///
    /// Duplicate input numbers collapse. An empty input returns an empty list
    /// without touching the database.
    #[instrument(
        skip(self, numbers),
        fields(requested = tracing::field::Empty, rows = tracing::field::Empty)
    )]
    pub async fn get_minis<I>(&self, numbers: I) -> Result<Vec<ProductMini>, GatewayError>
    where
        I: IntoIterator<Item = OrderNumber>,
    {
        let numbers: BTreeSet<OrderNumber> = numbers.into_iter().collect();
        let span = Span::current();
        span.record("requested", numbers.len());

        let Some(query) = self.composer.build(&numbers).await? else {
            debug!("no order numbers requested; skipping query");
            return Ok(Vec::new());
        };

        let rows = self.executor.execute(&query).await?;
        span.record("rows", rows.len());

        let number_alias = ROOT.alias_for(ORDER_NUMBER_COLUMN);
        let mut seen = HashSet::new();
        let mut minis = Vec::with_capacity(rows.len());

        for row in rows {
            // First row per order number wins; skip the rest before hydrating.
            if let Some(number) = row.get(&number_alias).and_then(Scalar::as_str) {
                if !seen.insert(number.to_string()) {
                    trace!(number, "dropping duplicate row");
                    continue;
                }
            }
            minis.push(self.hydrator.hydrate_mini(row)?);
        }

        Ok(minis)
    }

    /// Load one mini product.
    ///
    /// Same as `get_minis([number])` followed by taking the first element;
    /// `None` if the number is unknown.
    pub async fn get_mini(
        &self,
        number: &OrderNumber,
    ) -> Result<Option<ProductMini>, GatewayError> {
        let minis = self.get_minis([number.clone()]).await?;
        Ok(minis.into_iter().next())
    }

    /// Load mini products keyed by their order number.
    pub async fn get_minis_indexed<I>(
        &self,
        numbers: I,
    ) -> Result<BTreeMap<OrderNumber, ProductMini>, GatewayError>
    where
        I: IntoIterator<Item = OrderNumber>,
    {
        let minis = self.get_minis(numbers).await?;
        Ok(minis
            .into_iter()
            .map(|mini| (mini.number().clone(), mini))
            .collect())
    }
}
