//! Infrastructure layer: schema introspection, query composition, execution
//! and hydration of mini products.
//!
//! The retrieval pipeline for one `get_minis` call:
//!
//! ```text
//! FieldCatalog ─▶ MiniQueryComposer ─▶ MiniExecutor ─▶ MiniHydrator ─▶ ProductGateway
//!  (columns)        (one statement)      (flat rows)     (ProductMini)    (dedupe)
//! ```

pub mod config;
pub mod executor;
pub mod fields;
pub mod query;
pub mod read_model;
pub mod schema;
pub mod tables;


#[cfg(test)]
mod fixtures;

pub use config::{ConfigError, GatewayConfig};
pub use read_model::{GatewayError, PgProductGateway, ProductGateway};
