//! `storefront-core`: shared building blocks for the catalog read side.
//!
//! This crate contains **pure** primitives (no IO): identifiers, the scalar
//! value model used for flattened query rows, and the error types shared by
//! the hydration layer.

pub mod entity;
pub mod error;
pub mod id;
pub mod row;
pub mod value;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, HydrationError};
pub use id::{OrderNumber, ProductId, VariantId};
pub use row::{FieldSet, FlatRow, FromFields};
pub use value::Scalar;
pub use value_object::ValueObject;
