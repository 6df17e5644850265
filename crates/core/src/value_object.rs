//! Value object trait: equality by value, not identity.
//!
//! Sub-entities joined into a mini product (tax, unit, price group, ...) are
//! modelled as value objects: they are rebuilt from every row and two
//! instances with the same fields are interchangeable.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity of its own inside the aggregate that holds it
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Unit {
///     id: i64,
///     unit: String,
/// }
///
/// impl ValueObject for Unit {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
