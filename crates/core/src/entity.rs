//! Entity trait: things with identity inside a result set.
//!
//! A mini product is identified by its variant, not its product: two variants
//! of one product are distinct results.

/// Anything carrying a stable identifier.
pub trait Entity {
    /// Row identifier type (e.g. `VariantId`).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Same identity, regardless of the remaining fields.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
