//! Entity trait: identity that survives reloads.

/// Entity marker + minimal interface.
///
/// Two entities with the same id are the same entity, even when a reload
/// changed their attributes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
