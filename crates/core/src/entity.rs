//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Invoice rows are entities: two rows with identical amounts are still
/// different rows if their ids differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
