//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// The identifier is a mutation-tracking handle. Collections that merge by
/// name still address individual records through it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
