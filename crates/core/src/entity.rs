//! Entity trait: identity of a server-side record.

/// Entity marker + minimal interface.
///
/// Every record returned by a list endpoint implements this so views can key
/// rows and build detail links without knowing the concrete type.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
