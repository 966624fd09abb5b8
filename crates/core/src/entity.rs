//! Entity trait: identity owned by the upstream commerce platform.

/// Entity marker + minimal interface.
///
/// Products and collections are owned by the upstream API; the storefront only
/// ever reads them, so there is no version or mutation surface here.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
