//! Entity trait: identity + continuity across state changes.
//!
//! Collections are stored as plain ordered vectors, so lookups are linear
//! scans by id. The helpers here are the single place that does that scan.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Position of the entity with `id` in `items`.
pub fn position_of<E: Entity>(items: &[E], id: E::Id) -> Option<usize> {
    items.iter().position(|e| e.id() == id)
}

pub fn find<E: Entity>(items: &[E], id: E::Id) -> Option<&E> {
    items.iter().find(|e| e.id() == id)
}

pub fn find_mut<E: Entity>(items: &mut [E], id: E::Id) -> Option<&mut E> {
    items.iter_mut().find(|e| e.id() == id)
}

/// Next id in insertion order: the largest existing id plus one, or `first`
/// for an empty collection.
pub fn next_id<E: Entity>(items: &[E], first: E::Id, succ: impl Fn(E::Id) -> E::Id) -> E::Id {
    items.iter().map(Entity::id).max().map(succ).unwrap_or(first)
}
