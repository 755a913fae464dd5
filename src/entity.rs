//! An entity is a single scheduled object owned by the world.
//!
//! Entities are referenced by [`Entity`] handles.
//! Handles are allocated from a monotonic counter and never recycled,
//! so comparing two handles compares their creation order,
//! and a handle to a deleted entity can never point to a newer one.

use std::fmt;
use std::num::NonZeroU32;

/// A non-owning handle to an entity.
///
/// The entity itself is owned by the world registry.
/// Operations on a handle whose entity has already been removed are no-ops or return `None`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(NonZeroU32);

impl Entity {
    pub(crate) fn new(id: NonZeroU32) -> Self { Self(id) }

    /// Returns the raw ID of the entity.
    pub fn id(self) -> u32 { self.0.get() }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Entity#{}", self.0) }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// Allocates entity handles in creation order.
#[derive(Debug)]
pub(crate) struct Allocator {
    next: NonZeroU32,
}

impl Default for Allocator {
    fn default() -> Self { Self { next: NonZeroU32::MIN } }
}

impl Allocator {
    pub(crate) fn allocate(&mut self) -> Entity {
        let id = self.next;
        self.next = id.checked_add(1).expect("entity ID space exhausted");
        Entity::new(id)
    }
}

/// The lifecycle state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The entity has been created but its `start` behavior has not run yet.
    New,
    /// The entity has started and receives `update` every tick.
    Live,
    /// The entity was deleted.
    /// It is never stepped again and will be dropped at the next commit.
    Dead,
}

impl Lifecycle {
    /// Whether the entity is still `New` or `Live`.
    pub fn is_alive(self) -> bool { !matches!(self, Self::Dead) }
}

#[cfg(test)]
mod tests;
