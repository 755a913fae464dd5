//! Tracks the live instance of each singleton kind.

use std::collections::hash_map::{self, HashMap};

use crate::kind::KindId;
use crate::Entity;

/// Maps each singleton kind to its instance in `{New, Live}`.
///
/// A slot is claimed when the instance is spawned,
/// not when it is committed,
/// so that two spawns in the same wave cannot both succeed.
#[derive(Debug, Default)]
pub(crate) struct Singletons {
    slots: HashMap<KindId, Entity>,
}

impl Singletons {
    /// The current instance of `kind`, including one that is not committed yet.
    pub(crate) fn instance(&self, kind: KindId) -> Option<Entity> { self.slots.get(&kind).copied() }

    /// Records `entity` as the instance of `kind`.
    ///
    /// Returns `false` without changing anything if the slot is occupied.
    pub(crate) fn claim(&mut self, kind: KindId, entity: Entity) -> bool {
        match self.slots.entry(kind) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(entry) => {
                entry.insert(entity);
                true
            }
        }
    }

    /// Frees the slot of `kind` if it is held by `entity`.
    pub(crate) fn release(&mut self, kind: KindId, entity: Entity) {
        if self.slots.get(&kind) == Some(&entity) {
            self.slots.remove(&kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Singletons;
    use crate::entity::Allocator;
    use crate::kind::KindId;

    struct Score;

    #[test]
    fn test_claim_and_release() {
        let mut allocator = Allocator::default();
        let mut singletons = Singletons::default();
        let kind = KindId::of::<Score>();

        let first = allocator.allocate();
        let second = allocator.allocate();

        assert!(singletons.claim(kind, first));
        assert!(!singletons.claim(kind, second));
        assert_eq!(singletons.instance(kind), Some(first));

        // releasing with a stale handle keeps the slot
        singletons.release(kind, second);
        assert_eq!(singletons.instance(kind), Some(first));

        singletons.release(kind, first);
        assert_eq!(singletons.instance(kind), None);
        assert!(singletons.claim(kind, second));
    }
}
