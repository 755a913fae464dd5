//! Storage of entity objects and the indices over them.
//!
//! Objects created or deleted during a wave are staged and only become visible
//! in (or disappear from) the indices when the wave is committed.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::iter;
use std::mem;
use std::rc::Rc;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::behavior::{Behavior, Call};
use crate::entity::Lifecycle;
use crate::kind::{self, KindId};
use crate::spatial::Spatial;
use crate::{Delay, Entity};

/// A suspended call and the delay it waits on.
pub(crate) struct Active {
    pub(crate) call:  Box<dyn Call>,
    pub(crate) delay: Delay,
    pub(crate) name:  &'static str,
}

/// The storage of one entity.
pub(crate) struct Object {
    pub(crate) kind:      Rc<kind::Info>,
    pub(crate) lifecycle: Lifecycle,
    /// Behaviors requested but not started yet.
    pub(crate) pending:   Vec<Behavior>,
    /// Suspended calls in the order they were started.
    pub(crate) active:    Vec<Active>,
    pub(crate) spatial:   Option<Spatial>,
    pub(crate) data:      Box<dyn Any>,
}

impl Object {
    pub(crate) fn new(kind: Rc<kind::Info>, data: Box<dyn Any>) -> Self {
        let spatial = kind.initial_spatial();
        Self {
            kind,
            lifecycle: Lifecycle::New,
            pending: Vec::new(),
            active: Vec::new(),
            spatial,
            data,
        }
    }
}

/// Entities created or deleted since the last commit.
#[derive(Debug, Default)]
pub(crate) struct Staging {
    pub(crate) created: Vec<Entity>,
    pub(crate) deleted: Vec<Entity>,
}

/// The result of a commit.
#[derive(Debug, Default)]
pub(crate) struct Commit {
    /// All entities staged for creation, in creation order.
    ///
    /// Entities that were also deleted before the commit are included,
    /// but they have already been removed from the storage.
    pub(crate) created: Vec<Entity>,
    /// Entities removed from the storage.
    pub(crate) deleted: Vec<Entity>,
}

/// Owns all entity objects.
#[derive(Default)]
pub(crate) struct Registry {
    objects: HashMap<Entity, Object>,
    /// Committed entities in creation order.
    live:    IndexSet<Entity>,
    by_kind: HashMap<KindId, IndexSet<Entity>>,
    staging: Staging,
}

impl Registry {
    /// Stores a new object and stages it for creation.
    pub(crate) fn insert(&mut self, entity: Entity, object: Object) {
        let old = self.objects.insert(entity, object);
        assert!(old.is_none(), "entity {entity:?} was allocated twice");
        self.staging.created.push(entity);
    }

    pub(crate) fn get(&self, entity: Entity) -> Option<&Object> { self.objects.get(&entity) }

    pub(crate) fn get_mut(&mut self, entity: Entity) -> Option<&mut Object> {
        self.objects.get_mut(&entity)
    }

    /// Returns the lifecycle of an entity that has not been removed yet.
    pub(crate) fn lifecycle(&self, entity: Entity) -> Option<Lifecycle> {
        self.objects.get(&entity).map(|object| object.lifecycle)
    }

    /// Marks an entity as dead and stages it for removal.
    ///
    /// Returns the object if it was alive before this call.
    pub(crate) fn kill(&mut self, entity: Entity) -> Option<&Object> {
        let object = self.objects.get_mut(&entity)?;
        if !object.lifecycle.is_alive() {
            return None;
        }

        object.lifecycle = Lifecycle::Dead;
        self.staging.deleted.push(entity);
        Some(object)
    }

    /// Whether the entity has been committed and is not dead.
    pub(crate) fn is_visible(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
            && self.objects.get(&entity).map_or(false, |object| object.lifecycle.is_alive())
    }

    /// Iterates over committed entities in creation order.
    ///
    /// Dead entities that have not been committed yet are included.
    pub(crate) fn live(&self) -> impl Iterator<Item = Entity> + '_ { self.live.iter().copied() }

    /// The number of committed entities.
    pub(crate) fn live_len(&self) -> usize { self.live.len() }

    /// Entities staged for creation since the last commit.
    pub(crate) fn staged(&self) -> &[Entity] { &self.staging.created }

    /// Iterates over committed entities of a kind in creation order.
    #[auto_enums::auto_enum(Iterator)]
    pub(crate) fn of_kind(&self, kind: KindId) -> impl Iterator<Item = Entity> + '_ {
        match self.by_kind.get(&kind) {
            Some(entities) => entities.iter().copied(),
            None => iter::empty(),
        }
    }

    /// Drains the staging buffers into the indices.
    ///
    /// Staged creations are committed before staged deletions,
    /// so an entity created and deleted in the same wave never becomes visible.
    pub(crate) fn commit(&mut self) -> Commit {
        let Staging { created, deleted } = mem::take(&mut self.staging);

        for &entity in &created {
            let Some(object) = self.objects.get(&entity) else { continue };
            self.live.insert(entity);
            self.by_kind.entry(object.kind.id).or_default().insert(entity);
        }

        if !deleted.is_empty() {
            let removed: HashSet<Entity> = deleted.iter().copied().collect();
            let mut kinds = HashSet::new();
            for entity in &deleted {
                if let Some(object) = self.objects.remove(entity) {
                    kinds.insert(object.kind.id);
                }
            }

            // a single order-preserving pass per index
            self.live.retain(|entity| !removed.contains(entity));
            for kind in kinds {
                if let Some(set) = self.by_kind.get_mut(&kind) {
                    set.retain(|entity| !removed.contains(entity));
                }
            }
        }

        if !created.is_empty() || !deleted.is_empty() {
            log::trace!(
                "Committed creation of [{}] and deletion of [{}]",
                created.iter().join(", "),
                deleted.iter().join(", "),
            );
        }

        Commit { created, deleted }
    }
}
