use std::any::{self, Any};
use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;

use super::registry::{Object, Registry};
use super::singleton::Singletons;
use super::Config;
use crate::behavior::Behavior;
use crate::entity::{Allocator, Lifecycle};
use crate::error::{Error, LookupError};
use crate::input::Input;
use crate::kind::{self, Kind, KindId};
use crate::spatial::{Rect, Spatial, Visual};
use crate::time::Timing;
use crate::Entity;

/// Everything a world owns, shared by [`World`](super::World) and [`Context`](super::Context).
pub(crate) struct State {
    pub(crate) kinds:      HashMap<KindId, Rc<kind::Info>>,
    pub(crate) registry:   Registry,
    pub(crate) singletons: Singletons,
    pub(crate) allocator:  Allocator,
    pub(crate) input:      Input,
    pub(crate) timing:     Timing,
    pub(crate) config:     Config,
    pub(crate) rng:        StdRng,
}

impl State {
    pub(crate) fn spawn<K: Kind>(&mut self, value: K) -> Result<Entity, Error> {
        let id = KindId::of::<K>();
        let kind = match self.kinds.get(&id) {
            Some(kind) => Rc::clone(kind),
            None => panic!("Cannot spawn an entity of unregistered kind {}", any::type_name::<K>()),
        };

        if kind.singleton && self.singletons.instance(id).is_some() {
            return Err(Error::DuplicateSingleton { kind: id });
        }

        let entity = self.allocator.allocate();
        if kind.singleton {
            self.singletons.claim(id, entity);
        }

        self.registry.insert(entity, Object::new(kind, Box::new(value)));
        log::trace!("Spawned {entity:?} of kind {id}");
        Ok(entity)
    }

    pub(crate) fn delete(&mut self, entity: Entity) -> bool {
        let Some(object) = self.registry.kill(entity) else { return false };
        let kind = object.kind.id;
        if object.kind.singleton {
            self.singletons.release(kind, entity);
        }
        log::trace!("Deleted {entity:?} of kind {kind}");
        true
    }

    pub(crate) fn request(&mut self, entity: Entity, behavior: Behavior) -> bool {
        match self.registry.get_mut(entity) {
            Some(object) if object.lifecycle.is_alive() => {
                object.pending.push(behavior);
                true
            }
            _ => {
                log::trace!("Ignored request to stale entity {entity:?}");
                false
            }
        }
    }

    pub(crate) fn lifecycle(&self, entity: Entity) -> Option<Lifecycle> {
        self.registry.lifecycle(entity)
    }

    pub(crate) fn get<K: Kind>(&self, entity: Entity) -> Option<&K> {
        self.registry.get(entity)?.data.downcast_ref()
    }

    pub(crate) fn get_mut<K: Kind>(&mut self, entity: Entity) -> Option<&mut K> {
        self.registry.get_mut(entity)?.data.downcast_mut()
    }

    /// Downcasts the data of an entity that is known to exist.
    pub(crate) fn data<T: Any>(&mut self, entity: Entity) -> &mut T {
        let object = match self.registry.get_mut(entity) {
            Some(object) => object,
            None => panic!("Entity {entity:?} has been removed"),
        };
        let kind = object.kind.id;
        match object.data.downcast_mut() {
            Some(data) => data,
            None => panic!(
                "Entity {entity:?} is of kind {kind}, not of type {}",
                any::type_name::<T>()
            ),
        }
    }

    pub(crate) fn singleton<K: Kind>(&self) -> Result<Entity, LookupError> {
        let kind = KindId::of::<K>();
        if !K::SINGLETON {
            return Err(LookupError::NotSingleton { kind });
        }

        self.singletons
            .instance(kind)
            .filter(|&entity| self.registry.is_visible(entity))
            .ok_or(LookupError::Missing { kind })
    }

    pub(crate) fn instances<K: Kind>(&self) -> Vec<Entity> {
        assert!(
            !K::SINGLETON,
            "Cannot list instances of singleton kind {}; use `singleton` instead",
            any::type_name::<K>()
        );

        self.registry
            .of_kind(KindId::of::<K>())
            .filter(|&entity| self.registry.is_visible(entity))
            .collect()
    }

    pub(crate) fn spatial(&self, entity: Entity) -> Option<&Spatial> {
        self.registry.get(entity)?.spatial.as_ref()
    }

    pub(crate) fn spatial_mut(&mut self, entity: Entity) -> Option<&mut Spatial> {
        self.registry.get_mut(entity)?.spatial.as_mut()
    }

    /// Returns the collision rectangle of a sprite,
    /// or `None` if the entity is not a sprite.
    pub(crate) fn rect(&self, entity: Entity) -> Option<Rect> {
        let object = self.registry.get(entity)?;
        let spatial = object.spatial.as_ref()?;
        let Visual::Sprite { costume } = spatial.visual else { return None };
        let image = object.kind.costumes().get(costume)?;

        let size = glam::Vec2::new(image.width() as f32, image.height() as f32) * spatial.factor();
        Some(Rect::from_center(spatial.pos, size))
    }

    pub(crate) fn touching(&self, a: Entity, b: Entity) -> bool {
        let rect_of = |entity| match self.rect(entity) {
            Some(rect) => rect,
            None => panic!("Cannot check if {entity:?} is touching another entity: it is not a sprite"),
        };
        rect_of(a).intersection(&rect_of(b)).is_some()
    }

    /// Switches a sprite to its next costume, wrapping around at the end.
    pub(crate) fn next_costume(&mut self, entity: Entity) {
        let Some(object) = self.registry.get_mut(entity) else { return };
        let count = object.kind.costumes().len();
        if let Some(Spatial { visual: Visual::Sprite { costume }, .. }) = &mut object.spatial {
            if count > 0 {
                *costume = (*costume + 1) % count;
            }
        }
    }

    /// Switches a sprite to the costume named `name`.
    ///
    /// Returns `false` if the entity is not a sprite or has no such costume.
    pub(crate) fn set_costume(&mut self, entity: Entity, name: &str) -> bool {
        let Some(object) = self.registry.get_mut(entity) else { return false };
        let Some(index) = object.kind.costumes().iter().position(|image| image.name() == name)
        else {
            return false;
        };
        match &mut object.spatial {
            Some(Spatial { visual: Visual::Sprite { costume }, .. }) => {
                *costume = index;
                true
            }
            _ => false,
        }
    }
}
