//! The world owns all entities and runs their behaviors.

use std::time::Duration;

use glam::UVec2;

use crate::behavior::Behavior;
use crate::entity::Lifecycle;
use crate::error::{Error, LookupError};
use crate::input::Input;
use crate::kind::Kind;
use crate::spatial::Spatial;
use crate::time::Pacer;
use crate::Entity;

mod builder;
pub use builder::Builder;

mod context;
pub use context::Context;

pub(crate) mod registry;
mod scheduler;
mod signal;
mod singleton;
pub(crate) mod state;
mod step;

pub mod tracer;
pub use tracer::Tracer;

/// Tunable parameters of a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The screen size in pixels, used to convert world coordinates to screen coordinates.
    pub screen:     UVec2,
    /// The target number of ticks per second.
    pub frame_rate: u32,
    /// The maximum number of waves in a tick before the spawn cascade is considered runaway.
    pub max_waves:  usize,
}

impl Default for Config {
    fn default() -> Self { Self { screen: UVec2::new(800, 450), frame_rate: 60, max_waves: 1024 } }
}

/// The data structure that stores all entities of the game.
pub struct World {
    pub(crate) state: state::State,
}

impl World {
    /// Spawns a new entity.
    ///
    /// The entity starts on the next tick.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateSingleton`] if `K` is a singleton kind
    /// and an instance of it is still alive.
    ///
    /// # Panics
    /// Panics if `K` was not registered.
    pub fn spawn<K: Kind>(&mut self, value: K) -> Result<Entity, Error> { self.state.spawn(value) }

    /// Deletes an entity.
    ///
    /// Returns `false` if the entity was already dead or removed.
    pub fn delete(&mut self, entity: Entity) -> bool { self.state.delete(entity) }

    /// Queues the receivers of `message` on every committed entity whose kind declares them.
    ///
    /// Returns the number of receiving entities.
    pub fn broadcast(&mut self, message: &str) -> usize {
        signal::broadcast(&mut self.state, &tracer::Noop, message)
    }

    /// Queues a behavior on an entity.
    ///
    /// Returns `false` if the entity is dead or removed.
    pub fn request(&mut self, entity: Entity, behavior: impl Into<Behavior>) -> bool {
        self.state.request(entity, behavior.into())
    }

    /// The data of an entity, if it still exists and is of kind `K`.
    pub fn get<K: Kind>(&self, entity: Entity) -> Option<&K> { self.state.get(entity) }

    /// Mutable access to the data of an entity.
    pub fn get_mut<K: Kind>(&mut self, entity: Entity) -> Option<&mut K> {
        self.state.get_mut(entity)
    }

    /// The lifecycle of an entity, or `None` if it has been removed.
    pub fn lifecycle(&self, entity: Entity) -> Option<Lifecycle> { self.state.lifecycle(entity) }

    /// Looks up the committed instance of a singleton kind.
    pub fn singleton<K: Kind>(&self) -> Result<Entity, LookupError> { self.state.singleton::<K>() }

    /// Lists the committed instances of a kind in creation order.
    ///
    /// # Panics
    /// Panics if `K` is a singleton kind.
    pub fn instances<K: Kind>(&self) -> Vec<Entity> { self.state.instances::<K>() }

    /// Iterates over all committed entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.state.registry.live().filter(|&entity| self.state.registry.is_visible(entity))
    }

    /// The spatial state of an entity.
    pub fn spatial(&self, entity: Entity) -> Option<&Spatial> { self.state.spatial(entity) }

    /// Mutable access to the spatial state of an entity.
    pub fn spatial_mut(&mut self, entity: Entity) -> Option<&mut Spatial> {
        self.state.spatial_mut(entity)
    }

    /// The number of behaviors queued on an entity and not started yet.
    pub fn pending_count(&self, entity: Entity) -> Option<usize> {
        Some(self.state.registry.get(entity)?.pending.len())
    }

    /// The number of suspended calls of an entity.
    pub fn active_count(&self, entity: Entity) -> Option<usize> {
        Some(self.state.registry.get(entity)?.active.len())
    }

    /// The input state, for the host to feed.
    pub fn input_mut(&mut self) -> &mut Input { &mut self.state.input }

    /// The input state.
    pub fn input(&self) -> &Input { &self.state.input }

    /// The configuration of this world.
    pub fn config(&self) -> &Config { &self.state.config }

    /// The time since the world was built.
    pub fn runtime(&self) -> Duration { self.state.timing.runtime() }

    /// Creates a pacer for the configured frame rate.
    pub fn pacer(&self) -> Pacer { Pacer::new(self.state.config.frame_rate) }
}
