use std::any::Any;
use std::time::Duration;

use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use super::state::State;
use super::tracer::Tracer;
use super::{signal, Config};
use crate::behavior::Behavior;
use crate::entity::Lifecycle;
use crate::error::{Error, LookupError};
use crate::input::Input;
use crate::kind::Kind;
use crate::spatial::{Rect, Spatial};
use crate::{Delay, Entity};

/// The handle through which behaviors interact with the world.
///
/// A context is always bound to the entity whose behavior is running,
/// which is returned by [`this`](Self::this).
pub struct Context<'t> {
    pub(crate) state:  &'t mut State,
    pub(crate) this:   Entity,
    pub(crate) tracer: &'t dyn Tracer,
}

impl<'t> Context<'t> {
    pub(crate) fn new(state: &'t mut State, this: Entity, tracer: &'t dyn Tracer) -> Self {
        Self { state, this, tracer }
    }

    /// The entity whose behavior is running.
    pub fn this(&self) -> Entity { self.this }

    /// The data of the current entity.
    ///
    /// # Panics
    /// Panics if the current entity is not of kind `T`.
    pub fn data<T: Any>(&mut self) -> &mut T { self.state.data(self.this) }

    /// The data of another entity, if it still exists and is of kind `K`.
    pub fn get<K: Kind>(&self, entity: Entity) -> Option<&K> { self.state.get(entity) }

    /// Mutable access to the data of another entity.
    pub fn get_mut<K: Kind>(&mut self, entity: Entity) -> Option<&mut K> {
        self.state.get_mut(entity)
    }

    /// The lifecycle of an entity, or `None` if it has been removed.
    pub fn lifecycle(&self, entity: Entity) -> Option<Lifecycle> { self.state.lifecycle(entity) }

    /// Runs a behavior on the current entity.
    ///
    /// A routine runs immediately.
    /// A procedure is queued and started on the next step of the current entity,
    /// never inside the running call.
    pub fn run(&mut self, behavior: impl Into<Behavior>) {
        match behavior.into() {
            Behavior::Routine(routine) => routine.call(self),
            behavior @ Behavior::Procedure(_) => {
                self.state.request(self.this, behavior);
            }
        }
    }

    /// Queues a behavior on any entity.
    ///
    /// The behavior starts on the next step of `entity`.
    /// Requests to a dead or removed entity are ignored.
    ///
    /// Returns `false` if the request was ignored.
    pub fn request(&mut self, entity: Entity, behavior: impl Into<Behavior>) -> bool {
        self.state.request(entity, behavior.into())
    }

    /// Spawns a new entity.
    ///
    /// The entity is stepped for the first time later in the same tick,
    /// after the current wave has been committed.
    pub fn spawn<K: Kind>(&mut self, value: K) -> Result<Entity, Error> { self.state.spawn(value) }

    /// Deletes an entity.
    ///
    /// The entity never advances again, even if it is the current entity.
    /// Returns `false` if the entity was already dead or removed.
    pub fn delete(&mut self, entity: Entity) -> bool { self.state.delete(entity) }

    /// Queues the receivers of `message` on every committed entity whose kind declares them.
    ///
    /// Returns the number of receiving entities.
    pub fn broadcast(&mut self, message: &str) -> usize {
        signal::broadcast(self.state, self.tracer, message)
    }

    /// Looks up the instance of a singleton kind.
    pub fn singleton<K: Kind>(&self) -> Result<Entity, LookupError> { self.state.singleton::<K>() }

    /// Lists the committed instances of a kind in creation order.
    ///
    /// # Panics
    /// Panics if `K` is a singleton kind.
    pub fn instances<K: Kind>(&self) -> Vec<Entity> { self.state.instances::<K>() }

    /// The spatial state of an entity.
    pub fn spatial(&self, entity: Entity) -> Option<&Spatial> { self.state.spatial(entity) }

    /// Mutable access to the spatial state of an entity.
    pub fn spatial_mut(&mut self, entity: Entity) -> Option<&mut Spatial> {
        self.state.spatial_mut(entity)
    }

    /// Switches a sprite to its next costume.
    pub fn next_costume(&mut self, entity: Entity) { self.state.next_costume(entity) }

    /// Switches a sprite to the costume with the image name `name`.
    ///
    /// Returns `false` if the entity is not a sprite or has no such costume.
    pub fn set_costume(&mut self, entity: Entity, name: &str) -> bool {
        self.state.set_costume(entity, name)
    }

    /// The collision rectangle of a sprite.
    pub fn rect(&self, entity: Entity) -> Option<Rect> { self.state.rect(entity) }

    /// Whether the collision rectangles of two sprites intersect.
    ///
    /// # Panics
    /// Panics if either entity is not a sprite.
    pub fn touching(&self, a: Entity, b: Entity) -> bool { self.state.touching(a, b) }

    /// A delay that finishes after `duration` has elapsed on the world clock.
    #[track_caller]
    pub fn wait(&self, duration: Duration) -> Delay {
        Delay::timed(self.state.timing.clock.clone(), duration)
    }

    /// A delay that finishes after `secs` seconds have elapsed on the world clock.
    #[track_caller]
    pub fn wait_secs(&self, secs: f64) -> Delay { self.wait(Duration::from_secs_f64(secs)) }

    /// The time since the world was built.
    pub fn runtime(&self) -> Duration { self.state.timing.runtime() }

    /// The time between the starts of the previous and the current tick.
    pub fn delta(&self) -> Duration { self.state.timing.delta() }

    /// The tick rate derived from [`delta`](Self::delta), or 0 before the second tick.
    pub fn fps(&self) -> f64 {
        let delta = self.delta().as_secs_f64();
        if delta > 0.0 {
            1.0 / delta
        } else {
            0.0
        }
    }

    /// Picks a uniformly random value in `low..=high`.
    pub fn pick_random<T: SampleUniform + PartialOrd>(&mut self, low: T, high: T) -> T {
        self.state.rng.gen_range(low..=high)
    }

    /// The input state of this tick.
    pub fn input(&self) -> &Input { &self.state.input }

    /// The configuration of the world.
    pub fn config(&self) -> &Config { &self.state.config }
}
