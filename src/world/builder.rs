use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::registry::Registry;
use super::singleton::Singletons;
use super::state::State;
use super::{Config, World};
use crate::entity::Allocator;
use crate::error::Error;
use crate::input::Input;
use crate::kind::{self, Kind, KindId};
use crate::resource::{Cache, Loader};
use crate::time::{self, Clock, Timing};

/// This type is used to build a world.
/// No more kinds can be registered after the builder is built.
pub struct Builder {
    cache:  Cache,
    kinds:  HashMap<KindId, Rc<kind::Info>>,
    config: Config,
    clock:  Option<Rc<dyn Clock>>,
    seed:   Option<u64>,
}

impl Builder {
    /// Creates a builder that loads costume images through `loader`.
    pub fn new(loader: impl Loader + 'static) -> Self {
        Self {
            cache:  Cache::new(loader),
            kinds:  HashMap::new(),
            config: Config::default(),
            clock:  None,
            seed:   None,
        }
    }

    /// Replaces the configuration.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Sets the clock used by timed delays and time queries.
    ///
    /// Defaults to [`time::System`].
    pub fn clock(&mut self, clock: Rc<dyn Clock>) -> &mut Self {
        self.clock = Some(clock);
        self
    }

    /// Seeds the random number generator used by `pick_random`.
    ///
    /// Defaults to a seed from the operating system.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Registers the kind `K`.
    ///
    /// This declares the kind, validates its hooks and loads its costumes.
    /// Errors are meant to abort the program before any entity is spawned.
    pub fn register<K: Kind>(&mut self) -> Result<KindId, Error> {
        let id = KindId::of::<K>();
        if self.kinds.contains_key(&id) {
            return Err(Error::DuplicateKind { kind: id });
        }

        let info = kind::Info::compile::<K>(&mut self.cache)?;
        log::debug!(
            "Registered kind {id} with {} hooks{}",
            info.hooks.len(),
            if info.singleton { " as singleton" } else { "" },
        );
        self.kinds.insert(id, Rc::new(info));
        Ok(id)
    }

    /// Constructs the world from the builder.
    pub fn build(self) -> World {
        let clock: Rc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Rc::new(time::System::default()),
        };
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        World {
            state: State {
                kinds: self.kinds,
                registry: Registry::default(),
                singletons: Singletons::default(),
                allocator: Allocator::default(),
                input: Input::default(),
                timing: Timing::new(clock),
                config: self.config,
                rng,
            },
        }
    }
}
