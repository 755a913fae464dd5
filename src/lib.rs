//! A frame-synchronized cooperative behavior scheduler for 2D games.
//!
//! # Kinds, entities and behaviors
//! Every object in the game is an *entity* of some *kind*.
//! A kind is a Rust type implementing [`Kind`],
//! which declares the behaviors shared by all of its entities:
//! an optional `start` behavior run on the first step of each entity,
//! an optional `update` behavior run on every later step,
//! and a table of *hooks* that receive named broadcast messages.
//!
//! A [`Behavior`] is either a routine, which runs synchronously to completion,
//! or a [`Procedure`], which can suspend itself by returning a [`Delay`]
//! and is resumed on a later tick once the delay has finished.
//! Procedures are cooperative: nothing runs concurrently,
//! and a procedure only gives up control when it returns.
//!
//! # Ticks and waves
//! The host calls [`World::tick`] once per frame.
//! A tick steps every existing entity exactly once,
//! then commits the entities spawned and deleted during the tick.
//! Entities spawned during the tick form the next *wave* and are stepped in the same tick,
//! so that chains of spawns (a spawner spawning a child whose `start` spawns a grandchild)
//! all run their `start` behavior before anything is drawn.
//! Only after no wave spawns anything new does the render pass sync the spatial entities
//! to the host [`render::Canvas`].
//!
//! Deleting an entity takes effect immediately:
//! a deleted entity never runs another behavior, even within the step that deleted it.
//! Its storage is released when the wave is committed.
//!
//! # Host interfaces
//! The crate never draws, loads files or polls devices itself.
//! The host provides a [`render::Canvas`], a [`resource::Loader`]
//! and feeds the [`input::Input`] state.
//!
//! # Example
//! ```
//! use pounce::kind::{self, Kind};
//! use pounce::render::Headless;
//! use pounce::{resource, tracer, world, Procedure};
//!
//! struct NoImages;
//!
//! impl resource::Loader for NoImages {
//!     fn load(
//!         &mut self,
//!         options: &resource::ImageOptions,
//!     ) -> Result<resource::ImageInfo, resource::LoadError> {
//!         Err(resource::LoadError { name: options.name.clone(), reason: "no images".into() })
//!     }
//! }
//!
//! struct Counter(u32);
//!
//! impl Kind for Counter {
//!     fn declare(spec: &mut kind::Spec) {
//!         spec.start(Procedure::forever(|cx| cx.data::<Counter>().0 += 1));
//!     }
//! }
//!
//! let mut builder = world::Builder::new(NoImages);
//! builder.register::<Counter>().expect("Counter has no forbidden hooks");
//! let mut world = builder.build();
//!
//! let counter = world.spawn(Counter(0)).expect("Counter is not a singleton");
//! for _ in 0..5 {
//!     world.tick(&tracer::Noop, &mut Headless);
//! }
//! assert_eq!(world.get::<Counter>(counter).map(|c| c.0), Some(5));
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

mod macros;

pub mod behavior;
pub use behavior::{Behavior, Call, Procedure, Routine};

pub mod delay;
pub use delay::Delay;

pub mod entity;
pub use entity::{Entity, Lifecycle};

pub mod error;
pub use error::{Error, HookError, LookupError};

pub mod input;

pub mod kind;
pub use kind::Kind;

pub mod render;

pub mod resource;

pub mod spatial;

pub mod time;

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod world;
pub use world::{tracer, Context, World};

pub mod util;
