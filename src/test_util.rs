#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Once;

use glam::Vec2;
use indexmap::IndexSet;

use crate::render::{Canvas, Content, Drawable};
use crate::resource::{ImageInfo, ImageOptions, LoadError, Loader};
use crate::world::Tracer;
use crate::Entity;

/// Records event and ensures that they are in the correct order.
pub struct EventTracer<T: fmt::Debug + Eq + Hash> {
    dependencies: HashMap<T, Vec<T>>,
    seen:         RefCell<IndexSet<T>>,
}

impl<T: fmt::Debug + Eq + Hash> EventTracer<T> {
    /// Creates a new event tracer that ensures `a` executes after `b` for each `(a, b)` input.
    pub fn new(orders: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut dependencies: HashMap<T, Vec<T>> = HashMap::new();
        for (before, after) in orders {
            dependencies.entry(after).or_default().push(before);
        }
        let seen = RefCell::new(IndexSet::new());

        Self { dependencies, seen }
    }

    /// Records that `event` has happened.
    ///
    /// # Panics
    /// Panics if the same `event` was sent twice or a dependency is not satisfied.
    pub fn trace(&self, event: T) {
        let mut seen = self.seen.borrow_mut();

        if let Some(deps) = self.dependencies.get(&event) {
            for dep in deps {
                assert!(seen.contains(dep), "{:?} should happen after {:?}", event, dep);
            }
        }

        let (index, new) = seen.insert_full(event);
        assert!(
            new,
            "{:?} is inserted twice",
            seen.get_index(index).expect("insert_full should return valid index")
        );
    }

    /// Returns the events observed in this tracer.
    pub fn get_events(self) -> Vec<T> {
        let seen = self.seen.into_inner();
        seen.into_iter().collect()
    }
}

/// A tick event, as seen by [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartTick,
    EndTick,
    StartWave { index: usize, size: usize },
    EndWave { index: usize },
    Step(Entity),
    StartCall(Entity, String),
    FinishCall(Entity, String),
    Commit { created: Vec<Entity>, deleted: Vec<Entity> },
    Broadcast { name: String, receivers: usize },
    Render { drawn: usize },
}

/// A tracer that records every event in order.
#[derive(Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    /// Takes the events recorded so far.
    pub fn take(&self) -> Vec<Event> { self.events.take() }

    fn push(&self, event: Event) { self.events.borrow_mut().push(event); }
}

impl Tracer for Recorder {
    fn start_tick(&self) { self.push(Event::StartTick) }

    fn end_tick(&self) { self.push(Event::EndTick) }

    fn start_wave(&self, index: usize, size: usize) { self.push(Event::StartWave { index, size }) }

    fn end_wave(&self, index: usize) { self.push(Event::EndWave { index }) }

    fn step_entity(&self, entity: Entity) { self.push(Event::Step(entity)) }

    fn start_call(&self, entity: Entity, name: &str) {
        self.push(Event::StartCall(entity, name.to_string()))
    }

    fn finish_call(&self, entity: Entity, name: &str) {
        self.push(Event::FinishCall(entity, name.to_string()))
    }

    fn commit(&self, created: &[Entity], deleted: &[Entity]) {
        self.push(Event::Commit { created: created.to_vec(), deleted: deleted.to_vec() })
    }

    fn broadcast(&self, name: &str, receivers: usize) {
        self.push(Event::Broadcast { name: name.to_string(), receivers })
    }

    fn render(&self, drawn: usize) { self.push(Event::Render { drawn }) }
}

/// The width of every image loaded by [`FakeLoader`].
pub const FAKE_WIDTH: u32 = 20;
/// The height of every image loaded by [`FakeLoader`].
pub const FAKE_HEIGHT: u32 = 10;

/// A loader that accepts every image name not starting with `missing`.
#[derive(Debug, Default)]
pub struct FakeLoader {
    next_token: u64,
}

impl Loader for FakeLoader {
    fn load(&mut self, options: &ImageOptions) -> Result<ImageInfo, LoadError> {
        if options.name.starts_with("missing") {
            return Err(LoadError { name: options.name.clone(), reason: "not found".into() });
        }

        self.next_token += 1;
        Ok(ImageInfo { token: self.next_token, width: FAKE_WIDTH, height: FAKE_HEIGHT })
    }
}

/// What a [`RecordingCanvas`] saw for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Synced {
    pub entity:   Entity,
    pub position: Vec2,
    pub rotation: f32,
    pub scale:    f32,
    /// The image name or the label text.
    pub content:  String,
}

/// A canvas that records every frame.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    current:     Vec<Synced>,
    /// The entities synced in each drawn frame.
    pub frames:  Vec<Vec<Synced>>,
    /// Entities released through [`Canvas::remove`].
    pub removed: Vec<Entity>,
}

impl RecordingCanvas {
    /// The last drawn frame.
    pub fn last(&self) -> &[Synced] { self.frames.last().map(Vec::as_slice).unwrap_or_default() }
}

impl Canvas for RecordingCanvas {
    fn sync(&mut self, entity: Entity, drawable: &Drawable<'_>) {
        let content = match &drawable.content {
            Content::Image(image) => image.name().to_string(),
            Content::Text(text) => text.to_string(),
        };
        self.current.push(Synced {
            entity,
            position: drawable.position,
            rotation: drawable.rotation,
            scale: drawable.scale,
            content,
        });
    }

    fn remove(&mut self, entity: Entity) { self.removed.push(entity); }

    fn draw(&mut self) { self.frames.push(std::mem::take(&mut self.current)); }
}

/// Initializes the logger for tests and benches.
pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}
