//! The per-frame wave loop.

use super::step::step;
use super::tracer::Tracer;
use super::World;
use crate::render::{Canvas, Content, Drawable};
use crate::spatial::{to_screen, Visual};

impl World {
    /// Runs one tick.
    ///
    /// Every committed entity and every entity spawned since the last tick is stepped once.
    /// The creations and deletions of the wave are then committed,
    /// and the entities spawned during the wave are stepped as the next wave,
    /// until a wave spawns nothing.
    /// Finally, every committed spatial entity is synced to `canvas`,
    /// followed by a single [`Canvas::draw`].
    ///
    /// # Panics
    /// Panics if the number of waves exceeds [`Config::max_waves`](super::Config::max_waves),
    /// which usually means that a `start` behavior unconditionally spawns its own kind.
    pub fn tick(&mut self, tracer: &impl Tracer, canvas: &mut impl Canvas) {
        let tracer: &dyn Tracer = tracer;

        tracer.start_tick();
        self.state.timing.begin_tick();

        let registry = &self.state.registry;
        let mut wave = Vec::with_capacity(registry.live_len() + registry.staged().len());
        wave.extend(registry.live().chain(registry.staged().iter().copied()));

        let mut index = 0;
        while !wave.is_empty() {
            assert!(
                index < self.state.config.max_waves,
                "Spawn cascade did not settle after {} waves",
                self.state.config.max_waves,
            );

            tracer.start_wave(index, wave.len());

            // entities staged before this wave are part of it
            let boundary = self.state.registry.staged().len();
            for &entity in &wave {
                step(&mut self.state, tracer, entity);
            }

            let commit = self.state.registry.commit();
            tracer.commit(&commit.created, &commit.deleted);
            for &entity in &commit.deleted {
                canvas.remove(entity);
            }

            tracer.end_wave(index);

            wave = commit.created[boundary..]
                .iter()
                .copied()
                .filter(|&entity| self.state.registry.is_visible(entity))
                .collect();
            index += 1;
        }

        self.render(tracer, canvas);
        self.state.input.end_tick();

        tracer.end_tick();
    }

    fn render(&self, tracer: &dyn Tracer, canvas: &mut impl Canvas) {
        let registry = &self.state.registry;
        let mut drawn = 0;

        for entity in registry.live() {
            let Some(object) = registry.get(entity) else { continue };
            let Some(spatial) = &object.spatial else { continue };

            let content = match &spatial.visual {
                Visual::None => continue,
                Visual::Label { text } => Content::Text(text),
                Visual::Sprite { costume } => match object.kind.costumes().get(*costume) {
                    Some(image) => Content::Image(image),
                    None => continue,
                },
            };

            canvas.sync(
                entity,
                &Drawable {
                    position: to_screen(spatial.pos, self.state.config.screen),
                    rotation: spatial.rot + 90.0,
                    scale: spatial.factor(),
                    content,
                },
            );
            drawn += 1;
        }

        canvas.draw();
        tracer.render(drawn);
    }
}
