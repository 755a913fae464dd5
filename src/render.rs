//! The drawing interface implemented by the host.
//!
//! At the end of every tick, the world calls [`Canvas::sync`]
//! for each committed spatial entity that has a visual,
//! followed by exactly one [`Canvas::draw`].

use glam::Vec2;

use crate::resource::Image;
use crate::Entity;

/// The drawable state of one entity, already converted to screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable<'t> {
    /// Position in screen coordinates.
    pub position: Vec2,
    /// Rotation in degrees, where 0 means the image is drawn upright.
    pub rotation: f32,
    /// Scale factor, where 1 is the natural size.
    pub scale:    f32,
    /// What to draw.
    pub content:  Content<'t>,
}

/// The content of a [`Drawable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Content<'t> {
    /// A costume image.
    Image(&'t Image),
    /// A text label.
    Text(&'t str),
}

/// A drawing backend.
pub trait Canvas {
    /// Updates the drawable object associated with `entity`.
    fn sync(&mut self, entity: Entity, drawable: &Drawable<'_>);

    /// Releases the drawable object associated with a removed entity.
    ///
    /// Called once for each deleted entity when the deletion is committed.
    fn remove(&mut self, _entity: Entity) {}

    /// Draws all synced objects.
    fn draw(&mut self);
}

/// A canvas that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Canvas for Headless {
    fn sync(&mut self, _: Entity, _: &Drawable<'_>) {}

    fn draw(&mut self) {}
}
