//! Position, orientation and collision geometry of spatial entities.
//!
//! World coordinates put the origin at the center of the screen with the y axis pointing up.

pub use glam::{UVec2, Vec2};

/// Converts a world position to screen coordinates, given the screen size in pixels.
pub fn to_screen(pos: Vec2, screen: UVec2) -> Vec2 { pos + (screen / 2).as_vec2() }

/// Converts a screen position to world coordinates, given the screen size in pixels.
pub fn from_screen(pos: Vec2, screen: UVec2) -> Vec2 { pos - (screen / 2).as_vec2() }

/// The spatial state of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Spatial {
    /// Position in world coordinates.
    pub pos:    Vec2,
    /// Heading in degrees, counterclockwise from the positive x axis.
    pub rot:    f32,
    scale:      f32,
    /// What the render pass draws for this entity.
    pub visual: Visual,
}

impl Spatial {
    pub(crate) fn new(visual: Visual) -> Self {
        Self { pos: Vec2::ZERO, rot: 90.0, scale: 100.0, visual }
    }

    /// Uniform scale in percent.
    pub fn scale(&self) -> f32 { self.scale }

    /// Sets the uniform scale in percent.
    /// Values below 1% are clamped.
    pub fn set_scale(&mut self, percent: f32) { self.scale = percent.max(1.0); }

    /// The scale as a multiplication factor.
    pub fn factor(&self) -> f32 { self.scale / 100.0 }

    /// Moves to an absolute position.
    pub fn goto(&mut self, x: f32, y: f32) { self.pos = Vec2::new(x, y); }

    /// Moves `distance` units along the current heading.
    pub fn step(&mut self, distance: f32) {
        self.pos += Vec2::from_angle(self.rot.to_radians()) * distance;
    }

    /// Turns counterclockwise by `degrees`.
    pub fn turn(&mut self, degrees: f32) { self.rot = (self.rot + degrees).rem_euclid(360.0); }
}

/// The drawable content of a spatial entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Nothing is drawn.
    None,
    /// A text label.
    Label {
        /// The displayed text.
        text: String,
    },
    /// One of the costume images of the kind.
    Sprite {
        /// Index into the costume list of the kind.
        costume: usize,
    },
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// The corner with the smallest coordinates.
    pub min: Vec2,
    /// The corner with the largest coordinates.
    pub max: Vec2,
}

impl Rect {
    /// Creates the rectangle spanned by two arbitrary opposite corners.
    pub fn new(a: Vec2, b: Vec2) -> Self { Self { min: a.min(b), max: a.max(b) } }

    /// Creates a rectangle of `size` centered at `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, center + size / 2.0)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 { self.max.x - self.min.x }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 { self.max.y - self.min.y }

    /// Width and height as a vector.
    pub fn size(&self) -> Vec2 { self.max - self.min }

    /// The center point.
    pub fn center(&self) -> Vec2 { (self.min + self.max) / 2.0 }

    /// The four corners, counterclockwise from `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [self.min, Vec2::new(self.max.x, self.min.y), self.max, Vec2::new(self.min.x, self.max.y)]
    }

    /// Returns the overlapping area, or `None` if the rectangles are disjoint
    /// or only touch at a single point.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x > max.x || min.y > max.y {
            return None;
        }

        let result = Rect { min, max };
        (result.size().length() > 0.0).then_some(result)
    }

    /// Whether `point` is inside or on the border of the rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        self.min.x <= point.x && point.x <= self.max.x && self.min.y <= point.y && point.y <= self.max.y
    }

    /// Like [`contains`](Self::contains), but excludes the corners.
    pub fn contains_exclusive(&self, point: Vec2) -> bool {
        self.contains(point) && !self.corners().contains(&point)
    }

    /// Moves the rectangle by `offset`.
    pub fn translate(&self, offset: Vec2) -> Rect { Rect { min: self.min + offset, max: self.max + offset } }
}
