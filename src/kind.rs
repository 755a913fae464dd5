//! Kinds are the entity types known to a world.
//!
//! Each kind is a Rust type implementing [`Kind`].
//! The value of the type is the user data of an entity,
//! while [`Kind::declare`] describes the behaviors shared by all entities of the kind.
//! A kind must be registered with [`world::Builder::register`](crate::world::Builder::register)
//! before any entity of it can be spawned.

use std::any::Any;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::behavior::Behavior;
use crate::error::{Error, HookError};
use crate::resource::{self, Image, ImageOptions};
use crate::spatial::{Spatial, Visual};
use crate::util::DbgTypeId;

/// Identifies a registered kind.
pub type KindId = DbgTypeId;

/// An entity type.
///
/// ```
/// use pounce::kind::{self, Kind};
/// use pounce::{Behavior, Procedure};
///
/// struct Bell {
///     rung: u32,
/// }
///
/// impl Kind for Bell {
///     fn declare(spec: &mut kind::Spec) {
///         spec.start(Behavior::routine(|cx| cx.data::<Bell>().rung = 0)).on_receive(
///             "ring",
///             Procedure::once(|cx| cx.data::<Bell>().rung += 1),
///         );
///     }
/// }
/// ```
pub trait Kind: Any {
    /// Whether at most one entity of this kind may be alive at a time.
    const SINGLETON: bool = false;

    /// Describes the behaviors and shape of this kind.
    ///
    /// This is called exactly once, when the kind is registered.
    fn declare(spec: &mut Spec);
}

/// Names of well-known hooks.
pub mod hook {
    /// The name reserved for the start slot.
    pub const START: &str = "start";
    /// The name reserved for the update slot.
    pub const UPDATE: &str = "update";

    /// Hook names that no kind may declare in its hook table.
    pub const RESERVED: &[&str] = &[START, UPDATE];

    /// Returns the hook name that receives broadcasts of `message`.
    pub fn receive(message: &str) -> String { format!("receive<{}>", message) }
}

/// What an entity looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// No spatial state.
    Plain,
    /// A position and orientation, but nothing to draw.
    Spatial,
    /// A text label.
    Label {
        /// The initial text.
        text: String,
    },
    /// An image with a list of costumes, starting with the first one.
    Sprite {
        /// The costume images in order.
        costumes: Vec<ImageOptions>,
    },
}

impl Default for Shape {
    fn default() -> Self { Self::Plain }
}

impl Shape {
    /// A sprite shape with the costume images of the given names.
    pub fn sprite<S: Into<ImageOptions>>(costumes: impl IntoIterator<Item = S>) -> Self {
        Self::Sprite { costumes: costumes.into_iter().map(Into::into).collect() }
    }

    /// A label shape with an initial text.
    pub fn label(text: impl Into<String>) -> Self { Self::Label { text: text.into() } }
}

/// The declaration of a kind, filled by [`Kind::declare`].
#[derive(Debug, Default)]
pub struct Spec {
    shape:     Shape,
    start:     Option<Behavior>,
    update:    Option<Behavior>,
    hooks:     IndexMap<String, Vec<Behavior>>,
    forbidden: IndexSet<String>,
}

impl Spec {
    /// Sets the shape of the kind.
    pub fn shape(&mut self, shape: Shape) -> &mut Self {
        self.shape = shape;
        self
    }

    /// Sets the behavior run on the first step of each entity.
    pub fn start(&mut self, behavior: impl Into<Behavior>) -> &mut Self {
        self.start = Some(behavior.into());
        self
    }

    /// Sets the behavior run on every later step of each entity.
    pub fn update(&mut self, behavior: impl Into<Behavior>) -> &mut Self {
        self.update = Some(behavior.into());
        self
    }

    /// Appends a behavior to the hook `name`.
    ///
    /// Behaviors of the same hook are requested in declaration order.
    pub fn hook(&mut self, name: impl Into<String>, behavior: impl Into<Behavior>) -> &mut Self {
        self.hooks.entry(name.into()).or_default().push(behavior.into());
        self
    }

    /// Appends a behavior that receives broadcasts of `message`.
    pub fn on_receive(&mut self, message: &str, behavior: impl Into<Behavior>) -> &mut Self {
        self.hook(hook::receive(message), behavior)
    }

    /// Forbids the hook `name` for this kind.
    ///
    /// Registration fails if the hook is also declared.
    pub fn forbid(&mut self, name: impl Into<String>) -> &mut Self {
        self.forbidden.insert(name.into());
        self
    }

    fn validate(&self, kind: KindId) -> Result<(), HookError> {
        match self
            .hooks
            .keys()
            .find(|name| hook::RESERVED.contains(&name.as_str()) || self.forbidden.contains(*name))
        {
            Some(name) => Err(HookError { kind, hook: name.clone() }),
            None => Ok(()),
        }
    }
}

/// The registered form of a kind, shared by all of its entities.
pub(crate) struct Info {
    pub(crate) id:        KindId,
    pub(crate) singleton: bool,
    pub(crate) start:     Option<Behavior>,
    pub(crate) update:    Option<Behavior>,
    pub(crate) hooks:     IndexMap<String, Vec<Behavior>>,
    pub(crate) shape:     Resolved,
}

/// A [`Shape`] with its images loaded.
pub(crate) enum Resolved {
    Plain,
    Spatial,
    Label { text: String },
    Sprite { costumes: Rc<[Image]> },
}

impl Info {
    /// Declares, validates and resolves the kind `K`.
    pub(crate) fn compile<K: Kind>(cache: &mut resource::Cache) -> Result<Self, Error> {
        let id = KindId::of::<K>();
        let mut spec = Spec::default();
        K::declare(&mut spec);
        spec.validate(id)?;

        let shape = match spec.shape {
            Shape::Plain => Resolved::Plain,
            Shape::Spatial => Resolved::Spatial,
            Shape::Label { text } => Resolved::Label { text },
            Shape::Sprite { costumes } => {
                let images = costumes
                    .iter()
                    .map(|options| cache.image(options))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| Error::Resource { kind: id, source })?;
                Resolved::Sprite { costumes: images.into() }
            }
        };

        Ok(Self {
            id,
            singleton: K::SINGLETON,
            start: spec.start,
            update: spec.update,
            hooks: spec.hooks,
            shape,
        })
    }

    /// The spatial state of a newly spawned entity, if the kind is spatial.
    pub(crate) fn initial_spatial(&self) -> Option<Spatial> {
        match &self.shape {
            Resolved::Plain => None,
            Resolved::Spatial => Some(Spatial::new(Visual::None)),
            Resolved::Label { text } => Some(Spatial::new(Visual::Label { text: text.clone() })),
            Resolved::Sprite { .. } => Some(Spatial::new(Visual::Sprite { costume: 0 })),
        }
    }

    /// The costume images of a sprite kind, or an empty slice.
    pub(crate) fn costumes(&self) -> &[Image] {
        match &self.shape {
            Resolved::Sprite { costumes } => costumes,
            _ => &[],
        }
    }

    /// Whether the kind declares any behavior for `hook`.
    pub(crate) fn has_hook(&self, hook: &str) -> bool {
        self.hooks.get(hook).map_or(false, |behaviors| !behaviors.is_empty())
    }
}

#[cfg(test)]
mod tests;
