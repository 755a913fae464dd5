//! Errors returned by registration, construction and lookup.

use thiserror::Error;

use crate::resource;
use crate::util::DbgTypeId;

/// Errors from registering kinds or constructing entities.
#[derive(Debug, Error)]
pub enum Error {
    /// A kind declared a reserved hook or one that its own declaration forbids.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// A kind was registered twice on the same world builder.
    #[error("kind {kind} is already registered")]
    DuplicateKind {
        /// The kind registered twice.
        kind: DbgTypeId,
    },

    /// A second instance of a singleton kind was constructed while the first is still alive.
    #[error("cannot create duplicate instance of singleton kind {kind}")]
    DuplicateSingleton {
        /// The singleton kind.
        kind: DbgTypeId,
    },

    /// A costume image of a sprite kind could not be loaded.
    #[error("cannot load resources for kind {kind}")]
    Resource {
        /// The sprite kind being registered.
        kind:   DbgTypeId,
        /// The loader failure.
        #[source]
        source: resource::LoadError,
    },
}

/// A hook name was declared on a kind that forbids it.
#[derive(Debug, Error)]
#[error("cannot create hook {hook} for kind {kind}: it is forbidden")]
pub struct HookError {
    /// The kind that declared the hook.
    pub kind: DbgTypeId,
    /// The forbidden hook name.
    pub hook: String,
}

/// Errors from looking up a singleton instance.
///
/// The two variants are kept apart so that callers can distinguish
/// misuse of the API from an instance that simply does not exist (yet).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The kind is not declared as a singleton.
    #[error("kind {kind} is not a singleton")]
    NotSingleton {
        /// The kind looked up.
        kind: DbgTypeId,
    },

    /// The kind is a singleton, but no instance is currently live.
    #[error("singleton kind {kind} has no live instance")]
    Missing {
        /// The kind looked up.
        kind: DbgTypeId,
    },
}
