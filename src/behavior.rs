//! Behaviors are the units of logic that kinds attach to their entities.
//!
//! A [`Behavior`] is either a [`Routine`], which runs synchronously to completion,
//! or a [`Procedure`], which is an immutable template of a resumable [`Call`].
//!
//! # Resumable procedures
//! A procedure is bound to an entity by creating a fresh [`Call`] from the template.
//! The scheduler resumes the call once when it is started,
//! and again on every step of the entity after the [`Delay`] it last returned has finished.
//! Returning `None` terminates the call; the scheduler never resumes it again.
//!
//! Calls are explicit state machines.
//! Any `FnMut(&mut Context) -> Option<Delay>` closure is a call,
//! so captured variables serve as the local state of the procedure:
//!
//! ```
//! use std::time::Duration;
//!
//! use pounce::{Delay, Procedure};
//!
//! let blink = Procedure::new(|| {
//!     let mut remaining = 3;
//!     move |cx: &mut pounce::Context<'_>| -> Option<Delay> {
//!         if remaining == 0 {
//!             return None;
//!         }
//!         remaining -= 1;
//!         cx.next_costume(cx.this());
//!         Some(cx.wait(Duration::from_millis(200)))
//!     }
//! });
//! # let _ = blink;
//! ```

use std::fmt;
use std::rc::Rc;

use crate::world::Context;
use crate::Delay;

/// A live instance of a [`Procedure`] bound to one entity.
pub trait Call {
    /// Advances the call by one step.
    ///
    /// Returns the delay that must finish before the next step,
    /// or `None` if the call has terminated.
    fn resume(&mut self, cx: &mut Context<'_>) -> Option<Delay>;
}

impl<F: FnMut(&mut Context<'_>) -> Option<Delay>> Call for F {
    fn resume(&mut self, cx: &mut Context<'_>) -> Option<Delay> { self(cx) }
}

/// An immutable, reusable description of a resumable routine.
///
/// Cloning a procedure is cheap and shares the same template.
#[derive(Clone)]
pub struct Procedure {
    factory:    Rc<dyn Fn() -> Box<dyn Call>>,
    debug_name: &'static str,
}

impl Procedure {
    /// Creates a procedure from a factory that produces a fresh call for every binding.
    pub fn new<C: Call + 'static>(factory: impl Fn() -> C + 'static) -> Self {
        Self {
            factory:    Rc::new(move || Box::new(factory()) as Box<dyn Call>),
            debug_name: "<procedure>",
        }
    }

    /// Creates a procedure that runs `routine` once and terminates without suspending.
    pub fn once(routine: impl Fn(&mut Context<'_>) + 'static) -> Self {
        let routine = Rc::new(routine);
        Self::new(move || {
            let routine = Rc::clone(&routine);
            move |cx: &mut Context<'_>| -> Option<Delay> {
                routine(cx);
                None
            }
        })
    }

    /// Creates a procedure that runs `routine` once per tick, forever.
    ///
    /// This is the same as `Procedure::once(routine).repeat()`.
    pub fn forever(routine: impl Fn(&mut Context<'_>) + 'static) -> Self {
        Self::once(routine).repeat()
    }

    /// Creates a procedure that binds a fresh call from `factory`,
    /// drives it until it terminates, waits one frame and starts over.
    ///
    /// This is the same as `Procedure::new(factory).repeat()`.
    pub fn forever_call<C: Call + 'static>(factory: impl Fn() -> C + 'static) -> Self {
        Self::new(factory).repeat()
    }

    /// Creates a procedure that restarts this procedure forever.
    ///
    /// Each time a bound call of `self` terminates,
    /// the repeating call suspends for one frame before binding a new one.
    /// Delays returned by the inner calls are passed through unchanged.
    pub fn repeat(self) -> Self {
        let debug_name = self.debug_name;
        Self::new(move || Repeat { inner: self.clone(), current: None }).named(debug_name)
    }

    /// Sets the name used for this procedure in logs and tracers.
    pub fn named(mut self, debug_name: &'static str) -> Self {
        self.debug_name = debug_name;
        self
    }

    /// The name used for this procedure in logs and tracers.
    pub fn debug_name(&self) -> &'static str { self.debug_name }

    /// Creates a new call from this template.
    pub fn bind(&self) -> Box<dyn Call> { (self.factory)() }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Procedure").field(&self.debug_name).finish()
    }
}

struct Repeat {
    inner:   Procedure,
    current: Option<Box<dyn Call>>,
}

impl Call for Repeat {
    fn resume(&mut self, cx: &mut Context<'_>) -> Option<Delay> {
        let inner = &self.inner;
        let call = self.current.get_or_insert_with(|| inner.bind());
        match call.resume(cx) {
            Some(delay) => Some(delay),
            None => {
                self.current = None;
                Some(Delay::frame())
            }
        }
    }
}

/// A one-shot routine that runs synchronously to completion.
#[derive(Clone)]
pub struct Routine(Rc<dyn Fn(&mut Context<'_>)>);

impl Routine {
    /// Wraps a closure as a routine.
    pub fn new(f: impl Fn(&mut Context<'_>) + 'static) -> Self { Self(Rc::new(f)) }

    /// Runs the routine.
    pub fn call(&self, cx: &mut Context<'_>) { (self.0)(cx) }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("Routine") }
}

/// A behavior attached to a kind or requested on an entity.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Runs synchronously to completion.
    Routine(Routine),
    /// Runs as a resumable call, started on the next step of the entity.
    Procedure(Procedure),
}

impl Behavior {
    /// Creates a behavior from a one-shot routine.
    pub fn routine(f: impl Fn(&mut Context<'_>) + 'static) -> Self { Self::Routine(Routine::new(f)) }

    /// Whether this behavior is a resumable procedure.
    pub fn is_resumable(&self) -> bool { matches!(self, Self::Procedure(_)) }
}

impl From<Procedure> for Behavior {
    fn from(procedure: Procedure) -> Self { Self::Procedure(procedure) }
}

impl From<Routine> for Behavior {
    fn from(routine: Routine) -> Self { Self::Routine(routine) }
}

#[cfg(test)]
mod tests;
