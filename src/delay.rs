//! Delays gate when a suspended call may resume.
//!
//! A call suspends by returning a [`Delay`] from [`Call::resume`](crate::behavior::Call::resume).
//! The scheduler takes ownership of the delay and checks [`Delay::is_finished`]
//! once per step of the owning entity;
//! the call is resumed on the first step where the delay has finished.
//!
//! Delays are single-use: installing one moves it into the scheduler.
//! A delay that is constructed but dropped without being returned to the scheduler
//! is almost always a mistake (the author forgot to return it),
//! so dropping an unused delay emits a warning through the `log` facade
//! and increments [`unused_count`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::time::Clock;

cfg_if::cfg_if! {
    if #[cfg(feature = "track-delay-origin")] {
        type Origin = &'static std::panic::Location<'static>;

        #[track_caller]
        fn origin() -> Origin { std::panic::Location::caller() }

        fn describe(origin: Origin) -> String { origin.to_string() }
    } else {
        type Origin = ();

        fn origin() -> Origin {}

        fn describe((): Origin) -> String {
            String::from("<unknown location; enable the track-delay-origin feature>")
        }
    }
}

thread_local! {
    static UNUSED: Cell<usize> = const { Cell::new(0) };
}

/// Returns the number of delays on this thread that were dropped without being installed.
pub fn unused_count() -> usize { UNUSED.with(Cell::get) }

/// A single-use condition that must become true before a suspended call resumes.
#[must_use = "a delay has no effect unless it is returned to the scheduler"]
pub struct Delay {
    kind:   Kind,
    used:   bool,
    origin: Origin,
}

// Delays are consumed by the scheduler and never duplicated.
static_assertions::assert_not_impl_any!(Delay: Clone, Copy);

enum Kind {
    Frame,
    Timed { clock: Rc<dyn Clock>, since: Duration, duration: Duration },
    Condition(Box<dyn FnMut() -> bool>),
}

impl Delay {
    /// A delay that finishes on the very next check,
    /// i.e. the call resumes on the next tick.
    #[track_caller]
    pub fn frame() -> Self { Self::new(Kind::Frame) }

    /// A delay that finishes once `duration` has elapsed on `clock` since now.
    ///
    /// The delay never finishes early,
    /// but the actual resumption is bounded below by the tick rate.
    #[track_caller]
    pub fn timed(clock: Rc<dyn Clock>, duration: Duration) -> Self {
        let since = clock.now();
        Self::new(Kind::Timed { clock, since, duration })
    }

    /// A delay that finishes once `predicate` returns true.
    ///
    /// The predicate is evaluated once per step of the owning entity.
    /// It receives no [`Context`](crate::Context),
    /// so it can only observe state it captured, such as an `Rc<Cell<_>>`.
    /// To wait on world state, poll from the call itself instead:
    /// check the condition through the context on each resume
    /// and return `Some(Delay::frame())` until it holds.
    #[track_caller]
    pub fn until(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::new(Kind::Condition(Box::new(predicate)))
    }

    #[track_caller]
    fn new(kind: Kind) -> Self { Self { kind, used: false, origin: origin() } }

    /// Checks whether the suspension has ended.
    pub fn is_finished(&mut self) -> bool {
        match &mut self.kind {
            Kind::Frame => true,
            Kind::Timed { clock, since, duration } => {
                clock.now().saturating_sub(*since) >= *duration
            }
            Kind::Condition(predicate) => predicate(),
        }
    }

    /// Marks the delay as installed in the scheduler.
    pub(crate) fn mark_used(&mut self) { self.used = true; }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut d = f.debug_struct("Delay");
        match &self.kind {
            Kind::Frame => d.field("kind", &"frame"),
            Kind::Timed { since, duration, .. } => {
                d.field("since", since).field("duration", duration)
            }
            Kind::Condition(_) => d.field("kind", &"condition"),
        };
        d.field("used", &self.used).finish()
    }
}

impl Drop for Delay {
    fn drop(&mut self) {
        if self.used || std::thread::panicking() {
            return;
        }

        UNUSED.with(|count| count.set(count.get() + 1));
        log::warn!(
            "Delay created at {} was dropped without being returned to the scheduler; did you \
             forget to return it?",
            describe(self.origin)
        );
    }
}
