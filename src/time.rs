//! Clocks used by timed delays and the frame pacer.
//!
//! All durations are measured from an arbitrary clock-specific epoch.
//! Only differences between two readings of the same clock are meaningful.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Returns the time elapsed since the epoch of this clock.
    ///
    /// Successive calls must never return a smaller value.
    fn now(&self) -> Duration;
}

/// The wall clock, backed by [`Instant`].
#[derive(Debug)]
pub struct System {
    epoch: Instant,
}

impl Default for System {
    fn default() -> Self { Self { epoch: Instant::now() } }
}

impl Clock for System {
    fn now(&self) -> Duration { self.epoch.elapsed() }
}

/// A clock that only moves when advanced explicitly.
///
/// Clones share the same reading,
/// so a test can keep one clone and hand another one to the world.
#[derive(Debug, Default, Clone)]
pub struct Manual {
    now: Rc<Cell<Duration>>,
}

impl Manual {
    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) { self.now.set(self.now.get() + delta); }

    /// Moves the clock forward by `secs` seconds.
    pub fn advance_secs(&self, secs: f64) { self.advance(Duration::from_secs_f64(secs)); }
}

impl Clock for Manual {
    fn now(&self) -> Duration { self.now.get() }
}

/// Tracks tick timestamps for `runtime`, `delta` and `fps` queries.
pub(crate) struct Timing {
    pub(crate) clock: Rc<dyn Clock>,
    started:          Duration,
    last_tick:        Duration,
    delta:            Duration,
}

impl Timing {
    pub(crate) fn new(clock: Rc<dyn Clock>) -> Self {
        let now = clock.now();
        Self { clock, started: now, last_tick: now, delta: Duration::ZERO }
    }

    /// Records the start of a new tick.
    pub(crate) fn begin_tick(&mut self) {
        let now = self.clock.now();
        self.delta = now.saturating_sub(self.last_tick);
        self.last_tick = now;
    }

    /// The time since the world was built.
    pub(crate) fn runtime(&self) -> Duration { self.clock.now().saturating_sub(self.started) }

    /// The time between the starts of the previous and the current tick.
    pub(crate) fn delta(&self) -> Duration { self.delta }
}

/// Computes how long a host loop should sleep to hold a target frame rate.
#[derive(Debug)]
pub struct Pacer {
    period: Duration,
    next:   Option<Duration>,
}

impl Pacer {
    /// Creates a pacer for `frame_rate` ticks per second.
    ///
    /// # Panics
    /// Panics if `frame_rate` is zero.
    pub fn new(frame_rate: u32) -> Self {
        assert!(frame_rate > 0, "frame rate must be positive");
        Self { period: Duration::from_secs(1) / frame_rate, next: None }
    }

    /// Returns the duration to wait before the next tick, given the current clock reading.
    ///
    /// If the host has fallen behind by more than one period,
    /// the schedule is reset instead of bursting to catch up.
    pub fn wait(&mut self, now: Duration) -> Duration {
        let next = match self.next {
            Some(next) if next + self.period >= now => next,
            _ => now,
        };
        self.next = Some(next + self.period);
        next.saturating_sub(now)
    }
}
