//! Clock adapters.
//!
//! - [`MonotonicClock`] wraps `std::time::Instant` for running on a real
//!   robot controller.
//! - [`ManualClock`] is stepped explicitly.  Clones share one reading, so
//!   a test (or the simulator) can keep a handle and advance the clock the
//!   service owns.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::app::ports::Clock;

/// Seconds since construction, from the OS monotonic clock.
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// A clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `secs`.  Negative steps are ignored.
    pub fn advance(&self, secs: f64) {
        if secs > 0.0 {
            self.now.set(self.now.get() + secs);
        }
    }

    /// Jump to `secs` if that is not in the past.
    pub fn set(&self, secs: f64) {
        if secs > self.now.get() {
            self.now.set(secs);
        }
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}
