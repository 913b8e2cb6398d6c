use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::traits::Clock;

/// Wall clock - measures elapsed time since the last restart
#[derive(Debug)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    /// Create clock starting now
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Deterministic clock for tests and benchmarks
/// Every read returns the current time, then advances it by `step`
#[derive(Debug)]
pub struct SteppingClock {
    now: Cell<Duration>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    /// Clock that never advances, bursts end on quota alone
    pub fn frozen() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Clock for SteppingClock {
    fn restart(&mut self) {
        self.now.set(Duration::ZERO);
    }

    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
