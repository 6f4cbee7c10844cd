use super::types::SimTime;
use std::time::{Duration, Instant};

/// Time source driving the shift loop
pub trait Clock {
    /// Time elapsed since shift start
    fn now(&self) -> SimTime;

    /// Move to the next tick
    fn advance(&mut self);
}

/// Logical clock advancing by a fixed step per tick. A full shift runs as
/// fast as the line can be processed.
///
/// Time is derived from the tick count so fractional steps do not drift.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    ticks: u64,
    step: SimTime,
}

impl VirtualClock {
    pub fn new(step: SimTime) -> Self {
        Self { ticks: 0, step }
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> SimTime {
        self.ticks as f64 * self.step
    }

    fn advance(&mut self) {
        self.ticks += 1;
    }
}

/// Real-time clock: elapsed wall time since creation, paced by sleeping
/// between ticks. An 8-hour shift takes 8 hours with a one-second pace.
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
    pace: Duration,
}

impl WallClock {
    pub fn new(pace: Duration) -> Self {
        Self {
            start: Instant::now(),
            pace,
        }
    }
}

impl Clock for WallClock {
    fn now(&self) -> SimTime {
        self.start.elapsed().as_secs_f64()
    }

    fn advance(&mut self) {
        std::thread::sleep(self.pace);
    }
}
