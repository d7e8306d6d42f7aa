//! Fixed-rate frame pacing.

use std::{
    thread,
    time::{Duration, Instant},
};

use crate::RenderingError;

/// Blocks the caller until the next tick boundary of a fixed tick rate.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    /// Creates a clock that paces `ticks_per_second` ticks each second.
    pub fn new(ticks_per_second: u32) -> Result<Self, RenderingError> {
        if ticks_per_second == 0 {
            return Err(RenderingError::ZeroTickRate);
        }

        Ok(Self {
            interval: Duration::from_secs(1) / ticks_per_second,
            last_tick: None,
        })
    }

    /// Sleeps until at least one interval has passed since the previous tick.
    ///
    /// Returns the time elapsed since the previous tick; the first call returns
    /// immediately with [`Duration::ZERO`].
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let Some(last_tick) = self.last_tick else {
            self.last_tick = Some(now);
            return Duration::ZERO;
        };

        let deadline = last_tick + self.interval;
        if now < deadline {
            thread::sleep(deadline - now);
        }

        let ticked_at = Instant::now();
        self.last_tick = Some(ticked_at);
        ticked_at.duration_since(last_tick)
    }
}
