//! Wall-clock frame timer

use std::time::Instant;

/// Turns wall-clock time into per-frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time between the last two ticks in seconds
    pub delta_time: f64,
    /// Ticks so far
    frame_count: u64,
    /// Last tick instant, or creation time before the first tick
    last_instant: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl FrameClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock whose first delta is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: start,
        }
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Advance the clock to `now` and return the delta in seconds.
    /// An instant earlier than the previous tick counts as zero.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        self.delta_time = elapsed;
        self.total_time += elapsed;
        self.frame_count += 1;
        elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
